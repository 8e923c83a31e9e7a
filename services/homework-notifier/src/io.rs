//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

use crate::HomeworkError;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client that gives up on any request after `timeout`
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HomeworkError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

/// Origin and last path segment of `url`. Bot tokens live in the middle of
/// the path, so full URLs never reach logs or error messages.
pub fn loggable_url(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => {
            let last = parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .unwrap_or("");
            format!("{}/.../{}", parsed.origin().ascii_serialization(), last)
        }
        Err(_) => "<invalid url>".to_string(),
    }
}

fn request_error(method: &str, url: &str, e: reqwest::Error) -> HomeworkError {
    let target = loggable_url(url);
    if e.is_timeout() {
        HomeworkError::Timeout(format!("{} {}", method, target))
    } else {
        HomeworkError::Http(format!("{} {} failed: {}", method, target, e.without_url()))
    }
}

async fn read_response(
    method: &str,
    url: &str,
    response: reqwest::Response,
) -> crate::Result<HttpResponse> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| request_error(method, url, e))?;

    tracing::debug!(
        "{} {} -> {} ({} bytes)",
        method,
        loggable_url(url),
        status,
        body.len()
    );
    Ok(HttpResponse { status, body })
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let target = reqwest::Url::parse_with_params(url, query)
            .map_err(|e| HomeworkError::Http(format!("Invalid URL: {}", e)))?;
        tracing::debug!("GET {}", loggable_url(url));

        let mut request = self.client.get(target);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_error("GET", url, e))?;
        read_response("GET", url, response).await
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        tracing::debug!("POST {}", loggable_url(url));
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| request_error("POST", url, e))?;
        read_response("POST", url, response).await
    }
}
