//! Client for the homework review status API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiStatus;
use crate::io::HttpClient;
use crate::HomeworkError;

/// Source of homework review statuses
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ReviewApi: Send + Sync {
    /// Fetch the raw response envelope for submissions updated since `from_date`
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Review API client authenticating with an OAuth token
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        tracing::debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            tracing::debug!("Non-200 response from review API: {}", response.status);
            return Err(HomeworkError::IncorrectStatus(ApiStatus::from_code(
                response.status,
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!("Review API response is not JSON: {}", e);
            HomeworkError::from(e)
        })
    }
}
