//! BDD step definitions for startup feature

use std::sync::Arc;

use cucumber::{given, then, when};
use tokio::sync::RwLock;

use homework_notifier::io::{HttpClient, HttpResponse};
use homework_notifier::{Config, HomeworkBotBuilder};

use crate::world::{error_kind, NotifierWorld};

/// An HTTP client that records every request it is asked to make
#[derive(Debug)]
struct RecordingHttpClient {
    requests: Arc<RwLock<Vec<String>>>,
}

#[async_trait::async_trait]
impl HttpClient for RecordingHttpClient {
    async fn get(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_notifier::Result<HttpResponse> {
        self.requests.write().await.push(format!("GET {}", url));
        Ok(HttpResponse {
            status: 200,
            body: r#"{"homeworks": []}"#.to_string(),
        })
    }

    async fn post_form(
        &self,
        url: &str,
        _params: &[(&str, &str)],
    ) -> homework_notifier::Result<HttpResponse> {
        self.requests.write().await.push(format!("POST {}", url));
        Ok(HttpResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }
}

#[given("the environment provides every secret")]
fn all_secrets(world: &mut NotifierWorld) {
    for (name, value) in [
        ("PRACTICUM_TOKEN", "practicum-token"),
        ("TELEGRAM_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "42"),
    ] {
        world.secrets.insert(name.to_string(), value.to_string());
    }
}

#[given(expr = "the secret {word} is missing")]
fn secret_missing(world: &mut NotifierWorld, name: String) {
    world.secrets.remove(&name);
}

#[given(expr = "the secret {word} is empty")]
fn secret_empty(world: &mut NotifierWorld, name: String) {
    world.secrets.insert(name, String::new());
}

#[when("the notifier is built")]
fn build_notifier(world: &mut NotifierWorld) {
    let secrets = world.secrets.clone();
    let http = RecordingHttpClient {
        requests: Arc::clone(&world.http_requests),
    };

    let result = HomeworkBotBuilder::new(Config::default())
        .with_http_client(Arc::new(http))
        .with_secret_lookup(move |name: &str| secrets.get(name).cloned())
        .build();

    world.build_attempted = true;
    world.build_error = result.err();
}

#[then(expr = "startup should fail with a configuration error naming {word}")]
fn startup_fails(world: &mut NotifierWorld, name: String) {
    assert!(world.build_attempted, "notifier was never built");
    let err = world.build_error.as_ref().expect("startup succeeded");
    assert_eq!(error_kind(err), "Config");
    assert!(err.to_string().contains(&name), "{err}");
}

#[then("startup should succeed")]
fn startup_succeeds(world: &mut NotifierWorld) {
    assert!(world.build_attempted, "notifier was never built");
    if let Some(err) = &world.build_error {
        panic!("startup failed: {err}");
    }
}

#[then("no HTTP request should have been made")]
async fn no_requests(world: &mut NotifierWorld) {
    let requests = world.http_requests.read().await;
    assert!(requests.is_empty(), "requests: {:?}", *requests);
}
