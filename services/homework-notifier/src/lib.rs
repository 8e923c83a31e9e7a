//! Homework notifier - review status polling and notification service
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and forwards them to a Telegram chat.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod state;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Secrets};
pub use error::{HomeworkError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::{PracticumClient, ReviewApi};
use crate::state::PollState;
use crate::telegram::TelegramNotifier;

type SecretLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Assembles a [`HomeworkBot`] from configuration and optional test doubles
pub struct HomeworkBotBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    api: Option<Arc<dyn ReviewApi>>,
    notifier: Option<Arc<dyn Notifier>>,
    secret_lookup: Option<SecretLookup>,
    cancel: CancellationToken,
}

impl HomeworkBotBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            api: None,
            notifier: None,
            secret_lookup: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_review_api(mut self, api: Arc<dyn ReviewApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the environment as the source of secrets
    pub fn with_secret_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.secret_lookup = Some(Box::new(lookup));
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Check settings, resolve secrets and wire the engine. Fails before any
    /// network activity if a setting is invalid or a secret is missing.
    pub fn build(self) -> Result<HomeworkBot> {
        self.config.validate()?;

        let resolved = match &self.secret_lookup {
            Some(lookup) => Secrets::resolve(|name| lookup(name)),
            None => Secrets::from_env(),
        };
        let secrets = match resolved {
            Ok(secrets) => secrets,
            Err(e) => {
                tracing::error!("{}", e);
                return Err(e);
            }
        };
        tracing::debug!("Resolved secrets: {:?}", secrets);

        let http: Arc<dyn HttpClient> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestHttpClient::with_timeout(
                self.config.api.request_timeout(),
            )?),
        };

        let api: Arc<dyn ReviewApi> = self.api.unwrap_or_else(|| {
            Arc::new(PracticumClient::new(
                &self.config.api.endpoint,
                &secrets.practicum_token,
                Arc::clone(&http),
            ))
        });

        let notifier: Arc<dyn Notifier> = self.notifier.unwrap_or_else(|| {
            Arc::new(TelegramNotifier::new(
                &self.config.telegram,
                &secrets.telegram_token,
                &secrets.telegram_chat_id,
                Arc::clone(&http),
            ))
        });

        let engine = Engine::new(
            api,
            notifier,
            PollState::starting_now(),
            self.config.polling.interval(),
            self.cancel.clone(),
        );

        Ok(HomeworkBot {
            engine,
            cancel: self.cancel,
        })
    }
}

/// A wired poll loop ready to start
pub struct HomeworkBot {
    engine: Engine,
    cancel: CancellationToken,
}

impl HomeworkBot {
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until Ctrl-C or the cancellation token fires
    pub async fn start(mut self) -> Result<()> {
        let cancel_for_signal = self.cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    cancel_for_signal.cancel();
                }
                Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
            }
        });

        tracing::info!("Homework notifier started");
        self.engine.run().await;
        tracing::info!("Homework notifier stopped");

        Ok(())
    }
}

/// Run the notifier with secrets from the environment
pub async fn run(config: Config) -> Result<()> {
    HomeworkBotBuilder::new(config).build()?.start().await
}
