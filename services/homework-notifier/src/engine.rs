//! Engine: polls the review API, detects status changes, and dispatches notifications

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::notifier::{deliver, Notifier};
use crate::practicum::ReviewApi;
use crate::state::PollState;
use crate::{response, status, HomeworkError};

/// Prefix of every diagnostic message sent to the chat
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

const FAILURE_STREAK_WARNING: u32 = 5;

/// What a single poll iteration did
#[derive(Debug)]
pub enum IterationOutcome {
    /// The status message changed and was handed to the notifier
    StatusSent(String),
    /// The status message matched the last one sent
    StatusUnchanged,
    /// The iteration failed; `reported` is true if the diagnostic was new and sent
    Failed {
        error: HomeworkError,
        reported: bool,
    },
}

/// The engine owns the poll cursor and dedup caches for one tracked submission
pub struct Engine {
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn Notifier>,
    state: PollState,
    interval: Duration,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("notifier", &self.notifier)
            .field("state", &self.state)
            .field("interval", &self.interval)
            .finish()
    }
}

impl Engine {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        notifier: Arc<dyn Notifier>,
        state: PollState,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            state,
            interval,
            cancel,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Fetch, validate, advance the cursor, and render the newest record
    pub async fn fetch_status(&mut self) -> crate::Result<String> {
        let envelope = self.api.fetch(self.state.cursor).await?;
        let records = response::validate(&envelope)?;

        match response::current_date(&envelope) {
            Some(current_date) => self.state.cursor = current_date,
            None => tracing::warn!(
                "Response has no current_date, keeping cursor at {}",
                self.state.cursor
            ),
        }

        let record = records.first().ok_or(HomeworkError::EmptyResult)?;
        status::render(record)
    }

    /// Run one fetch/compare/notify cycle. Never fails: errors are reported
    /// through the notifier at most once per distinct message.
    pub async fn run_once(&mut self) -> IterationOutcome {
        match self.fetch_status().await {
            Ok(message) => {
                self.state.record_success();
                if self.state.last_status.observe(&message) {
                    deliver(self.notifier.as_ref(), &message).await;
                    IterationOutcome::StatusSent(message)
                } else {
                    tracing::debug!("Status unchanged, nothing to send");
                    IterationOutcome::StatusUnchanged
                }
            }
            Err(error) => {
                let streak = self.state.record_failure();
                if streak == FAILURE_STREAK_WARNING {
                    tracing::warn!("{} consecutive failed polls", streak);
                }

                let diagnostic = diagnostic(&error);
                tracing::error!("{}", diagnostic);

                let reported = self.state.last_error.observe(&diagnostic);
                if reported {
                    deliver(self.notifier.as_ref(), &diagnostic).await;
                } else {
                    tracing::debug!("Same failure already reported, not resending");
                }
                IterationOutcome::Failed { error, reported }
            }
        }
    }

    /// Poll until the cancellation token is triggered
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling every {:?} starting from {}",
            self.interval,
            self.state.cursor
        );

        loop {
            let outcome = self.run_once().await;
            tracing::debug!("Poll finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}

/// Text sent to the chat when an iteration fails
pub fn diagnostic(error: &HomeworkError) -> String {
    format!("{}{}", FAILURE_PREFIX, error)
}
