//! Polls for a booking confirmation after the customer returns from the
//! payment provider. The backend only creates the confirmation record once
//! the provider's webhook lands, so the first request usually races it and
//! comes back 403; the poller retries on a fixed delay until the record
//! exists or the attempts run out.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::BackendClient;
use crate::error::ApiError;
use crate::models::BookingConfirmation;

/// Shown for both terminal failures. The payment has usually gone through
/// by this point, so the copy must not claim it failed.
pub const CONFIRMATION_FALLBACK_MESSAGE: &str = "We couldn't load your booking confirmation. \
     Your payment may still have been processed; please check your email for a receipt \
     before trying again.";

/// Fixed-delay retry schedule. The wait covers one-off webhook lag, not a
/// flaky backend, so there is no exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the initial request included.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Course checkout lands back on the site almost immediately.
    pub const COURSE: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        delay: Duration::from_millis(1500),
    };

    /// Package webhooks do more bookkeeping and take a moment longer.
    pub const PACKAGE: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        delay: Duration::from_secs(3),
    };

    /// Renewals arrive through an email link, so nobody is staring at a
    /// spinner and the schedule can afford to be patient.
    pub const PACKAGE_RENEWAL: RetryPolicy = RetryPolicy {
        max_attempts: 10,
        delay: Duration::from_secs(5),
    };
}

/// Which confirmation endpoint to poll. Package confirmations carry the
/// access token from the redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    Course { booking_id: String },
    Package { booking_id: String, token: String },
}

impl ConfirmationRequest {
    pub fn booking_id(&self) -> &str {
        match self {
            ConfirmationRequest::Course { booking_id }
            | ConfirmationRequest::Package { booking_id, .. } => booking_id,
        }
    }
}

/// Terminal poll outcomes. Exhaustion and hard failures are kept apart for
/// logs and tests even though the user sees the same message for both.
#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error("confirmation was not ready after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error(transparent)]
    Permanent(#[from] ApiError),
}

impl ConfirmationError {
    pub fn user_message(&self) -> &'static str {
        CONFIRMATION_FALLBACK_MESSAGE
    }
}

/// Progress of a spawned poll, for spinner-style consumers.
#[derive(Debug, Clone)]
pub enum PollState {
    Pending { attempt: u32 },
    Succeeded(BookingConfirmation),
    Failed { message: String },
}

/// Retries a confirmation lookup until it resolves.
pub struct ConfirmationPoller {
    client: Arc<dyn BackendClient>,
    policy: RetryPolicy,
}

impl ConfirmationPoller {
    pub fn new(client: Arc<dyn BackendClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Polls inline until the confirmation is ready, a non-transient error
    /// comes back, or the policy's attempts are used up.
    pub async fn run(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<BookingConfirmation, ConfirmationError> {
        poll_loop(self.client.as_ref(), self.policy, request, None).await
    }

    /// Runs the poll on a background task and hands back a handle publishing
    /// `PollState` updates. Dropping the handle aborts the task, so a
    /// navigated-away caller does not keep hitting the backend.
    pub fn spawn(self, request: ConfirmationRequest) -> ConfirmationTask {
        let (tx, rx) = watch::channel(PollState::Pending { attempt: 1 });
        let handle = tokio::spawn(async move {
            let outcome = poll_loop(self.client.as_ref(), self.policy, &request, Some(&tx)).await;
            let state = match outcome {
                Ok(confirmation) => PollState::Succeeded(confirmation),
                Err(err) => PollState::Failed {
                    message: err.user_message().to_string(),
                },
            };
            tx.send(state).ok();
        });
        ConfirmationTask { state: rx, handle }
    }
}

async fn poll_loop(
    client: &dyn BackendClient,
    policy: RetryPolicy,
    request: &ConfirmationRequest,
    progress: Option<&watch::Sender<PollState>>,
) -> Result<BookingConfirmation, ConfirmationError> {
    let mut attempt: u32 = 1;
    loop {
        if let Some(tx) = progress {
            tx.send(PollState::Pending { attempt }).ok();
        }

        let result = match request {
            ConfirmationRequest::Course { booking_id } => {
                client.fetch_confirmation(booking_id).await
            }
            ConfirmationRequest::Package { booking_id, token } => {
                client.fetch_package_confirmation(booking_id, token).await
            }
        };

        match result {
            Ok(confirmation) => {
                info!(
                    "confirmation {} ready after {} attempt(s)",
                    confirmation.reference, attempt
                );
                return Ok(confirmation);
            }
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                debug!(
                    "confirmation for booking {} not ready (attempt {}/{}), retrying in {:?}",
                    request.booking_id(),
                    attempt,
                    policy.max_attempts,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) if err.is_transient() => {
                warn!(
                    "confirmation for booking {} still pending after {} attempts, giving up",
                    request.booking_id(),
                    attempt
                );
                return Err(ConfirmationError::Exhausted { attempts: attempt });
            }
            Err(err) => {
                warn!(
                    "confirmation lookup for booking {} failed: {}",
                    request.booking_id(),
                    err
                );
                return Err(ConfirmationError::Permanent(err));
            }
        }
    }
}

/// Handle to a spawned confirmation poll.
pub struct ConfirmationTask {
    state: watch::Receiver<PollState>,
    handle: JoinHandle<()>,
}

impl ConfirmationTask {
    /// Receiver that moves through `Pending` updates into exactly one
    /// terminal state.
    pub fn state(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Waits for the terminal state.
    pub async fn wait(mut self) -> PollState {
        loop {
            let current = self.state.borrow_and_update().clone();
            match current {
                PollState::Pending { .. } => {
                    if self.state.changed().await.is_err() {
                        // Sender gone without a terminal state, which only
                        // happens if the task was aborted externally.
                        return PollState::Failed {
                            message: CONFIRMATION_FALLBACK_MESSAGE.to_string(),
                        };
                    }
                }
                terminal => return terminal,
            }
        }
    }
}

impl Drop for ConfirmationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
