//! Lead form controller — the async face of a form.
//!
//! DESIGN
//! ======
//! `LeadForm` is a cheap `Clone` handle over shared state, so a view, a
//! modal host and a submit button can all hold one. The state mutex is only
//! held for the synchronous `begin_submit` / `settle` steps, never across the
//! transport call, which is what lets a second `submit` observe `Submitting`
//! and bail out before touching the network.
//!
//! Every attempt settles. The transport call runs under a deadline, and an
//! `InFlight` guard settles the attempt as a network failure if the submit
//! future is dropped before the reply arrives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use super::config::FormConfig;
use super::state::{FormSnapshot, LeadFormState, SubmissionStatus};
use crate::error::{ErrorCode, LeadFormError};
use crate::transport::{LeadTransport, TransportError};

pub const DEFAULT_SUBMIT_DEADLINE: Duration = Duration::from_secs(30);

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Clone)]
pub struct LeadForm {
    config: Arc<FormConfig>,
    state: Arc<Mutex<LeadFormState>>,
    transport: Arc<dyn LeadTransport>,
    deadline: Duration,
}

impl LeadForm {
    #[must_use]
    pub fn new(config: Arc<FormConfig>, transport: Arc<dyn LeadTransport>) -> Self {
        let state = Arc::new(Mutex::new(LeadFormState::new(Arc::clone(&config))));
        Self { config, state, transport, deadline: DEFAULT_SUBMIT_DEADLINE }
    }

    /// Override how long a submission may stay in flight.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.lock().status()
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn missing_required(&self) -> Vec<String> {
        self.lock().missing_required()
    }

    /// Update one field's value.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `name` is not part of this form.
    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), LeadFormError> {
        self.lock().set_field(name, value)
    }

    /// Clear fields and message and return to `Editing`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitting` while a submission is in flight.
    pub fn reset(&self) -> Result<(), LeadFormError> {
        self.lock().reset()
    }

    /// Submit the current field values and wait for the outcome.
    ///
    /// Returns the terminal status (`Succeeded` or `Failed`); the status
    /// message is available from [`LeadForm::snapshot`].
    ///
    /// # Errors
    ///
    /// Rejects without any network call when a submission is already in
    /// flight, the form already succeeded, or a required field is empty.
    pub async fn submit(&self) -> Result<SubmissionStatus, LeadFormError> {
        let submission = self.lock().begin_submit()?;
        let mut guard = InFlight { state: &self.state, id: submission.id, armed: true };

        info!(form = %self.config.id, submission = %submission.id, "lead submission started");

        let outcome = match tokio::time::timeout(
            self.deadline,
            self.transport.submit(&self.config.endpoint, &submission.fields),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(TransportError::Timeout { secs: whole_secs(self.deadline) }),
        };

        match &outcome {
            Ok(reply) if reply.is_success() => {}
            Ok(reply) => {
                warn!(form = %self.config.id, submission = %submission.id, message = ?reply.message, "lead rejected by endpoint");
            }
            Err(e) => {
                warn!(
                    form = %self.config.id,
                    submission = %submission.id,
                    code = e.error_code(),
                    retryable = e.retryable(),
                    error = %e,
                    "lead submission failed"
                );
            }
        }

        let status = {
            let mut state = self.lock();
            state.settle(submission.id, outcome);
            state.status()
        };
        guard.armed = false;

        info!(form = %self.config.id, submission = %submission.id, ?status, "lead submission settled");
        Ok(status)
    }

    fn lock(&self) -> MutexGuard<'_, LeadFormState> {
        lock_state(&self.state)
    }
}

/// `d` in seconds, rounded up so a sub-second deadline never reports `0s`.
fn whole_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

fn lock_state(state: &Mutex<LeadFormState>) -> MutexGuard<'_, LeadFormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// IN-FLIGHT GUARD
// =============================================================================

/// Settles an abandoned attempt so the form never stays `Submitting`.
struct InFlight<'a> {
    state: &'a Mutex<LeadFormState>,
    id: Uuid,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let abandoned = Err(TransportError::Request("submission abandoned before a reply arrived".into()));
            if lock_state(self.state).settle(self.id, abandoned) {
                warn!(submission = %self.id, "lead submission abandoned");
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
