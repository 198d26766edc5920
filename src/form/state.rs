//! Lead form state machine.
//!
//! DESIGN
//! ======
//! Pure and synchronous: no I/O, no clock. The async controller owns one of
//! these behind a mutex and calls `begin_submit` / `settle` around the
//! transport call. Transitions:
//!
//! ```text
//! Editing ──begin_submit──▶ Submitting ──settle──▶ Succeeded | Failed
//! Failed  ──begin_submit──▶ Submitting
//! Succeeded ──reset──▶ Editing
//! ```
//!
//! Each attempt carries a UUID so a settle that arrives for a different
//! attempt (for example after a reset) is ignored.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::FormConfig;
use crate::error::LeadFormError;
use crate::transport::{SubmitReply, TransportError};

/// Shown when the request never produced a usable reply.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Shown when the server rejects a submission without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Field name → current value.
pub type Fields = HashMap<String, String>;

// =============================================================================
// STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    /// Terminal statuses end a submission attempt.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Copy of the form state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub status: SubmissionStatus,
    pub message: Option<String>,
    pub fields: Fields,
}

/// An accepted submission attempt: its id and the field values to send.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub fields: Fields,
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug)]
pub struct LeadFormState {
    config: Arc<FormConfig>,
    fields: Fields,
    status: SubmissionStatus,
    message: Option<String>,
    in_flight: Option<Uuid>,
}

impl LeadFormState {
    #[must_use]
    pub fn new(config: Arc<FormConfig>) -> Self {
        let fields = empty_fields(&config);
        Self { config, fields, status: SubmissionStatus::Editing, message: None, in_flight: None }
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot { status: self.status, message: self.message.clone(), fields: self.fields.clone() }
    }

    /// Update one field. Status and message are left alone.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `name` is not in the configured field set.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), LeadFormError> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(LeadFormError::UnknownField { form: self.config.id.clone(), field: name.to_string() }),
        }
    }

    /// Required fields that are currently empty, in declaration order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<String> {
        self.config
            .required_fields()
            .filter(|name| self.fields.get(*name).is_none_or(String::is_empty))
            .map(str::to_string)
            .collect()
    }

    /// Enter `Submitting` and hand back the values to send.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitting` while another attempt is in flight
    /// - `AlreadySubmitted` after a success that has not been reset
    /// - `MissingRequired` if any required field is empty
    pub fn begin_submit(&mut self) -> Result<Submission, LeadFormError> {
        match self.status {
            SubmissionStatus::Submitting => return Err(LeadFormError::AlreadySubmitting),
            SubmissionStatus::Succeeded => return Err(LeadFormError::AlreadySubmitted),
            SubmissionStatus::Editing | SubmissionStatus::Failed => {}
        }

        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(LeadFormError::MissingRequired { fields: missing });
        }

        let id = Uuid::new_v4();
        self.status = SubmissionStatus::Submitting;
        self.message = None;
        self.in_flight = Some(id);
        Ok(Submission { id, fields: self.fields.clone() })
    }

    /// Apply the outcome of attempt `id`.
    ///
    /// Returns `false` and changes nothing when `id` is not the attempt in
    /// flight.
    pub fn settle(&mut self, id: Uuid, outcome: Result<SubmitReply, TransportError>) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(reply) if reply.is_success() => {
                self.status = SubmissionStatus::Succeeded;
                self.message = Some(self.config.success_message.clone());
                for value in self.fields.values_mut() {
                    value.clear();
                }
            }
            Ok(reply) => {
                self.status = SubmissionStatus::Failed;
                let message = reply.message.filter(|m| !m.trim().is_empty());
                self.message = Some(message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()));
            }
            Err(_) => {
                self.status = SubmissionStatus::Failed;
                self.message = Some(NETWORK_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Start a fresh cycle: empty fields, no message, `Editing`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitting` while an attempt is in flight.
    pub fn reset(&mut self) -> Result<(), LeadFormError> {
        if self.status == SubmissionStatus::Submitting {
            return Err(LeadFormError::AlreadySubmitting);
        }
        self.fields = empty_fields(&self.config);
        self.status = SubmissionStatus::Editing;
        self.message = None;
        Ok(())
    }
}

fn empty_fields(config: &FormConfig) -> Fields {
    config.fields.iter().map(|f| (f.name.clone(), String::new())).collect()
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
