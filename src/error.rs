//! Error types for lead forms.
//!
//! DESIGN
//! ======
//! Two enums, split by concern: `LeadFormError` covers the controller, form
//! configuration and modal host; `TransportError` lives with the transport.
//! Both carry a grepable code and a retryable flag through [`ErrorCode`] so
//! logs and the CLI can report failures uniformly.

// =============================================================================
// ERROR CODE
// =============================================================================

/// Stable machine-readable code attached to an error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// LEAD FORM ERROR
// =============================================================================

/// Errors produced by form configuration and the lead form controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadFormError {
    /// The field name is not part of the form's configured field set.
    #[error("unknown field '{field}' for form {form}")]
    UnknownField { form: String, field: String },

    /// One or more required fields are empty.
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingRequired { fields: Vec<String> },

    /// A submission for this form is already in flight.
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    /// The form was submitted successfully and must be reset first.
    #[error("form already submitted; reset before submitting again")]
    AlreadySubmitted,

    /// The form configuration is malformed.
    #[error("invalid form config: {0}")]
    InvalidConfig(String),

    /// The modal hosting the form is closed.
    #[error("modal is closed")]
    ModalClosed,
}

impl ErrorCode for LeadFormError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "E_UNKNOWN_FIELD",
            Self::MissingRequired { .. } => "E_MISSING_REQUIRED",
            Self::AlreadySubmitting => "E_ALREADY_SUBMITTING",
            Self::AlreadySubmitted => "E_ALREADY_SUBMITTED",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::ModalClosed => "E_MODAL_CLOSED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::MissingRequired { .. } | Self::AlreadySubmitting)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
