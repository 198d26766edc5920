//! Transport — delivers a form's fields to its submission endpoint.
//!
//! DESIGN
//! ======
//! `LeadTransport` is the seam between the controller and the network. The
//! controller only needs "post these fields, give me the reply or a transport
//! error"; `HttpTransport` implements that over reqwest and tests substitute
//! in-memory mocks.

pub mod config;
pub mod http;

use serde::{Deserialize, Serialize};

pub use config::{TransportConfig, TransportTimeouts};
pub use http::HttpTransport;

use crate::error::ErrorCode;
use crate::form::config::Endpoint;
use crate::form::state::Fields;

// =============================================================================
// REPLY
// =============================================================================

/// Application-level verdict returned by a submission endpoint.
///
/// Only `status == "success"` counts as success. A missing status is treated
/// as a rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReply {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitReply {
    pub const SUCCESS: &'static str = "success";
    pub const ERROR: &'static str = "error";

    #[must_use]
    pub fn success() -> Self {
        Self { status: Self::SUCCESS.into(), message: None }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { status: Self::ERROR.into(), message: Some(message.into()) }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Failures that prevent a usable reply from reaching the controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// No reply before the deadline.
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Non-success HTTP status with a body that is not a submit reply.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16, body: String },

    /// Success HTTP status with a body that is not a submit reply.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_REQUEST",
            Self::Timeout { .. } => "E_TIMEOUT",
            Self::HttpStatus { .. } => "E_HTTP_STATUS",
            Self::Parse(_) => "E_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Timeout { .. } | Self::HttpStatus { status: 429 | 500..=599, .. }
        )
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Posts a form's fields to an endpoint.
#[async_trait::async_trait]
pub trait LeadTransport: Send + Sync {
    async fn submit(&self, endpoint: &Endpoint, fields: &Fields) -> Result<SubmitReply, TransportError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
