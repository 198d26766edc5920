//! Lead-capture forms for the Starlight Solar site.
//!
//! ARCHITECTURE
//! ============
//! - `form`: field sets, the submission state machine and its async controller
//! - `transport`: how a form reaches its endpoint (reqwest over HTTP)
//! - `modal`: open/close lifecycle for forms shown in a modal
//! - `intake`: a reference submission endpoint served with axum

pub mod error;
pub mod form;
pub mod intake;
pub mod modal;
pub mod transport;

pub use error::{ErrorCode, LeadFormError};
pub use form::{FormConfig, LeadForm, SubmissionStatus, create_lead_form};
pub use transport::{HttpTransport, LeadTransport, SubmitReply, TransportConfig, TransportError};
