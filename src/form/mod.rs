//! Lead forms — configuration, state machine and async controller.
//!
//! DESIGN
//! ======
//! One controller, many configurations. A `FormConfig` names the fields, which
//! of them are required and where the form posts. `LeadFormState` is the pure
//! state machine; `LeadForm` wraps it with a transport and a deadline.

pub mod config;
pub mod controller;
pub mod field;
pub mod state;
pub mod variants;

use std::sync::Arc;

pub use config::{Encoding, Endpoint, FormConfig, FormConfigBuilder};
pub use controller::LeadForm;
pub use field::{FieldSpec, InputKind, SelectOption};
pub use state::{Fields, FormSnapshot, LeadFormState, SubmissionStatus};

use crate::transport::LeadTransport;

/// Build a controller for `config` that submits through `transport`.
#[must_use]
pub fn create_lead_form(config: FormConfig, transport: Arc<dyn LeadTransport>) -> LeadForm {
    LeadForm::new(Arc::new(config), transport)
}
