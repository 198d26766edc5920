//! Modal host — owns a form only while the modal is open.
//!
//! Opening creates a fresh controller; closing drops it, so nothing typed
//! into a closed modal survives to the next open.

use std::sync::Arc;

use crate::error::LeadFormError;
use crate::form::{FormConfig, LeadForm, SubmissionStatus};
use crate::transport::LeadTransport;

pub struct FormModal {
    config: Arc<FormConfig>,
    transport: Arc<dyn LeadTransport>,
    form: Option<LeadForm>,
    close_on_success: bool,
}

impl FormModal {
    #[must_use]
    pub fn new(config: FormConfig, transport: Arc<dyn LeadTransport>) -> Self {
        Self { config: Arc::new(config), transport, form: None, close_on_success: false }
    }

    /// Close the modal once a submission succeeds.
    #[must_use]
    pub fn close_on_success(mut self, close: bool) -> Self {
        self.close_on_success = close;
        self
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    /// The open form, if any.
    #[must_use]
    pub fn form(&self) -> Option<&LeadForm> {
        self.form.as_ref()
    }

    /// Open the modal. Already open: returns the current form unchanged.
    pub fn open(&mut self) -> &LeadForm {
        let config = &self.config;
        let transport = &self.transport;
        self.form
            .get_or_insert_with(|| LeadForm::new(Arc::clone(config), Arc::clone(transport)))
    }

    /// Close the modal and discard its form state.
    pub fn close(&mut self) {
        if self.form.take().is_some() {
            tracing::debug!(form = %self.config.id, "modal closed");
        }
    }

    /// Submit the open form, closing the modal on success when configured.
    ///
    /// # Errors
    ///
    /// Returns `ModalClosed` when no form is open, otherwise whatever
    /// [`LeadForm::submit`] rejects with.
    pub async fn submit(&mut self) -> Result<SubmissionStatus, LeadFormError> {
        let form = self.form.clone().ok_or(LeadFormError::ModalClosed)?;
        let status = form.submit().await?;
        if status == SubmissionStatus::Succeeded && self.close_on_success {
            self.close();
        }
        Ok(status)
    }
}

#[cfg(test)]
#[path = "modal_test.rs"]
mod tests;
