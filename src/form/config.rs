//! Form configuration and its builder.
//!
//! DESIGN
//! ======
//! Every lead form is the same controller driven by a different `FormConfig`:
//! an ordered field set, an endpoint descriptor and the confirmation text shown
//! on success. `FormConfig::builder` validates the shape once so the
//! controller can assume unique field names and a non-empty field set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::field::{FieldSpec, InputKind};
use crate::error::LeadFormError;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! We'll contact you soon.";

// =============================================================================
// ENDPOINT
// =============================================================================

/// Body encoding used when posting a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Json,
    Multipart,
}

/// Where and how a form is submitted.
///
/// `path` is either an absolute `http(s)://` URL or a path resolved against
/// the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
    pub encoding: Encoding,
}

impl Endpoint {
    #[must_use]
    pub fn json(path: impl Into<String>) -> Self {
        Self { path: path.into(), encoding: Encoding::Json }
    }

    #[must_use]
    pub fn multipart(path: impl Into<String>) -> Self {
        Self { path: path.into(), encoding: Encoding::Multipart }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }
}

// =============================================================================
// FORM CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub endpoint: Endpoint,
    pub success_message: String,
}

impl FormConfig {
    #[must_use]
    pub fn builder(id: impl Into<String>) -> FormConfigBuilder {
        FormConfigBuilder {
            id: id.into(),
            title: None,
            fields: Vec::new(),
            endpoint: None,
            success_message: None,
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name.as_str())
    }
}

pub struct FormConfigBuilder {
    id: String,
    title: Option<String>,
    fields: Vec<FieldSpec>,
    endpoint: Option<Endpoint>,
    success_message: Option<String>,
}

impl FormConfigBuilder {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    #[must_use]
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Validate and assemble the config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty id or field set, blank or duplicate
    /// field names, a select without options, or a missing endpoint.
    pub fn build(self) -> Result<FormConfig, LeadFormError> {
        if self.id.trim().is_empty() {
            return Err(LeadFormError::InvalidConfig("form id is empty".into()));
        }
        if self.fields.is_empty() {
            return Err(LeadFormError::InvalidConfig(format!("form {} has no fields", self.id)));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(LeadFormError::InvalidConfig(format!("form {} has a field with no name", self.id)));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(LeadFormError::InvalidConfig(format!(
                    "form {} declares field '{}' twice",
                    self.id, field.name
                )));
            }
            if let InputKind::Select { options } = &field.kind {
                if options.is_empty() {
                    return Err(LeadFormError::InvalidConfig(format!(
                        "select field '{}' of form {} has no options",
                        field.name, self.id
                    )));
                }
            }
        }

        let endpoint = self
            .endpoint
            .ok_or_else(|| LeadFormError::InvalidConfig(format!("form {} has no endpoint", self.id)))?;
        if endpoint.path.trim().is_empty() {
            return Err(LeadFormError::InvalidConfig(format!("form {} has an empty endpoint path", self.id)));
        }

        Ok(FormConfig {
            title: self.title.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            fields: self.fields,
            endpoint,
            success_message: self.success_message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
