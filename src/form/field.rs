//! Field specifications — what a form asks for and how it is rendered.

use serde::{Deserialize, Serialize};

// =============================================================================
// INPUT KIND
// =============================================================================

/// One option of a select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    /// Option whose submitted value is its label.
    #[must_use]
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self { value: label.clone(), label }
    }
}

/// Rendering hint for a field.
///
/// The controller never checks values against the kind. `Email` is the one
/// kind the intake endpoint inspects, and only as a soft shape check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Url,
    TextArea,
    Select { options: Vec<SelectOption> },
}

// =============================================================================
// FIELD SPEC
// =============================================================================

/// A single named field of a lead form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub kind: InputKind,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: InputKind) -> Self {
        Self { name: name.into(), label: label.into(), required: false, kind }
    }

    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::Text)
    }

    #[must_use]
    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::Email)
    }

    #[must_use]
    pub fn tel(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::Tel)
    }

    #[must_use]
    pub fn url(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::Url)
    }

    #[must_use]
    pub fn text_area(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, InputKind::TextArea)
    }

    #[must_use]
    pub fn select(name: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, InputKind::Select { options })
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
