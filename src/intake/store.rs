//! In-memory lead store shared by intake handlers.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::form::{FormConfig, InputKind};
use crate::form::state::Fields;

/// An accepted lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub form_id: String,
    pub fields: Fields,
    /// Milliseconds since Unix epoch.
    pub received_at_ms: i64,
}

impl Lead {
    #[must_use]
    pub fn new(form_id: impl Into<String>, fields: Fields) -> Self {
        Self { id: Uuid::new_v4(), form_id: form_id.into(), fields, received_at_ms: now_ms() }
    }
}

/// Why a lead was not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRejection {
    DuplicateEmail,
}

// =============================================================================
// INTAKE STATE
// =============================================================================

/// Shared intake state, injected into handlers via the `State` extractor.
///
/// Leads are never evicted: the list grows for the life of the process and
/// each `insert` scans it for a duplicate email.
#[derive(Clone)]
pub struct IntakeState {
    pub forms: Arc<Vec<Arc<FormConfig>>>,
    leads: Arc<RwLock<Vec<Lead>>>,
}

impl IntakeState {
    #[must_use]
    pub fn new(forms: Vec<FormConfig>) -> Self {
        Self {
            forms: Arc::new(forms.into_iter().map(Arc::new).collect()),
            leads: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Store `lead` unless the same form already holds a lead with the same
    /// email address (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` when such a lead exists.
    pub async fn insert(&self, form: &FormConfig, lead: Lead) -> Result<Uuid, InsertRejection> {
        let mut leads = self.leads.write().await;
        if let Some(email) = email_of(form, &lead.fields) {
            let taken = leads
                .iter()
                .filter(|l| l.form_id == lead.form_id)
                .filter_map(|l| email_of(form, &l.fields))
                .any(|existing| existing.eq_ignore_ascii_case(email));
            if taken {
                return Err(InsertRejection::DuplicateEmail);
            }
        }
        let id = lead.id;
        leads.push(lead);
        Ok(id)
    }

    /// Snapshot of accepted leads, oldest first.
    pub async fn leads(&self) -> Vec<Lead> {
        self.leads.read().await.clone()
    }
}

/// The trimmed value of the form's first email field, if non-empty.
fn email_of<'a>(form: &FormConfig, fields: &'a Fields) -> Option<&'a str> {
    let field = form.fields.iter().find(|f| f.kind == InputKind::Email)?;
    fields
        .get(&field.name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
