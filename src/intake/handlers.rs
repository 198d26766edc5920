//! Intake handlers — receive, validate and store leads.
//!
//! Every rejection answers with `{"status":"error","message":...}` so form
//! controllers can show the server's reason verbatim.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::store::{InsertRejection, IntakeState, Lead};
use crate::form::state::Fields;
use crate::form::{FormConfig, InputKind};
use crate::transport::SubmitReply;

pub const ACCEPTED_MESSAGE: &str = "Lead received.";
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid form payload.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already used";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeReply {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl IntakeReply {
    fn accepted(id: Uuid) -> Self {
        Self { status: SubmitReply::SUCCESS.into(), message: ACCEPTED_MESSAGE.into(), id: Some(id) }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self { status: SubmitReply::ERROR.into(), message: message.into(), id: None }
    }
}

type Reply = (StatusCode, Json<IntakeReply>);

fn reject(status: StatusCode, message: impl Into<String>) -> Reply {
    (status, Json(IntakeReply::rejected(message)))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST <endpoint>` — accept one lead for `form`.
pub async fn accept_lead(state: IntakeState, form: Arc<FormConfig>, request: Request) -> Reply {
    let raw = match decode_fields(request).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(form = %form.id, error = %e, "undecodable lead payload");
            return reject(StatusCode::BAD_REQUEST, INVALID_PAYLOAD_MESSAGE);
        }
    };

    let fields = normalize_fields(&form, raw);
    if let Err((status, message)) = validate(&form, &fields) {
        warn!(form = %form.id, %message, "lead rejected");
        return reject(status, message);
    }

    match state.insert(&form, Lead::new(form.id.clone(), fields)).await {
        Ok(id) => {
            info!(form = %form.id, lead = %id, "lead accepted");
            (StatusCode::OK, Json(IntakeReply::accepted(id)))
        }
        Err(InsertRejection::DuplicateEmail) => {
            warn!(form = %form.id, "duplicate lead email");
            reject(StatusCode::CONFLICT, DUPLICATE_EMAIL_MESSAGE)
        }
    }
}

/// `GET /api/forms` — schemas of every served form.
pub async fn list_forms(State(state): State<IntakeState>) -> Json<Vec<FormConfig>> {
    Json(state.forms.iter().map(|f| f.as_ref().clone()).collect())
}

/// `GET /api/leads` — accepted leads, oldest first.
pub async fn list_leads(State(state): State<IntakeState>) -> Json<Vec<Lead>> {
    Json(state.leads().await)
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// DECODING
// =============================================================================

async fn decode_fields(request: Request) -> Result<Fields, String> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await.map_err(|e| e.body_text())?;
        let mut fields = Fields::new();
        while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field.text().await.map_err(|e| e.body_text())?;
            fields.insert(name, value);
        }
        Ok(fields)
    } else {
        let Json(fields) = Json::<Fields>::from_request(request, &()).await.map_err(|e| e.body_text())?;
        Ok(fields)
    }
}

/// Keep only configured fields; absent ones become empty strings.
fn normalize_fields(form: &FormConfig, mut raw: Fields) -> Fields {
    form.fields
        .iter()
        .map(|f| (f.name.clone(), raw.remove(&f.name).unwrap_or_default()))
        .collect()
}

// =============================================================================
// VALIDATION
// =============================================================================

fn validate(form: &FormConfig, fields: &Fields) -> Result<(), (StatusCode, String)> {
    let missing: Vec<&str> = form
        .required_fields()
        .filter(|name| fields.get(*name).is_none_or(|v| v.trim().is_empty()))
        .collect();
    if !missing.is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, format!("Missing required fields: {}", missing.join(", "))));
    }

    let bad_email = form
        .fields
        .iter()
        .filter(|f| f.kind == InputKind::Email)
        .filter_map(|f| fields.get(&f.name))
        .any(|v| !v.trim().is_empty() && !looks_like_email(v.trim()));
    if bad_email {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, INVALID_EMAIL_MESSAGE.to_string()));
    }

    Ok(())
}

/// Loose `local@domain.tld` shape check.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
#[path = "handlers_test.rs"]
mod tests;
