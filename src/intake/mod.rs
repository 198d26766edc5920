//! Intake — a reference submission endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site's forms post to small server scripts that answer
//! `{"status":"success"}` or `{"status":"error","message":...}`. This module
//! serves the same contract with axum so the forms can be exercised locally
//! and end to end in tests. Each registered form gets a POST route at its
//! endpoint path; leads are kept in memory only.

pub mod handlers;
pub mod store;

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::IntakeReply;
pub use store::{IntakeState, Lead};

/// Assemble the intake router for every form in `state`.
///
/// Forms whose endpoint is an absolute URL point at some other server and
/// are skipped. When two forms share an endpoint path, the first one listed
/// owns the route and the later ones are skipped.
pub fn router(state: IntakeState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/forms", get(handlers::list_forms))
        .route("/api/leads", get(handlers::list_leads))
        .route("/healthz", get(handlers::healthz));

    let mut registered = HashSet::new();
    for form in state.forms.iter() {
        if form.endpoint.is_absolute() || !form.endpoint.path.starts_with('/') {
            tracing::warn!(form = %form.id, path = %form.endpoint.path, "endpoint not servable; skipping");
            continue;
        }
        if !registered.insert(form.endpoint.path.as_str()) {
            tracing::warn!(form = %form.id, path = %form.endpoint.path, "endpoint path already routed; skipping");
            continue;
        }
        let form = Arc::clone(form);
        let path = form.endpoint.path.clone();
        router = router.route(
            &path,
            post(move |State(state): State<IntakeState>, request: Request| {
                let form = Arc::clone(&form);
                async move { handlers::accept_lead(state, form, request).await }
            }),
        );
    }

    router.layer(cors).layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
#[path = "e2e_test.rs"]
mod e2e_test;
