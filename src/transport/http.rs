//! HTTP transport over reqwest.
//!
//! Thin wrapper: encode, post, read the body. Reply mapping lives in
//! `parse_reply` so it can be tested without a server.

use std::time::Duration;

use super::config::TransportConfig;
use super::{LeadTransport, SubmitReply, TransportError};
use crate::form::config::{Encoding, Endpoint};
use crate::form::state::Fields;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    request_secs: u64,
}

impl HttpTransport {
    /// Build the reqwest client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the client cannot be constructed.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url, request_secs: config.timeouts.request_secs })
    }

    /// Absolute URL for `endpoint`.
    #[must_use]
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        if endpoint.is_absolute() {
            return endpoint.path.clone();
        }
        let path = endpoint.path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }

    fn map_send_error(&self, e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout { secs: self.request_secs }
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl LeadTransport for HttpTransport {
    async fn submit(&self, endpoint: &Endpoint, fields: &Fields) -> Result<SubmitReply, TransportError> {
        let url = self.url_for(endpoint);
        let request = self.http.post(&url);
        let request = match endpoint.encoding {
            Encoding::Json => request.json(fields),
            Encoding::Multipart => request.multipart(multipart_form(fields)),
        };

        let response = request.send().await.map_err(|e| self.map_send_error(&e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.map_send_error(&e))?;

        tracing::debug!(%url, status, "submission endpoint replied");
        parse_reply(status, &text)
    }
}

fn multipart_form(fields: &Fields) -> reqwest::multipart::Form {
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .fold(reqwest::multipart::Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()))
}

// =============================================================================
// PARSING
// =============================================================================

/// Map an HTTP status and body to a reply.
///
/// The body wins over the status: a 4xx carrying `{"status":"error",...}` is
/// an application rejection, not a transport failure.
fn parse_reply(status: u16, body: &str) -> Result<SubmitReply, TransportError> {
    match serde_json::from_str::<SubmitReply>(body) {
        Ok(reply) => Ok(reply),
        Err(_) if !(200..300).contains(&status) => Err(TransportError::HttpStatus { status, body: body.to_string() }),
        Err(e) => Err(TransportError::Parse(e.to_string())),
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
