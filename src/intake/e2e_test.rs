//! End to end: controller → HttpTransport → intake router on a real socket.

use super::*;
use crate::form::state::NETWORK_ERROR_MESSAGE;
use crate::form::{LeadForm, SubmissionStatus, variants};
use crate::transport::{HttpTransport, TransportConfig, TransportTimeouts};

struct TestServer {
    base_url: String,
    state: IntakeState,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn spawn_intake() -> TestServer {
    let state = IntakeState::new(variants::all().unwrap());
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("intake server failed");
    });
    TestServer { base_url: format!("http://{addr}"), state, handle }
}

fn transport(base_url: &str) -> Arc<HttpTransport> {
    let config = TransportConfig::new(base_url).with_timeouts(TransportTimeouts { request_secs: 5, connect_secs: 2 });
    Arc::new(HttpTransport::new(config).unwrap())
}

fn form(id: &str, server: &TestServer) -> LeadForm {
    let config = variants::by_id(id).unwrap().expect("known variant");
    LeadForm::new(Arc::new(config), transport(&server.base_url))
}

fn fill_contact(form: &LeadForm, email: &str) {
    form.set_field("name", "Jane Doe").unwrap();
    form.set_field("email", email).unwrap();
    form.set_field("subject", "general-inquiry").unwrap();
    form.set_field("message", "Hi").unwrap();
}

#[tokio::test]
async fn contact_form_json_round_trip_stores_lead() {
    let server = spawn_intake().await;
    let contact = form(variants::CONTACT, &server);
    fill_contact(&contact, "jane@x.com");

    assert_eq!(contact.submit().await.unwrap(), SubmissionStatus::Succeeded);
    assert!(contact.snapshot().fields.values().all(String::is_empty));

    let leads = server.state.leads().await;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].form_id, "contact");
    assert_eq!(leads[0].fields["name"], "Jane Doe");
    assert_eq!(leads[0].fields["phone"], "");
}

#[tokio::test]
async fn builder_form_multipart_round_trip_stores_lead() {
    let server = spawn_intake().await;
    let builder = form(variants::BUILDER_PARTNERSHIP, &server);
    builder.set_field("builderName", "Maple Homes").unwrap();
    builder.set_field("contactPerson", "Sam Lee").unwrap();
    builder.set_field("phone", "604-555-0199").unwrap();
    builder.set_field("email", "sam@maplehomes.ca").unwrap();
    builder.set_field("homeVolume", "120").unwrap();

    assert_eq!(builder.submit().await.unwrap(), SubmissionStatus::Succeeded);

    let leads = server.state.leads().await;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].form_id, "builder-partnership");
    assert_eq!(leads[0].fields["builderName"], "Maple Homes");
    assert_eq!(leads[0].fields["homeVolume"], "120");
    assert_eq!(leads[0].fields["website"], "");
}

#[tokio::test]
async fn duplicate_email_surfaces_server_message() {
    let server = spawn_intake().await;

    let first = form(variants::CONTACT, &server);
    fill_contact(&first, "jane@x.com");
    first.submit().await.unwrap();

    let second = form(variants::CONTACT, &server);
    fill_contact(&second, "jane@x.com");
    assert_eq!(second.submit().await.unwrap(), SubmissionStatus::Failed);

    let snap = second.snapshot();
    assert_eq!(snap.message.as_deref(), Some("Email already used"));
    assert_eq!(snap.fields["name"], "Jane Doe");
}

#[tokio::test]
async fn malformed_email_is_an_application_failure() {
    let server = spawn_intake().await;
    let contact = form(variants::CONTACT, &server);
    fill_contact(&contact, "jane-at-x");

    assert_eq!(contact.submit().await.unwrap(), SubmissionStatus::Failed);
    assert_eq!(contact.snapshot().message.as_deref(), Some(handlers::INVALID_EMAIL_MESSAGE));
}

#[tokio::test]
async fn unknown_path_is_a_network_failure() {
    let server = spawn_intake().await;
    let config = crate::form::FormConfig::builder("ghost")
        .field(crate::form::FieldSpec::text("name", "Name").required())
        .endpoint(crate::form::Endpoint::json("/api/doesNotExist.php"))
        .build()
        .unwrap();
    let ghost = LeadForm::new(Arc::new(config), transport(&server.base_url));
    ghost.set_field("name", "x").unwrap();

    assert_eq!(ghost.submit().await.unwrap(), SubmissionStatus::Failed);
    assert_eq!(ghost.snapshot().message.as_deref(), Some(NETWORK_ERROR_MESSAGE));
}

#[tokio::test]
async fn forms_listing_and_invalid_payload() {
    let server = spawn_intake().await;
    let http = reqwest::Client::new();

    let forms: Vec<crate::form::FormConfig> = http
        .get(format!("{}/api/forms", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(forms.len(), 5);

    let resp = http
        .post(format!("{}/api/sendRealtorForm.php", server.base_url))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let reply: IntakeReply = resp.json().await.unwrap();
    assert_eq!(reply.status, "error");
    assert_eq!(reply.message, handlers::INVALID_PAYLOAD_MESSAGE);
}

#[tokio::test]
async fn shared_endpoint_path_is_routed_to_first_form() {
    let contact = variants::contact().unwrap();
    let mut quote = variants::quote().unwrap();
    quote.endpoint = contact.endpoint.clone();

    let state = IntakeState::new(vec![contact, quote]);
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = TestServer {
        base_url: format!("http://{addr}"),
        state,
        handle: tokio::spawn(async move {
            axum::serve(listener, app).await.expect("intake server failed");
        }),
    };

    let contact = form(variants::CONTACT, &server);
    fill_contact(&contact, "jane@x.com");
    assert_eq!(contact.submit().await.unwrap(), SubmissionStatus::Succeeded);

    let leads = server.state.leads().await;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].form_id, "contact");
}
