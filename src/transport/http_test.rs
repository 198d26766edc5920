use super::*;
use crate::transport::TransportTimeouts;

fn transport(base: &str) -> HttpTransport {
    HttpTransport::new(TransportConfig::new(base)).unwrap()
}

// =============================================================================
// parse_reply
// =============================================================================

#[test]
fn parse_reply_success() {
    let reply = parse_reply(200, r#"{"status":"success"}"#).unwrap();
    assert!(reply.is_success());
}

#[test]
fn parse_reply_error_body_on_client_error_is_application_failure() {
    let reply = parse_reply(409, r#"{"status":"error","message":"Email already used"}"#).unwrap();
    assert!(!reply.is_success());
    assert_eq!(reply.message.as_deref(), Some("Email already used"));
}

#[test]
fn parse_reply_html_on_server_error_is_http_status() {
    let err = parse_reply(502, "<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, TransportError::HttpStatus { status: 502, .. }));
}

#[test]
fn parse_reply_garbage_on_ok_is_parse_error() {
    let err = parse_reply(200, "Thanks!").unwrap_err();
    assert!(matches!(err, TransportError::Parse(_)));
}

// =============================================================================
// url_for
// =============================================================================

#[test]
fn url_for_joins_relative_paths() {
    let t = transport("http://127.0.0.1:3000/");
    assert_eq!(t.url_for(&Endpoint::json("/api/sendContactForm.php")), "http://127.0.0.1:3000/api/sendContactForm.php");
    assert_eq!(t.url_for(&Endpoint::json("api/x")), "http://127.0.0.1:3000/api/x");
}

#[test]
fn url_for_keeps_absolute_urls() {
    let t = transport("http://127.0.0.1:3000");
    let endpoint = Endpoint::multipart("https://forms.example.test/hook");
    assert_eq!(t.url_for(&endpoint), "https://forms.example.test/hook");
}

// =============================================================================
// submit
// =============================================================================

#[tokio::test]
async fn submit_to_closed_port_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = TransportConfig::new(&format!("http://{addr}"))
        .with_timeouts(TransportTimeouts { request_secs: 2, connect_secs: 1 });
    let t = HttpTransport::new(config).unwrap();

    let err = t
        .submit(&Endpoint::json("/api/sendContactForm.php"), &Fields::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Request(_) | TransportError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn silent_server_is_timeout() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = TransportConfig::new(&format!("http://{addr}"))
        .with_timeouts(TransportTimeouts { request_secs: 1, connect_secs: 1 });
    let t = HttpTransport::new(config).unwrap();

    let err = t
        .submit(&Endpoint::json("/api/sendContactForm.php"), &Fields::new())
        .await
        .unwrap_err();
    server.abort();
    assert_eq!(err, TransportError::Timeout { secs: 1 });
}
