use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sender_engine::{
    DispatchSettings, Dispatcher, FailureKind, FileSubmission, ReqwestDispatcher, TextSubmission,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher_for(base_url: String) -> ReqwestDispatcher {
    ReqwestDispatcher::new(DispatchSettings {
        base_url,
        ..DispatchSettings::default()
    })
    .expect("valid base url")
}

fn text_submission() -> TextSubmission {
    TextSubmission {
        text: "Hello".to_string(),
        numbers: vec!["+1111111111".to_string(), "+2222222222".to_string()],
    }
}

#[tokio::test]
async fn send_text_posts_json_and_returns_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send-text"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "text": "Hello",
            "numbers": ["+1111111111", "+2222222222"],
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "started", "count": 2})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(server.uri());
    let reply = dispatcher
        .send_text(&text_submission())
        .await
        .expect("reply");

    assert!(reply.is_success());
    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.pretty_body(),
        "{\n  \"status\": \"started\",\n  \"count\": 2\n}"
    );
}

#[tokio::test]
async fn non_success_status_with_json_body_is_still_a_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send-text"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "bad numbers"})))
        .mount(&server)
        .await;

    let reply = dispatcher_for(server.uri())
        .send_text(&text_submission())
        .await
        .expect("reply");

    assert!(!reply.is_success());
    assert_eq!(reply.status, 422);
    assert_eq!(reply.body, json!({"detail": "bad numbers"}));
}

#[tokio::test]
async fn non_json_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send-text"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = dispatcher_for(server.uri())
        .send_text(&text_submission())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidResponse);
    assert!(err.message.contains("status 500"));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = dispatcher_for(uri)
        .send_text(&text_submission())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert!(err.to_string().starts_with("network error"));
}

#[tokio::test]
async fn configured_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send-text"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let dispatcher = ReqwestDispatcher::new(DispatchSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..DispatchSettings::default()
    })
    .unwrap();

    let err = dispatcher.send_text(&text_submission()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/send-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = dispatcher_for(format!("{}/api", server.uri()))
        .send_text(&text_submission())
        .await
        .expect("reply");
    assert!(reply.is_success());
}

#[tokio::test]
async fn send_text_file_posts_multipart_fields() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("numbers.csv");
    fs::write(&file_path, "+1111111111\n+2222222222\n").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send-text-file"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"text\""))
        .and(body_string_contains("Hi from file"))
        .and(body_string_contains("name=\"file\"; filename=\"numbers.csv\""))
        .and(body_string_contains("text/csv"))
        .and(body_string_contains("+2222222222"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "started", "count": 2})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = dispatcher_for(server.uri())
        .send_text_file(&FileSubmission {
            text: "Hi from file".to_string(),
            path: file_path,
            file_name: "numbers.csv".to_string(),
        })
        .await
        .expect("reply");

    assert!(reply.is_success());
    assert_eq!(reply.body["count"], json!(2));
}

#[tokio::test]
async fn unreadable_file_fails_before_any_request() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = dispatcher_for(server.uri())
        .send_text_file(&FileSubmission {
            text: "Hi".to_string(),
            path: temp.path().join("missing.csv"),
            file_name: "missing.csv".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::FileRead);
    assert!(err.message.contains("missing.csv"));
}

#[tokio::test]
async fn health_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(server.uri());
    assert_eq!(dispatcher.check_health().await, Ok(()));
    let err = dispatcher.check_health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestDispatcher::new(DispatchSettings {
        base_url: "localhost without scheme".to_string(),
        ..DispatchSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
