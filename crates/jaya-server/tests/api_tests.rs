//! API integration tests for jaya-server.
//!
//! These tests drive the full router and inspect the notify queue to see which
//! messages would have been posted.

use axum::http::StatusCode;
use axum_test::TestServer;
use jaya_server::test_utils::{
    TestConfig, create_test_app_with_limit, create_test_app_with_state, sign,
};
use serde_json::{Value, json};

const ISSUES_BODY: &str =
    r#"{"action":"opened","issue":{"user":{"login":"alice"}}, "repository":{"name":"repo1"}}"#;
const NUDGE_BODY: &str = r#"{"issue":{"key":"ABC-1"},"feedback":{"text":"a bug"}}"#;

/// Helper to create a test server.
fn create_server() -> (TestServer, TestConfig) {
    let (app, config) = create_test_app_with_state();
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, config)
}

/// Collects the messages queued so far.
fn queued_messages(config: &mut TestConfig) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(job) = config.notify_rx.try_recv() {
        messages.push(job.message.to_string());
    }
    messages
}

// =============================================================================
// Health & Version Tests
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let (server, _config) = create_server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(
            body["event_types"],
            json!(["IssuesDevstreamActivity", "issues"])
        );
    }

    #[tokio::test]
    async fn health_reports_notify_queue_room() {
        let (server, mut config) = create_server();

        let before: Value = server.get("/health").await.json();
        assert_eq!(before["notify_queue"]["available"], 100);
        assert_eq!(before["notify_queue"]["capacity"], 100);

        server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(ISSUES_BODY.as_bytes()))
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(ISSUES_BODY)
            .await
            .assert_status_ok();

        let after: Value = server.get("/health").await.json();
        assert_eq!(after["notify_queue"]["available"], 99);

        assert_eq!(queued_messages(&mut config).len(), 1);
    }

    #[tokio::test]
    async fn version_returns_server_info() {
        let (server, _config) = create_server();

        let response = server.get("/version").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "jayad");
        assert!(body["version"].is_string());
    }
}

// =============================================================================
// Hook Tests
// =============================================================================

mod hooks {
    use super::*;

    #[tokio::test]
    async fn signed_issue_event_is_relayed() {
        let (server, mut config) = create_server();

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(ISSUES_BODY.as_bytes()))
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958")
            .text(ISSUES_BODY)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({}));

        let job = config.notify_rx.try_recv().expect("message should be queued");
        assert_eq!(job.delivery_id, "72d3162e-cc78-11e3-81ab-4c9367dc0958");
        assert_eq!(job.event_type, "issues");
        assert_eq!(job.message.as_str(), "alice has opened an issue for repo1.");
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let (server, mut config) = create_server();

        let response = server
            .post("/hooks")
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(ISSUES_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({}));
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn missing_delivery_id_is_rejected() {
        let (server, mut config) = create_server();

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(ISSUES_BODY.as_bytes()))
            .add_header("X-GitHub-Event", "issues")
            .text(ISSUES_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn signature_for_other_body_is_rejected() {
        let (server, mut config) = create_server();

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(b"{\"action\":\"closed\"}"))
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(ISSUES_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({}));
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn malformed_signature_is_rejected() {
        let (server, _config) = create_server();

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", "sha256=deadbeef")
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(ISSUES_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsupported_event_type_is_rejected() {
        let (server, mut config) = create_server();
        let body = r#"{"zen":"Keep it logically awesome.","hook_id":1}"#;

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(body.as_bytes()))
            .add_header("X-GitHub-Event", "ping")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({}));
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn undecodable_payload_is_not_posted() {
        let (server, mut config) = create_server();
        let body = r#"{"action":"opened"}"#;

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(body.as_bytes()))
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn nudge_event_on_hook_route_uses_shared_registry() {
        let (server, mut config) = create_server();

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(NUDGE_BODY.as_bytes()))
            .add_header("X-GitHub-Event", "IssuesDevstreamActivity")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(NUDGE_BODY)
            .await;

        response.assert_status_ok();
        assert_eq!(queued_messages(&mut config), vec!["ABC-1 possibly has a bug"]);
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let (server, _config) = create_server();

        let response = server.get("/hooks").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn oversized_payload_is_rejected() {
        let (app, mut config) = create_test_app_with_limit(64);
        let server = TestServer::new(app).expect("Failed to create test server");
        let body = format!(r#"{{"padding":"{}"}}"#, "x".repeat(128));

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(body.as_bytes()))
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(body)
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.json::<Value>(), json!({}));
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn oversized_payload_without_headers_is_missing_field() {
        let (app, mut config) = create_test_app_with_limit(64);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.post("/hooks").text("x".repeat(130)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({}));
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn payload_at_limit_is_accepted() {
        let (app, mut config) = create_test_app_with_limit(ISSUES_BODY.len());
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server
            .post("/hooks")
            .add_header("X-Hub-Signature", sign(ISSUES_BODY.as_bytes()))
            .add_header("X-GitHub-Event", "issues")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(ISSUES_BODY)
            .await;

        response.assert_status_ok();
        assert_eq!(
            queued_messages(&mut config),
            vec!["alice has opened an issue for repo1."]
        );
    }
}

// =============================================================================
// Nudge Tests
// =============================================================================

mod nudges {
    use super::*;

    #[tokio::test]
    async fn signed_activity_is_relayed() {
        let (server, mut config) = create_server();

        let response = server
            .post("/nudges")
            .add_header("X-Hub-Signature", sign(NUDGE_BODY.as_bytes()))
            .add_header("Activity-Type", "IssuesDevstreamActivity")
            .add_header("X-Nudge-Delivery", "n-42")
            .text(NUDGE_BODY)
            .await;

        response.assert_status_ok();

        let job = config.notify_rx.try_recv().expect("message should be queued");
        assert_eq!(job.delivery_id, "n-42");
        assert_eq!(job.message.as_str(), "ABC-1 possibly has a bug");
    }

    #[tokio::test]
    async fn unsigned_activity_is_rejected() {
        let (server, mut config) = create_server();

        let response = server
            .post("/nudges")
            .add_header("Activity-Type", "IssuesDevstreamActivity")
            .add_header("X-Nudge-Delivery", "n-42")
            .text(NUDGE_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn unknown_activity_type_is_rejected() {
        let (server, mut config) = create_server();

        let response = server
            .post("/nudges")
            .add_header("X-Hub-Signature", sign(NUDGE_BODY.as_bytes()))
            .add_header("Activity-Type", "PullRequestsDevstreamActivity")
            .add_header("X-Nudge-Delivery", "n-42")
            .text(NUDGE_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(queued_messages(&mut config).is_empty());
    }

    #[tokio::test]
    async fn github_headers_are_not_accepted_on_nudge_route() {
        let (server, _config) = create_server();

        let response = server
            .post("/nudges")
            .add_header("X-Hub-Signature", sign(NUDGE_BODY.as_bytes()))
            .add_header("X-GitHub-Event", "IssuesDevstreamActivity")
            .add_header("X-GitHub-Delivery", "d-1")
            .text(NUDGE_BODY)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_activity_is_rejected() {
        let (app, mut config) = create_test_app_with_limit(16);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server
            .post("/nudges")
            .add_header("X-Hub-Signature", sign(NUDGE_BODY.as_bytes()))
            .add_header("Activity-Type", "IssuesDevstreamActivity")
            .add_header("X-Nudge-Delivery", "n-42")
            .text(NUDGE_BODY)
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.json::<Value>(), json!({}));
        assert!(queued_messages(&mut config).is_empty());
    }
}
