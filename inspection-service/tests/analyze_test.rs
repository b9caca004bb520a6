mod common;

use axum::http::StatusCode;
use common::TestApp;
use inspection_service::services::prompt::INSPECTION_PREAMBLE;
use inspection_service::services::providers::mock::MockBehavior;
use serde_json::json;

fn analysis_payload() -> serde_json::Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "text": "Inspect this part." },
                { "inlineData": { "mimeType": "image/jpeg", "data": "aGVsbG8=" } }
            ]
        }],
        "generationConfig": { "temperature": 0.2, "responseMimeType": "application/json" },
        "systemInstruction": { "parts": [{ "text": "caller supplied" }] }
    })
}

#[tokio::test]
async fn analyze_injects_instruction_and_passes_response_through() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post_json("/analyze", analysis_payload()).await;

    assert_eq!(status, StatusCode::OK);
    let forwarded = &body["echo"];
    assert_eq!(
        forwarded["systemInstruction"]["parts"][0]["text"],
        INSPECTION_PREAMBLE
    );
    assert_eq!(forwarded["generationConfig"]["temperature"], 0.2);
    assert_eq!(forwarded["contents"], analysis_payload()["contents"]);
}

#[tokio::test]
async fn analyze_includes_stored_examples_newest_first() {
    let app = TestApp::spawn().await;
    for (classification, notes) in [("good", "smooth edges"), ("bad", "hairline crack")] {
        app.post_json(
            "/training",
            json!({ "image": "aGVsbG8=", "classification": classification, "notes": notes }),
        )
        .await;
    }

    app.post_json("/analyze", analysis_payload()).await;

    let sent = app.provider.received().await;
    let instruction = sent[0]["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    let lines: Vec<&str> = instruction
        .lines()
        .filter(|line| line.starts_with("- "))
        .collect();
    assert_eq!(lines, vec!["- BAD: hairline crack", "- GOOD: smooth edges"]);
}

#[tokio::test]
async fn upstream_error_documents_are_passed_through() {
    let upstream = json!({
        "error": { "code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED" }
    });
    let app = TestApp::with_behavior(MockBehavior::Respond(upstream.clone())).await;

    let (status, body) = app.post_json("/analyze", analysis_payload()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream);
}

#[tokio::test]
async fn network_failure_returns_generic_server_error() {
    let app = TestApp::with_behavior(MockBehavior::NetworkFailure).await;

    let (status, body) = app.post_json("/analyze", analysis_payload()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn unparseable_upstream_body_returns_generic_server_error() {
    let app = TestApp::with_behavior(MockBehavior::InvalidResponse).await;

    let (status, body) = app.post_json("/analyze", analysis_payload()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error");
}

#[tokio::test]
async fn non_object_payload_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, _) = app.post_json("/analyze", json!([1, 2, 3])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.provider.received().await.is_empty());
}

#[tokio::test]
async fn malformed_analysis_body_is_a_json_bad_request() {
    let app = TestApp::spawn().await;

    let (status, content_type, body) = app
        .post_raw("/analyze", Some("application/json"), "{\"contents\": [")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("application/json"));
    assert!(body["error"].is_string());
    assert!(app.provider.received().await.is_empty());
}
