//! VLOEX APIクライアントの統合テスト
//!
//! wiremock のモックサーバーに対してジョブ作成、状態取得、完了待ちと
//! HTTPステータスのエラー分類を確認する。

use serde_json::json;
use std::time::Duration;
use vloex::api::github::GithubClient;
use vloex::{CreateOptions, ErrorKind, PollOptions, VideoStatus, Vloex, VloexError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "vs_live_test_123456";

fn client_for(server: &MockServer) -> Vloex {
    Vloex::builder()
        .api_key(TEST_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn fast_poll(max_attempts: u32) -> PollOptions {
    PollOptions {
        interval: Duration::from_millis(10),
        max_attempts,
    }
}

#[tokio::test]
async fn create_sends_script_and_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .and(header("authorization", format!("Bearer {}", TEST_KEY).as_str()))
        .and(body_partial_json(json!({
            "input": "Hello world",
            "options": { "avatar": "sophia" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job_abc123",
            "status": "processing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vloex = client_for(&server);
    let video = vloex
        .videos()
        .create("Hello world", &CreateOptions::new().avatar("sophia"))
        .await
        .unwrap();

    assert_eq!(video.id, "job_abc123");
    assert_eq!(video.status, VideoStatus::Processing);
    assert!(video.url.is_none());
}

#[tokio::test]
async fn create_with_empty_script_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let vloex = client_for(&server);
    let err = vloex
        .videos()
        .create("   ", &CreateOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn create_then_retrieve_completed_video() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job_abc123",
            "status": "pending"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/job_abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_abc123",
            "status": "completed",
            "video_url": "https://cdn.vloex.com/videos/job_abc123.mp4",
            "created_at": "2025-11-29T16:49:10Z",
            "updated_at": 1764434950
        })))
        .mount(&server)
        .await;

    let vloex = client_for(&server);
    let created = vloex
        .videos()
        .create("Hello world", &CreateOptions::default())
        .await
        .unwrap();

    let first = vloex.videos().retrieve(&created.id).await.unwrap();
    let second = vloex.videos().retrieve(&created.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.status, VideoStatus::Completed);
    assert_eq!(
        first.url.as_deref(),
        Some("https://cdn.vloex.com/videos/job_abc123.mp4")
    );
    assert_eq!(first.updated_at.as_deref(), Some("1764434950"));
}

#[tokio::test]
async fn http_errors_are_classified() {
    let cases = [
        (401, json!({ "detail": "Invalid API key" }), ErrorKind::Authentication),
        (402, json!({ "detail": "Quota exceeded" }), ErrorKind::QuotaExceeded),
        (429, json!({ "message": "Too many requests" }), ErrorKind::RateLimited),
        (404, json!({ "detail": "Job not found" }), ErrorKind::NotFound),
        (503, json!({}), ErrorKind::Server),
    ];

    for (status, body, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/jobs/job_missing/status"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .videos()
            .retrieve("job_missing")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), expected, "status {}", status);
        assert_eq!(err.status_code(), Some(status));
    }
}

#[tokio::test]
async fn error_message_comes_from_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .videos()
        .create("Hello world", &CreateOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, VloexError::Authentication { status_code: 401, .. }));
    assert_eq!(err.message(), "Invalid API key");
}

#[tokio::test]
async fn empty_detail_falls_back_to_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/job_abc123/status"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({ "detail": "", "message": "Slow down" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .videos()
        .retrieve("job_abc123")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.message(), "Slow down");
}

#[tokio::test]
async fn wait_for_completion_polls_until_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/job_abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_abc123",
            "status": "processing"
        })))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/job_abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_abc123",
            "status": "completed",
            "video_url": "https://cdn.vloex.com/videos/job_abc123.mp4"
        })))
        .mount(&server)
        .await;

    let mut events = Vec::new();
    let video = client_for(&server)
        .videos()
        .wait_for_completion("job_abc123", &fast_poll(10), |p| events.push(p.phase.clone()))
        .await
        .unwrap();

    assert_eq!(video.status, VideoStatus::Completed);
    // 3回のポーリング + 完了イベント
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn wait_for_completion_returns_failed_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/job_abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_abc123",
            "status": "failed",
            "error_message": "Rendering failed"
        })))
        .mount(&server)
        .await;

    let video = client_for(&server)
        .videos()
        .wait_for_completion("job_abc123", &fast_poll(5), |_| {})
        .await
        .unwrap();

    assert_eq!(video.status, VideoStatus::Failed);
    assert_eq!(video.error.as_deref(), Some("Rendering failed"));
}

#[tokio::test]
async fn wait_for_completion_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/job_slow/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job_slow",
            "status": "processing"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .videos()
        .wait_for_completion("job_slow", &fast_poll(3), |_| {})
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.to_string().contains("processing"));
}

#[tokio::test]
async fn fetch_latest_github_release() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/vercel/next.js/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v15.5.4",
            "name": "v15.5.4",
            "body": "## Changes\n- Fix router cache\n- Improve build speed\n",
            "published_at": "2025-09-18T10:00:00Z",
            "html_url": "https://github.com/vercel/next.js/releases/tag/v15.5.4"
        })))
        .mount(&server)
        .await;

    let github = GithubClient::new(server.uri()).unwrap();
    let release = github.fetch_latest_release("vercel", "next.js").await.unwrap();

    assert_eq!(release.tag_name, "v15.5.4");
    let highlights = vloex::domain::release::extract_highlights(release.body.as_deref().unwrap(), 5);
    assert_eq!(highlights, vec!["Fix router cache", "Improve build speed"]);
}

#[tokio::test]
async fn missing_github_release_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = GithubClient::new(server.uri())
        .unwrap()
        .fetch_latest_release("nobody", "nothing")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
