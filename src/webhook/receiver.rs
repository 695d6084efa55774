//! Webhook受信エンドポイント
//!
//! `POST {APP_CONFIG.webhook.path}` で通知を受け取り、署名を検証してから
//! パース済みのペイロードをチャネルに流す。
//!
//! 署名検証の失敗は理由によらず同じ `401 {"error":"Invalid signature"}` を返し、
//! どのチェックで落ちたかはサーバー側のログにだけ残す。

use crate::config::APP_CONFIG;
use crate::webhook::payload::WebhookPayload;
use crate::webhook::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, WebhookVerifier};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

/// 受信ハンドラーの共有状態
///
/// リクエスト間で共有するのは不変の検証器とチャネルの送信側だけ。
#[derive(Clone)]
pub struct ReceiverState {
    verifier: Option<Arc<WebhookVerifier>>,
    events: mpsc::Sender<WebhookPayload>,
}

impl ReceiverState {
    /// `verifier` が `None` の場合、署名を検証せずに受け付ける
    pub fn new(verifier: Option<WebhookVerifier>, events: mpsc::Sender<WebhookPayload>) -> Self {
        Self {
            verifier: verifier.map(Arc::new),
            events,
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.verifier.is_some()
    }
}

/// 受信用のルーターを作成
pub fn router(state: ReceiverState) -> Router {
    Router::new()
        .route(&APP_CONFIG.webhook.path, post(handle_webhook))
        .with_state(state)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn reject() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid signature" })),
    )
        .into_response()
}

#[instrument(name = "vloex_webhook", skip_all, fields(body_len = body.len()))]
async fn handle_webhook(
    State(state): State<ReceiverState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match &state.verifier {
        Some(verifier) => {
            let signature = header_str(&headers, SIGNATURE_HEADER);
            let timestamp = header_str(&headers, TIMESTAMP_HEADER);

            if let Err(e) = verifier.verify(&body, signature, timestamp) {
                warn!(reason = %e, "rejected webhook");
                return reject();
            }
        }
        None => warn!("no webhook secret configured, accepting unverified payload"),
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "malformed webhook payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid payload" })),
            )
                .into_response();
        }
    };

    info!(event = %payload.event, job_id = %payload.job_id, "webhook received");

    if state.events.send(payload).await.is_err() {
        warn!("webhook event channel closed, dropping event");
    }

    (StatusCode::OK, Json(json!({ "status": "received" }))).into_response()
}
