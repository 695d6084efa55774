/// Webhook モジュール
///
/// - `signature`: HMAC-SHA256 署名の生成と検証（リプレイ対策つき）
/// - `payload`: 通知ペイロードの型
/// - `receiver`: axum による受信エンドポイント
pub mod payload;
pub mod receiver;
pub mod signature;

pub use payload::{WebhookEvent, WebhookPayload};
pub use receiver::{ReceiverState, router};
pub use signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, WebhookError, WebhookVerifier};
