//! Webhook署名の生成と検証
//!
//! 署名対象は `"{timestamp}.{raw body}"`、アルゴリズムは HMAC-SHA256（16進表記）。
//! 署名ヘッダーは `sha256=<hex>` または `<hex>` を受け付ける。
//! タイムスタンプが現在時刻から許容誤差（既定5分）を超えて離れていれば
//! 署名が正しくてもリプレイとして拒否する。

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// 署名ヘッダー名
pub const SIGNATURE_HEADER: &str = "X-VLOEX-Signature";

/// タイムスタンプヘッダー名（Unix秒）
pub const TIMESTAMP_HEADER: &str = "X-VLOEX-Timestamp";

/// 既定の許容誤差
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

const SIGNATURE_ALGORITHM: &str = "sha256";

/// SHA-256 ダイジェストのバイト長
const DIGEST_LEN: usize = 32;

/// 署名検証の失敗理由
///
/// ログ用に区別しているだけで、受信側のレスポンスは理由によらず同一にすること。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("signature header missing")]
    MissingSignature,

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("timestamp header missing")]
    MissingTimestamp,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// タイムスタンプが古すぎる、または未来すぎる
    #[error("timestamp outside tolerance (skew {skew_secs}s)")]
    TimestampOutOfTolerance { skew_secs: i64 },

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("invalid webhook secret")]
    InvalidSecret,
}

/// Webhook署名の検証器
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: Vec<u8>,
    tolerance: Duration,
}

impl fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"***")
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl WebhookVerifier {
    /// # Errors
    /// シークレットが空の場合に `WebhookError::InvalidSecret` を返します。
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, WebhookError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(WebhookError::InvalidSecret);
        }
        Ok(Self {
            secret: secret.to_vec(),
            tolerance: DEFAULT_TOLERANCE,
        })
    }

    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    fn mac_for(&self, timestamp: &str, payload: &[u8]) -> Result<HmacSha256, WebhookError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| WebhookError::InvalidSecret)?;
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac)
    }

    /// 署名（16進文字列）を生成する
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
        let mac = self.mac_for(&timestamp.to_string(), payload)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 署名ヘッダーの値（`sha256=<hex>`）を生成する
    pub fn signature_header(&self, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
        Ok(format!("{}={}", SIGNATURE_ALGORITHM, self.sign(timestamp, payload)?))
    }

    /// 現在時刻を基準に検証する
    pub fn verify(&self, payload: &[u8], signature: &str, timestamp: &str) -> Result<(), WebhookError> {
        self.verify_at(payload, signature, timestamp, Utc::now().timestamp())
    }

    /// `now`（Unix秒）を基準に検証する
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature: &str,
        timestamp: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let provided = parse_signature(signature)?;

        let timestamp = timestamp.trim();
        if timestamp.is_empty() {
            return Err(WebhookError::MissingTimestamp);
        }
        let sent_at: i64 = timestamp
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp(timestamp.to_string()))?;

        let skew_secs = now.saturating_sub(sent_at);
        if skew_secs.unsigned_abs() > self.tolerance.as_secs() {
            return Err(WebhookError::TimestampOutOfTolerance { skew_secs });
        }

        // verify_slice は定数時間比較
        self.mac_for(timestamp, payload)?
            .verify_slice(&provided)
            .map_err(|_| WebhookError::SignatureMismatch)
    }
}

/// 署名ヘッダーからダイジェストのバイト列を取り出す
fn parse_signature(signature: &str) -> Result<Vec<u8>, WebhookError> {
    let signature = signature.trim();
    if signature.is_empty() {
        return Err(WebhookError::MissingSignature);
    }

    let hex_digest = match signature.split_once('=') {
        Some((algorithm, digest)) if algorithm.eq_ignore_ascii_case(SIGNATURE_ALGORITHM) => digest,
        Some((algorithm, _)) => {
            return Err(WebhookError::MalformedSignature(format!(
                "unsupported algorithm '{}'",
                algorithm
            )));
        }
        None => signature,
    };

    let digest = hex::decode(hex_digest)
        .map_err(|_| WebhookError::MalformedSignature("digest is not valid hex".to_string()))?;

    if digest.len() != DIGEST_LEN {
        return Err(WebhookError::MalformedSignature(format!(
            "expected {} byte digest, got {}",
            DIGEST_LEN,
            digest.len()
        )));
    }

    Ok(digest)
}
