/// Webhookペイロード
///
/// ジョブが終端状態に遷移したときに一度だけ送られてくる通知。
/// 永続化はしない。
use crate::api::types::{VideoStatus, lenient_string};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Webhookイベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEvent {
    #[serde(rename = "video.completed")]
    VideoCompleted,
    #[serde(rename = "video.failed")]
    VideoFailed,
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VideoCompleted => write!(f, "video.completed"),
            Self::VideoFailed => write!(f, "video.failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: WebhookEvent,
    pub job_id: String,
    pub status: VideoStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// 送信時刻（数値・文字列のどちらでも受け付ける）
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_payload() {
        let json = r#"{
            "event": "video.completed",
            "job_id": "job_abc123",
            "status": "completed",
            "video_url": "https://cdn.vloex.com/videos/job_abc123.mp4",
            "error": null,
            "timestamp": 1764434950
        }"#;
        let payload: WebhookPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.event, WebhookEvent::VideoCompleted);
        assert_eq!(payload.status, VideoStatus::Completed);
        assert_eq!(payload.timestamp.as_deref(), Some("1764434950"));
        assert!(payload.error.is_none());
    }

    #[test]
    fn test_failed_payload() {
        let json = r#"{
            "event": "video.failed",
            "job_id": "job_abc123",
            "status": "failed",
            "video_url": null,
            "error": "Rendering failed",
            "timestamp": "2025-11-29T16:49:10Z"
        }"#;
        let payload: WebhookPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.event, WebhookEvent::VideoFailed);
        assert_eq!(payload.error.as_deref(), Some("Rendering failed"));
        assert_eq!(payload.event.to_string(), "video.failed");
    }

    #[test]
    fn test_unknown_event_rejected() {
        let json = r#"{"event": "video.started", "job_id": "j", "status": "processing"}"#;
        assert!(serde_json::from_str::<WebhookPayload>(json).is_err());
    }
}
