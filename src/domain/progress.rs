use crate::api::types::VideoStatus;
use serde::Serialize;
/// ドメイン層: 動画生成の進捗イベント定義
///
/// ジョブ作成から完了待ちまでの各段階をイベントとして表現します。
/// プレゼンテーション層はこれらのイベントを受け取り、
/// 人間向けの進捗表示や機械向けのJSON出力に使用します。
use std::time::SystemTime;

/// 動画生成の各段階を表すイベント
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GenerationPhase {
    /// ジョブ作成リクエスト送信中
    Submitting { script_chars: usize },

    /// ジョブ作成完了
    Submitted { job_id: String, status: VideoStatus },

    /// ステータス確認（ポーリング）
    Polling {
        job_id: String,
        attempt: u32,
        max_attempts: u32,
        status: VideoStatus,
    },

    /// 動画生成完了
    Completed { job_id: String, url: Option<String> },

    /// 動画生成失敗
    Failed { job_id: String, error: Option<String> },
}

/// 進捗情報
#[derive(Debug, Clone, Serialize)]
pub struct GenerationProgress {
    pub phase: GenerationPhase,
    #[serde(skip)]
    #[allow(dead_code)]
    pub timestamp: SystemTime,
}

impl GenerationProgress {
    pub fn new(phase: GenerationPhase) -> Self {
        Self {
            phase,
            timestamp: SystemTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serializes_with_tag() {
        let progress = GenerationProgress::new(GenerationPhase::Polling {
            job_id: "job_abc123".to_string(),
            attempt: 3,
            max_attempts: 60,
            status: VideoStatus::Processing,
        });

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["phase"]["phase"], "polling");
        assert_eq!(json["phase"]["status"], "processing");
        assert_eq!(json["phase"]["attempt"], 3);
        assert!(json.get("timestamp").is_none());
    }
}
