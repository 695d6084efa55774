/// プレゼンテーション層: 生成進捗の表示DTO
///
/// ドメイン層の`GenerationProgress`をUI表示に適した形式に変換します。
/// ポーリング中の更新は間引いて表示する。
use vloex::VideoStatus;
use vloex::domain::progress::{GenerationPhase, GenerationProgress};

/// ポーリング中の表示間隔（試行回数）
const POLLING_DISPLAY_EVERY: u32 = 6;

/// 進捗表示のカテゴリ
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressCategory {
    /// ジョブ作成
    Submission,
    /// 生成待ち
    Processing,
    Completed,
    Failed,
}

/// プレゼンテーション層用の進捗情報
#[derive(Debug, Clone)]
pub struct DisplayProgress {
    pub message: String,
    pub category: ProgressCategory,
    pub details: Option<String>,
}

impl DisplayProgress {
    pub fn new(message: String, category: ProgressCategory) -> Self {
        Self {
            message,
            category,
            details: None,
        }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// `None` は表示を抑制する更新
pub fn to_display(progress: &GenerationProgress) -> Option<DisplayProgress> {
    {
        match &progress.phase {
            GenerationPhase::Submitting { script_chars } => Some(DisplayProgress::new(
                format!("Submitting script ({} chars)...", script_chars),
                ProgressCategory::Submission,
            )),
            GenerationPhase::Submitted { job_id, status } => Some(DisplayProgress::new(
                format!("Job created: {} ({})", job_id, status),
                ProgressCategory::Submission,
            )),
            GenerationPhase::Polling {
                attempt,
                max_attempts,
                status,
                ..
            } => format_polling(*attempt, *max_attempts, *status),
            GenerationPhase::Completed { job_id, url } => {
                let display = DisplayProgress::new(
                    format!("Video ready: {}", job_id),
                    ProgressCategory::Completed,
                );
                Some(match url {
                    Some(url) => display.with_details(url.clone()),
                    None => display,
                })
            }
            GenerationPhase::Failed { job_id, error } => Some(
                DisplayProgress::new(
                    format!("Video generation failed: {}", job_id),
                    ProgressCategory::Failed,
                )
                .with_details(error.clone().unwrap_or_else(|| "unknown error".to_string())),
            ),
        }
    }
}

/// 初回と `POLLING_DISPLAY_EVERY` 回ごとにだけ表示する
///
/// 終端状態は Completed / Failed イベントで表示するのでここでは出さない。
fn format_polling(attempt: u32, max_attempts: u32, status: VideoStatus) -> Option<DisplayProgress> {
    if status.is_terminal() {
        return None;
    }
    if attempt == 1 || attempt % POLLING_DISPLAY_EVERY == 0 {
        Some(DisplayProgress::new(
            format!("Waiting for video... {} (attempt {}/{})", status, attempt, max_attempts),
            ProgressCategory::Processing,
        ))
    } else {
        None
    }
}

/// 進捗をstderrに表示
pub fn report(progress: &GenerationProgress) {
    if let Some(display) = to_display(progress) {
        let marker = match display.category {
            ProgressCategory::Completed => "✓ ",
            ProgressCategory::Failed => "✗ ",
            ProgressCategory::Submission | ProgressCategory::Processing => "",
        };
        eprintln!("{}{}", marker, display.message);
        if let Some(details) = display.details {
            eprintln!("  {}", details);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polling(attempt: u32, status: VideoStatus) -> GenerationProgress {
        GenerationProgress::new(GenerationPhase::Polling {
            job_id: "job_abc123".to_string(),
            attempt,
            max_attempts: 60,
            status,
        })
    }

    #[test]
    fn test_submitted_display() {
        let progress = GenerationProgress::new(GenerationPhase::Submitted {
            job_id: "job_abc123".to_string(),
            status: VideoStatus::Processing,
        });
        let display = to_display(&progress).expect("update should be displayed");

        assert_eq!(display.message, "Job created: job_abc123 (processing)");
        assert_eq!(display.category, ProgressCategory::Submission);
    }

    #[test]
    fn test_polling_first_attempt_displayed() {
        let display = to_display(&polling(1, VideoStatus::Pending))
            .expect("update should be displayed");
        assert_eq!(display.message, "Waiting for video... pending (attempt 1/60)");
        assert_eq!(display.category, ProgressCategory::Processing);
    }

    #[test]
    fn test_polling_updates_thinned() {
        assert!(to_display(&polling(2, VideoStatus::Processing)).is_none());
        assert!(to_display(&polling(6, VideoStatus::Processing)).is_some());
    }

    #[test]
    fn test_polling_terminal_status_suppressed() {
        assert!(to_display(&polling(1, VideoStatus::Completed)).is_none());
    }

    #[test]
    fn test_failed_display_has_reason() {
        let progress = GenerationProgress::new(GenerationPhase::Failed {
            job_id: "job_abc123".to_string(),
            error: None,
        });
        let display = to_display(&progress).expect("update should be displayed");

        assert_eq!(display.category, ProgressCategory::Failed);
        assert_eq!(display.details.as_deref(), Some("unknown error"));
    }
}
