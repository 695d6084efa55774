/// ドメイン層のエラー定義
///
/// リクエスト送信前に検出できる入力の制約違反を表現する。
/// 外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// スクリプトが空
    #[error("script cannot be empty")]
    EmptyScript,

    /// ジョブIDが不正
    #[error("invalid job id '{id}': {reason}")]
    InvalidJobId { id: String, reason: String },

    /// リポジトリ指定が owner/repo 形式でない
    #[error("invalid repository '{input}' (expected: owner/repo)")]
    InvalidRepository { input: String },

    /// リポジトリが存在しない、または公開済みリリースがない
    #[error("no published release found for '{repository}'")]
    ReleaseNotFound { repository: String },
}

impl DomainError {
    pub fn invalid_job_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidJobId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::EmptyScript => Some("Provide the text your video should say, e.g. 'Hello world'."),
            Self::InvalidJobId { .. } => {
                Some("Use the job ID returned by 'vloex create', e.g. 'job_abc123'.")
            }
            Self::InvalidRepository { .. } => Some("Example: vloex release vercel/next.js"),
            Self::ReleaseNotFound { .. } => Some(
                "Check that the repository exists, is public, and has at least one published release.",
            ),
        }
    }
}
