/// APIクライアントのエラー定義
///
/// HTTPステータスコードをエラー種別に対応付け、
/// すべての失敗を単一の型 `VloexError` として呼び出し元に返す。
/// ライブラリ内部でのリトライや回復は行わない。
use crate::domain::error::DomainError;
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

/// エラーレスポンスからメッセージを取得できなかった場合の既定メッセージ
pub const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

#[derive(Error, Debug)]
pub enum VloexError {
    /// APIキーが無効（401 / 403）
    #[error("[{status_code}] authentication failed: {message}")]
    Authentication { status_code: u16, message: String },

    /// レート制限（429）
    #[error("[{status_code}] rate limit exceeded: {message}")]
    RateLimited { status_code: u16, message: String },

    /// プランの上限到達（402）
    #[error("[{status_code}] quota exceeded: {message}")]
    QuotaExceeded { status_code: u16, message: String },

    /// リクエストパラメータが不正（400 / 422）
    #[error("[{status_code}] invalid request: {message}")]
    Validation { status_code: u16, message: String },

    /// ジョブが存在しない（404）
    #[error("[{status_code}] not found: {message}")]
    NotFound { status_code: u16, message: String },

    /// サーバー側の一時的なエラー（5xx）
    #[error("[{status_code}] server error: {message}")]
    Server { status_code: u16, message: String },

    /// 上記以外の非2xxレスポンス
    #[error("[{status_code}] {message}")]
    Api { status_code: u16, message: String },

    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// タイムアウト（HTTPリクエスト、またはジョブ完了待ち）
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// レスポンスのデシリアライズ失敗
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// APIキーが指定されていない
    #[error("VLOEX API key required. Get one at https://vloex.com/api-keys")]
    MissingApiKey,

    /// 送信前の入力検証エラー
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),
}

/// `VloexError` のエラー種別
///
/// メッセージやステータスコードを除いた分類だけで分岐したい場合に使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    RateLimited,
    QuotaExceeded,
    Validation,
    NotFound,
    Server,
    Api,
    Network,
    Timeout,
    Decode,
    MissingApiKey,
    InvalidArgument,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Api => "api",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Decode => "decode",
            Self::MissingApiKey => "missing_api_key",
            Self::InvalidArgument => "invalid_argument",
        }
    }
}

impl VloexError {
    /// HTTPステータスコードとメッセージからエラーを生成
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::Authentication { status_code, message },
            402 => Self::QuotaExceeded { status_code, message },
            429 => Self::RateLimited { status_code, message },
            400 | 422 => Self::Validation { status_code, message },
            404 => Self::NotFound { status_code, message },
            500..=599 => Self::Server { status_code, message },
            _ => Self::Api { status_code, message },
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Server { .. } => ErrorKind::Server,
            Self::Api { .. } => ErrorKind::Api,
            Self::Network { .. } => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::MissingApiKey => ErrorKind::MissingApiKey,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// HTTPレスポンス由来のエラーであればステータスコードを返す
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status_code, .. }
            | Self::RateLimited { status_code, .. }
            | Self::QuotaExceeded { status_code, .. }
            | Self::Validation { status_code, .. }
            | Self::NotFound { status_code, .. }
            | Self::Server { status_code, .. }
            | Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// ステータスコードを除いたエラーメッセージ
    pub fn message(&self) -> String {
        match self {
            Self::Authentication { message, .. }
            | Self::RateLimited { message, .. }
            | Self::QuotaExceeded { message, .. }
            | Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Server { message, .. }
            | Self::Api { message, .. }
            | Self::Network { message }
            | Self::Decode { message } => message.clone(),
            Self::Timeout { operation } => format!("operation timed out: {}", operation),
            Self::MissingApiKey | Self::InvalidArgument(_) => self.to_string(),
        }
    }

    /// 呼び出し側が再試行してよいエラーか
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Server { .. } | Self::Network { .. } | Self::Timeout { .. }
        )
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Authentication { .. } | Self::QuotaExceeded { .. } | Self::MissingApiKey => {
                ErrorSeverity::ConfigError
            }
            Self::Validation { .. } | Self::NotFound { .. } | Self::InvalidArgument(_) => {
                ErrorSeverity::UserError
            }
            Self::RateLimited { .. }
            | Self::Server { .. }
            | Self::Api { .. }
            | Self::Network { .. }
            | Self::Timeout { .. }
            | Self::Decode { .. } => ErrorSeverity::SystemError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Authentication { .. } | Self::MissingApiKey => {
                Some("Check your API key. Set VLOEX_API_KEY or run 'vloex login'.")
            }
            Self::QuotaExceeded { .. } => {
                Some("Your plan limit has been reached. Upgrade your plan or wait for the quota to reset.")
            }
            Self::RateLimited { .. } => Some("Too many requests. Wait a moment and try again."),
            Self::NotFound { .. } => Some("Check the job ID. Job IDs look like 'job_abc123'."),
            Self::Server { .. } | Self::Network { .. } | Self::Timeout { .. } => {
                Some("This may be temporary. Try again later.")
            }
            _ => None,
        }
    }
}
