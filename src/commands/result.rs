/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層（main.rs/cli.rs）で
/// 人間向けと機械向けの出力フォーマットを決定する。
use serde::Serialize;
use vloex::{Video, VideoStatus};

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Login(LoginResult),
    Logout(LogoutResult),
    Status(StatusResult),
    Create(VideoResult),
    Get(VideoResult),
    Wait(VideoResult),
    Release(ReleaseResult),
    Serve(ServeResult),
    Help,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// 既にログイン済みだったか（上書き更新の場合true）
    pub was_logged_in: bool,
    /// マスキングされたAPIキー
    pub api_key: String,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    /// ログイン状態だったか
    pub was_logged_in: bool,
}

/// APIキーの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeySource {
    Environment,
    ConfigFile,
}

/// ステータスコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    /// マスキングされたAPIキー（設定されている場合）
    pub api_key: Option<String>,
    pub api_key_source: Option<ApiKeySource>,
    pub base_url: String,
    pub webhook_secret_configured: bool,
}

/// ジョブを扱うコマンド（create / get / wait）の結果
#[derive(Debug, Clone, Serialize)]
pub struct VideoResult {
    pub job_id: String,
    pub status: VideoStatus,
    pub url: Option<String>,
    pub error: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// 完了まで待機したか
    pub waited: bool,
}

impl VideoResult {
    pub fn new(video: Video, waited: bool) -> Self {
        Self {
            job_id: video.id,
            status: video.status,
            url: video.url,
            error: video.error,
            created_at: video.created_at,
            updated_at: video.updated_at,
            waited,
        }
    }
}

/// リリース告知動画コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseResult {
    pub repository: String,
    pub version: String,
    pub release_name: String,
    pub published_at: Option<String>,
    /// 抽出した変更点
    pub highlights: Vec<String>,
    /// 送信したスクリプト
    pub script: String,
    pub video: VideoResult,
}

/// Webhook受信サーバーの結果（停止時）
#[derive(Debug, Clone, Serialize)]
pub struct ServeResult {
    pub address: String,
    pub path: String,
    pub verifying: bool,
    /// 受信したイベント数
    pub events_received: usize,
}
