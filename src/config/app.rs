/// アプリケーション設定モジュール
///
/// ビルド時に config.toml から読み込まれる静的設定を管理します。
/// これらの設定は実行時には変更できません。
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

/// グローバルなアプリケーション設定
///
/// 初回アクセス時に埋め込みの config.toml をパースします。
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::load);

/// アプリケーション全体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub webhook: WebhookConfig,
    pub github: GithubConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// VLOEX API のベースURL
    pub endpoint: String,

    /// APIリクエストのタイムアウト(秒)
    pub timeout_seconds: u64,
}

/// ジョブ完了待ち（ポーリング）の設定
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// ステータス確認の間隔(秒)
    pub interval_seconds: u64,

    /// 最大試行回数
    pub max_attempts: u32,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

/// Webhook受信の設定
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// タイムスタンプの許容誤差(秒)。これを超えるとリプレイとみなす
    pub tolerance_seconds: u64,

    /// 受信サーバーのデフォルトポート
    pub port: u16,

    /// 受信エンドポイントのパス
    pub path: String,
}

/// GitHub API の設定（リリース動画生成で使用）
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub endpoint: String,

    /// スクリプトに含めるリリースノート項目の最大数
    pub highlight_limit: usize,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// RUST_LOG 未設定時のログレベル (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// ビルド時に埋め込まれたconfig.tomlから設定を読み込む
    ///
    /// # Panics
    /// 設定ファイルのパースに失敗した場合はパニックします。
    /// これはビルド時設定なので、実行時エラーではなくコンパイルエラーとして扱うべきです。
    pub fn load() -> Self {
        const CONFIG_STR: &str = include_str!("../../config.toml");
        toml::from_str(CONFIG_STR)
            .expect("Failed to parse embedded config.toml. This is a build-time configuration error.")
    }
}
