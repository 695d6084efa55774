/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - ビルド時に埋め込まれる静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定
///
/// CLIでの優先順位は 環境変数 > UserConfig > AppConfig です。
///
/// # 使用例
///
/// ```no_run
/// use vloex::config::{APP_CONFIG, UserConfig};
///
/// let endpoint = &APP_CONFIG.api.endpoint;
/// let user_config = UserConfig::load()?;
/// let api_key = user_config.get_api_key()?;
/// # Ok::<(), vloex::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UserConfig;

/// APIキーを供給する環境変数名
pub const API_KEY_ENV: &str = "VLOEX_API_KEY";

/// Webhookシークレットを供給する環境変数名
pub const WEBHOOK_SECRET_ENV: &str = "VLOEX_WEBHOOK_SECRET";
