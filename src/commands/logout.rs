/// ログアウトコマンド
///
/// 保存されているAPIキーを削除します。
/// 環境変数 VLOEX_API_KEY には触れない。
use crate::commands::result::{CommandResult, LogoutResult};
use anyhow::{Context, Result};
use vloex::config::UserConfig;

/// ログアウトコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    let was_logged_in = config.has_api_key();
    if !was_logged_in {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
        }));
    }

    config.clear_api_key();
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult {
        was_logged_in: true,
    }))
}
