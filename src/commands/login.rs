/// ログインコマンド
///
/// VLOEX のAPIキーを受け取り、ユーザー設定ファイルに保存します。
/// キーの有効性はここでは確認しない（最初のAPI呼び出しで判明する）。
use crate::commands::result::{CommandResult, LoginResult};
use crate::presentation::input;
use anyhow::{Context, Result};
use vloex::ApiKey;
use vloex::config::UserConfig;

/// ログインコマンドを実行
///
/// # Arguments
/// * `use_stdin` - true の場合、標準入力の1行目をAPIキーとして読む
pub async fn execute(use_stdin: bool) -> Result<CommandResult> {
    let raw_key = if use_stdin {
        input::read_api_key_from_stdin()?
    } else {
        input::read_api_key_interactive()?
    };

    let api_key = ApiKey::new(raw_key).context("Invalid API key")?;

    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_logged_in = config.has_api_key();

    config.set_api_key(api_key.expose().to_string());
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        was_logged_in,
        api_key: api_key.masked(),
    }))
}
