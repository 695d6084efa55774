/// ステータスコマンド
///
/// どこからAPIキーが読まれるか、どのエンドポイントを使うかを表示します。
/// ネットワークアクセスは行わない。
use crate::commands::resolve_api_key;
use crate::commands::result::{CommandResult, StatusResult};
use anyhow::{Context, Result};
use vloex::ApiKey;
use vloex::config::{APP_CONFIG, UserConfig, WEBHOOK_SECRET_ENV};

pub async fn execute() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    let (api_key, api_key_source) = match resolve_api_key(&config) {
        Some((key, source)) => {
            let masked = ApiKey::new(key).map(|k| k.masked()).ok();
            (masked, Some(source))
        }
        None => (None, None),
    };

    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| APP_CONFIG.api.endpoint.clone());

    let webhook_secret_configured = std::env::var(WEBHOOK_SECRET_ENV)
        .is_ok_and(|s| !s.is_empty())
        || config.webhook_secret.is_some();

    Ok(CommandResult::Status(StatusResult {
        api_key,
        api_key_source,
        base_url,
        webhook_secret_configured,
    }))
}
