pub mod create;
pub mod get;
pub mod help;
pub mod login;
pub mod logout;
pub mod release;
pub mod result;
pub mod serve;
pub mod status;
pub mod wait;

pub use result::CommandResult;

use crate::presentation::progress;
use anyhow::{Context, Result};
use result::ApiKeySource;
use std::time::Duration;
use vloex::config::error::ConfigError;
use vloex::config::{API_KEY_ENV, UserConfig};
use vloex::domain::progress::GenerationProgress;
use vloex::Vloex;

/// 環境変数 → ユーザー設定ファイル の順でAPIキーを解決する
///
/// 空文字の環境変数は未設定として扱う。
pub(crate) fn resolve_api_key(user_config: &UserConfig) -> Option<(String, ApiKeySource)> {
    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.trim().is_empty()
    {
        return Some((key, ApiKeySource::Environment));
    }

    user_config
        .get_api_key()
        .ok()
        .map(|key| (key.to_string(), ApiKeySource::ConfigFile))
}

/// 設定を読み込み、APIクライアントを構築する
pub(crate) fn build_client() -> Result<Vloex> {
    let user_config = UserConfig::load().context("Failed to load configuration file")?;

    let Some((api_key, _)) = resolve_api_key(&user_config) else {
        return Err(ConfigError::api_key_not_found(
            "No API key found in VLOEX_API_KEY or the configuration file.",
        )
        .into());
    };

    let mut builder = Vloex::builder().api_key(api_key);
    if let Some(base_url) = &user_config.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(secs) = user_config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("Failed to initialize VLOEX client")
}

/// 進捗コールバックを作成する
///
/// `show` が false の場合は何も表示しない。
pub(crate) fn progress_reporter(show: bool) -> impl FnMut(&GenerationProgress) {
    move |event: &GenerationProgress| {
        if show {
            progress::report(event);
        }
    }
}
