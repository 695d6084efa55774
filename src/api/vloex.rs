//! SDKのエントリポイント
//!
//! `Vloex` は不変のクライアント設定（APIキー、ベースURL、タイムアウト）と
//! HTTPクライアントを保持し、`videos()` リソースを提供します。
//!
//! ```no_run
//! use vloex::{CreateOptions, Vloex};
//!
//! # async fn example() -> Result<(), vloex::VloexError> {
//! let vloex = Vloex::new("vs_live_...")?;
//! let video = vloex.videos().create("Hello world", &CreateOptions::default()).await?;
//! let status = vloex.videos().retrieve(&video.id).await?;
//! # Ok(())
//! # }
//! ```

use crate::api::auth::ApiKey;
use crate::api::client::{ApiClient, ApiResult};
use crate::api::videos::VideoResource;
use crate::config::APP_CONFIG;
use std::time::Duration;

/// クライアント設定
///
/// 構築後は変更できない。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// `Vloex` のビルダー
///
/// 未指定の項目は、APIキーは環境変数 `VLOEX_API_KEY`、
/// それ以外は埋め込みの config.toml の値を使う。
#[derive(Debug, Default)]
pub struct VloexBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl VloexBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ApiResult<Vloex> {
        let api_key = match self.api_key {
            Some(key) => ApiKey::new(key)?,
            None => ApiKey::from_env()?,
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| APP_CONFIG.api.endpoint.clone());
        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(APP_CONFIG.api.timeout_seconds));

        let http = ApiClient::new(base_url, timeout)?;
        let config = ClientConfig {
            api_key,
            base_url: http.base_url().to_string(),
            timeout,
        };

        Ok(Vloex { config, http })
    }
}

/// VLOEX SDK クライアント
#[derive(Debug, Clone)]
pub struct Vloex {
    config: ClientConfig,
    http: ApiClient,
}

impl Vloex {
    /// APIキーを指定してクライアントを作成
    ///
    /// # Errors
    /// APIキーが空の場合に `VloexError::MissingApiKey` を返します。
    pub fn new(api_key: impl Into<String>) -> ApiResult<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// 環境変数 `VLOEX_API_KEY` のAPIキーでクライアントを作成
    pub fn from_env() -> ApiResult<Self> {
        Self::builder().build()
    }

    pub fn builder() -> VloexBuilder {
        VloexBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 動画リソース
    pub fn videos(&self) -> VideoResource<'_> {
        VideoResource::new(self)
    }

    pub(crate) fn http(&self) -> &ApiClient {
        &self.http
    }

    pub(crate) fn auth_header(&self) -> String {
        self.config.api_key.bearer_header()
    }
}
