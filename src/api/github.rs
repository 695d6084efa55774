/// GitHub Releases クライアント
///
/// リリース告知動画の生成に使う、最新リリースの取得だけを行う。
/// 認証なしの公開APIを使う（レート制限は GitHub 側の既定値）。
use crate::api::client::{ApiClient, ApiResult};
use crate::config::APP_CONFIG;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// GitHubリリース
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Release {
    /// 表示用の名前（name が空なら tag_name）
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.tag_name)
    }
}

pub struct GithubClient {
    http: ApiClient,
}

impl GithubClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let timeout = Duration::from_secs(APP_CONFIG.api.timeout_seconds);
        Ok(Self {
            http: ApiClient::new(base_url, timeout)?,
        })
    }

    /// api.github.com を使うクライアント
    pub fn public() -> ApiResult<Self> {
        Self::new(APP_CONFIG.github.endpoint.clone())
    }

    /// 最新リリースを取得する
    ///
    /// # Errors
    /// リポジトリやリリースが存在しない場合は `NotFound`。
    pub async fn fetch_latest_release(&self, owner: &str, repo: &str) -> ApiResult<Release> {
        let endpoint = format!("/repos/{}/{}/releases/latest", owner, repo);
        self.http.get_json(&endpoint, None).await
    }
}
