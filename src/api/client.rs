/// HTTPクライアント
///
/// VLOEX API（およびGitHub API）との通信を担当するHTTPクライアント。
/// タイムアウト、Bearer認証ヘッダーの付与、ステータスコードから
/// `VloexError` への変換を含みます。リトライは行いません。
use crate::api::error::{DEFAULT_ERROR_MESSAGE, VloexError};
use crate::api::types::error_message_from_body;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// APIクライアントの結果型
pub type ApiResult<T> = Result<T, VloexError>;

/// リクエストに付与する User-Agent
const USER_AGENT: &str = concat!("vloex-rust/", env!("CARGO_PKG_VERSION"));

/// APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - APIのベースURL（例: "https://api.vloex.com"）。末尾の `/` は取り除く
    /// * `timeout` - リクエストごとのタイムアウト
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| VloexError::network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/v1/jobs/job_abc123/status"）
    /// * `auth_header` - Authorizationヘッダー（オプション）
    pub async fn get(&self, endpoint: &str, auth_header: Option<&str>) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.build_request(self.client.get(&url), auth_header);

        Self::send_with_error_handling(request, endpoint, "GET").await
    }

    /// POSTリクエストを送信
    ///
    /// # Arguments
    /// * `endpoint` - エンドポイントパス（例: "/v1/generate"）
    /// * `body` - リクエストボディ（JSON）
    /// * `auth_header` - Authorizationヘッダー（オプション）
    pub async fn post<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        auth_header: Option<&str>,
    ) -> ApiResult<Response> {
        let url = self.build_url(endpoint);
        let request = self.build_request(self.client.post(&url).json(body), auth_header);

        Self::send_with_error_handling(request, endpoint, "POST").await
    }

    /// GETして成功レスポンスのJSONをデシリアライズ
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        auth_header: Option<&str>,
    ) -> ApiResult<T> {
        let response = self.get(endpoint, auth_header).await?;
        let response = Self::check_response(response, endpoint).await?;
        Self::parse_json(response).await
    }

    /// POSTして成功レスポンスのJSONをデシリアライズ
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        auth_header: Option<&str>,
    ) -> ApiResult<T> {
        let response = self.post(endpoint, body, auth_header).await?;
        let response = Self::check_response(response, endpoint).await?;
        Self::parse_json(response).await
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn build_request(
        &self,
        mut request: reqwest::RequestBuilder,
        auth_header: Option<&str>,
    ) -> reqwest::RequestBuilder {
        if let Some(auth) = auth_header {
            request = request.header("Authorization", auth);
        }
        request
    }

    /// リクエストを送信し、トランスポート層のエラーを変換する
    async fn send_with_error_handling(
        request: reqwest::RequestBuilder,
        endpoint: &str,
        method: &str,
    ) -> ApiResult<Response> {
        debug!(method, endpoint, "sending request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                VloexError::timeout(format!("{} {}", method, endpoint))
            } else if e.is_connect() {
                VloexError::network(format!("Connection failed for {} {}: {}", method, endpoint, e))
            } else {
                VloexError::network(format!("Request failed for {} {}: {}", method, endpoint, e))
            }
        })?;

        debug!(method, endpoint, status = response.status().as_u16(), "received response");
        Ok(response)
    }

    /// レスポンスをチェックしてエラーを返す
    ///
    /// 非2xxの場合、ボディの `detail` / `message` をメッセージとして
    /// ステータスコードに応じた `VloexError` に変換する。
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body)
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

        debug!(endpoint, status = status.as_u16(), %message, "request rejected");
        Err(VloexError::from_status(status.as_u16(), message))
    }

    /// JSONレスポンスをデシリアライズ
    pub async fn parse_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| VloexError::network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| VloexError::decode(format!("Failed to parse JSON response: {}", e)))
    }
}
