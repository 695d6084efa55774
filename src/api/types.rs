/// API通信用の型定義
///
/// VLOEX APIのリクエスト・レスポンスと、SDKが呼び出し元に返す
/// `Video` 型を定義します。APIの生レスポンスはエンドポイントごとに
/// フィールド名が揺れるため（`job_id`/`id`, `video_url`/`url` など）、
/// 一度 `*Response` 型で受けてから `Video` に正規化します。
use crate::api::error::VloexError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 動画生成ジョブのステータス
///
/// pending/processing から completed/failed への遷移はサーバー側が保証する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl VideoStatus {
    /// 終端状態（completed / failed）か
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 動画生成ジョブ
///
/// `create` と `retrieve` の両方がこの形で返す。
/// クライアントは値を変更せず、再取得するだけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub status: VideoStatus,
    /// 完成した動画のURL（completed のときのみ）
    pub url: Option<String>,
    /// 失敗理由（failed のときのみ）
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 動画作成オプション
///
/// 既知のオプション以外も `option()` で任意に渡せる。
/// すべて `options` オブジェクトとしてそのまま送信される。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// 完了通知を受け取るWebhook URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Webhook署名用の共有シークレット
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// 完了時のWebhook通知を設定
    pub fn webhook(mut self, url: impl Into<String>, secret: Option<String>) -> Self {
        self.webhook_url = Some(url.into());
        self.webhook_secret = secret;
        self
    }

    /// 任意のオプションを追加
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// POST /v1/generate のリクエストボディ
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub input: &'a str,
    pub options: &'a CreateOptions,
}

/// POST /v1/generate のレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    status: VideoStatus,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<GenerateResponse> for Video {
    type Error = VloexError;

    fn try_from(response: GenerateResponse) -> Result<Self, Self::Error> {
        let id = response
            .job_id
            .or(response.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| VloexError::decode("generate response did not contain a job id"))?;

        Ok(Video {
            id,
            status: response.status,
            url: response.url,
            error: response.error,
            created_at: None,
            updated_at: None,
        })
    }
}

/// GET /v1/jobs/{id}/status のレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct JobStatusResponse {
    #[serde(default)]
    id: Option<String>,
    status: VideoStatus,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    updated_at: Option<String>,
}

impl JobStatusResponse {
    /// `Video` に正規化する。レスポンスにIDがなければ要求したIDを使う。
    pub(crate) fn into_video(self, requested_id: &str) -> Video {
        Video {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| requested_id.to_string()),
            status: self.status,
            url: self.video_url.or(self.url),
            error: self.error_message.or(self.error),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// エラーレスポンスのボディからメッセージを取り出す
///
/// `detail` → `message` の順に探す。空文字・空配列・空オブジェクト・
/// `false`・`0` は未設定として次の候補へ進む。
/// 文字列以外の値はJSONとして表示する。
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let field = ["detail", "message"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find(|v| is_present(v))?;

    match field {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// 文字列・数値のどちらで来ても文字列として受け取る
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
