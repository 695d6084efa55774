/// 動画リソース
///
/// ジョブの作成（POST /v1/generate）と状態取得（GET /v1/jobs/{id}/status）、
/// およびそれを使った完了待ちのポーリングを提供します。
use crate::api::client::ApiResult;
use crate::api::error::VloexError;
use crate::api::types::{CreateOptions, GenerateRequest, GenerateResponse, JobStatusResponse, Video, VideoStatus};
use crate::api::vloex::Vloex;
use crate::config::APP_CONFIG;
use crate::domain::progress::{GenerationPhase, GenerationProgress};
use crate::domain::validator;
use std::time::Duration;
use tracing::{debug, info};

const GENERATE_ENDPOINT: &str = "/v1/generate";

/// 完了待ちのポーリング設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// 各試行の前に待つ時間
    pub interval: Duration,
    /// 最大試行回数
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: APP_CONFIG.polling.interval(),
            max_attempts: APP_CONFIG.polling.max_attempts,
        }
    }
}

/// `Vloex::videos()` が返すリソース
pub struct VideoResource<'a> {
    client: &'a Vloex,
}

impl<'a> VideoResource<'a> {
    pub(crate) fn new(client: &'a Vloex) -> Self {
        Self { client }
    }

    /// テキストから動画を作成する
    ///
    /// 作成されたジョブのIDと初期ステータス（通常 pending / processing）を返す。
    ///
    /// # Errors
    /// - スクリプトが空: `InvalidArgument`（リクエストは送信しない）
    /// - 401: `Authentication` / 429: `RateLimited` / 402: `QuotaExceeded`
    /// - その他の非2xx、ネットワークエラー
    pub async fn create(&self, script: &str, options: &CreateOptions) -> ApiResult<Video> {
        validator::validate_script(script)?;

        let request = GenerateRequest {
            input: script,
            options,
        };
        let auth = self.client.auth_header();
        let response: GenerateResponse = self
            .client
            .http()
            .post_json(GENERATE_ENDPOINT, &request, Some(&auth))
            .await?;

        let video = Video::try_from(response)?;
        info!(job_id = %video.id, status = %video.status, "video job created");
        Ok(video)
    }

    /// ジョブの現在の状態を取得する
    ///
    /// # Errors
    /// 不明なIDは `NotFound`。それ以外は `create` と同じ。
    pub async fn retrieve(&self, id: &str) -> ApiResult<Video> {
        validator::validate_job_id(id)?;

        let endpoint = format!("/v1/jobs/{}/status", id);
        let auth = self.client.auth_header();
        let response: JobStatusResponse = self
            .client
            .http()
            .get_json(&endpoint, Some(&auth))
            .await?;

        let video = response.into_video(id);
        debug!(job_id = %video.id, status = %video.status, "video job retrieved");
        Ok(video)
    }

    /// ジョブが終端状態（completed / failed）になるまでポーリングする
    ///
    /// 各試行の前に `interval` 待ってから `retrieve` を呼ぶ。
    /// failed も `Ok` で返すので、呼び出し側は `status` を確認すること。
    /// `retrieve` のエラーは再試行せずにそのまま返す。
    ///
    /// # Errors
    /// `max_attempts` 回で終わらなければ `VloexError::Timeout`。
    pub async fn wait_for_completion<F>(
        &self,
        id: &str,
        poll: &PollOptions,
        mut on_progress: F,
    ) -> ApiResult<Video>
    where
        F: FnMut(&GenerationProgress),
    {
        let mut last_status: Option<VideoStatus> = None;

        for attempt in 1..=poll.max_attempts {
            tokio::time::sleep(poll.interval).await;

            let video = self.retrieve(id).await?;
            last_status = Some(video.status);

            on_progress(&GenerationProgress::new(GenerationPhase::Polling {
                job_id: video.id.clone(),
                attempt,
                max_attempts: poll.max_attempts,
                status: video.status,
            }));

            match video.status {
                VideoStatus::Completed => {
                    on_progress(&GenerationProgress::new(GenerationPhase::Completed {
                        job_id: video.id.clone(),
                        url: video.url.clone(),
                    }));
                    return Ok(video);
                }
                VideoStatus::Failed => {
                    on_progress(&GenerationProgress::new(GenerationPhase::Failed {
                        job_id: video.id.clone(),
                        error: video.error.clone(),
                    }));
                    return Ok(video);
                }
                VideoStatus::Pending | VideoStatus::Processing => {}
            }
        }

        let last = last_status.map_or("unknown", VideoStatus::as_str);
        Err(VloexError::timeout(format!(
            "waiting for video {} after {} attempts (last status: {})",
            id, poll.max_attempts, last
        )))
    }
}
