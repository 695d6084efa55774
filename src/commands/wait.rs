/// 待機コマンド
///
/// 既存ジョブが completed / failed になるまでポーリングします。
use crate::commands::result::{CommandResult, VideoResult};
use crate::commands::{build_client, progress_reporter};
use anyhow::Result;
use vloex::PollOptions;

pub async fn execute(job_id: &str, poll: &PollOptions, show_progress: bool) -> Result<CommandResult> {
    let client = build_client()?;
    let video = client
        .videos()
        .wait_for_completion(job_id, poll, progress_reporter(show_progress))
        .await?;

    Ok(CommandResult::Wait(VideoResult::new(video, true)))
}
