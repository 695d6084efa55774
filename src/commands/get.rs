/// 取得コマンド
///
/// ジョブの現在の状態を1回だけ取得します。
use crate::commands::build_client;
use crate::commands::result::{CommandResult, VideoResult};
use anyhow::Result;

pub async fn execute(job_id: &str) -> Result<CommandResult> {
    let client = build_client()?;
    let video = client.videos().retrieve(job_id).await?;

    Ok(CommandResult::Get(VideoResult::new(video, false)))
}
