/// 作成コマンド
///
/// スクリプトから動画生成ジョブを作成し、`--wait` 指定時は完了まで待ちます。
use crate::commands::result::{CommandResult, VideoResult};
use crate::commands::{build_client, progress_reporter};
use anyhow::Result;
use vloex::domain::progress::{GenerationPhase, GenerationProgress};
use vloex::{CreateOptions, PollOptions};

/// 作成コマンドの引数
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub script: String,
    pub options: CreateOptions,
    /// `Some` の場合、作成後に完了まで待つ
    pub wait: Option<PollOptions>,
    pub show_progress: bool,
}

pub async fn execute(args: CreateArgs) -> Result<CommandResult> {
    let client = build_client()?;
    let mut report = progress_reporter(args.show_progress);

    report(&GenerationProgress::new(GenerationPhase::Submitting {
        script_chars: args.script.chars().count(),
    }));
    let video = client.videos().create(&args.script, &args.options).await?;
    report(&GenerationProgress::new(GenerationPhase::Submitted {
        job_id: video.id.clone(),
        status: video.status,
    }));

    let Some(poll) = args.wait else {
        return Ok(CommandResult::Create(VideoResult::new(video, false)));
    };

    let video = client
        .videos()
        .wait_for_completion(&video.id, &poll, report)
        .await?;

    Ok(CommandResult::Create(VideoResult::new(video, true)))
}
