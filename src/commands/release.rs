/// リリース告知コマンド
///
/// GitHubの最新リリースを取得し、リリースノートの箇条書きから
/// 告知動画のスクリプトを組み立てて動画を作成します。
use crate::commands::result::{CommandResult, ReleaseResult, VideoResult};
use crate::commands::{build_client, progress_reporter};
use anyhow::{Context, Result};
use tracing::info;
use vloex::api::github::GithubClient;
use vloex::config::APP_CONFIG;
use vloex::domain::error::DomainError;
use vloex::domain::progress::{GenerationPhase, GenerationProgress};
use vloex::domain::{release, validator};
use vloex::{CreateOptions, ErrorKind, PollOptions, VloexError};

/// リリース告知コマンドの引数
#[derive(Debug, Clone)]
pub struct ReleaseArgs {
    /// `owner/repo` 形式
    pub repository: String,
    pub options: CreateOptions,
    pub wait: Option<PollOptions>,
    pub show_progress: bool,
}

/// GitHubの404はジョブIDではなくリポジトリの問題として報告する
fn release_lookup_error(error: VloexError, repository: &str) -> anyhow::Error {
    if error.kind() == ErrorKind::NotFound {
        return DomainError::ReleaseNotFound {
            repository: repository.to_string(),
        }
        .into();
    }
    anyhow::Error::new(error).context(format!("Failed to fetch latest release of {}", repository))
}

pub async fn execute(args: ReleaseArgs) -> Result<CommandResult> {
    let (owner, repo) = validator::parse_repository(&args.repository)?;
    // APIキーがなければGitHubに問い合わせる前に失敗させる
    let client = build_client()?;

    let github = GithubClient::public().context("Failed to initialize GitHub client")?;
    let latest = github
        .fetch_latest_release(owner, repo)
        .await
        .map_err(|e| release_lookup_error(e, &args.repository))?;

    let highlights = release::extract_highlights(
        latest.body.as_deref().unwrap_or_default(),
        APP_CONFIG.github.highlight_limit,
    );
    let script = release::create_release_script(&latest.tag_name, &highlights, repo);
    info!(
        repository = %args.repository,
        version = %latest.tag_name,
        highlights = highlights.len(),
        "release script prepared"
    );

    let mut report = progress_reporter(args.show_progress);
    report(&GenerationProgress::new(GenerationPhase::Submitting {
        script_chars: script.chars().count(),
    }));
    let video = client.videos().create(&script, &args.options).await?;
    report(&GenerationProgress::new(GenerationPhase::Submitted {
        job_id: video.id.clone(),
        status: video.status,
    }));

    let video = match args.wait {
        Some(poll) => VideoResult::new(
            client
                .videos()
                .wait_for_completion(&video.id, &poll, report)
                .await?,
            true,
        ),
        None => VideoResult::new(video, false),
    };

    Ok(CommandResult::Release(ReleaseResult {
        repository: args.repository.clone(),
        version: latest.tag_name.clone(),
        release_name: latest.display_name().to_string(),
        published_at: latest
            .published_at
            .as_deref()
            .map(|p| release::published_date(p).to_string()),
        highlights,
        script,
        video,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_release_reports_repository() {
        let error = release_lookup_error(
            VloexError::from_status(404, "Not Found".to_string()),
            "nobody/nothing",
        );

        let domain = error.downcast_ref::<DomainError>().unwrap();
        assert_eq!(
            domain,
            &DomainError::ReleaseNotFound {
                repository: "nobody/nothing".to_string()
            }
        );
        assert!(error.to_string().contains("nobody/nothing"));
        let hint = domain.hint().unwrap();
        assert!(hint.contains("repository"));
        assert!(!hint.contains("job"));
        assert!(error.downcast_ref::<VloexError>().is_none());
    }

    #[test]
    fn test_other_github_errors_keep_their_kind() {
        let error = release_lookup_error(
            VloexError::from_status(429, "rate limit".to_string()),
            "vercel/next.js",
        );

        assert!(error.downcast_ref::<DomainError>().is_none());
        let api = error
            .chain()
            .find_map(|c| c.downcast_ref::<VloexError>())
            .unwrap();
        assert_eq!(api.kind(), ErrorKind::RateLimited);
        assert!(error.to_string().contains("vercel/next.js"));
    }
}
