/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::{ApiKeySource, CommandResult, VideoResult};
use anyhow::Result;
use serde_json::{Value, json};
use vloex::config::UserConfig;
use vloex::domain::formatter::format_timestamp;
use vloex::{VideoStatus, WebhookPayload};

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "vloex
Turn text into videos with the VLOEX API

Usage:
  vloex [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases

Available commands:
  login [--stdin]  - Save your VLOEX API key
                     With --stdin: Read the key from the first line of standard input
  logout           - Remove the saved API key
  status           - Show which API key and endpoint will be used
  create <script> [--avatar <name>] [--voice <name>] [--background <name>]
                  [--webhook-url <url> [--webhook-secret <secret>]] [--wait]
                   - Create a video from a script
                     --wait: Poll until the video is completed or failed
  get <job_id>     - Show the current status of a video job
  wait <job_id> [--interval <secs>] [--max-attempts <n>]
                   - Poll a video job until it is completed or failed
  release <owner/repo> [--wait] [create options...]
                   - Create an announcement video for the latest GitHub release
  serve [--port <port>]
                   - Receive and verify webhook notifications (Ctrl+C to stop)
  help             - Display this help message

Environment:
  VLOEX_API_KEY         - API key (takes precedence over the saved key)
  VLOEX_WEBHOOK_SECRET  - Shared secret used by 'serve' to verify signatures
  RUST_LOG              - Log filter (e.g. 'vloex=debug')

Error Output:
  Normal mode:   Human-readable error messages to stderr
  --machine:     JSON error object with exit_code and hint fields";

/// コマンド結果を適切な形式で出力する
///
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）、動画URLのみstdout
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", machine_readable(result)?);
    } else {
        output_human_readable(result);
    }

    Ok(())
}

fn print_video(video: &VideoResult) {
    let user_config = UserConfig::load().ok();
    let format_time = |ts: &str| match &user_config {
        Some(config) => format_timestamp(ts, config),
        None => ts.to_string(),
    };

    eprintln!("Job ID:     {}", video.job_id);
    eprintln!("Status:     {}", video.status);
    if let Some(created_at) = &video.created_at {
        eprintln!("Created:    {}", format_time(created_at));
    }
    if let Some(updated_at) = &video.updated_at {
        eprintln!("Updated:    {}", format_time(updated_at));
    }
    if let Some(error) = &video.error {
        eprintln!("Error:      {}", error);
    }

    match video.status {
        VideoStatus::Completed => {
            if let Some(url) = &video.url {
                eprintln!();
                eprintln!("Video URL:");
                // URLだけはパイプで使えるようにstdoutへ
                println!("{}", url);
            }
        }
        VideoStatus::Pending | VideoStatus::Processing if !video.waited => {
            eprintln!();
            eprintln!("Run 'vloex wait {}' to wait for completion.", video.job_id);
        }
        _ => {}
    }
}

fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Login(r) => {
            eprintln!();
            if r.was_logged_in {
                eprintln!("✓ API key updated!");
            } else {
                eprintln!("Login successful.");
            }
            eprintln!("API key {} has been saved.", r.api_key);
        }
        CommandResult::Logout(r) => {
            if r.was_logged_in {
                eprintln!("Logged out successfully.");
                eprintln!("The saved API key has been removed.");
            } else {
                eprintln!("Already logged out.");
            }
        }
        CommandResult::Status(r) => {
            match (&r.api_key, r.api_key_source) {
                (Some(key), Some(source)) => {
                    let from = match source {
                        ApiKeySource::Environment => "VLOEX_API_KEY",
                        ApiKeySource::ConfigFile => "config file",
                    };
                    eprintln!("API key:        {} (from {})", key, from);
                }
                _ => {
                    eprintln!("Not logged in");
                    eprintln!("Set VLOEX_API_KEY or run 'vloex login' to configure an API key.");
                }
            }
            eprintln!("Endpoint:       {}", r.base_url);
            eprintln!(
                "Webhook secret: {}",
                if r.webhook_secret_configured {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
        CommandResult::Create(r) => {
            eprintln!();
            eprintln!("Video job created!");
            eprintln!("---");
            print_video(r);
        }
        CommandResult::Get(r) | CommandResult::Wait(r) => {
            eprintln!();
            print_video(r);
        }
        CommandResult::Release(r) => {
            eprintln!();
            eprintln!("Release:    {} {}", r.repository, r.release_name);
            if let Some(published) = &r.published_at {
                eprintln!("Published:  {}", published);
            }
            if r.highlights.is_empty() {
                eprintln!("No highlights found in the release notes.");
            } else {
                eprintln!("Highlights:");
                for highlight in &r.highlights {
                    eprintln!("  - {}", highlight);
                }
            }
            eprintln!("---");
            print_video(&r.video);
        }
        CommandResult::Serve(r) => {
            eprintln!();
            eprintln!(
                "Webhook receiver stopped. {} event(s) received.",
                r.events_received
            );
        }
        CommandResult::Help => {
            eprintln!("{}", HELP_TEXT);
        }
    }
}

/// 機械可読JSONを組み立てる
///
/// すべての結果に `success` と `command` を含める。
fn machine_readable(result: &CommandResult) -> Result<Value> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(map) = &mut value {
        map.insert("success".to_string(), Value::Bool(true));
    }
    Ok(value)
}

/// Webhook受信サーバーの起動を通知
pub fn print_serve_started(address: &str, path: &str, verifying: bool, machine_output: bool) {
    if machine_output {
        println!(
            "{}",
            json!({
                "event": "listening",
                "address": address,
                "path": path,
                "verifying": verifying
            })
        );
        return;
    }

    eprintln!("Listening for webhooks on http://{}{}", address, path);
    if verifying {
        eprintln!("Signatures are verified with the configured webhook secret.");
    } else {
        eprintln!("Warning: no webhook secret configured; payloads are NOT verified.");
        eprintln!("Set VLOEX_WEBHOOK_SECRET to enable signature verification.");
    }
    eprintln!("Press Ctrl+C to stop.");
}

/// 受信したWebhookイベントを表示
pub fn print_webhook_event(payload: &WebhookPayload, machine_output: bool) {
    if machine_output {
        match serde_json::to_string(payload) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Failed to serialize webhook event: {}", e),
        }
        return;
    }

    eprintln!("[{}] {} ({})", payload.event, payload.job_id, payload.status);
    if let Some(url) = &payload.video_url {
        eprintln!("  Video URL: {}", url);
    }
    if let Some(error) = &payload.error {
        eprintln!("  Error: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::result::{LoginResult, ReleaseResult, StatusResult};

    fn processing_video() -> VideoResult {
        VideoResult {
            job_id: "job_abc123".to_string(),
            status: VideoStatus::Processing,
            url: None,
            error: None,
            created_at: None,
            updated_at: None,
            waited: false,
        }
    }

    #[test]
    fn test_machine_readable_login() {
        let result = CommandResult::Login(LoginResult {
            was_logged_in: false,
            api_key: "vs_l***3456".to_string(),
        });
        let json = machine_readable(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["command"], "login");
        assert_eq!(json["api_key"], "vs_l***3456");
    }

    #[test]
    fn test_machine_readable_status_without_key() {
        let result = CommandResult::Status(StatusResult {
            api_key: None,
            api_key_source: None,
            base_url: "https://api.vloex.com".to_string(),
            webhook_secret_configured: false,
        });
        let json = machine_readable(&result).unwrap();

        assert_eq!(json["command"], "status");
        assert!(json["api_key"].is_null());
    }

    #[test]
    fn test_machine_readable_create() {
        let json = machine_readable(&CommandResult::Create(processing_video())).unwrap();

        assert_eq!(json["command"], "create");
        assert_eq!(json["job_id"], "job_abc123");
        assert_eq!(json["status"], "processing");
        assert_eq!(json["waited"], false);
    }

    #[test]
    fn test_machine_readable_release_nests_video() {
        let result = CommandResult::Release(ReleaseResult {
            repository: "vercel/next.js".to_string(),
            version: "v15.5.4".to_string(),
            release_name: "v15.5.4".to_string(),
            published_at: Some("2025-09-18".to_string()),
            highlights: vec!["Fix router".to_string()],
            script: "next.js v15.5.4 has been released!".to_string(),
            video: processing_video(),
        });
        let json = machine_readable(&result).unwrap();

        assert_eq!(json["command"], "release");
        assert_eq!(json["video"]["job_id"], "job_abc123");
        assert_eq!(json["highlights"][0], "Fix router");
    }

    #[test]
    fn test_machine_readable_help() {
        let json = machine_readable(&CommandResult::Help).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["command"], "help");
    }

    #[test]
    fn test_output_result_modes() {
        assert!(output_result(&CommandResult::Help, true).is_ok());
        assert!(output_result(&CommandResult::Help, false).is_ok());
    }
}
