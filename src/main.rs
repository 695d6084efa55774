mod cli;
mod commands;
mod presentation;

use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;
use vloex::config::APP_CONFIG;
use vloex::config::error::ConfigError;
use vloex::domain::error::DomainError;
use vloex::error_severity::ErrorSeverity;
use vloex::{VloexError, WebhookError};

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let (args, flags) = cli::split_global_flags(&args);

    if let Err(e) = run(&args, flags).await {
        handle_error(e, flags.machine);
    }
}

/// ログ出力の初期化
///
/// RUST_LOG が無ければ config.toml の `logging.level` を使う。
/// stdout は結果出力用なのでログは stderr に書く。
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&APP_CONFIG.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// アプリケーションのメイン処理
async fn run(args: &[String], flags: cli::GlobalFlags) -> Result<()> {
    let result = cli::dispatch(args, flags).await?;
    presentation::output::output_result(&result, flags.machine)
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let json = serde_json::json!({
            "success": false,
            "error": {
                "message": error.to_string(),
                "kind": error_kind(&error),
                "chain": error.chain().skip(1).map(|c| c.to_string()).collect::<Vec<_>>(),
                "exit_code": exit_code,
                "hint": hint,
            }
        });
        println!("{}", json);
        std::process::exit(exit_code);
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから重大度を決定
fn determine_severity(error: &anyhow::Error) -> ErrorSeverity {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<VloexError>() {
            return e.severity();
        }
        if let Some(e) = cause.downcast_ref::<DomainError>() {
            return e.severity();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.severity();
        }
        if cause.downcast_ref::<WebhookError>().is_some() {
            return ErrorSeverity::ConfigError;
        }
    }

    // 引数の解析エラーなど
    ErrorSeverity::UserError
}

fn determine_exit_code(error: &anyhow::Error) -> i32 {
    determine_severity(error).exit_code()
}

/// 機械向け出力用のエラー種別
fn error_kind(error: &anyhow::Error) -> String {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<VloexError>() {
            return e.kind().as_str().to_string();
        }
        if let Some(e) = cause.downcast_ref::<DomainError>() {
            return match e {
                DomainError::ReleaseNotFound { .. } => "not_found",
                _ => "invalid_argument",
            }
            .to_string();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "config".to_string();
        }
        if cause.downcast_ref::<WebhookError>().is_some() {
            return "webhook".to_string();
        }
    }
    "usage".to_string()
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<VloexError>()
            && let Some(hint) = e.hint()
        {
            return Some(hint.to_string());
        }
        if let Some(e) = cause.downcast_ref::<DomainError>()
            && let Some(hint) = e.hint()
        {
            return Some(hint.to_string());
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>()
            && let Some(hint) = e.hint()
        {
            return Some(hint.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_from_api_error() {
        let error = anyhow::Error::new(VloexError::from_status(401, "Invalid API key".to_string()))
            .context("Create command failed");
        assert_eq!(determine_exit_code(&error), 2);
        assert!(get_error_hint(&error).is_some());
    }

    #[test]
    fn test_exit_code_from_domain_error() {
        let result: Result<()> = Err(DomainError::EmptyScript).context("Create command failed");
        let error = result.unwrap_err();
        assert_eq!(determine_exit_code(&error), 1);
        assert_eq!(error_kind(&error), "invalid_argument");
    }

    #[test]
    fn test_release_not_found_hint_names_repository() {
        let error = anyhow::Error::new(DomainError::ReleaseNotFound {
            repository: "nobody/nothing".to_string(),
        })
        .context("Release command failed");
        assert_eq!(determine_exit_code(&error), 1);
        assert_eq!(error_kind(&error), "not_found");
        let hint = get_error_hint(&error).unwrap();
        assert!(!hint.contains("job ID"));
    }

    #[test]
    fn test_exit_code_from_network_error() {
        let error = anyhow::Error::new(VloexError::network("connection refused"));
        assert_eq!(determine_exit_code(&error), 3);
    }

    #[test]
    fn test_exit_code_for_usage_error() {
        let error = anyhow::anyhow!("Unknown command: 'frobnicate'");
        assert_eq!(determine_exit_code(&error), 1);
        assert_eq!(error_kind(&error), "usage");
        assert!(get_error_hint(&error).is_none());
    }
}
