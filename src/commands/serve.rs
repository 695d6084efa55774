/// Webhook受信サーバーコマンド
///
/// `POST {webhook.path}` で通知を受け付け、検証済みのイベントを表示します。
/// Ctrl+C で停止し、受信件数を結果として返す。
use crate::commands::result::{CommandResult, ServeResult};
use crate::presentation::output;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};
use vloex::config::{APP_CONFIG, UserConfig, WEBHOOK_SECRET_ENV};
use vloex::webhook::{ReceiverState, WebhookVerifier, router};

/// 受信イベントのバッファ数
const EVENT_BUFFER: usize = 64;

/// 環境変数 → ユーザー設定ファイル の順でシークレットを解決し、検証器を作る
///
/// `env_secret` は `VLOEX_WEBHOOK_SECRET` の値。空文字は未設定として扱う。
fn resolve_verifier(
    env_secret: Option<String>,
    config: &UserConfig,
) -> Result<Option<WebhookVerifier>> {
    let secret = env_secret
        .filter(|s| !s.is_empty())
        .or_else(|| config.webhook_secret.clone());

    let Some(secret) = secret else {
        return Ok(None);
    };

    let verifier = WebhookVerifier::new(secret)
        .context("Invalid webhook secret")?
        .with_tolerance(Duration::from_secs(APP_CONFIG.webhook.tolerance_seconds));
    Ok(Some(verifier))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutting down webhook receiver");
}

pub async fn execute(port: Option<u16>, machine: bool) -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;
    let verifier = resolve_verifier(std::env::var(WEBHOOK_SECRET_ENV).ok(), &config)?;
    let verifying = verifier.is_some();

    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
    let app = router(ReceiverState::new(verifier, tx));

    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(APP_CONFIG.webhook.port)));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind webhook receiver to {}", addr))?;
    let local_addr = listener.local_addr().context("Failed to read bound address")?;

    output::print_serve_started(&local_addr.to_string(), &APP_CONFIG.webhook.path, verifying, machine);

    let printer = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(payload) = rx.recv().await {
            output::print_webhook_event(&payload, machine);
            received += 1;
        }
        received
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook receiver stopped unexpectedly")?;

    let events_received = printer.await.context("Event printer task failed")?;

    Ok(CommandResult::Serve(ServeResult {
        address: local_addr.to_string(),
        path: APP_CONFIG.webhook.path.clone(),
        verifying,
        events_received,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"event":"video.completed"}"#;

    fn config_with_secret(secret: &str) -> UserConfig {
        UserConfig {
            webhook_secret: Some(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_verifier_from_config() {
        let verifier = resolve_verifier(None, &config_with_secret("whsec_config"))
            .unwrap()
            .unwrap();
        assert_eq!(verifier.tolerance(), Duration::from_secs(300));

        let expected = WebhookVerifier::new("whsec_config").unwrap();
        assert_eq!(
            verifier.sign(1_700_000_000, BODY).unwrap(),
            expected.sign(1_700_000_000, BODY).unwrap()
        );

        assert!(resolve_verifier(None, &UserConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_resolve_verifier_env_takes_precedence() {
        let verifier = resolve_verifier(
            Some("whsec_env".to_string()),
            &config_with_secret("whsec_config"),
        )
        .unwrap()
        .unwrap();

        let expected = WebhookVerifier::new("whsec_env").unwrap();
        assert_eq!(
            verifier.sign(1_700_000_000, BODY).unwrap(),
            expected.sign(1_700_000_000, BODY).unwrap()
        );
    }

    #[test]
    fn test_resolve_verifier_empty_env_falls_back() {
        let verifier = resolve_verifier(Some(String::new()), &config_with_secret("whsec_config"))
            .unwrap()
            .unwrap();
        let expected = WebhookVerifier::new("whsec_config").unwrap();
        assert_eq!(
            verifier.sign(1_700_000_000, BODY).unwrap(),
            expected.sign(1_700_000_000, BODY).unwrap()
        );

        assert!(
            resolve_verifier(Some(String::new()), &UserConfig::default())
                .unwrap()
                .is_none()
        );
    }
}
