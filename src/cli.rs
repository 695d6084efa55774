use crate::commands::{self, CommandResult};
use crate::commands::create::CreateArgs;
use crate::commands::release::ReleaseArgs;
use anyhow::{Context, Result, bail};
use std::time::Duration;
use vloex::{CreateOptions, PollOptions};

/// 解析済みのグローバルフラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    /// 機械可読（JSON）出力
    pub machine: bool,
}

/// グローバルフラグを取り除いた引数列とフラグを返す
pub fn split_global_flags(args: &[String]) -> (Vec<String>, GlobalFlags) {
    let mut flags = GlobalFlags::default();
    let rest = args
        .iter()
        .filter(|arg| {
            if arg.as_str() == "--machine" {
                flags.machine = true;
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();
    (rest, flags)
}

/// コマンド引数を先頭から消費するパーサー
struct ArgCursor {
    args: Vec<String>,
}

impl ArgCursor {
    fn new(args: &[String]) -> Self {
        Self {
            args: args.to_vec(),
        }
    }

    /// `--name` があれば取り除いて true を返す
    fn flag(&mut self, name: &str) -> bool {
        match self.args.iter().position(|a| a == name) {
            Some(idx) => {
                self.args.remove(idx);
                true
            }
            None => false,
        }
    }

    /// `--name <value>` があれば取り除いて値を返す
    fn value(&mut self, name: &str) -> Result<Option<String>> {
        let Some(idx) = self.args.iter().position(|a| a == name) else {
            return Ok(None);
        };
        if idx + 1 >= self.args.len() {
            bail!("Option '{}' requires a value", name);
        }
        let value = self.args.remove(idx + 1);
        self.args.remove(idx);
        Ok(Some(value))
    }

    fn parsed<T: std::str::FromStr>(&mut self, name: &str) -> Result<Option<T>> {
        match self.value(name)? {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| anyhow::anyhow!("Invalid value '{}' for option '{}'", raw, name)),
            None => Ok(None),
        }
    }

    /// 残りの位置引数を1つだけ取り出す
    fn positional(&mut self, what: &str) -> Result<String> {
        if let Some(unknown) = self.args.iter().find(|a| a.starts_with("--")) {
            bail!("Unknown option: '{}'", unknown);
        }
        match self.args.len() {
            0 => bail!("Please specify {}", what),
            1 => Ok(self.args.remove(0)),
            _ => bail!(
                "Too many arguments. Quote {} if it contains spaces.",
                what
            ),
        }
    }

    fn finish(&self) -> Result<()> {
        if let Some(extra) = self.args.first() {
            bail!("Unexpected argument: '{}'", extra);
        }
        Ok(())
    }
}

fn create_options(cursor: &mut ArgCursor) -> Result<CreateOptions> {
    let mut options = CreateOptions::new();
    if let Some(avatar) = cursor.value("--avatar")? {
        options = options.avatar(avatar);
    }
    if let Some(voice) = cursor.value("--voice")? {
        options = options.voice(voice);
    }
    if let Some(background) = cursor.value("--background")? {
        options = options.background(background);
    }
    let webhook_secret = cursor.value("--webhook-secret")?;
    match cursor.value("--webhook-url")? {
        Some(url) => options = options.webhook(url, webhook_secret),
        None if webhook_secret.is_some() => {
            bail!("--webhook-secret requires --webhook-url")
        }
        None => {}
    }
    Ok(options)
}

fn poll_options(cursor: &mut ArgCursor) -> Result<PollOptions> {
    let mut poll = PollOptions::default();
    if let Some(secs) = cursor.parsed::<u64>("--interval")? {
        poll.interval = Duration::from_secs(secs);
    }
    if let Some(max) = cursor.parsed::<u32>("--max-attempts")? {
        poll.max_attempts = max;
    }
    Ok(poll)
}

/// CLI引数を解析し、適切なコマンドにディスパッチする
///
/// `args` はプログラム名とグローバルフラグを取り除いた後のもの。
pub async fn dispatch(args: &[String], flags: GlobalFlags) -> Result<CommandResult> {
    let Some(command) = args.first() else {
        return Ok(CommandResult::Help);
    };
    let mut cursor = ArgCursor::new(&args[1..]);
    let show_progress = !flags.machine;

    match command.as_str() {
        "login" => {
            let use_stdin = cursor.flag("--stdin");
            cursor.finish()?;
            commands::login::execute(use_stdin)
                .await
                .context("Login command failed")
        }
        "logout" => {
            cursor.finish()?;
            commands::logout::execute()
                .await
                .context("Logout command failed")
        }
        "status" => {
            cursor.finish()?;
            commands::status::execute()
                .await
                .context("Status command failed")
        }
        "create" => {
            let wait = cursor.flag("--wait");
            let options = create_options(&mut cursor)?;
            let poll = poll_options(&mut cursor)?;
            let script = cursor.positional("a script for the create command")?;
            commands::create::execute(CreateArgs {
                script,
                options,
                wait: wait.then_some(poll),
                show_progress,
            })
            .await
            .context("Create command failed")
        }
        "get" => {
            let job_id = cursor.positional("a job ID for the get command")?;
            commands::get::execute(&job_id)
                .await
                .context("Get command failed")
        }
        "wait" => {
            let poll = poll_options(&mut cursor)?;
            let job_id = cursor.positional("a job ID for the wait command")?;
            commands::wait::execute(&job_id, &poll, show_progress)
                .await
                .context("Wait command failed")
        }
        "release" => {
            let wait = cursor.flag("--wait");
            let options = create_options(&mut cursor)?;
            let poll = poll_options(&mut cursor)?;
            let repository = cursor.positional("a repository (owner/repo) for the release command")?;
            commands::release::execute(ReleaseArgs {
                repository,
                options,
                wait: wait.then_some(poll),
                show_progress,
            })
            .await
            .context("Release command failed")
        }
        "serve" => {
            let port = cursor.parsed::<u16>("--port")?;
            cursor.finish()?;
            commands::serve::execute(port, flags.machine)
                .await
                .context("Serve command failed")
        }
        "help" => commands::help::execute().await,
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_global_flags() {
        let (rest, flags) = split_global_flags(&args(&["--machine", "get", "job_abc123"]));
        assert!(flags.machine);
        assert_eq!(rest, args(&["get", "job_abc123"]));

        let (rest, flags) = split_global_flags(&args(&["status"]));
        assert!(!flags.machine);
        assert_eq!(rest, args(&["status"]));
    }

    #[test]
    fn test_create_options_parsing() {
        let mut cursor = ArgCursor::new(&args(&[
            "Hello world",
            "--avatar",
            "sophia",
            "--webhook-url",
            "https://example.com/hook",
            "--webhook-secret",
            "s3cret",
        ]));
        let options = create_options(&mut cursor).unwrap();

        assert_eq!(options.avatar.as_deref(), Some("sophia"));
        assert_eq!(options.webhook_url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(options.webhook_secret.as_deref(), Some("s3cret"));
        assert_eq!(cursor.positional("a script").unwrap(), "Hello world");
    }

    #[test]
    fn test_webhook_secret_without_url_rejected() {
        let mut cursor = ArgCursor::new(&args(&["Hello", "--webhook-secret", "s3cret"]));
        assert!(create_options(&mut cursor).is_err());
    }

    #[test]
    fn test_missing_option_value() {
        let mut cursor = ArgCursor::new(&args(&["Hello", "--voice"]));
        assert!(cursor.value("--voice").is_err());
    }

    #[test]
    fn test_poll_options_parsing() {
        let mut cursor = ArgCursor::new(&args(&["job_1", "--interval", "2", "--max-attempts", "10"]));
        let poll = poll_options(&mut cursor).unwrap();
        assert_eq!(poll.interval, Duration::from_secs(2));
        assert_eq!(poll.max_attempts, 10);

        let mut cursor = ArgCursor::new(&args(&["job_1", "--interval", "soon"]));
        assert!(poll_options(&mut cursor).is_err());
    }

    #[test]
    fn test_positional_rejects_unknown_option() {
        let mut cursor = ArgCursor::new(&args(&["job_1", "--verbose"]));
        assert!(cursor.positional("a job ID").is_err());
    }
}
