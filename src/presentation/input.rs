/// プレゼンテーション層: ユーザー入力処理
///
/// 対話入力またはstdinからAPIキーを取得します。
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 入力行からAPIキーを取り出す（前後の空白を除去）
fn parse_key_line(line: &str) -> Result<String> {
    let key = line.trim();
    if key.is_empty() {
        bail!("API key cannot be empty. Please provide a valid API key.");
    }
    Ok(key.to_string())
}

/// 対話的にAPIキーを取得
pub fn read_api_key_interactive() -> Result<String> {
    eprintln!("Logging in to VLOEX...");
    eprintln!();
    eprintln!("Please enter your VLOEX API key.");
    eprintln!("You can create one at: https://vloex.com/dashboard/api-keys");
    eprintln!();

    eprint!("API key: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read API key from input")?;

    parse_key_line(&line)
}

/// stdin からパイプでAPIキーを取得（1行目のみ使用）
pub fn read_api_key_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read API key from stdin")?;

    parse_key_line(&line)
        .context("Please ensure the first line of stdin contains the API key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_line_trims() {
        assert_eq!(parse_key_line("  vs_live_abc123\n").unwrap(), "vs_live_abc123");
    }

    #[test]
    fn test_parse_key_line_rejects_empty() {
        assert!(parse_key_line("   \n").is_err());
        assert!(parse_key_line("").is_err());
    }
}
