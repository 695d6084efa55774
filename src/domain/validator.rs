/// ドメインサービス: 入力バリデーション
///
/// APIに送る前に、明らかに不正な入力をローカルで弾く。
/// ネットワーク往復を無駄にしないことと、ジョブIDをURLパスへ
/// 安全に埋め込めることを保証する。
use crate::domain::error::DomainError;

/// スクリプトを検証する
///
/// 空白のみのスクリプトは不正。前後の空白は送信前に取り除かない
/// （スクリプトの整形はサーバー側の責務）。
pub fn validate_script(script: &str) -> Result<(), DomainError> {
    if script.trim().is_empty() {
        return Err(DomainError::EmptyScript);
    }
    Ok(())
}

/// ジョブIDを検証する
///
/// # エラー
/// - 空文字列
/// - URLパスを壊す文字（`/`, `?`, `#`）や空白を含む
pub fn validate_job_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::invalid_job_id(id, "job id cannot be empty"));
    }

    if let Some(c) = forbidden_path_char(id) {
        return Err(DomainError::invalid_job_id(
            id,
            format!("contains forbidden character {:?}", c),
        ));
    }

    Ok(())
}

/// URLパスの1セグメントとして埋め込めない文字を探す
fn forbidden_path_char(segment: &str) -> Option<char> {
    segment
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
}

/// GitHubリポジトリ指定（owner/repo）を分解する
///
/// owner と repo はそれぞれURLパスに入るので、ジョブIDと同じ文字制限を課す。
pub fn parse_repository(input: &str) -> Result<(&str, &str), DomainError> {
    let invalid = || DomainError::InvalidRepository {
        input: input.to_string(),
    };

    let (owner, repo) = input.trim().split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() {
        return Err(invalid());
    }
    if forbidden_path_char(owner).is_some() || forbidden_path_char(repo).is_some() {
        return Err(invalid());
    }

    Ok((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_script() {
        assert!(validate_script("Hello world").is_ok());
        assert_eq!(validate_script(""), Err(DomainError::EmptyScript));
        assert_eq!(validate_script(" \n\t "), Err(DomainError::EmptyScript));
    }

    #[test]
    fn test_validate_job_id() {
        assert!(validate_job_id("job_abc123").is_ok());
        assert!(validate_job_id("").is_err());
        assert!(validate_job_id("job/../admin").is_err());
        assert!(validate_job_id("job abc").is_err());
        assert!(validate_job_id("job?x=1").is_err());
    }

    #[test]
    fn test_parse_repository() {
        assert_eq!(parse_repository("vercel/next.js"), Ok(("vercel", "next.js")));
        assert_eq!(parse_repository(" facebook/react "), Ok(("facebook", "react")));
        assert!(parse_repository("vercel").is_err());
        assert!(parse_repository("vercel/next.js?ref=main").is_err());
        assert!(parse_repository("vercel/next.js#readme").is_err());
        assert!(parse_repository("ver cel/next.js").is_err());
        assert!(parse_repository("vercel/next js").is_err());
        assert!(parse_repository("vercel/next.js/extra").is_err());
        assert!(parse_repository("/next.js").is_err());
        assert!(parse_repository("vercel/").is_err());
        assert!(parse_repository("a/b/c").is_err());
    }
}
