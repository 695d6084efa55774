//! ドメインサービス: リリースノートから動画スクリプトを組み立てる
//!
//! GitHubリリースの本文から箇条書き（`- ` で始まる行）を抜き出し、
//! 告知動画用のスクリプトに整形する。

/// リリースノートから抽出する変更点の行頭マーカー
const BULLET_PREFIX: &str = "- ";

/// リリースノートから変更点を抽出する
///
/// 行頭（前後の空白を除いた後）が `- ` の行だけを対象とし、
/// マーカーを取り除いた本文を先頭から最大 `max_items` 件返す。
/// インデントされた箇条書きも含め、本文が空の項目は捨てる。
pub fn extract_highlights(release_body: &str, max_items: usize) -> Vec<String> {
    release_body
        .lines()
        .filter_map(|line| line.trim().strip_prefix(BULLET_PREFIX))
        .map(|change| change.trim().to_string())
        .filter(|change| !change.is_empty())
        .take(max_items)
        .collect()
}

/// 告知動画用のスクリプトを作成する
pub fn create_release_script(version: &str, changes: &[String], repo_name: &str) -> String {
    let mut script = format!("{} {} has been released!\n\n", repo_name, version);

    if !changes.is_empty() {
        script.push_str("This release includes important updates:\n\n");
        script.push_str(&changes.join("\n"));
        script.push_str("\n\n");
    }

    script.push_str("Check out the full release notes on GitHub!");

    script.trim().to_string()
}

/// 公開日時（ISO 8601）から日付部分のみを取り出す
pub fn published_date(published_at: &str) -> &str {
    published_at.get(..10).unwrap_or(published_at)
}
