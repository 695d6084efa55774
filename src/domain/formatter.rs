/// ドメインサービス: タイムスタンプフォーマット
///
/// APIが返すタイムスタンプ（Unix秒 または RFC 3339）を、
/// ユーザー設定のタイムゾーンオフセットで人間向けの文字列に変換する。
use crate::config::UserConfig;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// タイムスタンプをユーザー設定に応じてフォーマット
///
/// # 戻り値
/// - オフセット0: "2025-11-29 16:49:10 UTC"
/// - それ以外:    "2025-11-30 01:49:10 +09:00"
///
/// パースできない場合は元の文字列をそのまま返します。
pub fn format_timestamp(timestamp_str: &str, user_config: &UserConfig) -> String {
    let Some(datetime) = parse_timestamp(timestamp_str) else {
        return timestamp_str.to_string();
    };

    match user_config.timezone_offset_seconds {
        0 => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        offset => match FixedOffset::east_opt(offset) {
            Some(tz) => datetime
                .with_timezone(&tz)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
            None => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        },
    }
}

fn parse_timestamp(timestamp_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(secs) = timestamp_str.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }

    DateTime::parse_from_rfc3339(timestamp_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
