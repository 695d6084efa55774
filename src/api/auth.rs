/// APIキー管理
///
/// VLOEX APIのBearer認証を扱います。
/// キーはログやDebug出力に生のまま出さないよう、常にマスキングして表示します。
use crate::api::error::VloexError;
use crate::config::API_KEY_ENV;
use std::fmt;

/// VLOEX APIキー
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// APIキーを作成
    ///
    /// # Errors
    /// 空（空白のみを含む）の場合に `VloexError::MissingApiKey` を返します。
    pub fn new(key: impl Into<String>) -> Result<Self, VloexError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(VloexError::MissingApiKey);
        }
        Ok(Self(key))
    }

    /// 環境変数 `VLOEX_API_KEY` からAPIキーを読み込む
    pub fn from_env() -> Result<Self, VloexError> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| VloexError::MissingApiKey)?;
        Self::new(key)
    }

    /// Authorizationヘッダーの値を生成
    ///
    /// # Returns
    /// "Bearer <api_key>" 形式の文字列
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// キーをマスキングして表示
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }

    /// 生のキー文字列（設定ファイル保存用）
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let key = ApiKey::new("vs_live_abc123").unwrap();
        assert_eq!(key.bearer_header(), "Bearer vs_live_abc123");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(ApiKey::new(""), Err(VloexError::MissingApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(VloexError::MissingApiKey)));
    }

    #[test]
    fn test_key_is_trimmed() {
        let key = ApiKey::new("  vs_live_abc123\n").unwrap();
        assert_eq!(key.expose(), "vs_live_abc123");
    }

    #[test]
    fn test_masking() {
        let key = ApiKey::new("vs_live_abcdef123456").unwrap();
        let masked = key.masked();
        assert_eq!(masked, "vs_l***3456");
        assert!(!format!("{:?}", key).contains("abcdef"));

        let short = ApiKey::new("short").unwrap();
        assert_eq!(short.masked(), "*****");
    }
}
