//! 終了コードを決めるためのエラー深刻度
//!
//! 各層のエラー型（VloexError, ConfigError, DomainError）は
//! `severity()` でこの分類を返し、CLIはそれを終了コードに変換する。
//! このモジュール自体は他のモジュールに依存しない。

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// ユーザーが入力を直せば解決するエラー
    ///
    /// 空のスクリプト、不正なジョブID、存在しないジョブなど。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定・アカウントのエラー
    ///
    /// APIキーが無効・未設定、プランの上限到達など。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// 外部要因のエラー
    ///
    /// ネットワーク障害、タイムアウト、サーバーエラー、レート制限など。
    /// 時間をおいて再実行すれば成功する可能性がある。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorSeverity::UserError.exit_code(),
            ErrorSeverity::ConfigError.exit_code(),
            ErrorSeverity::SystemError.exit_code(),
        ];
        assert_eq!(codes, [1, 2, 3]);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorSeverity::ConfigError.to_string(), "configuration error");
        assert_eq!(ErrorSeverity::SystemError.to_string(), "system error");
    }
}
