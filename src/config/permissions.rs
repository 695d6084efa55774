/// ファイルパーミッション管理モジュール
///
/// APIキーやWebhookシークレットを含むconfig.tomlを
/// 所有者のみがアクセス可能にします。
///
/// Unix系 (Linux, macOS): 0600 (rw-------)
/// その他: 何もしない（OSのデフォルトACLに任せる）
use crate::config::error::ConfigError;
use std::path::Path;

/// シークレットを含む設定ファイルのパーミッションを設定
///
/// # Errors
/// ファイルが存在しない場合、または
/// パーミッション設定に失敗した場合に ConfigError を返します。
pub fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.exists() {
        return Err(ConfigError::file_system(
            format!("Config file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file_path, permissions).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to set permissions (0600) for config file: {}",
                    file_path.display()
                ),
                e,
            )
        })
    }

    #[cfg(not(unix))]
    {
        Ok(())
    }
}
