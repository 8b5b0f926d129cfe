use crate::models::settings::SettingsFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a settings file. A missing file yields defaults.
pub fn load(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    let settings: SettingsFile = toml::from_str(&content)
        .with_context(|| format!("parse settings {}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::DialectKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_default() {
        let dir = TempDir::new().unwrap();
        let settings = load(&dir.path().join("node-rpcauth.toml")).unwrap();
        assert!(settings.target.path.is_none());
        assert!(settings.target.dialect.is_none());
        assert!(!settings.policy.journald_audit);
    }

    #[test]
    fn test_load_full() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("node-rpcauth.toml");
        fs::write(
            &path,
            r#"
[target]
path = "rippled.conf"
dialect = "rippled"
anchors = ["[port_rpc_admin_local]"]
salt_size = 24

[policy]
min_password_length = 16
journald_audit = true
"#,
        )
        .unwrap();
        let settings = load(&path).unwrap();
        assert_eq!(settings.target.path, Some(PathBuf::from("rippled.conf")));
        assert_eq!(settings.target.dialect, Some(DialectKind::Rippled));
        assert_eq!(
            settings.target.anchors,
            Some(vec!["[port_rpc_admin_local]".to_string()])
        );
        assert_eq!(settings.target.salt_size, Some(24));
        assert_eq!(settings.policy.min_password_length, Some(16));
        assert!(settings.policy.journald_audit);
    }

    #[test]
    fn test_load_rejects_unknown_dialect() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("node-rpcauth.toml");
        fs::write(&path, "[target]\ndialect = \"geth\"\n").unwrap();
        assert!(load(&path).is_err());
    }
}
