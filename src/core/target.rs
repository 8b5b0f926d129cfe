//! Resolution of the config file and dialect to operate on.

use crate::constants;
use crate::models::settings::{DialectKind, SettingsFile};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Target {
    pub conf: PathBuf,
    pub dialect: DialectKind,
    pub anchors: Option<Vec<String>>,
    pub salt_size: usize,
}

impl Target {
    /// Resolve from CLI/env values first, then the settings file, then defaults.
    ///
    /// A relative `target.path` in the settings file is taken relative to
    /// the settings file's directory.
    pub fn resolve(
        conf_arg: Option<PathBuf>,
        dialect_arg: Option<DialectKind>,
        settings: &SettingsFile,
        settings_dir: Option<&Path>,
    ) -> Result<Self> {
        let dialect = dialect_arg
            .or(settings.target.dialect)
            .unwrap_or_default();

        let conf = match (conf_arg, &settings.target.path) {
            (Some(conf), _) => conf,
            (None, Some(path)) => resolve_relative(settings_dir, path),
            (None, None) => PathBuf::from(default_conf(dialect)),
        };

        let salt_size = settings
            .target
            .salt_size
            .unwrap_or(constants::DEFAULT_SALT_SIZE);
        if salt_size == 0 {
            bail!("target.salt_size must be at least 1");
        }

        Ok(Self {
            conf,
            dialect,
            anchors: settings.target.anchors.clone(),
            salt_size,
        })
    }
}

pub fn default_conf(dialect: DialectKind) -> &'static str {
    match dialect {
        DialectKind::Rpcauth => constants::DEFAULT_RPCAUTH_CONF,
        DialectKind::Rippled => constants::DEFAULT_RIPPLED_CONF,
    }
}

fn resolve_relative(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(base) if !path.is_absolute() => base.join(path),
        _ => path.to_path_buf(),
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.dialect, self.conf.display())
    }
}
