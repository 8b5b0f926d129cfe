//! Settings file model.

use crate::models::policy::PolicySection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Config file dialect understood by the mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// Append `rpcauth=user:salt$digest` (bitcoind and forks)
    #[default]
    Rpcauth,
    /// Insert `password=`/`user=` after admin port sections (rippled)
    Rippled,
}

impl DialectKind {
    pub fn name(&self) -> &'static str {
        match self {
            DialectKind::Rpcauth => "rpcauth",
            DialectKind::Rippled => "rippled",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub target: TargetSection,
    #[serde(default)]
    pub policy: PolicySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSection {
    /// Config file to edit; relative paths resolve against the settings file.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub dialect: Option<DialectKind>,
    /// Anchor lines for the section-anchored dialect.
    #[serde(default)]
    pub anchors: Option<Vec<String>>,
    #[serde(default)]
    pub salt_size: Option<usize>,
}
