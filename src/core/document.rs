//! In-memory view of a node config file as an ordered line sequence.

use crate::error::{ProvisionError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Lines keep their original terminators so untouched lines round-trip
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl ConfigDocument {
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ProvisionError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(path, &content))
    }

    /// Index of the first line equal to `anchor`, ignoring its terminator.
    pub fn find_line(&self, anchor: &str) -> Option<usize> {
        self.lines.iter().position(|l| strip_terminator(l) == anchor)
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

pub fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
