//! Marker detection, credential insertion, and persistence of the edit.

use crate::constants;
use crate::core::dialect::Edit;
use crate::core::document::{strip_terminator, ConfigDocument};
use crate::error::{ProvisionError, Result};
use crate::util::fs as conf_fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Whether any line starts with `marker_prefix`.
pub fn has_existing_credential(document: &ConfigDocument, marker_prefix: &str) -> bool {
    document.lines.iter().any(|l| l.starts_with(marker_prefix))
}

/// Fail with `MissingAnchor` for the first anchor absent from `document`.
pub fn require_anchors(document: &ConfigDocument, anchors: &[String]) -> Result<()> {
    for anchor in anchors {
        if document.find_line(anchor).is_none() {
            return Err(ProvisionError::MissingAnchor {
                path: document.path.clone(),
                anchor: anchor.clone(),
            });
        }
    }
    Ok(())
}

/// Insert `lines`, in order, immediately after the first occurrence of each anchor.
///
/// Inserted lines take the anchor line's terminator (`\n` or `\r\n`).
/// The input is never modified; a missing anchor fails the whole edit.
pub fn insert_credential(
    document: &ConfigDocument,
    lines: &[String],
    anchors: &[String],
) -> Result<ConfigDocument> {
    require_anchors(document, anchors)?;
    let mut updated = document.clone();
    for anchor in anchors {
        let idx = updated.find_line(anchor).ok_or_else(|| ProvisionError::MissingAnchor {
            path: document.path.clone(),
            anchor: anchor.clone(),
        })?;
        // anchor on the last line without a newline
        if !updated.lines[idx].ends_with('\n') {
            updated.lines[idx].push('\n');
        }
        let terminator = if updated.lines[idx].ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        };
        let at = idx + 1;
        updated.lines.splice(
            at..at,
            lines
                .iter()
                .map(|l| format!("{}{}", strip_terminator(l), terminator)),
        );
        debug!(anchor = %anchor, line = at + 1, "inserted credential lines");
    }
    Ok(updated)
}

/// The suffix written for an append-style credential line.
pub fn append_credential(line: &str) -> String {
    format!("\n\n{}\n{}\n", constants::RPCAUTH_COMMENT, strip_terminator(line))
}

/// Persist an edit to `path`.
pub fn apply(path: &Path, edit: &Edit) -> Result<()> {
    let unwritable = |source| ProvisionError::ConfigUnwritable {
        path: path.to_path_buf(),
        source,
    };
    match edit {
        Edit::Append(suffix) => {
            let mut file = OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(unwritable)?;
            file.write_all(suffix.as_bytes()).map_err(unwritable)?;
            file.flush().map_err(unwritable)?;
            debug!(path = %path.display(), bytes = suffix.len(), "appended to config");
        }
        Edit::Rewrite(document) => {
            conf_fs::replace_contents(path, &document.render()).map_err(unwritable)?;
            debug!(path = %path.display(), lines = document.lines.len(), "rewrote config");
        }
    }
    Ok(())
}
