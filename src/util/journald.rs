//! Optional journald forwarding via systemd-cat.
//!
//! Best-effort: failure to forward must not fail a provisioning run.

use serde::Serialize;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Metadata-only audit record. Never carries secrets.
#[derive(Debug, Serialize)]
pub struct AuditEvent<'a> {
    pub action: &'a str,
    pub user: &'a str,
    pub dialect: &'a str,
    pub conf: String,
}

pub fn systemd_cat_available() -> bool {
    Command::new("systemd-cat")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Forward one event as a JSON line tagged with `tag`.
pub fn forward_event(tag: &str, event: &AuditEvent<'_>) {
    let line = match serde_json::to_string(event) {
        Ok(line) => line,
        Err(e) => {
            debug!(error = %e, "serialize audit event");
            return;
        }
    };
    if !systemd_cat_available() {
        debug!("systemd-cat not available, audit event not forwarded");
        return;
    }

    let mut child = match Command::new("systemd-cat")
        .arg("-t")
        .arg(tag)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "spawn systemd-cat");
            return;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(line.as_bytes());
        let _ = stdin.write_all(b"\n");
    }

    let _ = child.wait();
}
