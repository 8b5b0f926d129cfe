//! Policy applied to provided passwords and audit forwarding.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySection {
    /// Minimum length for provided or prompted passwords.
    #[serde(default)]
    pub min_password_length: Option<usize>,

    /// Forward a metadata-only audit line to journald after a write.
    #[serde(default)]
    pub journald_audit: bool,
}

impl PolicySection {
    /// Check a user-chosen password against the policy.
    ///
    /// Returns the reason on rejection; never echoes the password.
    pub fn check_password(&self, password: &str) -> Result<(), String> {
        if password.is_empty() {
            return Err("password is empty".into());
        }
        if password.contains(['\r', '\n']) {
            return Err("password contains a line break".into());
        }
        if let Some(min) = self.min_password_length {
            let len = password.chars().count();
            if len < min {
                return Err(format!(
                    "length {} below minimum {} (set in settings [policy])",
                    len, min
                ));
            }
        }
        Ok(())
    }
}
