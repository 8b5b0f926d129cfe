use serde::Serialize;
use std::fmt;
use zeroize::Zeroizing;

/// A freshly derived RPC credential.
///
/// `salt` and `digest` are the `rpcauth=` half; `password` is what the
/// operator (or a section-anchored config) needs in plaintext.
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    pub password: Zeroizing<String>,
    pub salt: String,
    pub digest: String,
}

impl Credential {
    /// `username:salt$digest`, the value of an `rpcauth=` line.
    pub fn rpcauth_value(&self) -> String {
        crate::core::credential::format_credential(&self.username, &self.salt, &self.digest)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("salt", &self.salt)
            .field("digest", &self.digest)
            .finish()
    }
}

/// Result of a provisioning run, as reported to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub conf: String,
    pub dialect: String,
    pub username: String,
    /// Exact text inserted (or planned) into the config.
    pub inserted: String,
    pub password: String,
    pub dry_run: bool,
}
