//! Error kinds for credential provisioning.
//!
//! Messages MUST NOT contain the password, salt, or digest.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write config {}: {source}", .path.display())]
    ConfigUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{marker} already defined in {}, terminating early", .path.display())]
    CredentialAlreadyExists { path: PathBuf, marker: String },

    #[error("section {anchor} not found in {}", .path.display())]
    MissingAnchor { path: PathBuf, anchor: String },

    #[error("config {} is locked by another process", .path.display())]
    ConfigLocked { path: PathBuf },

    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(#[source] rand::Error),

    #[error("invalid username '{username}': {reason}")]
    InvalidUsername { username: String, reason: &'static str },

    #[error("password rejected: {0}")]
    PasswordRejected(String),

    #[error("read password: {0}")]
    Prompt(#[source] io::Error),
}

impl ProvisionError {
    /// Whether this is the clean "nothing to do" abort rather than a failure.
    pub fn is_already_provisioned(&self) -> bool {
        matches!(self, ProvisionError::CredentialAlreadyExists { .. })
    }
}

pub type Result<T, E = ProvisionError> = std::result::Result<T, E>;
