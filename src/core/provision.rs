//! The detect-existing-then-insert protocol end to end.

use crate::core::credential::{self, PasswordPrompt};
use crate::core::dialect::ConfigDialect;
use crate::core::document::ConfigDocument;
use crate::core::file_lock::FileLock;
use crate::core::mutator;
use crate::error::{ProvisionError, Result};
use crate::models::credential::{Credential, ProvisionReport};
use crate::models::policy::PolicySection;
use std::path::PathBuf;
use tracing::{debug, info};

/// One provisioning invocation.
pub struct ProvisionRequest<'a> {
    pub conf: PathBuf,
    pub username: &'a str,
    /// `None` generates a password, `Some("-")` prompts.
    pub password: Option<&'a str>,
    pub salt_size: usize,
    pub dry_run: bool,
    pub policy: &'a PolicySection,
}

/// Insert a new credential into `request.conf` unless one is already there.
///
/// Nothing random is generated and nothing is written when a marker line
/// exists or a required anchor is missing.
pub fn provision(
    request: &ProvisionRequest<'_>,
    dialect: &dyn ConfigDialect,
    prompt: &dyn PasswordPrompt,
) -> Result<ProvisionReport> {
    credential::validate_username(request.username)?;

    let _lock = FileLock::acquire(&request.conf)?;
    let document = ConfigDocument::load(&request.conf)?;
    debug!(conf = %request.conf.display(), lines = document.lines.len(), "loaded config");

    if mutator::has_existing_credential(&document, dialect.marker_prefix()) {
        return Err(ProvisionError::CredentialAlreadyExists {
            path: request.conf.clone(),
            marker: dialect.marker_prefix().to_string(),
        });
    }
    dialect.preflight(&document)?;

    let password = credential::resolve_password(request.password, request.username, prompt)?;
    // an empty argument means "generate", same as no argument
    if request.password.is_some_and(|p| !p.is_empty()) {
        request
            .policy
            .check_password(&password)
            .map_err(ProvisionError::PasswordRejected)?;
    }

    let credential = Credential::generate(request.username, password, request.salt_size)?;
    let plan = dialect.render(&document, &credential)?;

    if request.dry_run {
        info!(
            conf = %request.conf.display(),
            dialect = %dialect.kind(),
            "dry run, config untouched"
        );
    } else {
        mutator::apply(&request.conf, &plan.edit)?;
        info!(
            conf = %request.conf.display(),
            dialect = %dialect.kind(),
            user = request.username,
            "credential provisioned"
        );
    }

    Ok(ProvisionReport {
        conf: request.conf.display().to_string(),
        dialect: dialect.kind().to_string(),
        username: credential.username.clone(),
        inserted: plan.inserted,
        password: credential.password.as_str().to_string(),
        dry_run: request.dry_run,
    })
}
