//! Config dialects: where a credential goes and how it is spelled.

use crate::constants;
use crate::core::document::ConfigDocument;
use crate::core::mutator;
use crate::error::Result;
use crate::models::credential::Credential;
use crate::models::settings::DialectKind;

/// How the target file is changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Write only this suffix, in append mode.
    Append(String),
    /// Replace the whole file with this document.
    Rewrite(ConfigDocument),
}

#[derive(Debug, Clone)]
pub struct EditPlan {
    pub edit: Edit,
    /// The credential lines as they will appear in the file.
    pub inserted: String,
}

pub trait ConfigDialect {
    fn kind(&self) -> DialectKind;

    /// Prefix of a line that means a credential is already configured.
    fn marker_prefix(&self) -> &str;

    /// Lines after which credentials are inserted, if the dialect uses any.
    fn anchors(&self) -> &[String] {
        &[]
    }

    /// Structural checks that must pass before any secret is generated.
    fn preflight(&self, _document: &ConfigDocument) -> Result<()> {
        Ok(())
    }

    fn render(&self, document: &ConfigDocument, credential: &Credential) -> Result<EditPlan>;
}

/// `rpcauth=user:salt$digest` appended at the end of the file.
pub struct RpcAuthDialect;

impl ConfigDialect for RpcAuthDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Rpcauth
    }

    fn marker_prefix(&self) -> &str {
        constants::RPCAUTH_MARKER
    }

    fn render(&self, _document: &ConfigDocument, credential: &Credential) -> Result<EditPlan> {
        let line = format!("{}={}", constants::RPCAUTH_MARKER, credential.rpcauth_value());
        Ok(EditPlan {
            edit: Edit::Append(mutator::append_credential(&line)),
            inserted: line,
        })
    }
}

/// `password=`/`user=` inserted right after each anchor section header.
pub struct RippledDialect {
    anchors: Vec<String>,
}

impl RippledDialect {
    pub fn new(anchors: Vec<String>) -> Self {
        Self { anchors }
    }
}

impl Default for RippledDialect {
    fn default() -> Self {
        Self::new(
            constants::RIPPLED_ANCHORS
                .iter()
                .map(|a| a.to_string())
                .collect(),
        )
    }
}

impl ConfigDialect for RippledDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Rippled
    }

    fn marker_prefix(&self) -> &str {
        constants::RIPPLED_MARKER
    }

    fn anchors(&self) -> &[String] {
        &self.anchors
    }

    fn preflight(&self, document: &ConfigDocument) -> Result<()> {
        mutator::require_anchors(document, &self.anchors)
    }

    fn render(&self, document: &ConfigDocument, credential: &Credential) -> Result<EditPlan> {
        // rippled compares the plaintext password; the salt and digest
        // drawn by `Credential::generate` are not written here.
        let lines = vec![
            format!("password={}\n", credential.password.as_str()),
            format!("user={}\n", credential.username),
        ];
        let updated = mutator::insert_credential(document, &lines, &self.anchors)?;
        Ok(EditPlan {
            edit: Edit::Rewrite(updated),
            inserted: lines.concat(),
        })
    }
}

/// Build the dialect selected by configuration.
pub fn for_kind(kind: DialectKind, anchors: Option<Vec<String>>) -> Box<dyn ConfigDialect> {
    match kind {
        DialectKind::Rpcauth => Box::new(RpcAuthDialect),
        DialectKind::Rippled => match anchors {
            Some(anchors) if !anchors.is_empty() => Box::new(RippledDialect::new(anchors)),
            _ => Box::new(RippledDialect::default()),
        },
    }
}
