//! Read-only inspection of the target config.

use crate::cli::{CliContext, OutputFormat};
use crate::core::dialect::{self, ConfigDialect};
use crate::core::document::ConfigDocument;
use crate::core::mutator;
use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub conf: String,
    pub dialect: String,
    pub marker: String,
    pub credential_present: bool,
    pub anchors: Vec<AnchorStatus>,
}

#[derive(Debug, Serialize)]
pub struct AnchorStatus {
    pub anchor: String,
    /// 1-based line number, if found.
    pub line: Option<usize>,
}

impl CheckReport {
    pub fn status(&self) -> &'static str {
        if self.credential_present {
            "already provisioned"
        } else if self.anchors.iter().any(|a| a.line.is_none()) {
            "missing anchor"
        } else {
            "ready"
        }
    }
}

pub fn inspect(document: &ConfigDocument, dialect: &dyn ConfigDialect) -> CheckReport {
    let anchors = dialect
        .anchors()
        .iter()
        .map(|anchor| AnchorStatus {
            anchor: anchor.clone(),
            line: document.find_line(anchor).map(|idx| idx + 1),
        })
        .collect();
    CheckReport {
        conf: document.path.display().to_string(),
        dialect: dialect.kind().to_string(),
        marker: dialect.marker_prefix().to_string(),
        credential_present: mutator::has_existing_credential(document, dialect.marker_prefix()),
        anchors,
    }
}

pub fn run(ctx: &CliContext, args: CheckArgs) -> Result<()> {
    let document = ConfigDocument::load(&ctx.target.conf)?;
    let dialect = dialect::for_kind(ctx.target.dialect, ctx.target.anchors.clone());
    let report = inspect(&document, dialect.as_ref());

    if args.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&report).context("serialize check report")?;
        println!("{}", json);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Check").add_attribute(Attribute::Bold),
        Cell::new("Result").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        format!("marker '{}'", report.marker),
        if report.credential_present {
            "present".to_string()
        } else {
            "absent".to_string()
        },
    ]);
    for anchor in &report.anchors {
        table.add_row(vec![
            format!("anchor {}", anchor.anchor),
            anchor
                .line
                .map(|l| format!("line {}", l))
                .unwrap_or_else(|| "MISSING".to_string()),
        ]);
    }

    println!("Check: {} ({})", report.conf, report.dialect);
    println!("{}", table);
    println!("Status: {}", report.status());
    Ok(())
}
