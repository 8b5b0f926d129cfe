use crate::cli::{CliContext, OutputFormat};
use crate::constants;
use crate::core::credential::{PasswordPrompt, StdinPrompt, TerminalPrompt};
use crate::core::dialect;
use crate::core::provision::{provision, ProvisionRequest};
use crate::models::credential::ProvisionReport;
use crate::util::journald::{self, AuditEvent};
use anyhow::{bail, Context, Result};
use clap::Args;
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// The username for authentication
    #[arg(required = true)]
    pub username: Option<String>,

    /// Leave empty to generate a random password or specify "-" to prompt for password
    pub password: Option<String>,

    /// Read the password from stdin instead of an interactive prompt
    #[arg(long)]
    pub from_stdin: bool,

    /// Show what would be written without touching the config
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(ctx: &CliContext, args: ProvisionArgs) -> Result<()> {
    let username = args.username.context("missing <USERNAME>")?;
    let password = args.password.map(Zeroizing::new);
    let password_arg = password_argument(
        password.as_deref().map(String::as_str),
        args.from_stdin,
        ctx.non_interactive,
    )?;

    let prompt: Box<dyn PasswordPrompt> = if args.from_stdin {
        Box::new(StdinPrompt)
    } else {
        Box::new(TerminalPrompt)
    };
    let dialect = dialect::for_kind(ctx.target.dialect, ctx.target.anchors.clone());

    let request = ProvisionRequest {
        conf: ctx.target.conf.clone(),
        username: &username,
        password: password_arg,
        salt_size: ctx.target.salt_size,
        dry_run: args.dry_run,
        policy: &ctx.policy,
    };

    let report = match provision(&request, dialect.as_ref(), prompt.as_ref()) {
        Ok(report) => report,
        Err(e) if e.is_already_provisioned() => {
            return print_already_provisioned(ctx, &e.to_string(), args.format);
        }
        Err(e) => return Err(e.into()),
    };

    if !report.dry_run && ctx.policy.journald_audit {
        journald::forward_event(
            constants::JOURNALD_TAG,
            &AuditEvent {
                action: "provision",
                user: &report.username,
                dialect: &report.dialect,
                conf: report.conf.clone(),
            },
        );
    }

    print_report(&report, args.format)
}

/// Map the positional password and `--from-stdin` to what `provision` takes.
fn password_argument(
    password: Option<&str>,
    from_stdin: bool,
    non_interactive: bool,
) -> Result<Option<&str>> {
    let password_arg = match (password, from_stdin) {
        (Some(p), true) if p != constants::PROMPT_SENTINEL => {
            bail!("--from-stdin cannot be combined with a literal password")
        }
        (None, true) => Some(constants::PROMPT_SENTINEL),
        (p, _) => p,
    };

    // Non-interactive mode requires --from-stdin for "-"
    if non_interactive && !from_stdin && password_arg == Some(constants::PROMPT_SENTINEL) {
        bail!("--non-interactive requires --from-stdin to read a password");
    }
    Ok(password_arg)
}

fn print_already_provisioned(ctx: &CliContext, message: &str, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "conf": ctx.target.conf.display().to_string(),
            "already_provisioned": true,
            "message": message,
        });
        let json = serde_json::to_string_pretty(&json).context("serialize report")?;
        println!("{}", json);
    } else {
        println!("{}", message);
    }
    Ok(())
}

fn print_report(report: &ProvisionReport, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    if report.dry_run {
        println!("Dry run, {} not modified. String that would be written:", report.conf);
    } else {
        println!("String written to {}:", report.conf);
    }
    println!("{}", report.inserted.trim_end());
    println!("Your password:\n{}", report.password);
    Ok(())
}
