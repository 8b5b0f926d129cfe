//! CLI routing and command dispatch.

use crate::constants;
use crate::core::settings;
use crate::core::target::Target;
use crate::logging;
use crate::models::policy::PolicySection;
use crate::models::settings::DialectKind;
use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod check;
pub mod provision;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub target: Target,
    pub policy: PolicySection,
    pub non_interactive: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "node-rpcauth",
    version,
    about = "Create login credentials for a node's JSON-RPC user",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    /// Node config file to edit
    #[arg(long, global = true, value_name = "PATH", env = "NODE_RPCAUTH_CONF")]
    pub conf: Option<PathBuf>,

    /// Config dialect of the target file
    #[arg(long, global = true, value_enum, env = "NODE_RPCAUTH_DIALECT")]
    pub dialect: Option<DialectKind>,

    /// Settings file (default: ./node-rpcauth.toml if present)
    #[arg(long, global = true, value_name = "PATH", env = "NODE_RPCAUTH_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Run in non-interactive mode (no prompts, suitable for automation)
    #[arg(long, global = true, env = "NODE_RPCAUTH_NON_INTERACTIVE")]
    pub non_interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub provision: provision::ProvisionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let settings_path = match &self.settings {
            Some(path) => {
                if !path.is_file() {
                    bail!("settings file not found: {}", path.display());
                }
                path.clone()
            }
            None => PathBuf::from(constants::DEFAULT_SETTINGS_FILE),
        };
        let settings = settings::load(&settings_path)?;
        let target = Target::resolve(
            self.conf,
            self.dialect,
            &settings,
            settings_path.parent(),
        )?;
        tracing::debug!(resolved = %target, "resolved target");

        let ctx = CliContext {
            target,
            policy: settings.policy,
            non_interactive: self.non_interactive,
        };

        match self.command {
            Some(Commands::Check(args)) => check::run(&ctx, args),
            None => provision::run(&ctx, self.provision),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether the config already has a credential (read-only)
    Check(check::CheckArgs),
}
