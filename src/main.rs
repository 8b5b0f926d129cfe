use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = node_rpcauth::cli::Cli::parse();
    cli.run()
}
