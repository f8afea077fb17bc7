use std::io;

use anyhow::Context as _;
use clap::Parser as _;
use slurmsh_core::{Session, ShellConfig};
use tracing::debug;

use crate::{cli::Cli, repl::Repl};

mod cli;
mod render;
mod repl;

fn main() -> anyhow::Result<()> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    let config = load_config(&cli_args)?;
    let session = Session::new(config).context("failed to seed the filesystem")?;

    let stdin = io::stdin();
    let mut repl = Repl::new(session, stdin.lock(), io::stdout());
    repl.run()?;

    Ok(())
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

/// Build the session configuration from the TOML file and flag overrides.
fn load_config(cli_args: &Cli) -> anyhow::Result<ShellConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ShellConfig::from_toml_str(&text)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => ShellConfig::default(),
    };

    if let Some(program) = &cli_args.program {
        config.program_name = program.clone();
    }
    if let Some(nodes) = cli_args.nodes {
        config.cluster_nodes = nodes;
    }
    config.validate()?;
    Ok(config)
}
