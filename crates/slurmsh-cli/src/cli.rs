use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Trace => Some(tracing::Level::TRACE),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Interactive shell on a simulated batch-scheduled cluster head node.
#[derive(Parser, Debug, Clone)]
#[command(name = "slurmsh", version)]
pub struct Cli {
    /// TOML session configuration
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Name of the program placed in the home directory
    #[arg(long)]
    pub program: Option<String>,
    /// Number of compute nodes in the cluster
    #[arg(long)]
    pub nodes: Option<u32>,
    #[arg(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["slurmsh", "--program", "lu", "--nodes", "8", "-l", "debug"]);
        assert_eq!(cli.program.as_deref(), Some("lu"));
        assert_eq!(cli.nodes, Some(8));
        assert_eq!(cli.log_level.to_tracing_level(), Some(tracing::Level::DEBUG));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_silent_disables_tracing() {
        let cli = Cli::parse_from(["slurmsh", "--log-level", "silent"]);
        assert_eq!(cli.log_level.to_tracing_level(), None);
    }
}
