//! Shell configuration.
//!
//! Compile-time constants live at module level; per-session settings are
//! carried by [`ShellConfig`], which can be loaded from TOML.

use serde::Deserialize;

use crate::error::ConfigError;

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Topic index for bare `help`.
pub const HELP_TEXT: &str = include_str!("../assets/text/help.txt");

/// Text for `help shell`.
pub const HELP_SHELL_TEXT: &str = include_str!("../assets/text/help_shell.txt");

/// Text for `help slurm`.
pub const HELP_SLURM_TEXT: &str = include_str!("../assets/text/help_slurm.txt");

// =============================================================================
// Filesystem Configuration
// =============================================================================

/// Name of the pre-provisioned batch script in the home directory.
pub const BATCH_FILE: &str = "batch.slurm";

/// Extension every batch script must carry.
pub const BATCH_EXTENSION: &str = ".slurm";

/// Extensions of job output files removed on simulation reset.
pub const JOB_OUTPUT_EXTENSIONS: &[&str] = &[".out", ".err"];

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Editors that exist on real head nodes but not here.
pub const UNSUPPORTED_EDITORS: &[&str] = &["vi", "vim", "nano", "jedit", "emacs"];

/// Column width used to wrap `help` text.
pub const HELP_COLUMNS: usize = 70;

/// Defaults for [`ShellConfig`].
pub mod defaults {
    pub const USER: &str = "slurm_user";
    pub const PROGRAM_NAME: &str = "my_program";
    pub const CLUSTER_NODES: u32 = 32;
    pub const BATCH_TIME: &str = "10:00:00";
    pub const HISTORY_DEPTH: usize = 16;
    pub const COLUMNS: usize = 100;
    /// Sequential work of the parallel program, in seconds.
    pub const SEQUENTIAL_WORK: u64 = 600;
    /// Perfectly parallelizable work of the parallel program, in seconds.
    pub const PARALLEL_WORK: u64 = 36_000;
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Per-session settings, normally supplied by the scheduler backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// User name shown by `whoami` and `ls -l`.
    pub user: String,
    /// Name of the parallel program placed in the home directory.
    pub program_name: String,
    /// Number of compute nodes in the simulated cluster.
    pub cluster_nodes: u32,
    /// Default `--time` of the seeded batch script (`h:m:s`).
    pub batch_time: String,
    /// Number of entries printed by `history`.
    pub history_depth: usize,
    /// Column width used to wrap `ls` output.
    pub columns: usize,
    /// Sequential work of the program, in seconds (for `help about`).
    pub sequential_work: u64,
    /// Parallelizable work of the program, in seconds (for `help about`).
    pub parallel_work: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: defaults::USER.to_string(),
            program_name: defaults::PROGRAM_NAME.to_string(),
            cluster_nodes: defaults::CLUSTER_NODES,
            batch_time: defaults::BATCH_TIME.to_string(),
            history_depth: defaults::HISTORY_DEPTH,
            columns: defaults::COLUMNS,
            sequential_work: defaults::SEQUENTIAL_WORK,
            parallel_work: defaults::PARALLEL_WORK,
        }
    }
}

impl ShellConfig {
    /// Parse and validate a TOML configuration. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the filesystem seeding relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster_nodes == 0 {
            return Err(ConfigError::NoNodes);
        }
        let name = self.program_name.as_str();
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return Err(ConfigError::InvalidProgramName(self.program_name.clone()));
        }
        if crate::batch::parse_duration(&self.batch_time).is_none() {
            return Err(ConfigError::InvalidBatchTime(self.batch_time.clone()));
        }
        Ok(())
    }

    /// Text of the `help about` topic.
    pub fn about_text(&self) -> String {
        format!(
            "This terminal provides a simulation of a batch-scheduled cluster's head node. \
             The cluster hosts {nodes} compute nodes, which can be used to execute parallel programs.\n\n\
             A parallel program called {program} is located in your home directory (at path '/'). \
             Its sequential execution time on one compute node is {total} seconds. \
             But {par} seconds of this execution can be perfectly parallelized across multiple compute nodes.\n\n\
             Your goal is to execute this program by submitting a batch job to Slurm. \
             Refer to the pedagogic module narrative for more information on what you should do.\n\n\
             Important: this is all in simulated time, which allows you to fast forward at will \
             (using the 'sleep' shell command, which returns quicker than you think and advances the simulated time!)",
            nodes = self.cluster_nodes,
            program = self.program_name,
            total = self.sequential_work + self.parallel_work,
            par = self.parallel_work,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ShellConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ShellConfig::from_toml_str("program_name = \"lu\"\ncluster_nodes = 8\n")
            .expect("valid config");
        assert_eq!(config.program_name, "lu");
        assert_eq!(config.cluster_nodes, 8);
        assert_eq!(config.user, defaults::USER);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(matches!(
            ShellConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate() {
        let config = ShellConfig {
            cluster_nodes: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoNodes)));

        let config = ShellConfig {
            program_name: "bin/prog".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProgramName(_))
        ));

        let config = ShellConfig {
            batch_time: "ten hours".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBatchTime(_))
        ));
    }

    #[test]
    fn test_about_text_mentions_program() {
        let text = ShellConfig::default().about_text();
        assert!(text.contains(defaults::PROGRAM_NAME));
        assert!(text.contains("36600 seconds"));
    }
}
