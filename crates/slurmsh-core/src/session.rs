//! Shell session: filesystem, simulated clock and command history.

use tracing::{debug, info};

use crate::autocomplete::{Completion, autocomplete};
use crate::batch::JobEvent;
use crate::commands::{Command, CommandResult, Context, execute_command};
use crate::config::ShellConfig;
use crate::error::FsError;
use crate::filesystem::{FileKind, Filesystem, path};
use crate::output::OutputLine;
use crate::parser::parse_input;

/// One user's shell on the simulated head node.
#[derive(Clone, Debug)]
pub struct Session {
    config: ShellConfig,
    fs: Filesystem,
    /// Simulated time, in milliseconds since the epoch
    clock_ms: u64,
    /// Executed command lines, oldest first
    history: Vec<String>,
}

impl Session {
    /// Start a session at simulated time zero.
    pub fn new(config: ShellConfig) -> Result<Self, FsError> {
        Self::with_clock(config, 0)
    }

    /// Start a session at the given simulated time.
    pub fn with_clock(config: ShellConfig, clock_ms: u64) -> Result<Self, FsError> {
        let fs = Filesystem::seeded(&config, clock_ms)?;
        info!(user = %config.user, nodes = config.cluster_nodes, "session started");
        Ok(Self {
            config,
            fs,
            clock_ms,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &Filesystem {
        &self.fs
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Current simulated time, in milliseconds.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Move the simulated clock to the scheduler's time.
    pub fn set_clock(&mut self, clock_ms: u64) {
        self.clock_ms = clock_ms;
    }

    /// Prompt text, e.g. `/logs$ `.
    pub fn prompt(&self) -> String {
        format!("{}$ ", self.fs.working_dir())
    }

    /// Run one command line.
    ///
    /// History references are expanded first; the expanded line is then
    /// recorded in history (empty lines are not) and executed.
    pub fn execute(&mut self, line: &str) -> CommandResult {
        let parsed = match parse_input(line, &self.history) {
            Ok(parsed) => parsed,
            Err(e) => return CommandResult::output(vec![OutputLine::error(e.to_string())]),
        };
        if parsed.is_empty() {
            return CommandResult::empty();
        }

        self.history.push(parsed.to_line());
        let cmd = Command::parse(&parsed.name, &parsed.args);
        debug!(?cmd, "executing command");

        execute_command(
            cmd,
            Context {
                fs: &mut self.fs,
                clock_ms: &mut self.clock_ms,
                history: &self.history,
                config: &self.config,
            },
        )
    }

    /// Tab-complete the last word of `line`.
    pub fn complete(&self, line: &str) -> Completion {
        autocomplete(line, &self.fs)
    }

    /// Write back the content of a file opened with `edit`.
    ///
    /// Fails if the file was removed or is not a text file.
    pub fn save_edit(&mut self, path: &str, content: &str) -> Result<(), FsError> {
        if self.fs.save_file(path, content) {
            Ok(())
        } else if self.fs.is_directory(path) {
            Err(FsError::IsADirectory(self.fs.normalize_path(path)))
        } else if self.fs.file_exists(path).is_none() {
            Err(FsError::NotFound)
        } else {
            Err(FsError::OperationNotPermitted)
        }
    }

    /// Record a finished job as an output file in the home directory.
    ///
    /// An existing file of the same name is overwritten.
    pub fn record_job_event(&mut self, event: &JobEvent) -> Result<(), FsError> {
        let file = path::join(path::ROOT, &event.output_file_name());
        match self
            .fs
            .create_file(&file, event.time, FileKind::Text, true)
        {
            Ok(()) | Err(FsError::FileExists(_)) => {}
            Err(e) => return Err(e),
        }
        if !self.fs.save_file(&file, event.output_text()) {
            return Err(FsError::IsADirectory(file));
        }
        info!(%event, file = %file, "recorded job event");
        Ok(())
    }

    /// Reset the simulation: remove job output files and rewind the clock.
    ///
    /// Returns the number of files removed.
    pub fn reset(&mut self, clock_ms: u64) -> usize {
        self.clock_ms = clock_ms;
        let removed = self.fs.remove_job_outputs();
        info!(removed, clock_ms, "simulation reset");
        removed
    }
}
