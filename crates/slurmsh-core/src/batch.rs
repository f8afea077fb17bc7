//! Slurm batch scripts and job lifecycle events.
//!
//! `sbatch` reads a `.slurm` script out of the simulated filesystem and
//! turns it into a [`BatchJob`]; the scheduler backend later reports
//! [`JobEvent`]s that become `.out`/`.err` files in the home directory.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{BATCH_EXTENSION, ShellConfig};
use crate::error::BatchScriptError;
use crate::format::format_clock;

const TASKS_PER_NODE: u32 = 1;
const CPUS_PER_TASK: u32 = 10;
const DEFAULT_TIME_SECS: u64 = 10 * 3600;

/// Prefix the scheduler puts in front of job names.
const SCHEDULER_JOB_PREFIX: &str = "standard_";

// Patterns stay ASCII-only: the workspace builds `regex` without the
// Unicode class tables.
const NODES_PATTERN: &str = r"(?m)^#SBATCH --nodes=[ \t]*([0-9]+)[ \t\r]*$";
const TIME_PATTERN: &str = r"(?m)^#SBATCH --time[ =][ \t]*([^ \t\r\n]+)[ \t\r]*$";
const PROGRAM_PATTERN: &str = r"(?m)^srun \./([^ \t\r\n]+)[ \t\r]*$";

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn nodes_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, NODES_PATTERN)
}

fn time_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, TIME_PATTERN)
}

fn program_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, PROGRAM_PATTERN)
}

/// First capture group of `re` in `text`.
fn capture<'t>(re: Option<&Regex>, text: &'t str) -> Option<&'t str> {
    re?.captures(text)?.get(1).map(|m| m.as_str())
}

/// Parse a `[[h:]m:]s` duration into seconds.
pub fn parse_duration(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    parts.iter().try_fold(0u64, |total, part| {
        let value: u64 = part.trim().parse().ok()?;
        total.checked_mul(60)?.checked_add(value)
    })
}

/// The directives of a batch script the simulator cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchScript {
    pub nodes: u32,
    /// Requested wall time in seconds
    pub time_secs: u64,
    pub program: String,
}

impl BatchScript {
    /// The script provisioned in a fresh home directory.
    pub fn default_for(config: &ShellConfig) -> Self {
        Self {
            nodes: config.cluster_nodes,
            time_secs: parse_duration(&config.batch_time).unwrap_or(DEFAULT_TIME_SECS),
            program: config.program_name.clone(),
        }
    }

    /// Extract nodes, time and program from script text.
    pub fn parse(text: &str) -> Result<Self, BatchScriptError> {
        let nodes = capture(nodes_regex(), text)
            .and_then(|n| n.parse().ok())
            .ok_or(BatchScriptError::MissingNodes)?;
        let time = capture(time_regex(), text).ok_or(BatchScriptError::MissingTime)?;
        let time_secs =
            parse_duration(time).ok_or_else(|| BatchScriptError::InvalidTime(time.to_string()))?;
        let program = capture(program_regex(), text)
            .ok_or(BatchScriptError::MissingProgram)?
            .to_string();

        Ok(Self {
            nodes,
            time_secs,
            program,
        })
    }

    /// Render the full script text.
    pub fn render(&self) -> String {
        format!(
            "#!/bin/bash\n\
             #SBATCH --nodes={nodes}\n\
             #SBATCH --tasks-per-node={TASKS_PER_NODE}\n\
             #SBATCH --cpus-per-task={CPUS_PER_TASK}\n\
             #SBATCH --time {time}\n\
             #SBATCH --error=job-%A.err\n\
             #SBATCH --output=job-%A.out\n\
             srun ./{program}",
            nodes = self.nodes,
            time = format_clock(self.time_secs),
            program = self.program,
        )
    }
}

/// A job ready to hand to the scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchJob {
    /// Path of the script it was read from
    pub script: String,
    pub num_nodes: u32,
    pub duration_secs: u64,
    pub program: String,
}

impl BatchJob {
    /// Read a job out of a script, checking the file name first.
    pub fn from_script(path: &str, text: &str) -> Result<Self, BatchScriptError> {
        if !path.ends_with(BATCH_EXTENSION) {
            return Err(BatchScriptError::WrongExtension);
        }
        let script = BatchScript::parse(text)?;
        Ok(Self {
            script: path.to_string(),
            num_nodes: script.nodes,
            duration_secs: script.time_secs,
            program: script.program,
        })
    }
}

/// How a job ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    /// Killed because it ran past its requested time
    Failed,
}

/// A job lifecycle event reported by the scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobEvent {
    /// Simulated time of the event, in milliseconds
    pub time: u64,
    pub outcome: JobOutcome,
    /// Job name, with or without the scheduler's `standard_` prefix
    pub job_name: String,
}

impl JobEvent {
    /// Job name as the user sees it.
    pub fn display_name(&self) -> &str {
        self.job_name
            .strip_prefix(SCHEDULER_JOB_PREFIX)
            .unwrap_or(&self.job_name)
    }

    /// Name of the file the event produces in the home directory.
    pub fn output_file_name(&self) -> String {
        let ext = match self.outcome {
            JobOutcome::Completed => "out",
            JobOutcome::Failed => "err",
        };
        format!("{}.{}", self.display_name(), ext)
    }

    /// Content written to the output file.
    pub fn output_text(&self) -> &'static str {
        match self.outcome {
            JobOutcome::Completed => "Job successfully completed",
            JobOutcome::Failed => "Program killed due to job expiring",
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            JobOutcome::Completed => write!(f, "job {} completed", self.display_name()),
            JobOutcome::Failed => write!(f, "job {} failed", self.display_name()),
        }
    }
}
