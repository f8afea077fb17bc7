//! Command execution result type.

use crate::batch::BatchJob;
use crate::output::OutputLine;

/// A file handed to the front end for interactive editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    /// Absolute path of the file
    pub path: String,
    /// Current content
    pub content: String,
    /// True for `.slurm` scripts, which front ends may edit through a form
    pub batch_script: bool,
}

/// Work that only the scheduler backend can perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerRequest {
    /// `sbatch`: submit a validated job
    Submit(BatchJob),
    /// `squeue`: show the queue
    Queue,
    /// `scancel`: cancel a job by name
    Cancel(String),
    /// `sleep`: simulated time moved forward by this many seconds
    AdvanceTime(u64),
}

/// Result of executing a command.
///
/// Commands can produce output and optionally hand work to the front end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Output lines to display
    pub output: Vec<OutputLine>,
    /// The screen should be cleared before showing output
    pub clear: bool,
    /// A file to open in an editor
    pub edit: Option<EditRequest>,
    /// Work for the scheduler backend
    pub scheduler: Option<SchedulerRequest>,
}

impl CommandResult {
    /// Create a result with just output.
    pub fn output(lines: Vec<OutputLine>) -> Self {
        Self {
            output: lines,
            ..Self::default()
        }
    }

    /// Create a result holding a single error line.
    pub fn error(message: impl Into<String>) -> Self {
        Self::output(vec![OutputLine::error(message)])
    }

    /// Create an empty result (no output, no requests).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a result that clears the screen.
    pub fn clear() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }

    /// Create a result that opens an editor.
    pub fn edit(request: EditRequest) -> Self {
        Self {
            edit: Some(request),
            ..Self::default()
        }
    }

    /// Create a result that hands work to the scheduler.
    pub fn scheduler(request: SchedulerRequest) -> Self {
        Self {
            scheduler: Some(request),
            ..Self::default()
        }
    }

    /// True if any output line is an error.
    pub fn has_error(&self) -> bool {
        self.output.iter().any(OutputLine::is_error)
    }
}
