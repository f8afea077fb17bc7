//! Core logic for the simulated cluster head-node shell.
//!
//! This crate provides:
//! - [`Filesystem`] the in-memory, path-keyed filesystem engine
//! - [`Session`] the command dispatcher driving the engine
//! - [`parse_input`] tokenizing with history recall
//! - [`BatchScript`] parsing of `.slurm` job scripts

mod autocomplete;
pub mod batch;
mod commands;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod format;
mod output;
pub mod parser;
mod session;

pub use autocomplete::Completion;
pub use batch::{BatchJob, BatchScript, JobEvent, JobOutcome};
pub use commands::{Command, CommandResult, EditRequest, SchedulerRequest};
pub use config::ShellConfig;
pub use error::{BatchScriptError, ConfigError, FsError};
pub use filesystem::{Entry, EntryKind, FileContents, FileKind, Filesystem, Node, NodeKind};
pub use output::{ListName, ListStyle, OutputLine};
pub use parser::{ParseError, parse_input};
pub use session::Session;
