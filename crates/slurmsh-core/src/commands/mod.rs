//! Command parsing and execution.
//!
//! This module provides:
//! - `Command` enum for parsed shell commands
//! - `CommandResult` for command execution results
//! - `execute_command` for running a command against session state
//!
//! # Architecture
//!
//! Words from the parser are turned into the `Command` enum, with argument
//! count errors caught as [`Command::Usage`]. Execution then runs against
//! the filesystem and simulated clock. Scheduler work (`sbatch`, `squeue`,
//! `scancel`, `sleep`) is validated here and handed to the front end as a
//! [`SchedulerRequest`].

mod execute;
mod result;

pub(crate) use execute::{Context, execute_command};
pub use result::{CommandResult, EditRequest, SchedulerRequest};

use crate::config::UNSUPPORTED_EDITORS;

// =============================================================================
// Command Enum
// =============================================================================

/// Parsed shell command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Help index, or a named topic
    Help(Option<String>),
    Clear,
    /// Advance the simulated clock by a `[[h:]m:]s` duration
    Sleep(String),
    History,
    /// List directories. `long` = `-l`
    Ls {
        paths: Vec<String>,
        long: bool,
    },
    Pwd,
    Mkdir(Vec<String>),
    Touch(Vec<String>),
    Cp {
        src: String,
        dst: String,
    },
    Rm {
        paths: Vec<String>,
        recursive: bool,
    },
    Cat(Vec<String>),
    Whoami,
    /// `None` goes to the root
    Cd(Option<String>),
    Edit(String),
    /// Current date, or the creation date of a path (`-r`)
    Date(Option<String>),
    Sbatch(String),
    Squeue,
    Scancel(String),
    /// A real editor that this shell replaces with `edit`
    Unsupported(String),
    /// Malformed invocation; holds the full message
    Usage(String),
    /// Anything else: possibly a path typed as a command
    Unknown(String),
}

impl Command {
    /// Parse command from name and arguments.
    pub fn parse(name: &str, args: &[String]) -> Self {
        if UNSUPPORTED_EDITORS.contains(&name) {
            return Self::Unsupported(name.to_string());
        }

        match name {
            "help" => match args {
                [] => Self::Help(None),
                [topic] => Self::Help(Some(topic.clone())),
                _ => usage("help: invalid number of arguments"),
            },
            "clear" => Self::Clear,
            "sleep" => match args {
                [duration] => Self::Sleep(duration.clone()),
                _ => usage("sleep: invalid number of arguments"),
            },
            "history" => Self::History,
            "ls" => {
                let mut long = false;
                let mut paths = Vec::new();
                for arg in args {
                    if arg == "-l" {
                        long = true;
                    } else if arg.starts_with('-') {
                        return usage(format!("ls: unknown option '{}'", arg));
                    } else {
                        paths.push(arg.clone());
                    }
                }
                Self::Ls { paths, long }
            }
            "pwd" => no_args(name, args, Self::Pwd),
            "mkdir" => with_paths(name, args, Self::Mkdir),
            "touch" => with_paths(name, args, Self::Touch),
            "cp" => match args {
                [src, dst] => Self::Cp {
                    src: src.clone(),
                    dst: dst.clone(),
                },
                [] | [_] => usage("cp: missing argument"),
                _ => usage("cp: too many arguments"),
            },
            "rm" => match args {
                [flag, rest @ ..] if flag == "-r" => {
                    if rest.is_empty() {
                        usage("rm: missing argument")
                    } else {
                        Self::Rm {
                            paths: rest.to_vec(),
                            recursive: true,
                        }
                    }
                }
                [] => usage("rm: missing argument"),
                _ => Self::Rm {
                    paths: args.to_vec(),
                    recursive: false,
                },
            },
            "cat" => with_paths(name, args, Self::Cat),
            "whoami" => no_args(name, args, Self::Whoami),
            "cd" => match args {
                [] => Self::Cd(None),
                [path] => Self::Cd(Some(path.clone())),
                _ => usage("cd: too many arguments"),
            },
            "edit" => match args {
                [path] => Self::Edit(path.clone()),
                [] => usage("edit: missing argument"),
                _ => usage("edit: too many arguments"),
            },
            "date" => match args {
                [] => Self::Date(None),
                [flag, path] if flag == "-r" => Self::Date(Some(path.clone())),
                _ => usage("Usage: date [-r <path>]"),
            },
            "sbatch" => match args {
                [path, ..] => Self::Sbatch(path.clone()),
                [] => usage("sbatch: missing argument"),
            },
            "squeue" => no_args(name, args, Self::Squeue),
            "scancel" => match args {
                [job] => Self::Scancel(job.clone()),
                [] => usage("scancel: missing argument"),
                _ => usage("scancel: too many arguments"),
            },
            _ => Self::Unknown(name.to_string()),
        }
    }
}

fn usage(message: impl Into<String>) -> Command {
    Command::Usage(message.into())
}

fn no_args(name: &str, args: &[String], cmd: Command) -> Command {
    if args.is_empty() {
        cmd
    } else {
        usage(format!("{}: too many arguments", name))
    }
}

fn with_paths(name: &str, args: &[String], cmd: fn(Vec<String>) -> Command) -> Command {
    if args.is_empty() {
        usage(format!("{}: missing argument", name))
    } else {
        cmd(args.to_vec())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_ls() {
        assert_eq!(
            Command::parse("ls", &[]),
            Command::Ls {
                paths: vec![],
                long: false
            }
        );
        assert_eq!(
            Command::parse("ls", &args(&["-l", "a", "b"])),
            Command::Ls {
                paths: args(&["a", "b"]),
                long: true
            }
        );
        assert_eq!(
            Command::parse("ls", &args(&["-a"])),
            Command::Usage("ls: unknown option '-a'".to_string())
        );
    }

    #[test]
    fn test_parse_rm() {
        assert_eq!(
            Command::parse("rm", &args(&["-r", "logs", "tmp"])),
            Command::Rm {
                paths: args(&["logs", "tmp"]),
                recursive: true
            }
        );
        assert_eq!(
            Command::parse("rm", &args(&["a", "-r"])),
            Command::Rm {
                paths: args(&["a", "-r"]),
                recursive: false
            }
        );
        assert!(matches!(Command::parse("rm", &args(&["-r"])), Command::Usage(_)));
        assert!(matches!(Command::parse("rm", &[]), Command::Usage(_)));
    }

    #[test]
    fn test_parse_cp_arity() {
        assert_eq!(
            Command::parse("cp", &args(&["a", "b"])),
            Command::Cp {
                src: "a".to_string(),
                dst: "b".to_string()
            }
        );
        assert_eq!(
            Command::parse("cp", &args(&["a"])),
            Command::Usage("cp: missing argument".to_string())
        );
        assert_eq!(
            Command::parse("cp", &args(&["a", "b", "c"])),
            Command::Usage("cp: too many arguments".to_string())
        );
    }

    #[test]
    fn test_parse_cd() {
        assert_eq!(Command::parse("cd", &[]), Command::Cd(None));
        assert_eq!(
            Command::parse("cd", &args(&["/logs"])),
            Command::Cd(Some("/logs".to_string()))
        );
        assert!(matches!(Command::parse("cd", &args(&["a", "b"])), Command::Usage(_)));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(Command::parse("date", &[]), Command::Date(None));
        assert_eq!(
            Command::parse("date", &args(&["-r", "batch.slurm"])),
            Command::Date(Some("batch.slurm".to_string()))
        );
        assert_eq!(
            Command::parse("date", &args(&["now"])),
            Command::Usage("Usage: date [-r <path>]".to_string())
        );
    }

    #[test]
    fn test_parse_missing_arguments() {
        for name in ["mkdir", "touch", "cat", "sbatch", "scancel", "edit"] {
            assert_eq!(
                Command::parse(name, &[]),
                Command::Usage(format!("{}: missing argument", name))
            );
        }
    }

    #[test]
    fn test_parse_too_many_arguments() {
        for name in ["pwd", "whoami", "squeue"] {
            assert_eq!(
                Command::parse(name, &args(&["x"])),
                Command::Usage(format!("{}: too many arguments", name))
            );
        }
    }

    #[test]
    fn test_parse_unsupported_editor() {
        assert_eq!(
            Command::parse("vim", &args(&["batch.slurm"])),
            Command::Unsupported("vim".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse("LS", &[]),
            Command::Unknown("LS".to_string())
        );
    }
}
