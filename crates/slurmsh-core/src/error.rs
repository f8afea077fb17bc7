//! Error types for the shell core.
//!
//! Each domain gets its own enum:
//!
//! - [`FsError`] - filesystem operation failures, displayed to the user
//! - [`BatchScriptError`] - malformed `.slurm` scripts handed to `sbatch`
//! - [`ConfigError`] - invalid TOML session configuration

use thiserror::Error;

/// Filesystem operation failures.
///
/// The `Display` text is what the user sees after the command prefix,
/// e.g. `rm: operation not permitted`. A failed operation never leaves
/// the filesystem partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Nothing exists at the resolved path
    #[error("no such file or directory")]
    NotFound,
    /// Protected node, or missing parent directory
    #[error("operation not permitted")]
    OperationNotPermitted,
    /// `mkdir` on an occupied path
    #[error("directory already exists")]
    AlreadyExists,
    /// `touch`/create on an occupied path
    #[error("cannot create file '{0}': File exists")]
    FileExists(String),
    /// Directory where a file operation was requested
    #[error("{0} is a directory")]
    IsADirectory(String),
    /// File where a directory was required
    #[error("{0}: not a directory")]
    NotADirectory(String),
    /// Recursive removal of the working directory or one of its ancestors
    #[error("cannot remove current working directory")]
    RemoveWorkingDirectory,
    /// Copy onto itself
    #[error("source and destination are identical (not copied)")]
    IdenticalPaths,
    /// Directory given as copy source
    #[error("copying directories not supported")]
    CopyDirectory,
}

/// Errors raised while reading a batch script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchScriptError {
    #[error("batch file must have .slurm extension")]
    WrongExtension,
    #[error("missing '#SBATCH --nodes=<n>' directive")]
    MissingNodes,
    #[error("missing '#SBATCH --time <h:m:s>' directive")]
    MissingTime,
    #[error("invalid time specification '{0}'")]
    InvalidTime(String),
    #[error("missing 'srun ./<program>' line")]
    MissingProgram,
}

/// Errors raised while loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cluster must have at least one compute node")]
    NoNodes,
    #[error("program name must be a single path segment: '{0}'")]
    InvalidProgramName(String),
    #[error("invalid batch time '{0}' (expected h:m:s)")]
    InvalidBatchTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_messages() {
        assert_eq!(FsError::NotFound.to_string(), "no such file or directory");
        assert_eq!(
            FsError::IsADirectory("/logs".to_string()).to_string(),
            "/logs is a directory"
        );
        assert_eq!(
            FsError::FileExists("/a.txt".to_string()).to_string(),
            "cannot create file '/a.txt': File exists"
        );
    }

    #[test]
    fn test_error_messages_are_never_empty() {
        let all = [
            FsError::NotFound,
            FsError::OperationNotPermitted,
            FsError::AlreadyExists,
            FsError::FileExists(String::new()),
            FsError::IsADirectory(String::new()),
            FsError::NotADirectory(String::new()),
            FsError::RemoveWorkingDirectory,
            FsError::IdenticalPaths,
            FsError::CopyDirectory,
        ];
        for err in all {
            assert!(!err.to_string().trim().is_empty());
        }
    }
}
