//! Filesystem node types.

use std::fmt;

/// Node payload, tagged by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    /// Editable text file
    TextFile { content: String },
    /// Opaque program; its content can never be read
    BinaryFile,
}

/// A single filesystem entry. Its absolute path is the key it is stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Simulated clock time of creation, in milliseconds
    pub created_at: u64,
    /// False for protected, pre-seeded entries
    pub deletable: bool,
}

impl Node {
    pub fn directory(created_at: u64, deletable: bool) -> Self {
        Self {
            kind: NodeKind::Directory,
            created_at,
            deletable,
        }
    }

    pub fn file(kind: FileKind, created_at: u64, deletable: bool) -> Self {
        let kind = match kind {
            FileKind::Text => NodeKind::TextFile {
                content: String::new(),
            },
            FileKind::Binary => NodeKind::BinaryFile,
        };
        Self {
            kind,
            created_at,
            deletable,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::Directory => EntryKind::Directory,
            NodeKind::TextFile { .. } => EntryKind::TextFile,
            NodeKind::BinaryFile => EntryKind::BinaryFile,
        }
    }
}

/// Kind of file to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Binary,
}

/// Payload-free node kind returned by queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    TextFile,
    BinaryFile,
}

impl EntryKind {
    pub fn is_directory(self) -> bool {
        self == Self::Directory
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "dir"),
            Self::TextFile => write!(f, "text"),
            Self::BinaryFile => write!(f, "bin"),
        }
    }
}

/// Listing entry returned by `list_files`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Child name, or the absolute path when a file was listed directly
    pub name: String,
    pub kind: EntryKind,
    pub created_at: u64,
    pub deletable: bool,
}

impl Entry {
    /// `ls -l` permission string: `d` for directories, `w` if deletable,
    /// `x` for directories and binaries.
    pub fn permissions(&self) -> String {
        format!(
            "{}r{}{}",
            if self.kind.is_directory() { 'd' } else { '-' },
            if self.deletable { 'w' } else { '-' },
            if self.kind == EntryKind::TextFile {
                '-'
            } else {
                'x'
            },
        )
    }
}

/// Result of opening a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileContents<'a> {
    Text(&'a str),
    /// Binary files are never shown
    Binary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: EntryKind, deletable: bool) -> Entry {
        Entry {
            name: "x".to_string(),
            kind,
            created_at: 0,
            deletable,
        }
    }

    #[test]
    fn test_permissions() {
        assert_eq!(entry(EntryKind::Directory, true).permissions(), "drwx");
        assert_eq!(entry(EntryKind::TextFile, true).permissions(), "-rw-");
        assert_eq!(entry(EntryKind::TextFile, false).permissions(), "-r--");
        assert_eq!(entry(EntryKind::BinaryFile, false).permissions(), "-r-x");
    }

    #[test]
    fn test_new_file_nodes() {
        let text = Node::file(FileKind::Text, 5, true);
        assert_eq!(
            text.kind,
            NodeKind::TextFile {
                content: String::new()
            }
        );
        assert_eq!(text.entry_kind(), EntryKind::TextFile);
        assert!(!text.is_directory());

        let bin = Node::file(FileKind::Binary, 5, false);
        assert_eq!(bin.entry_kind(), EntryKind::BinaryFile);
        assert!(!bin.deletable);
    }
}
