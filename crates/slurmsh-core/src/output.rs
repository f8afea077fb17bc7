//! Output line types produced by command execution.
//!
//! The core never emits terminal escape codes; front ends decide how each
//! variant is styled. `Display` renders the plain text.

use std::fmt;

use crate::filesystem::{Entry, EntryKind};
use crate::format::format_sim_date;

/// Text styling for file listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListStyle {
    /// Directory entries (shown with a trailing `/`)
    Directory,
    /// Program binaries
    Binary,
    /// Text files
    Plain,
}

impl From<EntryKind> for ListStyle {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => Self::Directory,
            EntryKind::BinaryFile => Self::Binary,
            EntryKind::TextFile => Self::Plain,
        }
    }
}

/// A name in a listing together with its style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListName {
    pub name: String,
    pub style: ListStyle,
}

impl ListName {
    /// Name as printed: directories carry a trailing `/`.
    pub fn display_name(&self) -> String {
        match self.style {
            ListStyle::Directory => format!("{}/", self.name),
            _ => self.name.clone(),
        }
    }
}

/// A single line of terminal output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputLine {
    /// Plain text output
    Text(String),
    /// Error message
    Error(String),
    /// Status message from the shell itself
    Info(String),
    /// One row of a short `ls` listing
    ListRow(Vec<ListName>),
    /// One entry of an `ls -l` listing
    LongEntry {
        permissions: String,
        user: String,
        created_at: u64,
        name: ListName,
    },
    /// Empty line
    Empty,
}

/// Separator between names in a short listing row.
pub(crate) const LIST_GAP: &str = "   ";

impl OutputLine {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::Error(s.into())
    }

    pub fn info(s: impl Into<String>) -> Self {
        Self::Info(s.into())
    }

    pub fn empty() -> Self {
        Self::Empty
    }

    /// Create a long listing entry (`ls -l`).
    pub fn long_entry(entry: &Entry, user: &str) -> Self {
        Self::LongEntry {
            permissions: entry.permissions(),
            user: user.to_string(),
            created_at: entry.created_at,
            name: ListName {
                name: entry.name.clone(),
                style: entry.kind.into(),
            },
        }
    }

    /// Pack entries into rows no wider than `columns`.
    pub fn list_rows(entries: &[Entry], columns: usize) -> Vec<Self> {
        let mut rows = Vec::new();
        let mut row: Vec<ListName> = Vec::new();
        let mut width = 0;

        for entry in entries {
            let name = ListName {
                name: entry.name.clone(),
                style: entry.kind.into(),
            };
            let len = name.display_name().chars().count() + LIST_GAP.len();
            if !row.is_empty() && width + len >= columns {
                rows.push(Self::ListRow(std::mem::take(&mut row)));
                width = 0;
            }
            width += len;
            row.push(name);
        }
        if !row.is_empty() {
            rows.push(Self::ListRow(row));
        }
        rows
    }

    /// True for error lines.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Error(s) | Self::Info(s) => write!(f, "{}", s),
            Self::ListRow(names) => {
                let names: Vec<String> = names.iter().map(ListName::display_name).collect();
                write!(f, "{}", names.join(LIST_GAP))
            }
            Self::LongEntry {
                permissions,
                user,
                created_at,
                name,
            } => write!(
                f,
                "{}  {}   {}   {}",
                permissions,
                user,
                format_sim_date(*created_at),
                name.display_name()
            ),
            Self::Empty => Ok(()),
        }
    }
}
