//! Tab completion of the last word on a command line.
//!
//! The word under the cursor is completed as a path:
//! - Single match: the word is replaced on the line
//! - Multiple matches: the candidates are returned for display
//! - A trailing `.` or `..` segment just gains a `/`

use crate::filesystem::Filesystem;

/// Result of a completion attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The completed line, replacing the current one.
    Line(String),
    /// Several candidates; the line stays as typed.
    Candidates(Vec<String>),
}

/// Line endings that complete to a directory separator.
const DOT_ENDINGS: &[&str] = &["/.", "/..", " .", " .."];

/// Complete the last word of `line` against the filesystem.
pub fn autocomplete(line: &str, fs: &Filesystem) -> Completion {
    if DOT_ENDINGS.iter().any(|ending| line.ends_with(ending)) {
        return Completion::Line(format!("{}/", line));
    }

    let word_start = line.rfind(' ').map(|idx| idx + 1).unwrap_or(0);
    let (head, word) = line.split_at(word_start);

    let mut matches = fs.tab_completion(word);
    if matches.len() == 1 {
        let completed = matches.remove(0);
        Completion::Line(format!("{}{}", head, completed))
    } else {
        Completion::Candidates(matches)
    }
}
