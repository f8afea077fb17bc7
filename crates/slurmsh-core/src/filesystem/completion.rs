//! Path tab-completion over the flat node map.
//!
//! A completion request returns either a single replacement for the typed
//! path, or the candidate names to show the user:
//! - Single match: complete immediately (directories get a trailing `/`)
//! - Multiple matches sharing a prefix: extend to the common prefix
//! - Multiple matches with nothing in common: list their names

use tracing::trace;

use super::Filesystem;
use super::path::{self, SEPARATOR};

impl Filesystem {
    /// Complete a partially typed path.
    ///
    /// Returns one element when the input can be completed (or cannot be
    /// matched at all, in which case the input comes back unchanged), and
    /// the candidate names otherwise.
    pub fn tab_completion(&self, partial: &str) -> Vec<String> {
        if partial.is_empty() || partial.ends_with(SEPARATOR) {
            return self.complete_in_directory(partial);
        }
        if matches!(partial.rsplit(SEPARATOR).next(), Some(".") | Some("..")) {
            return vec![format!("{}{}", partial, SEPARATOR)];
        }

        let absolute = self.normalize_path(partial);
        let candidates = remove_nested(self.next_segments(&absolute));
        trace!(partial, %absolute, ?candidates, "tab completion candidates");

        if candidates.is_empty() {
            return vec![partial.to_string()];
        }

        if let [only] = candidates.as_slice() {
            let completed = format!("{}{}", partial, only);
            match self.node(&completed) {
                Some(node) if !node.is_directory() => return vec![completed],
                Some(_) if !completed.ends_with(SEPARATOR) => {
                    return vec![format!("{}{}", completed, SEPARATOR)];
                }
                _ => {}
            }
        }

        let common = longest_common_prefix(&candidates);
        if !common.is_empty() {
            return vec![format!("{}{}", partial, common)];
        }

        candidates
            .iter()
            .map(|c| {
                let full = self.normalize_path(&format!("{}{}", partial, c));
                path::file_name(&full).to_string()
            })
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Complete inside the directory named by `partial` (or the working
    /// directory when `partial` is empty).
    fn complete_in_directory(&self, partial: &str) -> Vec<String> {
        let dir = self.normalize_path(if partial.is_empty() { "." } else { partial });
        let mut children: Vec<(&str, bool)> = self
            .entries()
            .filter(|(key, _)| path::is_direct_child(key, &dir))
            .map(|(key, node)| (path::file_name(key), node.is_directory()))
            .collect();
        children.sort_unstable();

        match children.as_slice() {
            [] => vec![partial.to_string()],
            [(name, is_dir)] => {
                let suffix = if *is_dir { "/" } else { "" };
                vec![format!("{}{}{}", partial, name, suffix)]
            }
            _ => children.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }

    /// For every node path extending `absolute`, the remainder up to (not
    /// including) its next separator. Sorted and deduplicated.
    fn next_segments(&self, absolute: &str) -> Vec<String> {
        let mut segments: Vec<String> = self
            .entries()
            .filter_map(|(key, _)| key.strip_prefix(absolute))
            .map(|rest| match rest.find(SEPARATOR) {
                Some(idx) => rest[..idx].to_string(),
                None => rest.to_string(),
            })
            .collect();
        segments.sort_unstable();
        segments.dedup();
        segments
    }
}

/// Drop candidates that are a directory prefix of a more specific one
/// (`foo` when `foo/bar` is also present).
fn remove_nested(candidates: Vec<String>) -> Vec<String> {
    candidates
        .iter()
        .filter(|m| {
            let as_dir = format!("{}{}", m, SEPARATOR);
            !candidates.iter().any(|other| other.starts_with(&as_dir))
        })
        .cloned()
        .collect()
}

/// Find the character-wise common prefix of multiple strings.
pub(crate) fn longest_common_prefix<S: AsRef<str>>(strings: &[S]) -> String {
    let Some((first, rest)) = strings.split_first() else {
        return String::new();
    };
    let first = first.as_ref();
    let mut prefix_len = first.len();

    for s in rest {
        prefix_len = first
            .char_indices()
            .zip(s.as_ref().chars())
            .take_while(|((idx, a), b)| *idx < prefix_len && a == b)
            .map(|((idx, a), _)| idx + a.len_utf8())
            .last()
            .unwrap_or(0);
    }

    first[..prefix_len].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FileKind;

    fn fs_with(dirs: &[&str], files: &[&str]) -> Filesystem {
        let mut fs = Filesystem::new();
        for dir in dirs {
            fs.mkdir(dir, 0).unwrap();
        }
        for file in files {
            fs.create_file(file, 0, FileKind::Text, true).unwrap();
        }
        fs
    }

    #[test]
    fn test_common_prefix() {
        let strings = vec!["hello", "help", "helicopter"];
        assert_eq!(longest_common_prefix(&strings), "hel");
        assert_eq!(longest_common_prefix(&["abc", "xyz"]), "");
        assert_eq!(longest_common_prefix(&["solo"]), "solo");
        assert_eq!(longest_common_prefix::<&str>(&[]), "");
        assert_eq!(longest_common_prefix(&["héllo", "hélp"]), "hél");
    }

    #[test]
    fn test_unique_file() {
        let fs = fs_with(&[], &["/abc.txt"]);
        assert_eq!(fs.tab_completion("/ab"), vec!["/abc.txt"]);
    }

    #[test]
    fn test_ambiguous_without_common_prefix_lists_names() {
        let fs = fs_with(&[], &["/abc.txt", "/abd.txt"]);
        assert_eq!(fs.tab_completion("/ab"), vec!["abc.txt", "abd.txt"]);
    }

    #[test]
    fn test_ambiguous_extends_to_common_prefix() {
        let fs = fs_with(&[], &["/abc.txt", "/abd.txt"]);
        assert_eq!(fs.tab_completion("/a"), vec!["/ab"]);
    }

    #[test]
    fn test_single_directory_gets_separator() {
        let fs = fs_with(&["/logs", "/logs/job1"], &[]);
        assert_eq!(fs.tab_completion("/lo"), vec!["/logs/"]);
        assert_eq!(fs.tab_completion("/logs"), vec!["/logs/"]);
        assert_eq!(fs.tab_completion("/logs/"), vec!["/logs/job1/"]);
    }

    #[test]
    fn test_dot_segments_complete_as_directories() {
        let mut fs = fs_with(&["/logs"], &["/abc.txt"]);
        assert_eq!(fs.tab_completion("."), vec!["./"]);
        assert_eq!(fs.tab_completion(".."), vec!["../"]);
        fs.change_working_dir(Some("/logs")).unwrap();
        assert_eq!(fs.tab_completion("../."), vec![".././"]);
        assert_eq!(fs.tab_completion(".hidden"), vec![".hidden"]);
    }

    #[test]
    fn test_trailing_separator_lists_children() {
        let fs = fs_with(&["/d"], &["/d/x", "/d/y"]);
        assert_eq!(fs.tab_completion("/d/"), vec!["x", "y"]);
    }

    #[test]
    fn test_trailing_separator_single_file() {
        let fs = fs_with(&["/d"], &["/d/only.txt"]);
        assert_eq!(fs.tab_completion("/d/"), vec!["/d/only.txt"]);
    }

    #[test]
    fn test_relative_completion() {
        let mut fs = fs_with(&["/home"], &["/home/batch.slurm", "/home/notes.txt"]);
        fs.change_working_dir(Some("/home")).unwrap();
        assert_eq!(fs.tab_completion("ba"), vec!["batch.slurm"]);
        assert_eq!(fs.tab_completion("../ho"), vec!["../home/"]);
    }

    #[test]
    fn test_empty_input_lists_working_dir() {
        let fs = fs_with(&["/d"], &["/f.txt"]);
        assert_eq!(fs.tab_completion(""), vec!["d", "f.txt"]);
    }

    #[test]
    fn test_no_match_returns_input() {
        let fs = fs_with(&["/d"], &[]);
        assert_eq!(fs.tab_completion("/zz"), vec!["/zz"]);
        assert_eq!(fs.tab_completion("/d/"), vec!["/d/"]);
    }

    #[test]
    fn test_exact_file_and_longer_sibling() {
        let fs = fs_with(&[], &["/ab", "/abc"]);
        assert_eq!(fs.tab_completion("/ab"), vec!["ab", "abc"]);
    }

    #[test]
    fn test_remove_nested() {
        let cleaned = remove_nested(vec![
            "foo".to_string(),
            "foo/bar".to_string(),
            "baz".to_string(),
        ]);
        assert_eq!(cleaned, vec!["foo/bar".to_string(), "baz".to_string()]);
    }
}
