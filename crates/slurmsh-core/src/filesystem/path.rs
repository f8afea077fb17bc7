//! Pure path string manipulation.
//!
//! # Path Convention
//!
//! - Root: `"/"`
//! - Absolute paths always start with `/` and never end with one (except root)
//! - No `.`, `..` or empty segments remain after [`normalize`] on a rooted path

/// Path segment separator.
pub const SEPARATOR: char = '/';

/// Root path.
pub const ROOT: &str = "/";

/// Normalize a path by resolving `.` and `..` segments.
///
/// A `..` collapses the preceding non-`..` segment. On a rooted path a
/// leading `..` is dropped since nothing lies above the root; on a relative
/// path it is kept. An empty relative result becomes `"."`.
pub fn normalize(path: &str) -> String {
    let rooted = path.starts_with(SEPARATOR);
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split(SEPARATOR).filter(|s| !s.is_empty() && *s != ".") {
        if part != ".." {
            parts.push(part);
            continue;
        }
        match parts.last() {
            Some(&last) if last != ".." => {
                parts.pop();
            }
            _ if rooted => {}
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("{}{}", SEPARATOR, joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Resolve `path` against the absolute directory `cwd` and normalize.
pub fn resolve(cwd: &str, path: &str) -> String {
    if path.starts_with(SEPARATOR) {
        normalize(path)
    } else {
        normalize(&format!("{}{}{}", cwd, SEPARATOR, path))
    }
}

/// Parent of an absolute normalized path. The root has none.
pub fn parent(path: &str) -> Option<&str> {
    if path == ROOT {
        return None;
    }
    match path.rsplit_once(SEPARATOR) {
        Some(("", _)) => Some(ROOT),
        Some((parent, _)) => Some(parent),
        None => None,
    }
}

/// Last segment of a path (empty for the root).
pub fn file_name(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// Append a single segment to an absolute directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("{}{}", SEPARATOR, name)
    } else {
        format!("{}{}{}", dir, SEPARATOR, name)
    }
}

/// True iff `child` sits exactly one level below `dir`.
pub fn is_direct_child(child: &str, dir: &str) -> bool {
    parent(child) == Some(dir)
}

/// True iff `path` lies strictly below `ancestor`, at any depth.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return path != ROOT && path.starts_with(SEPARATOR);
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", "/")]
    #[case("/a/b", "/a/b")]
    #[case("/a/./b/", "/a/b")]
    #[case("//a//b", "/a/b")]
    #[case("/a/b/../c", "/a/c")]
    #[case("/a/b/c/../../d", "/a/d")]
    #[case("/..", "/")]
    #[case("/../../a", "/a")]
    #[case("/a/../..", "/")]
    #[case("a/b/..", "a")]
    #[case("../a", "../a")]
    #[case("../../a/..", "../..")]
    #[case("a/..", ".")]
    #[case("", ".")]
    #[case(".", ".")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("/")]
    #[case("/a/../b/./c")]
    #[case("/x/y/z/../../..")]
    #[case("../../q/./r")]
    fn test_normalize_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("/", "a"), "/a");
        assert_eq!(resolve("/home/user", ".."), "/home");
        assert_eq!(resolve("/home/user", "../../.."), "/");
        assert_eq!(resolve("/home", "/etc/./x"), "/etc/x");
        assert_eq!(resolve("/home", ""), "/home");
        assert_eq!(resolve("/home", "."), "/home");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("/"), None);
        assert_eq!(parent("/a"), Some("/"));
        assert_eq!(parent("/a/b"), Some("/a"));
    }

    #[test]
    fn test_file_name_and_join() {
        assert_eq!(file_name("/a/b.txt"), "b.txt");
        assert_eq!(file_name("/"), "");
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/a", "b"), "/a/b");
    }

    #[test]
    fn test_is_direct_child() {
        assert!(is_direct_child("/a", "/"));
        assert!(is_direct_child("/a/b", "/a"));
        assert!(!is_direct_child("/a/b/c", "/a"));
        assert!(!is_direct_child("/a", "/a"));
        assert!(!is_direct_child("/ab", "/a"));
        assert!(!is_direct_child("/", "/"));
    }

    #[test]
    fn test_is_descendant() {
        assert!(is_descendant("/a/b/c", "/a"));
        assert!(is_descendant("/a", "/"));
        assert!(!is_descendant("/a", "/a"));
        assert!(!is_descendant("/ab/c", "/a"));
        assert!(!is_descendant("/", "/"));
    }
}
