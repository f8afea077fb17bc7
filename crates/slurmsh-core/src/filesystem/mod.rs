//! Simulated filesystem of the cluster head node.
//!
//! Nodes are stored in a flat map keyed by normalized absolute path, so
//! ancestor and descendant checks are string-prefix operations and no
//! parent/child links need to be maintained.
//!
//! Every public operation accepts relative or absolute paths and resolves
//! them against the working directory before touching the map.

mod completion;
mod node;
pub mod path;

pub use node::{Entry, EntryKind, FileContents, FileKind, Node, NodeKind};

use std::collections::HashMap;

use tracing::debug;

use crate::config::{self, ShellConfig};
use crate::error::FsError;

/// In-memory filesystem owned by one shell session.
///
/// # Invariants
///
/// - `/` exists, is a directory and is not deletable
/// - every other node's parent exists and is a directory
/// - the working directory always names an existing directory
#[derive(Clone, Debug)]
pub struct Filesystem {
    nodes: HashMap<String, Node>,
    cwd: String,
}

impl Filesystem {
    /// Create a filesystem containing only the root directory.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(path::ROOT.to_string(), Node::directory(0, false));
        Self {
            nodes,
            cwd: path::ROOT.to_string(),
        }
    }

    /// Create a filesystem provisioned with the protected batch script and
    /// program binary described by `config`.
    pub fn seeded(config: &ShellConfig, time: u64) -> Result<Self, FsError> {
        let mut fs = Self::new();
        let script = crate::batch::BatchScript::default_for(config).render();

        fs.create_file(config::BATCH_FILE, time, FileKind::Text, false)?;
        if !fs.save_file(config::BATCH_FILE, &script) {
            return Err(FsError::OperationNotPermitted);
        }
        fs.create_file(&config.program_name, time, FileKind::Binary, false)?;

        debug!(program = %config.program_name, "seeded filesystem");
        Ok(fs)
    }

    // =========================================================================
    // Path Resolution
    // =========================================================================

    /// Resolve `path` against the working directory and normalize it.
    pub fn normalize_path(&self, path: &str) -> String {
        path::resolve(&self.cwd, path)
    }

    /// Absolute form of `path`. Alias of [`Self::normalize_path`].
    pub fn get_absolute_path(&self, path: &str) -> String {
        self.normalize_path(path)
    }

    /// True iff `child` is a direct child of `dir`.
    pub fn is_in_directory(&self, child: &str, dir: &str) -> bool {
        path::is_direct_child(&self.normalize_path(child), &self.normalize_path(dir))
    }

    /// True iff both paths resolve to the same absolute path.
    pub fn is_same_directory(&self, a: &str, b: &str) -> bool {
        self.normalize_path(a) == self.normalize_path(b)
    }

    fn get(&self, abs: &str) -> Option<&Node> {
        self.nodes.get(abs)
    }

    /// Node at `path`, if any.
    pub fn node(&self, path: &str) -> Option<&Node> {
        self.get(&self.normalize_path(path))
    }

    fn parent_is_directory(&self, abs: &str) -> bool {
        path::parent(abs)
            .and_then(|parent| self.get(parent))
            .is_some_and(Node::is_directory)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// List a directory's direct children, or name a file.
    ///
    /// Entries come back in no particular order.
    pub fn list_files(&self, path: Option<&str>) -> Result<Vec<Entry>, FsError> {
        let abs = self.normalize_path(path.unwrap_or("."));
        let node = self.get(&abs).ok_or(FsError::NotFound)?;

        if !node.is_directory() {
            return Ok(vec![Entry {
                name: abs.clone(),
                kind: node.entry_kind(),
                created_at: node.created_at,
                deletable: node.deletable,
            }]);
        }

        Ok(self
            .nodes
            .iter()
            .filter(|(key, _)| path::is_direct_child(key, &abs))
            .map(|(key, node)| Entry {
                name: path::file_name(key).to_string(),
                kind: node.entry_kind(),
                created_at: node.created_at,
                deletable: node.deletable,
            })
            .collect())
    }

    /// Current working directory.
    pub fn working_dir(&self) -> &str {
        &self.cwd
    }

    /// Kind of the node at `path`, or `None` when nothing is there.
    pub fn file_exists(&self, path: &str) -> Option<EntryKind> {
        self.node(path).map(Node::entry_kind)
    }

    /// Check if a path is a directory.
    pub fn is_directory(&self, path: &str) -> bool {
        self.node(path).is_some_and(Node::is_directory)
    }

    /// Creation time of the node at `path`.
    pub fn get_date(&self, path: &str) -> Option<u64> {
        self.node(path).map(|node| node.created_at)
    }

    /// Open a file for reading. Directories and missing paths yield `None`.
    pub fn open_file(&self, name: &str) -> Option<FileContents<'_>> {
        match &self.node(name)?.kind {
            NodeKind::TextFile { content } => Some(FileContents::Text(content)),
            NodeKind::BinaryFile => Some(FileContents::Binary),
            NodeKind::Directory => None,
        }
    }

    /// Iterate over every `(absolute path, node)` pair.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Change the working directory. `None` goes to the root.
    pub fn change_working_dir(&mut self, path: Option<&str>) -> Result<(), FsError> {
        let abs = self.normalize_path(path.unwrap_or(path::ROOT));
        let node = self.get(&abs).ok_or(FsError::NotFound)?;
        if !node.is_directory() {
            return Err(FsError::NotADirectory(abs));
        }
        debug!(from = %self.cwd, to = %abs, "changed working directory");
        self.cwd = abs;
        Ok(())
    }

    /// Create a directory. Its parent must already exist.
    pub fn mkdir(&mut self, name: &str, time: u64) -> Result<(), FsError> {
        let abs = self.normalize_path(name);
        if self.nodes.contains_key(&abs) {
            return Err(FsError::AlreadyExists);
        }
        if !self.parent_is_directory(&abs) {
            return Err(FsError::OperationNotPermitted);
        }
        debug!(path = %abs, time, "mkdir");
        self.nodes.insert(abs, Node::directory(time, true));
        Ok(())
    }

    /// Create an empty file. Its parent must already exist.
    pub fn create_file(
        &mut self,
        name: &str,
        time: u64,
        kind: FileKind,
        deletable: bool,
    ) -> Result<(), FsError> {
        let abs = self.normalize_path(name);
        if self.nodes.contains_key(&abs) {
            return Err(FsError::FileExists(abs));
        }
        if !self.parent_is_directory(&abs) {
            return Err(FsError::OperationNotPermitted);
        }
        debug!(path = %abs, ?kind, deletable, time, "created file");
        self.nodes.insert(abs, Node::file(kind, time, deletable));
        Ok(())
    }

    /// Overwrite the content of a text file. Returns false for anything else.
    pub fn save_file(&mut self, name: &str, data: &str) -> bool {
        let abs = self.normalize_path(name);
        match self.nodes.get_mut(&abs) {
            Some(Node {
                kind: NodeKind::TextFile { content },
                ..
            }) => {
                data.clone_into(content);
                debug!(path = %abs, bytes = data.len(), "saved file");
                true
            }
            _ => false,
        }
    }

    /// Remove a file, or a directory tree when `recursive` is set.
    pub fn remove_file(&mut self, name: &str, recursive: bool) -> Result<(), FsError> {
        let abs = self.normalize_path(name);
        let node = self.get(&abs).ok_or(FsError::NotFound)?;

        if !node.deletable {
            return Err(FsError::OperationNotPermitted);
        }
        if !node.is_directory() {
            debug!(path = %abs, "removed file");
            self.nodes.remove(&abs);
            return Ok(());
        }
        if !recursive {
            return Err(FsError::IsADirectory(abs));
        }
        if self.cwd == abs || path::is_descendant(&self.cwd, &abs) {
            return Err(FsError::RemoveWorkingDirectory);
        }

        let before = self.nodes.len();
        self.nodes
            .retain(|key, _| *key != abs && !path::is_descendant(key, &abs));
        debug!(path = %abs, removed = before - self.nodes.len(), "removed directory tree");
        Ok(())
    }

    /// Copy a file. Copies are always deletable and stamped with `time`.
    pub fn copy_file(&mut self, src: &str, dst: &str, time: u64) -> Result<(), FsError> {
        let src_abs = self.normalize_path(src);
        let mut dst_abs = self.normalize_path(dst);

        let source = self.get(&src_abs).ok_or(FsError::NotFound)?;
        if src_abs == dst_abs {
            return Err(FsError::IdenticalPaths);
        }
        if source.is_directory() {
            return Err(FsError::CopyDirectory);
        }
        let kind = source.kind.clone();

        match self.get(&dst_abs) {
            Some(target) if target.is_directory() => {
                dst_abs = path::join(&dst_abs, path::file_name(&src_abs));
                if dst_abs == src_abs {
                    return Err(FsError::IdenticalPaths);
                }
                match self.get(&dst_abs) {
                    Some(existing) if existing.is_directory() => {
                        return Err(FsError::IsADirectory(dst_abs));
                    }
                    Some(existing) if !existing.deletable => {
                        return Err(FsError::OperationNotPermitted);
                    }
                    _ => {}
                }
            }
            Some(target) if !target.deletable => return Err(FsError::OperationNotPermitted),
            Some(_) => {}
            None if !self.parent_is_directory(&dst_abs) => {
                return Err(FsError::OperationNotPermitted);
            }
            None => {}
        }

        debug!(from = %src_abs, to = %dst_abs, time, "copied file");
        self.nodes.insert(
            dst_abs,
            Node {
                kind,
                created_at: time,
                deletable: true,
            },
        );
        Ok(())
    }

    /// Remove every deletable job output file (`.out`/`.err`).
    ///
    /// Returns the number of files removed.
    pub fn remove_job_outputs(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|key, node| {
            let is_output = matches!(node.kind, NodeKind::TextFile { .. })
                && config::JOB_OUTPUT_EXTENSIONS
                    .iter()
                    .any(|ext| key.ends_with(ext));
            !(is_output && node.deletable)
        });
        let removed = before - self.nodes.len();
        debug!(removed, "removed job outputs");
        removed
    }
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}
