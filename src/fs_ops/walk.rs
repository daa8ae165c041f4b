//! Recursive path enumeration.
//!
//! Both listings walk with walkdir (no symlink following, unsorted) and never
//! abort: a node that cannot be read is recorded in the returned `ErrorLog`,
//! its subtree is skipped, and the walk continues with its siblings.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::{ErrorLog, FsOpError};

/// Order of the directory listing returned by [`list_dirs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOrder {
    /// Pre-order: every directory before its descendants.
    RootFirst,
    /// Reverse pre-order: every directory after its descendants. Removal order.
    LeafFirst,
}

/// Every non-directory entry under `root` (regular files, and symlinks as leaves).
pub fn list_files(root: &Path) -> (Vec<PathBuf>, ErrorLog) {
    let mut files = Vec::new();
    let mut errors = ErrorLog::new();

    for entry in WalkDir::new(root).min_depth(1) {
        match entry {
            Ok(e) if e.file_type().is_dir() => {}
            Ok(e) => files.push(e.into_path()),
            Err(err) => errors.push(FsOpError::from_walk(err, root)),
        }
    }

    debug!(root = %root.display(), files = files.len(), errors = errors.len(), "listed files");
    (files, errors)
}

/// Every directory under `root`, optionally including `root` itself.
///
/// A directory is recorded before its contents are read, so an unreadable
/// directory still appears in the listing (alongside its error).
pub fn list_dirs(root: &Path, order: DirOrder, include_root: bool) -> (Vec<PathBuf>, ErrorLog) {
    let mut dirs = Vec::new();
    let mut errors = ErrorLog::new();

    if include_root {
        dirs.push(root.to_path_buf());
    }

    for entry in WalkDir::new(root).min_depth(1) {
        match entry {
            Ok(e) if e.file_type().is_dir() => {
                trace!(path = %e.path().display(), "directory");
                dirs.push(e.into_path());
            }
            Ok(_) => {}
            Err(err) => errors.push(FsOpError::from_walk(err, root)),
        }
    }

    if order == DirOrder::LeafFirst {
        dirs.reverse();
    }

    debug!(root = %root.display(), dirs = dirs.len(), errors = errors.len(), ?order, "listed directories");
    (dirs, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn sample_tree() -> assert_fs::TempDir {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b/one.txt").write_str("1").unwrap();
        temp.child("a/two.txt").write_str("2").unwrap();
        temp.child("c").create_dir_all().unwrap();
        temp.child("three.txt").write_str("3").unwrap();
        temp
    }

    #[test]
    fn files_only_and_each_once() {
        let temp = sample_tree();
        let (mut files, errors) = list_files(temp.path());
        assert!(errors.is_empty());
        files.sort();
        let mut expected = vec![
            temp.path().join("a/b/one.txt"),
            temp.path().join("a/two.txt"),
            temp.path().join("three.txt"),
        ];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn dirs_root_first_then_reversed() {
        let temp = sample_tree();
        let (pre, _) = list_dirs(temp.path(), DirOrder::RootFirst, true);
        let (mut post, _) = list_dirs(temp.path(), DirOrder::LeafFirst, true);
        assert_eq!(pre.len(), 4);
        assert_eq!(pre[0], temp.path());
        assert_eq!(post.last().map(PathBuf::as_path), Some(temp.path()));
        post.reverse();
        assert_eq!(pre, post);
    }

    #[test]
    fn missing_root_is_logged_not_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();
        let gone = temp.path().join("gone");
        let (files, errors) = list_files(&gone);
        assert!(files.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().map(|e| e.kind_name()), Some("not_found"));
    }
}
