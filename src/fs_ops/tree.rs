//! Directory tree delete and copy.
//!
//! Files go through the parallel batch runner. Directory removal stays a plain
//! sequential leaf-to-root loop: a directory can only be removed once its
//! children are gone.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{ErrorLog, FsOpError};

use super::batch::run_parallel;
use super::metadata::preserve_timestamps;
use super::walk::{list_dirs, list_files, DirOrder};

/// What a copy job reproduces at its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One independent unit of a copy batch.
#[derive(Debug, Clone)]
pub struct CopyJob {
    pub source: PathBuf,
    /// Destination directory the item is placed under.
    pub destination: PathBuf,
    /// Source root stripped from `source` to get the relative target path.
    /// `None` places the item directly under `destination` by file name.
    pub anchor: Option<PathBuf>,
    pub kind: EntryKind,
}

impl CopyJob {
    /// Final location of this item.
    pub fn target(&self) -> PathBuf {
        match &self.anchor {
            Some(anchor) => rebase(&self.source, anchor, &self.destination),
            None => match self.source.file_name() {
                Some(name) => self.destination.join(name),
                None => self.destination.clone(),
            },
        }
    }

    /// Create the target directory, or copy the file bytes plus metadata.
    pub fn run(&self) -> Result<(), FsOpError> {
        let target = self.target();
        match self.kind {
            EntryKind::Dir => create_dir(&target),
            EntryKind::File => {
                if let Some(parent) = target.parent() {
                    create_dir(parent)?;
                }
                copy_file(&self.source, &target)
            }
        }
    }
}

/// Re-root `path` from under `anchor` to under `destination`.
///
/// Strict prefix stripping: a nested directory that happens to share the
/// anchor's name does not move the split point. Paths outside `anchor` keep
/// only their file name.
pub fn rebase(path: &Path, anchor: &Path, destination: &Path) -> PathBuf {
    match path.strip_prefix(anchor) {
        Ok(rel) => destination.join(rel),
        Err(_) => match path.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        },
    }
}

fn create_dir(path: &Path) -> Result<(), FsOpError> {
    fs::create_dir_all(path).map_err(|e| FsOpError::from_io("create directory", path, e))
}

/// Copy one file's bytes, permission bits and timestamps.
///
/// A destination that is the source itself is refused; `fs::copy` would
/// truncate it.
pub(crate) fn copy_file(src: &Path, dest: &Path) -> Result<(), FsOpError> {
    let meta = fs::metadata(src).map_err(|e| FsOpError::from_io("copy file", src, e))?;
    if is_same_file(src, &meta, dest) {
        return Err(FsOpError::SameFile {
            op: "copy file",
            path: src.to_path_buf(),
        });
    }
    fs::copy(src, dest).map_err(|e| FsOpError::from_io("copy file", src, e))?;
    preserve_timestamps(dest, &meta);
    Ok(())
}

#[cfg(unix)]
fn is_same_file(_src: &Path, src_meta: &fs::Metadata, dest: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(dest)
        .map(|d| d.dev() == src_meta.dev() && d.ino() == src_meta.ino())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_same_file(src: &Path, _src_meta: &fs::Metadata, dest: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub(crate) fn remove_file(path: &Path) -> Result<(), FsOpError> {
    fs::remove_file(path).map_err(|e| FsOpError::from_io("remove file", path, e))
}

/// Delete everything under `root`; with `include_root` also `root` itself.
///
/// With `include_root`, a `root` that is a symlink loses only the link and its
/// target is untouched. Without it, the link is followed and the target's
/// contents are cleared.
pub fn delete_tree(root: &Path, include_root: bool) -> ErrorLog {
    let meta = match fs::symlink_metadata(root) {
        Ok(meta) => meta,
        Err(e) => return ErrorLog::from(vec![FsOpError::from_io("delete directory", root, e)]),
    };
    // A symlinked or file root is one node; the walk would follow the link.
    if include_root && !meta.is_dir() {
        debug!(path = %root.display(), "root is not a directory; removing it as one node");
        return remove_file(root).err().into_iter().collect();
    }

    let (files, mut errors) = list_files(root);
    errors.merge(run_parallel(&files, |p| remove_file(p)));

    let (dirs, dir_errors) = list_dirs(root, DirOrder::LeafFirst, include_root);
    errors.merge(dir_errors);
    for dir in &dirs {
        match fs::remove_dir(dir) {
            Ok(()) => debug!(path = %dir.display(), "removed directory"),
            Err(e) => errors.push(FsOpError::from_io("remove directory", dir, e)),
        }
    }

    info!(
        root = %root.display(),
        files = files.len(),
        dirs = dirs.len(),
        errors = errors.len(),
        "delete tree finished"
    );
    errors
}

/// Copy the contents of `source` into `destination`, keeping relative layout.
pub fn copy_tree(source: &Path, destination: &Path) -> ErrorLog {
    let (dirs, mut errors) = list_dirs(source, DirOrder::RootFirst, false);
    let (files, file_errors) = list_files(source);
    errors.merge(file_errors);

    let job = |path: PathBuf, kind: EntryKind| CopyJob {
        source: path,
        destination: destination.to_path_buf(),
        anchor: Some(source.to_path_buf()),
        kind,
    };
    let dir_jobs: Vec<CopyJob> = dirs.into_iter().map(|d| job(d, EntryKind::Dir)).collect();
    let file_jobs: Vec<CopyJob> = files.into_iter().map(|f| job(f, EntryKind::File)).collect();

    errors.merge(run_parallel(&dir_jobs, CopyJob::run));
    errors.merge(run_parallel(&file_jobs, CopyJob::run));

    info!(
        source = %source.display(),
        dest = %destination.display(),
        dirs = dir_jobs.len(),
        files = file_jobs.len(),
        errors = errors.len(),
        "copy tree finished"
    );
    errors
}
