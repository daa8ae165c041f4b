//! Typed error definitions for file_helper.
//!
//! Two layers:
//! - `FsOpError`: one failed filesystem node inside a batch. Never aborts anything;
//!   collected into an `ErrorLog`.
//! - `FileHelperError`: top-level conditions reported to the caller instead of
//!   attempting an operation at all.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::describe_io_error;

#[derive(Debug, Error)]
pub enum FileHelperError {
    #[error("Path does not exist: {0}")]
    PathMissing(PathBuf),

    #[error("Path is neither a regular file nor a directory: {0}")]
    UnsupportedType(PathBuf),

    #[error("Destination {dest} is inside source directory {source_dir}")]
    DestinationInsideSource { source_dir: PathBuf, dest: PathBuf },

    #[error("Copying {source_dir} into {dest} would write back over files inside the source")]
    CopyOverlapsSource { source_dir: PathBuf, dest: PathBuf },

    #[error("downloads_dir '{downloads}' and backup_dir '{backup}' must not overlap")]
    OverlappingDirs { downloads: PathBuf, backup: PathBuf },
}

/// Failure of a single node during enumeration, deletion or copying.
#[derive(Debug, Error)]
pub enum FsOpError {
    #[error("{op}: permission is denied for {path}")]
    AccessDenied { op: &'static str, path: PathBuf },

    #[error("{op}: failed to find path {path}")]
    NotFound { op: &'static str, path: PathBuf },

    #[error("The directory should be empty for deletion: {path}")]
    NotEmpty { path: PathBuf },

    #[error("{op}: source and destination are the same file: {path}")]
    SameFile { op: &'static str, path: PathBuf },

    #[error("{kind:?}: {message}")]
    Unclassified {
        op: &'static str,
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },
}

impl FsOpError {
    /// Classify an io::Error raised while performing `op` on `path`.
    pub fn from_io(op: &'static str, path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsOpError::AccessDenied { op, path },
            io::ErrorKind::NotFound => FsOpError::NotFound { op, path },
            io::ErrorKind::DirectoryNotEmpty => FsOpError::NotEmpty { path },
            _ if is_not_empty_code(&err) => FsOpError::NotEmpty { path },
            kind => {
                let message = describe_io_error(op, &path, &err);
                FsOpError::Unclassified {
                    op,
                    path,
                    kind,
                    message,
                }
            }
        }
    }

    /// Convert a walkdir failure (unreadable directory, vanished entry, loop).
    pub fn from_walk(err: walkdir::Error, fallback: &Path) -> Self {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf());
        let text = err.to_string();
        match err.into_io_error() {
            Some(io_err) => FsOpError::from_io("list directory", &path, io_err),
            None => FsOpError::Unclassified {
                op: "list directory",
                path,
                kind: io::ErrorKind::Other,
                message: text,
            },
        }
    }

    /// Path of the node that failed.
    pub fn path(&self) -> &Path {
        match self {
            FsOpError::AccessDenied { path, .. }
            | FsOpError::NotFound { path, .. }
            | FsOpError::NotEmpty { path }
            | FsOpError::SameFile { path, .. }
            | FsOpError::Unclassified { path, .. } => path,
        }
    }

    /// Short machine-friendly name, used as a structured log field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FsOpError::AccessDenied { .. } => "access_denied",
            FsOpError::NotFound { .. } => "not_found",
            FsOpError::NotEmpty { .. } => "not_empty",
            FsOpError::SameFile { .. } => "same_file",
            FsOpError::Unclassified { .. } => "unclassified",
        }
    }
}

#[cfg(unix)]
fn is_not_empty_code(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ENOTEMPTY)
}

#[cfg(windows)]
fn is_not_empty_code(err: &io::Error) -> bool {
    // ERROR_DIR_NOT_EMPTY
    err.raw_os_error() == Some(145)
}

#[cfg(not(any(unix, windows)))]
fn is_not_empty_code(_err: &io::Error) -> bool {
    false
}

/// Accumulated per-node failures of one operation.
///
/// Entries are kept in the order they were added; batches run in parallel so
/// that order carries no meaning across items of one batch.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Vec<FsOpError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: FsOpError) {
        self.entries.push(err);
    }

    /// Move every entry of `other` into this log.
    pub fn merge(&mut self, other: ErrorLog) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FsOpError> {
        self.entries.iter()
    }

    /// Human-readable lines, one per failed node.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn into_entries(self) -> Vec<FsOpError> {
        self.entries
    }
}

impl From<Vec<FsOpError>> for ErrorLog {
    fn from(entries: Vec<FsOpError>) -> Self {
        Self { entries }
    }
}

impl FromIterator<FsOpError> for ErrorLog {
    fn from_iter<I: IntoIterator<Item = FsOpError>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<FsOpError> for ErrorLog {
    fn extend<I: IntoIterator<Item = FsOpError>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for ErrorLog {
    type Item = FsOpError;
    type IntoIter = std::vec::IntoIter<FsOpError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a FsOpError;
    type IntoIter = std::slice::Iter<'a, FsOpError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
