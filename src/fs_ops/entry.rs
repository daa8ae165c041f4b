use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{ErrorLog, FileHelperError, FsOpError};
use crate::utils::ensure_copy_outside_source;

use super::tree::{copy_tree, delete_tree, remove_file, CopyJob, EntryKind};

/// Kind of a top-level path, taken from a single `symlink_metadata` call.
enum Node {
    File,
    Dir,
}

/// Stat once and branch. A missing path is reported as `PathMissing`;
/// symlinks are handled as files so they are never followed.
fn classify(path: &Path) -> Result<Node> {
    let meta = fs::symlink_metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::Error::new(FileHelperError::PathMissing(path.to_path_buf()))
        } else {
            anyhow::Error::new(e).context(format!("stat {}", path.display()))
        }
    })?;
    let ftype = meta.file_type();
    debug!(path = %path.display(), is_file = ftype.is_file(), is_dir = ftype.is_dir(), "dispatch");
    if ftype.is_dir() {
        Ok(Node::Dir)
    } else if ftype.is_file() || ftype.is_symlink() {
        Ok(Node::File)
    } else {
        Err(FileHelperError::UnsupportedType(path.to_path_buf()).into())
    }
}

/// Delete a single file or a whole directory tree (root included).
pub fn delete_item(path: &Path) -> Result<ErrorLog> {
    match classify(path)? {
        Node::Dir => {
            info!(path = %path.display(), "Removing directory");
            Ok(delete_tree(path, true))
        }
        Node::File => {
            info!(path = %path.display(), "Removing file");
            Ok(remove_file(path).err().into_iter().collect())
        }
    }
}

/// Copy a file into `destination`, or the contents of a directory into it.
///
/// `destination` is created when missing. A directory copy whose targets would
/// fall inside the source is refused before anything is written; a file copied
/// onto itself is logged as `SameFile` and left as it was.
pub fn copy_item(source: &Path, destination: &Path) -> Result<ErrorLog> {
    match classify(source)? {
        Node::Dir => {
            ensure_copy_outside_source(source, destination)?;
            create_destination(destination)?;
            info!(source = %source.display(), dest = %destination.display(), "Copying directory");
            Ok(copy_tree(source, destination))
        }
        Node::File => {
            create_destination(destination)?;
            info!(source = %source.display(), dest = %destination.display(), "Copying file");
            let job = CopyJob {
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
                anchor: None,
                kind: EntryKind::File,
            };
            Ok(job.run().err().into_iter().collect())
        }
    }
}

fn create_destination(destination: &Path) -> Result<()> {
    fs::create_dir_all(destination)
        .map_err(|e| FsOpError::from_io("create directory", destination, e))?;
    Ok(())
}
