//! Filesystem operations: enumeration, parallel batches, tree copy/delete.

mod batch;
mod entry;
mod helpers;
mod metadata;
mod tree;
mod walk;

pub use batch::run_parallel;
pub use entry::{copy_item, delete_item};
pub use helpers::{describe_io_error, io_error_with_help};
pub use metadata::preserve_timestamps;
pub use tree::{copy_tree, delete_tree, rebase, CopyJob, EntryKind};
pub use walk::{list_dirs, list_files, DirOrder};
