//! Core library for `file_helper`.
//!
//! Recursive enumeration and parallel bulk copy/delete of directory trees,
//! with per-item error collection, plus the canned tasks and the interactive
//! menu built on top of them.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod menu;
pub mod output;
pub mod tasks;
mod utils;

pub use config::{Config, LogLevel};
pub use errors::{ErrorLog, FileHelperError, FsOpError};
pub use fs_ops::{
    copy_item, copy_tree, delete_item, delete_tree, list_dirs, list_files, run_parallel, DirOrder,
};
pub use menu::{run_menu, Menu, MenuChoice};
pub use tasks::{backup_downloads, clear_temp_files};
pub use utils::sanitize_input_path;
