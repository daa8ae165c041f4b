//! Canned maintenance tasks driven by `Config`.

use anyhow::Result;
use std::fs;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{ErrorLog, FileHelperError};
use crate::fs_ops::{copy_tree, delete_tree, io_error_with_help};

/// Replace `backup_dir` with a fresh copy of `downloads_dir`.
///
/// Fails up front (nothing touched) when the directories overlap or the
/// downloads directory is missing. Per-item failures from wiping the old backup
/// and from copying end up in the returned log.
pub fn backup_downloads(cfg: &Config) -> Result<ErrorLog> {
    cfg.validate()?;
    let source = &cfg.downloads_dir;
    let backup = &cfg.backup_dir;
    if !source.is_dir() {
        return Err(FileHelperError::PathMissing(source.clone()).into());
    }

    let mut errors = ErrorLog::new();
    if fs::symlink_metadata(backup).is_ok() {
        info!(path = %backup.display(), "Removing previous backup");
        errors.merge(delete_tree(backup, true));
    }

    fs::create_dir_all(backup).map_err(io_error_with_help("create backup directory", backup))?;
    info!(source = %source.display(), dest = %backup.display(), "Copying downloads");
    errors.merge(copy_tree(source, backup));

    if !errors.is_empty() {
        warn!(errors = errors.len(), "backup finished with errors");
    }
    Ok(errors)
}

/// Empty every configured temp directory, keeping the directories themselves.
pub fn clear_temp_files(cfg: &Config) -> ErrorLog {
    let mut errors = ErrorLog::new();
    for dir in &cfg.temp_dirs {
        if !dir.is_dir() {
            debug!(path = %dir.display(), "temp directory missing; skipped");
            continue;
        }
        info!(path = %dir.display(), "Clearing temp directory");
        errors.merge(delete_tree(dir, false));
    }
    // Temp directories routinely hold files locked by running programs.
    debug!(errors = errors.len(), "temp clearing finished");
    errors
}
