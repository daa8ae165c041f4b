//! Config validation logic.
//! The backup task deletes `backup_dir` wholesale, so it must never overlap `downloads_dir`.

use tracing::{debug, error};

use crate::errors::FileHelperError;
use crate::utils::resolve_lenient;

use super::types::Config;

impl Config {
    /// Ensure downloads and backup directories are disjoint (neither contains the other).
    pub fn validate(&self) -> Result<(), FileHelperError> {
        let downloads = resolve_lenient(&self.downloads_dir);
        let backup = resolve_lenient(&self.backup_dir);

        if downloads.starts_with(&backup) || backup.starts_with(&downloads) {
            error!(
                downloads = %downloads.display(),
                backup = %backup.display(),
                "downloads_dir and backup_dir overlap"
            );
            return Err(FileHelperError::OverlappingDirs {
                downloads: self.downloads_dir.clone(),
                backup: self.backup_dir.clone(),
            });
        }

        debug!(
            downloads = %downloads.display(),
            backup = %backup.display(),
            temp_dirs = self.temp_dirs.len(),
            "config validated"
        );
        Ok(())
    }
}
