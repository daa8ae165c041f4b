//! Default path helpers and symlink checks.
//! Determines OS-appropriate default directories and the config file location.

use dirs::{config_dir, document_dir, download_dir, home_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{BACKUP_DIR_NAME, CONFIG_ENV};

fn home_or_cwd() -> PathBuf {
    home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// The user's downloads folder.
pub fn default_downloads_dir() -> PathBuf {
    download_dir().unwrap_or_else(|| home_or_cwd().join("Downloads"))
}

/// `<documents>/Downloads_Copy`.
pub fn default_backup_dir() -> PathBuf {
    document_dir()
        .unwrap_or_else(|| home_or_cwd().join("Documents"))
        .join(BACKUP_DIR_NAME)
}

/// The per-user temp directory, plus the system one on Windows.
pub fn default_temp_dirs() -> Vec<PathBuf> {
    #[allow(unused_mut)]
    let mut dirs = vec![env::temp_dir()];
    #[cfg(windows)]
    {
        if let Some(root) = env::var_os("SystemRoot") {
            let system_temp = PathBuf::from(root).join("Temp");
            if !dirs.contains(&system_temp) {
                dirs.push(system_temp);
            }
        }
    }
    dirs
}

/// OS-appropriate default config path: `<config_dir>/file_helper/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("file_helper");
        base.push("config.xml");
        Some(base)
    } else {
        home_dir().map(|h| h.join(".config").join("file_helper").join("config.xml"))
    }
}

/// Config file to read: explicit flag, then `FILE_HELPER_CONFIG`, then the default path.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(p) = env::var_os(CONFIG_ENV) {
        if !p.is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    default_config_path()
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
