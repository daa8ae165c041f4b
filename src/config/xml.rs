//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`); never implicitly.
//!
//! Notes:
//! - A missing file is not an error: defaults apply.
//! - A file that exists but fails to parse is an error; unknown fields are rejected.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use quick_xml::escape::escape;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::path_has_symlink_ancestor;
use crate::config::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "downloads_dir")]
    downloads_dir: Option<String>,
    #[serde(rename = "backup_dir")]
    backup_dir: Option<String>,
    /// Repeated element; when present it replaces the default list.
    #[serde(rename = "temp_dir", default)]
    temp_dirs: Vec<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "show_temp_errors")]
    show_temp_errors: Option<bool>,
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

// Map XmlConfig onto the defaults; absent fields keep their default value.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(p) = parsed.downloads_dir.as_deref().and_then(non_empty_path) {
        cfg.downloads_dir = p;
    }
    if let Some(p) = parsed.backup_dir.as_deref().and_then(non_empty_path) {
        cfg.backup_dir = p;
    }
    let temp_dirs: Vec<PathBuf> = parsed
        .temp_dirs
        .iter()
        .filter_map(|s| non_empty_path(s))
        .collect();
    if !temp_dirs.is_empty() {
        cfg.temp_dirs = temp_dirs;
    }
    cfg.log_file = parsed.log_file.as_deref().and_then(non_empty_path);
    if let Some(level) = parsed.log_level.as_deref().and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    cfg.show_temp_errors = parsed.show_temp_errors.unwrap_or(false);

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded config xml");
    Ok(xml_to_config(parsed))
}

/// Load `path` if it exists, otherwise fall back to `Config::default()`.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) if p.exists() => load_config_from_xml_path(p),
        _ => Ok(Config::default()),
    }
}

/// Render a template reflecting `cfg`, with a comment describing each field.
pub fn template_for(cfg: &Config) -> String {
    let temp_dirs: String = cfg
        .temp_dirs
        .iter()
        .map(|p| format!("  <temp_dir>{}</temp_dir>\n", escape(&p.display().to_string())))
        .collect();
    format!(
        "<!--\n  file_helper configuration (XML)\n\n    downloads_dir     -> directory backed up by menu choice 1\n    backup_dir        -> backup destination (deleted and recreated on each backup)\n    temp_dir          -> repeatable; directories emptied by menu choice 2\n    log_level         -> quiet | normal | info | debug\n    log_file          -> optional log file (console logging continues)\n    show_temp_errors  -> true to list every error from temp clearing\n\n  CLI flags override XML values.\n-->\n<config>\n  <downloads_dir>{}</downloads_dir>\n  <backup_dir>{}</backup_dir>\n{}  <log_level>{}</log_level>\n  <log_file></log_file>\n  <show_temp_errors>{}</show_temp_errors>\n</config>\n",
        escape(&cfg.downloads_dir.display().to_string()),
        escape(&cfg.backup_dir.display().to_string()),
        temp_dirs,
        cfg.log_level,
        cfg.show_temp_errors,
    )
}

/// Write a template config to `path`. Refuses to overwrite or to write through
/// a symlinked ancestor.
pub fn create_template_config(path: &Path, cfg: &Config) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }
    fs::write(path, template_for(cfg))
        .with_context(|| format!("write config '{}'", path.display()))?;
    info!("Created template config at {}", path.display());
    Ok(())
}
