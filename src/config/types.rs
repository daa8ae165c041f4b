//! Runtime settings shared by the tasks and the menu.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use super::paths;

/// Console verbosity as named in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only.
    Quiet,
    #[default]
    Normal,
    /// Adds per-batch summaries.
    Info,
    /// Everything, down to individual nodes.
    Debug,
}

impl LogLevel {
    /// Accepts the canonical names plus a few aliases, ignoring case and padding.
    pub fn parse(s: &str) -> Option<Self> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "none" | "error" => Self::Quiet,
            "normal" => Self::Normal,
            "info" | "detailed" | "verbose" => Self::Info,
            "debug" | "trace" => Self::Debug,
            _ => return None,
        };
        Some(level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Most verbose tracing level shown at this setting.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Info => LevelFilter::DEBUG,
            Self::Debug => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown log level '{s}' (expected quiet, normal, info or debug)"))
    }
}

/// Directories the tasks act on, plus logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backed up by menu choice 1.
    pub downloads_dir: PathBuf,
    /// Wiped and recreated on every backup.
    pub backup_dir: PathBuf,
    /// Emptied by menu choice 2; the directories themselves stay.
    pub temp_dirs: Vec<PathBuf>,
    pub log_level: LogLevel,
    /// Extra log sink next to stderr.
    pub log_file: Option<PathBuf>,
    /// List every temp-clearing failure instead of a count.
    pub show_temp_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            paths::default_downloads_dir(),
            paths::default_backup_dir(),
            paths::default_temp_dirs(),
        )
    }
}

impl Config {
    /// Settings for the given directories; logging and reporting use defaults.
    pub fn new(
        downloads_dir: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        temp_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            downloads_dir: downloads_dir.into(),
            backup_dir: backup_dir.into(),
            temp_dirs,
            log_level: LogLevel::default(),
            log_file: None,
            show_temp_errors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_one_step_more_verbose() {
        assert_eq!(LogLevel::Quiet.level_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::default().level_filter(), LevelFilter::INFO);
        assert_eq!(LogLevel::Debug.level_filter(), LevelFilter::TRACE);
    }
}
