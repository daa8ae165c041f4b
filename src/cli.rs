//! Command-line flags.
//!
//! Every flag is optional and only overrides what the config file says.
//! `--temp-dir` may be given several times; any occurrence replaces the
//! configured list instead of extending it.

use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Interactive helper for copying, backing up and clearing directory trees.
#[derive(Parser, Debug, Clone)]
#[command(name = "file_helper", author, version, about = "Copy, back up and clear directory trees in parallel")]
pub struct Args {
    /// Config file to read (beats FILE_HELPER_CONFIG and the default location)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory backed up by menu choice 1
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub downloads_dir: Option<PathBuf>,

    /// Backup destination for menu choice 1
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub backup_dir: Option<PathBuf>,

    /// Directory emptied by menu choice 2 (repeatable)
    #[arg(long = "temp-dir", value_name = "DIR", value_hint = ValueHint::DirPath, action = ArgAction::Append)]
    pub temp_dirs: Vec<PathBuf>,

    /// Same as --log-level debug
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// quiet, normal, info or debug
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Structured JSON log lines
    #[arg(long)]
    pub json: bool,

    /// List every temp-clearing failure instead of a count
    #[arg(long)]
    pub show_temp_errors: bool,

    /// Show the config file in use and the effective settings, then exit
    #[arg(long, conflicts_with = "init_config")]
    pub print_config: bool,

    /// Write a template config (never overwrites), then exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// `--debug` wins over `--log-level`; `None` keeps the configured level.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }

    /// Overwrite the fields of `cfg` that were given on the command line.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.downloads_dir {
            cfg.downloads_dir = dir.clone();
        }
        if let Some(dir) = &self.backup_dir {
            cfg.backup_dir = dir.clone();
        }
        if !self.temp_dirs.is_empty() {
            cfg.temp_dirs = self.temp_dirs.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.log_file.is_some() {
            cfg.log_file = self.log_file.clone();
        }
        cfg.show_temp_errors |= self.show_temp_errors;
    }
}

pub fn parse() -> Args {
    Args::parse()
}
