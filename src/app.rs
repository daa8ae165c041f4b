//! Application orchestrator.
//! Loads/merges config, handles the one-shot flags, initializes logging, then
//! hands stdin/stdout to the interactive menu.

use anyhow::Result;
use std::io;
use tracing::{debug, info};

use file_helper::cli::Args;
use file_helper::config::{create_template_config, load_or_default, resolve_config_path, Config};
use file_helper::output as out;
use file_helper::Menu;

use crate::logging::init_tracing;

fn describe(cfg: &Config) -> String {
    let temp_dirs: Vec<String> = cfg
        .temp_dirs
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    format!(
        "downloads_dir = {}\nbackup_dir    = {}\ntemp_dirs     = [{}]\nlog_level     = {}\nlog_file      = {}",
        cfg.downloads_dir.display(),
        cfg.backup_dir.display(),
        temp_dirs.join(", "),
        cfg.log_level,
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into()),
    )
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref());

    // Build config (may read XML). CLI args override config values.
    let mut cfg = load_or_default(cfg_path.as_deref())?;
    args.apply_overrides(&mut cfg);

    if args.print_config {
        match &cfg_path {
            Some(p) if p.exists() => out::print_info(&format!("Using config file:\n  {}\n", p.display())),
            Some(p) => out::print_info(&format!(
                "No config file at:\n  {}\nDefaults are in effect; run with --init-config to create one.\n",
                p.display()
            )),
            None => out::print_warn("Could not determine a config file location."),
        }
        out::print_info(&format!("Effective settings:\n{}", describe(&cfg)));
        return Ok(());
    }

    if args.init_config {
        let Some(path) = cfg_path else {
            anyhow::bail!("Could not determine a config file location; pass --config <PATH>");
        };
        create_template_config(&path, &cfg)?;
        out::print_success(&format!("A template config was written to: {}", path.display()));
        return Ok(());
    }

    // Hold the guard for the whole session so file logs are flushed on exit.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting file_helper: {:?}", args);
    info!(
        downloads = %cfg.downloads_dir.display(),
        backup = %cfg.backup_dir.display(),
        temp_dirs = cfg.temp_dirs.len(),
        "configuration loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&cfg, stdin.lock(), stdout.lock())
        .with_color(out::stdout_is_tty())
        .run()
}
