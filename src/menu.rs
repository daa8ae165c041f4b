//! Interactive menu loop.
//!
//! Generic over input and output so the whole loop runs against in-memory
//! buffers in tests. End of input behaves like choosing `e`.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::errors::{ErrorLog, FileHelperError};
use crate::fs_ops::{copy_item, delete_item};
use crate::output::{tagged, Tone};
use crate::tasks::{backup_downloads, clear_temp_files};
use crate::utils::sanitize_input_path;

const SEPARATOR: &str = "============================================================";

const MENU: &str = "\nSelect an option or \"e\" to exit
1. Copy Downloads
2. Remove Temp Files
3. Copy Item
4. Delete Item";

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    BackupDownloads,
    ClearTemp,
    CopyItem,
    DeleteItem,
    Exit,
    Invalid(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::BackupDownloads,
            "2" => MenuChoice::ClearTemp,
            "3" => MenuChoice::CopyItem,
            "4" => MenuChoice::DeleteItem,
            "e" | "E" => MenuChoice::Exit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

pub struct Menu<'a, R, W> {
    cfg: &'a Config,
    input: R,
    output: W,
    color: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(cfg: &'a Config, input: R, output: W) -> Self {
        Self {
            cfg,
            input,
            output,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Show the menu and dispatch choices until `e` or end of input.
    pub fn run(mut self) -> Result<()> {
        writeln!(self.output, "\n\nFile Helper\n---- ------")?;
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("\nEnter your choice: ")? else {
                break;
            };
            let choice = MenuChoice::parse(&line);
            debug!(?choice, "menu choice");

            let flow = match choice {
                MenuChoice::Exit => break,
                MenuChoice::BackupDownloads => self.backup()?,
                MenuChoice::ClearTemp => self.clear_temp()?,
                MenuChoice::CopyItem => self.copy()?,
                MenuChoice::DeleteItem => self.delete()?,
                MenuChoice::Invalid(s) => {
                    self.say(Tone::Warn, &format!("Invalid choice: '{s}'"))?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                break;
            }
            writeln!(self.output, "{SEPARATOR}")?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Print `text`, read one line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, tone: Tone, msg: &str) -> Result<()> {
        writeln!(self.output, "{}", tagged(tone, msg, self.color))?;
        Ok(())
    }

    /// Summarize a finished operation; list every failure when `detailed`.
    fn report(&mut self, done: &str, errors: &ErrorLog, detailed: bool) -> Result<()> {
        if errors.is_empty() {
            return self.say(Tone::Success, done);
        }
        for err in errors {
            warn!(kind = err.kind_name(), path = %err.path().display(), "{err}");
        }
        self.say(
            Tone::Warn,
            &format!("{done} ({} item(s) could not be processed)", errors.len()),
        )?;
        if detailed {
            for line in errors.messages() {
                self.say(Tone::Error, &line)?;
            }
        }
        Ok(())
    }

    /// Report an action that was refused or failed before touching anything.
    fn refused(&mut self, what: &str, err: anyhow::Error) -> Result<()> {
        match err.downcast_ref::<FileHelperError>() {
            Some(FileHelperError::PathMissing(p)) => {
                self.say(Tone::Error, &format!("The {what} path does not exist: {}", p.display()))
            }
            _ => {
                error!(error = %format!("{err:#}"), "{what} operation failed");
                self.say(Tone::Error, &format!("{err:#}"))
            }
        }
    }

    fn backup(&mut self) -> Result<ControlFlow<()>> {
        self.say(Tone::Info, "Copying Downloads...")?;
        match backup_downloads(self.cfg) {
            Ok(errors) => self.report("Downloads copied", &errors, true)?,
            Err(e) => self.refused("downloads", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn clear_temp(&mut self) -> Result<ControlFlow<()>> {
        self.say(Tone::Info, "Removing temporary files...")?;
        let errors = clear_temp_files(self.cfg);
        self.report("Temporary files removed", &errors, self.cfg.show_temp_errors)?;
        Ok(ControlFlow::Continue(()))
    }

    fn copy(&mut self) -> Result<ControlFlow<()>> {
        let Some(source) = self.prompt("Enter the source path: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(destination) = self.prompt("Enter the destination path: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let source = sanitize_input_path(&source);
        let destination = sanitize_input_path(&destination);

        self.say(Tone::Info, "Copying...")?;
        match copy_item(&source, &destination) {
            Ok(errors) => self.report("Copy finished", &errors, true)?,
            Err(e) => self.refused("source", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn delete(&mut self) -> Result<ControlFlow<()>> {
        let Some(path) = self.prompt("Enter item path: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let path = sanitize_input_path(&path);

        self.say(Tone::Info, "Removing...")?;
        match delete_item(&path) {
            Ok(errors) => self.report("Removal finished", &errors, true)?,
            Err(e) => self.refused("item", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Run the menu without colors.
pub fn run_menu<R: BufRead, W: Write>(cfg: &Config, input: R, output: W) -> Result<()> {
    Menu::new(cfg, input, output).run()
}
