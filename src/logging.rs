//! Tracing setup for the binary.
//!
//! One fmt layer per sink (stderr always, a log file when configured), each
//! either compact text or JSON. Verbosity comes from `LogLevel` only; RUST_LOG
//! is not consulted. stdout is left to the menu.

use anyhow::Result;
use chrono::Local;
use file_helper::config::path_has_symlink_ancestor;
use file_helper::output as out;
use file_helper::LogLevel;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self as tsfmt, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Local wall-clock time, second precision.
struct LocalClock;

impl FormatTime for LocalClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

fn sink_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tsfmt::layer()
        .with_timer(LocalClock)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(ansi)
        .with_writer(writer);
    if json {
        layer.json().boxed()
    } else {
        layer.compact().boxed()
    }
}

/// Open the log file for appending. `Err` carries a one-line reason.
fn open_log_file(path: &Path) -> Result<File, String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err(format!("an ancestor of {} is a symlink", path.display())),
        Err(e) => return Err(format!("cannot inspect {}: {e}", path.display())),
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file sink on drop; keep it alive for the
/// whole session. A log file that cannot be opened only disables that sink.
pub fn init_tracing(
    level: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = vec![sink_layer(std::io::stderr, json, !json)];
    let mut guard = None;

    if let Some(path) = log_file {
        match open_log_file(path) {
            Ok(file) => {
                let (writer, g) = tracing_appender::non_blocking(file);
                layers.push(sink_layer(writer, json, false));
                guard = Some(g);
            }
            Err(reason) => out::print_warn(&format!(
                "File logging disabled ({reason}); logs continue on stderr."
            )),
        }
    }

    let filter = EnvFilter::default().add_directive(level.level_filter().into());
    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;
    Ok(guard)
}
