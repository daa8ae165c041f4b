use owo_colors::OwoColorize;

/// Kind of user-facing message; selects the prefix and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

/// Stream a one-shot message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    Stderr,
}

impl Tone {
    /// Warnings and errors go to stderr, the rest to stdout.
    pub fn sink(self) -> Sink {
        match self {
            Tone::Info | Tone::Success => Sink::Stdout,
            Tone::Warn | Tone::Error => Sink::Stderr,
        }
    }
}

/// Colors are enabled only when the stream written to is a TTY.
pub fn is_tty(sink: Sink) -> bool {
    match sink {
        Sink::Stdout => atty::is(atty::Stream::Stdout),
        Sink::Stderr => atty::is(atty::Stream::Stderr),
    }
}

pub fn stdout_is_tty() -> bool {
    is_tty(Sink::Stdout)
}

/// Prefix `msg` with "info:", "warn:", "error:" or "ok:", colored when asked.
pub fn tagged(tone: Tone, msg: &str, color: bool) -> String {
    let tag = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Success => "ok:",
    };
    if !color {
        return format!("{tag} {msg}");
    }
    match tone {
        Tone::Info => format!("{} {}", tag.cyan().bold(), msg),
        Tone::Warn => format!("{} {}", tag.yellow().bold(), msg),
        Tone::Error => format!("{} {}", tag.red().bold(), msg),
        Tone::Success => format!("{} {}", tag.green().bold(), msg),
    }
}

fn emit(tone: Tone, msg: &str) {
    let sink = tone.sink();
    let line = tagged(tone, msg, is_tty(sink));
    match sink {
        Sink::Stdout => println!("{line}"),
        Sink::Stderr => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Success, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_prefixes_without_color() {
        assert_eq!(tagged(Tone::Info, "x", false), "info: x");
        assert_eq!(tagged(Tone::Warn, "x", false), "warn: x");
        assert_eq!(tagged(Tone::Error, "x", false), "error: x");
        assert_eq!(tagged(Tone::Success, "x", false), "ok: x");
    }

    #[test]
    fn colored_output_keeps_message() {
        let s = tagged(Tone::Error, "boom", true);
        assert!(s.contains("boom"));
        assert!(s.contains('\u{1b}'));
    }

    #[test]
    fn warnings_and_errors_follow_stderr() {
        assert_eq!(Tone::Warn.sink(), Sink::Stderr);
        assert_eq!(Tone::Error.sink(), Sink::Stderr);
        assert_eq!(Tone::Info.sink(), Sink::Stdout);
        assert_eq!(Tone::Success.sink(), Sink::Stdout);
    }
}
