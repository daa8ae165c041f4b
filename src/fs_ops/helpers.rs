//! I/O helper utilities.
//!
//! Turns io::Error values into messages with op/path context and a platform hint.
//! Used for `FsOpError::Unclassified` messages and, through the anyhow adapter,
//! for setup steps that abort a whole task (creating the backup root).
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Platform hint for a raw OS error code.
#[cfg(unix)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::ENOENT => "path not found; it may have been removed meanwhile",
        libc::ENOTEMPTY => "directory still has entries",
        libc::ENOTDIR => "a path component is not a directory",
        libc::EISDIR => "is a directory; expected a file",
        libc::EBUSY => "resource busy; another process is using it",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem",
        libc::ELOOP => "too many symbolic link levels; possible symlink cycle",
        libc::ENAMETOOLONG => "filename or path too long",
        libc::EMFILE => "process file descriptor limit reached",
        libc::ENFILE => "system-wide file table overflow",
        _ => return None,
    };
    Some(hint)
}

/// Platform hint for a raw Win32 error code.
#[cfg(windows)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions",                 // ERROR_ACCESS_DENIED
        2 | 3 => "path not found; it may have been removed meanwhile", // FILE/PATH NOT FOUND
        32 => "sharing violation; file is in use",               // ERROR_SHARING_VIOLATION
        145 => "directory still has entries",                    // ERROR_DIR_NOT_EMPTY
        112 => "insufficient disk space",                        // ERROR_DISK_FULL
        19 => "write protected media",                           // ERROR_WRITE_PROTECT
        206 => "filename or path too long",                      // ERROR_FILENAME_EXCED_RANGE
        4 => "too many open files",                              // ERROR_TOO_MANY_OPEN_FILES
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn os_code_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been removed meanwhile"),
        io::ErrorKind::DirectoryNotEmpty => Some("directory still has entries"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Some("busy; another process is using it"),
        _ => None,
    }
}

/// Format "<op> '<path>': <error>" plus a hint and the raw OS code when known.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    let hint = match e.raw_os_error() {
        Some(code) => os_code_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(hint) = hint {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}
