use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::FileHelperError;

/// Canonicalize the longest existing ancestor of `path` and re-append the rest,
/// so existing and not-yet-created paths compare on the same footing.
pub(crate) fn resolve_lenient(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = abs.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = fs::canonicalize(existing) {
            return missing.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return abs,
        }
    }
}

/// Refuse a destination that is `source_dir` itself or lies inside it.
pub(crate) fn ensure_not_within(source_dir: &Path, dest: &Path) -> Result<(), FileHelperError> {
    let src_real = resolve_lenient(source_dir);
    let dest_real = resolve_lenient(dest);
    if dest_real.starts_with(&src_real) {
        Err(FileHelperError::DestinationInsideSource {
            source_dir: source_dir.to_path_buf(),
            dest: dest.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

/// Refuse copying the contents of `source_dir` into `dest` when any of them
/// would be written back inside `source_dir`.
///
/// Besides `dest` inside `source_dir`, this covers `source_dir` sitting at
/// `dest/<rel>` while `source_dir/<rel>` exists: every entry under that nested
/// path would land on top of the source's own files.
pub(crate) fn ensure_copy_outside_source(source_dir: &Path, dest: &Path) -> Result<(), FileHelperError> {
    ensure_not_within(source_dir, dest)?;
    let src_real = resolve_lenient(source_dir);
    let dest_real = resolve_lenient(dest);
    if let Ok(rel) = src_real.strip_prefix(&dest_real) {
        if fs::symlink_metadata(src_real.join(rel)).is_ok() {
            return Err(FileHelperError::CopyOverlapsSource {
                source_dir: source_dir.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Clean up a path typed at a prompt.
///
/// Trims whitespace and surrounding quotes (pasted from a file manager or shell),
/// then drops one trailing separator unless the path is a bare root.
pub fn sanitize_input_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let mut inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
    };

    if (inner.ends_with('/') || inner.ends_with('\\')) && !is_bare_root(&inner) {
        inner.pop();
    }
    PathBuf::from(inner)
}

/// "/" or a drive root like "C:\" / "C:/".
fn is_bare_root(s: &str) -> bool {
    let bytes = s.as_bytes();
    s.len() == 1 || (bytes.len() == 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}
