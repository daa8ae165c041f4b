//! Metadata carried over when copying a file.
//! - `fs::copy` already transfers permission bits (mode on Unix, readonly on Windows).
//! - Access/modification times are copied here with filetime.
//! - Best-effort: failing to set times is logged, never reported as a copy failure.

use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Copy atime/mtime from already-fetched `src_meta` onto `dest`.
pub fn preserve_timestamps(dest: &Path, src_meta: &fs::Metadata) {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    match set_file_times(dest, atime, mtime) {
        Ok(()) => trace!(path = %dest.display(), "set atime/mtime on destination"),
        Err(e) => warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::set_file_mtime;
    use tempfile::tempdir;

    #[test]
    fn mtime_is_copied() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.txt");
        let dest = td.path().join("dest.txt");
        fs::write(&src, b"a").unwrap();
        fs::write(&dest, b"a").unwrap();
        let old = FileTime::from_unix_time(1_000_000_000, 0);
        set_file_mtime(&src, old).unwrap();

        let meta = fs::metadata(&src).unwrap();
        preserve_timestamps(&dest, &meta);

        let got = FileTime::from_last_modification_time(&fs::metadata(&dest).unwrap());
        assert_eq!(got, old);
    }
}
