//! Error context for sector file I/O.
//!
//! `io_error_with_help(op, path)` returns a closure for `.map_err(...)` that
//! names the operation and file and, for the few failures a rewrite or rename
//! of a sector file actually runs into, adds a hint on what to check.

use anyhow::anyhow;
use std::io;
use std::path::Path;

const HINT_PERMISSION: &str = "check that the sector folder is writable";
const HINT_MISSING: &str = "the file was moved or deleted during the run";
const HINT_IN_USE: &str = "close any controller client that has the sector file loaded";
const HINT_FULL: &str = "no space left for the rewritten file";
const HINT_READ_ONLY: &str = "the sectors root is on a read-only filesystem";

fn hint(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        return match code {
            libc::EACCES | libc::EPERM => Some(HINT_PERMISSION),
            libc::ENOENT => Some(HINT_MISSING),
            libc::EBUSY | libc::ETXTBSY => Some(HINT_IN_USE),
            libc::ENOSPC => Some(HINT_FULL),
            libc::EROFS => Some(HINT_READ_ONLY),
            _ => None,
        };
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        return match code {
            5 => Some(HINT_PERMISSION),              // ERROR_ACCESS_DENIED
            2 | 3 => Some(HINT_MISSING),             // ERROR_FILE_NOT_FOUND, ERROR_PATH_NOT_FOUND
            32 | 33 => Some(HINT_IN_USE),            // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
            112 => Some(HINT_FULL),                  // ERROR_DISK_FULL
            19 => Some(HINT_READ_ONLY),              // ERROR_WRITE_PROTECT
            _ => None,
        };
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some(HINT_PERMISSION),
        io::ErrorKind::NotFound => Some(HINT_MISSING),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(h) = hint(e) {
        msg.push_str(&format!(" ({h})"));
    }
    msg
}

/// Adapter for anyhow::Result code: converts io::Error -> anyhow::Error with context.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_operation_and_path() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let msg = io_error_with_help("read file", Path::new("Sectors/FSS.sct"))(e).to_string();
        assert!(msg.starts_with("read file 'Sectors/FSS.sct': gone"), "{msg}");
        assert!(msg.contains(HINT_MISSING), "{msg}");
    }

    #[test]
    fn permission_failure_points_at_the_folder() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let msg = io_error_with_help("write file", Path::new("ZSHA.ese"))(e).to_string();
        assert!(msg.contains(HINT_PERMISSION), "{msg}");
    }

    #[test]
    fn unrelated_failure_has_no_hint() {
        let e = io::Error::new(io::ErrorKind::InvalidInput, "bad");
        let msg = io_error_with_help("write file", Path::new("ZSHA.ese"))(e).to_string();
        assert_eq!(msg, "write file 'ZSHA.ese': bad");
    }

    #[cfg(unix)]
    #[test]
    fn read_only_filesystem_is_explained() {
        let e = io::Error::from_raw_os_error(libc::EROFS);
        let msg = io_error_with_help("write file", Path::new("ZJSA.sct"))(e).to_string();
        assert!(msg.contains(HINT_READ_ONLY), "{msg}");
    }
}
