//! Renames and moves of sector files inside the sectors root.
//! Both ends always live in the same tree, so every move is a single rename
//! that replaces whatever file sits at the destination.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::SectorError;

use super::helpers::io_error_with_help;

/// Rename `src` over `dst`, replacing an existing file.
/// On Unix the parent directory is synced afterwards so the new entry survives a crash.
pub fn replace_file(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        debug!(dest = %dst.display(), "Destination exists and will be replaced");
    }
    fs::rename(src, dst).map_err(io_error_with_help("rename sector file", src))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // The rename already happened; a failed sync is not worth failing the file for.
        if let Err(e) = fs::File::open(parent).and_then(|d| d.sync_all()) {
            debug!(dir = %parent.display(), error = %e, "Directory sync failed");
        }
    }
    Ok(())
}

/// Rename `src` to `<new_stem>.<ext>` in the same directory, keeping the extension.
pub fn rename_in_place(src: &Path, new_stem: &str) -> Result<PathBuf> {
    let dest = src.with_file_name(renamed_file_name(src, new_stem));
    replace_file(src, &dest)?;
    Ok(dest)
}

/// `<new_stem>.<ext>` for `src`, or just `new_stem` when it has no extension.
pub fn renamed_file_name(src: &Path, new_stem: &str) -> std::ffi::OsString {
    let mut name = std::ffi::OsString::from(new_stem);
    if let Some(ext) = src.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Move a single file into `dest_dir` (created if missing), keeping its file name.
pub fn move_file_into(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    let file_name = src
        .file_name()
        .ok_or_else(|| SectorError::InvalidName(src.to_path_buf()))?;
    let dest = dest_dir.join(file_name);
    replace_file(src, &dest)?;
    Ok(dest)
}
