//! Rename and relocation of root-level sector files.
//!
//! Step A renames stems listed in the layout's rename table (same directory,
//! same extension). Step B moves a file whose stem names a target directory
//! into `<root>/<stem>/`. Anything else stays where it is and is reported as
//! an orphan.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::SectorLayout;
use crate::errors::SectorError;
use crate::fs_ops::{io_error_with_help, move_file_into, rename_in_place, renamed_file_name};

/// A rename performed (or planned, in dry-run) by step A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of step B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Moved(PathBuf),
    Orphaned(PathBuf),
}

fn stem_of(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SectorError::InvalidName(path.to_path_buf()).into())
}

/// Files directly inside `root` with a recognized extension, sorted by name.
pub fn root_candidates(root: &Path, layout: &SectorLayout) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root).map_err(io_error_with_help("list sectors root", root))? {
        let entry = entry.map_err(io_error_with_help("list sectors root", root))?;
        let path = entry.path();
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| layout.is_recognized_extension(e))
            .unwrap_or(false);
        if recognized {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Create every target directory under `root` (`mkdir -p` semantics).
pub fn prepare_layout(root: &Path, layout: &SectorLayout, dry_run: bool) -> Result<()> {
    for name in &layout.target_dirs {
        let dir = root.join(name);
        if dir.is_dir() {
            continue;
        }
        if dry_run {
            info!(action = "mkdir -p", path = %dir.display(), "dry-run");
        } else {
            fs::create_dir_all(&dir).map_err(io_error_with_help("create target directory", &dir))?;
            debug!(path = %dir.display(), "Created target directory");
        }
    }
    Ok(())
}

/// Step A: rename `path` when its stem is in the rename table.
pub fn apply_rename(path: &Path, layout: &SectorLayout, dry_run: bool) -> Result<Option<Renamed>> {
    let stem = stem_of(path)?;
    let new_stem = layout.renamed_stem(stem);
    if new_stem == stem {
        return Ok(None);
    }

    let to = if dry_run {
        let to = path.with_file_name(renamed_file_name(path, new_stem));
        info!(from = %path.display(), to = %to.display(), "dry-run: would rename file");
        to
    } else {
        let to = rename_in_place(path, new_stem)?;
        info!(from = %path.display(), to = %to.display(), "Renamed file");
        to
    };
    Ok(Some(Renamed {
        from: path.to_path_buf(),
        to,
    }))
}

/// Step B: move `path` into `<root>/<stem>/` when its stem is a target directory.
pub fn place_file(path: &Path, root: &Path, layout: &SectorLayout, dry_run: bool) -> Result<Placement> {
    let stem = stem_of(path)?;
    if !layout.is_target_dir(stem) {
        warn!(path = %path.display(), "No matching target directory; leaving file in place");
        return Ok(Placement::Orphaned(path.to_path_buf()));
    }

    let dest_dir = root.join(stem);
    if dry_run {
        let file_name = path
            .file_name()
            .ok_or_else(|| SectorError::InvalidName(path.to_path_buf()))?;
        let dest = dest_dir.join(file_name);
        info!(src = %path.display(), dest = %dest.display(), "dry-run: would move file");
        return Ok(Placement::Moved(dest));
    }

    let dest = move_file_into(path, &dest_dir)?;
    info!(src = %path.display(), dest = %dest.display(), "Moved file");
    Ok(Placement::Moved(dest))
}
