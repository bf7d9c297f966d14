//! Index of INFO source files by stem.
//!
//! Walks the source base recursively in file-name order and skips every
//! directory named like the sectors root, so relocated targets are never
//! indexed as their own sources. Duplicate stems keep the last file found and
//! are recorded as collisions.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Two source files sharing a stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub stem: String,
    pub replaced: PathBuf,
    pub kept: PathBuf,
}

#[derive(Debug, Default, Clone)]
pub struct SourceIndex {
    entries: BTreeMap<String, PathBuf>,
    collisions: Vec<Collision>,
}

impl SourceIndex {
    /// Scan `base` for `*.{extension}` files, pruning directories named `exclude`.
    pub fn build(base: &Path, exclude: Option<&OsStr>, extension: &str) -> Self {
        let mut index = SourceIndex::default();
        let walker = WalkDir::new(base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || exclude.is_none_or(|x| e.file_name() != x));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry during source scan");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(extension))
                .unwrap_or(false);
            if !matches_ext {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                debug!(path = %path.display(), "Skipping source with non UTF-8 name");
                continue;
            };
            info!(path = %path.display(), stem, "Found source file");
            index.insert(stem.to_string(), path.to_path_buf());
        }
        index
    }

    /// Insert, keeping the newest path and recording any displaced one.
    pub fn insert(&mut self, stem: String, path: PathBuf) {
        if let Some(previous) = self.entries.insert(stem.clone(), path.clone()) {
            warn!(
                stem = %stem,
                replaced = %previous.display(),
                kept = %path.display(),
                "Duplicate source stem; the later file wins"
            );
            self.collisions.push(Collision {
                stem,
                replaced: previous,
                kept: path,
            });
        }
    }

    pub fn get(&self, stem: &str) -> Option<&Path> {
        self.entries.get(stem).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}
