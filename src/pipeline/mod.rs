//! The batch pipeline: guard, organize the sectors root, index sources, splice
//! INFO blocks. Problems with single files are logged and counted; only the
//! directory guard stops a run.

pub mod index;
pub mod relocate;
pub mod splice;
pub mod transform;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::Config;

pub use index::{Collision, SourceIndex};
pub use relocate::{Placement, Renamed, apply_rename, place_file, prepare_layout, root_candidates};
pub use splice::{SkipReason, SkipRecord, SpliceReport, splice_file, update_info_blocks};
pub use transform::{TransformReport, transform_file, transform_text};

/// A file whose processing stopped with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Totals reported at the end of a run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub files_seen: usize,
    pub processed: usize,
    /// Files whose contents changed (noise removed or keywords replaced).
    pub rewritten: usize,
    pub noise_cleaned: usize,
    pub keyword_replacements: usize,
    pub renamed: usize,
    pub moved: usize,
    pub orphans: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    pub sources_indexed: usize,
    pub source_collisions: usize,
    pub info_updated: usize,
    pub info_skipped: Vec<SkipRecord>,
}

/// Transform, rename and move one root-level file, updating `summary`.
fn organize_file(cfg: &Config, path: &Path, summary: &mut RunSummary) -> Result<()> {
    let layout = &cfg.layout;
    let report = transform_file(path, layout, cfg.dry_run)?;
    summary.processed += 1;
    if report.changed {
        summary.rewritten += 1;
    }
    if report.noise_removed > 0 {
        summary.noise_cleaned += 1;
    }
    summary.keyword_replacements += report.keyword_changes.len();

    let current = match apply_rename(path, layout, cfg.dry_run)? {
        Some(r) => {
            summary.renamed += 1;
            r.to
        }
        None => path.to_path_buf(),
    };

    match place_file(&current, &cfg.sectors_root, layout, cfg.dry_run)? {
        Placement::Moved(_) => summary.moved += 1,
        Placement::Orphaned(p) => summary.orphans.push(p),
    }
    Ok(())
}

/// Transformer + Relocator over every root-level candidate file.
pub fn organize_root(cfg: &Config, summary: &mut RunSummary) -> Result<()> {
    for path in root_candidates(&cfg.sectors_root, &cfg.layout)? {
        summary.files_seen += 1;
        info!(path = %path.display(), "Processing file");
        if let Err(e) = organize_file(cfg, &path, summary) {
            let msg = format!("{e:#}");
            error!(path = %path.display(), error = %msg, "Failed to process file");
            summary.failures.push(FileFailure { path, error: msg });
        }
    }
    Ok(())
}

/// Run the whole pipeline once.
pub fn run(cfg: &Config) -> Result<RunSummary> {
    cfg.validate()?;

    let mut summary = RunSummary::default();
    // Moves create their own directory, so a failure here is not fatal.
    if let Err(e) = prepare_layout(&cfg.sectors_root, &cfg.layout, cfg.dry_run) {
        error!(error = %format!("{e:#}"), "Failed to create target directories");
    }
    organize_root(cfg, &mut summary)?;

    info!("Updating INFO blocks of .{} files", cfg.layout.source_extension);
    let index = SourceIndex::build(
        &cfg.source_base,
        cfg.sectors_root.file_name(),
        &cfg.layout.source_extension,
    );
    info!(count = index.len(), "Indexed source files");
    summary.sources_indexed = index.len();
    summary.source_collisions = index.collisions().len();

    let report = update_info_blocks(cfg, &index);
    summary.info_updated = report.updated.len();
    summary.info_skipped = report.skipped;

    Ok(summary)
}
