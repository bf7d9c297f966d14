//! Per-file content rewrite: noise stripping and keyword substitution.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::SectorLayout;
use crate::encoding::{Detection, SectorEncoding, read_text, write_text};
use crate::text::{KeywordChange, replace_keywords, strip_noise};

/// What happened to one file's contents.
#[derive(Debug, Clone)]
pub struct TransformReport {
    pub encoding: SectorEncoding,
    pub detection: Detection,
    /// Characters removed by noise stripping.
    pub noise_removed: usize,
    pub keyword_changes: Vec<KeywordChange>,
    /// True when the text differs from what was read.
    pub changed: bool,
}

/// Pure part of the rewrite: returns new text, removed char count and keyword changes.
pub fn transform_text(text: &str, layout: &SectorLayout) -> (String, usize, Vec<KeywordChange>) {
    let cleaned = strip_noise(text);
    let noise_removed = text.chars().count() - cleaned.chars().count();
    let (out, changes) = replace_keywords(&cleaned, &layout.keywords);
    (out, noise_removed, changes)
}

/// Read `path`, rewrite its contents, and write it back in the same encoding.
pub fn transform_file(path: &Path, layout: &SectorLayout, dry_run: bool) -> Result<TransformReport> {
    let read = read_text(path, &layout.encodings)?;
    match read.detection {
        Detection::Detected(enc) => debug!(path = %path.display(), encoding = %enc, "Detected encoding"),
        Detection::Fallback(enc) => warn!(
            path = %path.display(),
            encoding = %enc,
            "No candidate encoding decoded the file; using fallback"
        ),
    }

    let (text, noise_removed, keyword_changes) = transform_text(&read.text, layout);
    if noise_removed > 0 {
        info!(path = %path.display(), chars = noise_removed, "Removed noise pattern");
    }
    if keyword_changes.is_empty() {
        debug!(path = %path.display(), "No keywords to replace");
    }
    for change in &keyword_changes {
        info!(path = %path.display(), "{}", change);
    }

    let changed = text != read.text;
    if changed {
        if dry_run {
            info!(path = %path.display(), encoding = %read.encoding, "dry-run: would rewrite file");
        } else {
            write_text(path, &text, read.encoding)?;
        }
    }

    Ok(TransformReport {
        encoding: read.encoding,
        detection: read.detection,
        noise_removed,
        keyword_changes,
        changed,
    })
}
