//! Copy INFO blocks from source sector files into relocated targets.

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::encoding::{read_text, write_text};
use crate::text::{extract_info, splice_info};

use super::index::SourceIndex;

/// Why a target directory was not updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TargetMissing(PathBuf),
    NoSource { key: String },
    SourceBlockMissing(PathBuf),
    TargetMarkersMissing(PathBuf),
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TargetMissing(p) => write!(f, "target file {} does not exist", p.display()),
            SkipReason::NoSource { key } => write!(f, "no source file with stem '{key}'"),
            SkipReason::SourceBlockMissing(p) => {
                write!(f, "no [INFO]..[AIRPORT] content in source {}", p.display())
            }
            SkipReason::TargetMarkersMissing(p) => {
                write!(f, "no [INFO]..[AIRPORT] markers in target {}", p.display())
            }
            SkipReason::Failed(e) => write!(f, "error: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    pub target: String,
    pub reason: SkipReason,
}

#[derive(Debug, Default, Clone)]
pub struct SpliceReport {
    pub updated: Vec<PathBuf>,
    pub skipped: Vec<SkipRecord>,
}

/// Outcome of splicing one source into one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceOutcome {
    Updated,
    SourceBlockMissing,
    TargetMarkersMissing,
}

/// Extract the INFO block of `source` and write it into `target`, which keeps
/// its own encoding.
pub fn splice_file(source: &Path, target: &Path, cfg: &Config) -> Result<SpliceOutcome> {
    let encodings = &cfg.layout.encodings;
    let src = read_text(source, encodings)?;
    let Some(block) = extract_info(&src.text) else {
        return Ok(SpliceOutcome::SourceBlockMissing);
    };
    debug!(source = %source.display(), "Extracted INFO block:\n{}", block);

    let dst = read_text(target, encodings)?;
    let Some(updated) = splice_info(&dst.text, block) else {
        return Ok(SpliceOutcome::TargetMarkersMissing);
    };

    if cfg.dry_run {
        info!(file = %target.display(), encoding = %dst.encoding, "dry-run: would update INFO block");
    } else {
        write_text(target, &updated, dst.encoding)?;
    }
    Ok(SpliceOutcome::Updated)
}

/// Walk every target directory and refresh its `<dir>/<dir>.<ext>` INFO block.
pub fn update_info_blocks(cfg: &Config, index: &SourceIndex) -> SpliceReport {
    let layout = &cfg.layout;
    let mut report = SpliceReport::default();

    for dir_name in &layout.target_dirs {
        let target = cfg
            .sectors_root
            .join(dir_name)
            .join(format!("{dir_name}.{}", layout.source_extension));

        let mut skip = |reason: SkipReason| {
            warn!(dir = %dir_name, "Skipping INFO update: {}", reason);
            report.skipped.push(SkipRecord {
                target: dir_name.clone(),
                reason,
            });
        };

        if !target.is_file() {
            skip(SkipReason::TargetMissing(target));
            continue;
        }

        let key = layout.source_stem(dir_name);
        let Some(source) = index.get(key) else {
            skip(SkipReason::NoSource {
                key: key.to_string(),
            });
            continue;
        };

        info!(file = %target.display(), source = %source.display(), "Updating INFO block");
        match splice_file(source, &target, cfg) {
            Ok(SpliceOutcome::Updated) => {
                info!(file = %target.display(), "Updated INFO block");
                report.updated.push(target);
            }
            Ok(SpliceOutcome::SourceBlockMissing) => {
                skip(SkipReason::SourceBlockMissing(source.to_path_buf()))
            }
            Ok(SpliceOutcome::TargetMarkersMissing) => skip(SkipReason::TargetMarkersMissing(target)),
            Err(e) => {
                error!(file = %target.display(), error = %format!("{e:#}"), "INFO update failed");
                skip(SkipReason::Failed(format!("{e:#}")));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::SectorEncoding;
    use assert_fs::prelude::*;

    fn setup() -> (assert_fs::TempDir, Config) {
        let base = assert_fs::TempDir::new().unwrap();
        let cfg = Config::new(base.path().join("Sectors"), base.path());
        (base, cfg)
    }

    #[test]
    fn alias_source_feeds_fss() {
        let (base, cfg) = setup();
        base.child("pkg/PRC.sct")
            .write_str("x\n[INFO]\nold block\n[AIRPORT]\ny\n")
            .unwrap();
        let target = base.child("Sectors/FSS/FSS.sct");
        target.write_str("a\n[INFO]\nstale\n[AIRPORT]\nb\n").unwrap();

        let index = SourceIndex::build(base.path(), Some("Sectors".as_ref()), "sct");
        let report = update_info_blocks(&cfg, &index);
        assert_eq!(report.updated, vec![target.path().to_path_buf()]);
        target.assert("a\n[INFO]\nold block\n[AIRPORT]\nb\n");
        // The other nine directories have no target file.
        assert_eq!(report.skipped.len(), 9);
    }

    #[test]
    fn missing_source_leaves_target_unchanged() {
        let (base, cfg) = setup();
        let target = base.child("Sectors/ZPKM/ZPKM.sct");
        target.write_str("[INFO]\nkeep me\n[AIRPORT]\n").unwrap();

        let report = update_info_blocks(&cfg, &SourceIndex::default());
        assert!(report.updated.is_empty());
        assert!(report.skipped.contains(&SkipRecord {
            target: "ZPKM".into(),
            reason: SkipReason::NoSource { key: "ZPKM".into() },
        }));
        target.assert("[INFO]\nkeep me\n[AIRPORT]\n");
    }

    #[test]
    fn source_without_markers_is_skipped() {
        let (base, cfg) = setup();
        let src = base.child("ZHWH.sct");
        src.write_str("[VOR]\nnothing here\n").unwrap();
        base.child("Sectors/ZHWH/ZHWH.sct")
            .write_str("[INFO]\nold\n[AIRPORT]\n")
            .unwrap();

        let index = SourceIndex::build(base.path(), Some("Sectors".as_ref()), "sct");
        let report = update_info_blocks(&cfg, &index);
        assert!(report.skipped.iter().any(|s| s.target == "ZHWH"
            && s.reason == SkipReason::SourceBlockMissing(src.path().to_path_buf())));
    }

    #[test]
    fn target_keeps_its_own_encoding() {
        let (base, cfg) = setup();
        base.child("ZLHW.sct")
            .write_str("[INFO]\nLanzhou ACC\n[AIRPORT]\n")
            .unwrap();
        let target = base.child("Sectors/ZLHW/ZLHW.sct");
        let original = "; 兰州\n[INFO]\n旧\n[AIRPORT]\n";
        target
            .write_binary(&SectorEncoding::Gbk.encode(original).unwrap())
            .unwrap();

        let index = SourceIndex::build(base.path(), Some("Sectors".as_ref()), "sct");
        let report = update_info_blocks(&cfg, &index);
        assert_eq!(report.updated.len(), 1);
        let bytes = std::fs::read(target.path()).unwrap();
        assert_eq!(
            SectorEncoding::Gbk.decode(&bytes).unwrap(),
            "; 兰州\n[INFO]\nLanzhou ACC\n[AIRPORT]\n"
        );
    }
}
