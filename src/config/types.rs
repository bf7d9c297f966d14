//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - SectorLayout holds the lookup tables every pipeline stage is driven by.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{SECTORS_ROOT_DEFAULT, SOURCE_BASE_DEFAULT};
use crate::encoding::{DEFAULT_CANDIDATES, SectorEncoding};
use crate::text::KeywordRule;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Progress and warnings (default)
    #[default]
    Normal,
    /// Adds per-file detail such as extracted INFO blocks
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Default keyword rules; the longer phrase is listed first.
pub fn default_keywords() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("China Sector Package Studio", "Flyleague-Collection"),
        KeywordRule::new("China Sector Package", "China-Mainland-Sector"),
    ]
}

/// Lookup tables describing where sector files belong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorLayout {
    /// Extensions (lowercase, no dot) of files processed in the sectors root.
    pub extensions: Vec<String>,
    /// Extension of the files carrying INFO blocks.
    pub source_extension: String,
    /// Per-region directory names, in processing order.
    pub target_dirs: Vec<String>,
    /// Stems renamed before relocation (`PRC` -> `FSS`).
    pub renames: BTreeMap<String, String>,
    /// Target directories whose INFO source has a different stem (`FSS` -> `PRC`).
    pub source_aliases: BTreeMap<String, String>,
    /// Ordered literal substitutions.
    pub keywords: Vec<KeywordRule>,
    /// Encoding trial order.
    pub encodings: Vec<SectorEncoding>,
}

impl Default for SectorLayout {
    fn default() -> Self {
        let target_dirs = [
            "FSS", "ZBPE", "ZGZU", "ZHWH", "ZJSA", "ZLHW", "ZPKM", "ZSHA", "ZWUQ", "ZYSH",
        ];
        Self {
            extensions: vec!["sct".into(), "ese".into()],
            source_extension: "sct".into(),
            target_dirs: target_dirs.iter().map(|s| s.to_string()).collect(),
            renames: BTreeMap::from([("PRC".to_string(), "FSS".to_string())]),
            source_aliases: BTreeMap::from([("FSS".to_string(), "PRC".to_string())]),
            keywords: default_keywords(),
            encodings: DEFAULT_CANDIDATES.to_vec(),
        }
    }
}

impl SectorLayout {
    /// True when `ext` (without dot) is one of the recognized extensions.
    pub fn is_recognized_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn is_target_dir(&self, name: &str) -> bool {
        self.target_dirs.iter().any(|d| d == name)
    }

    /// Stem a file should carry after the rename step.
    pub fn renamed_stem<'a>(&'a self, stem: &'a str) -> &'a str {
        self.renames.get(stem).map(String::as_str).unwrap_or(stem)
    }

    /// Stem of the source file feeding `target_dir`'s INFO block.
    pub fn source_stem<'a>(&'a self, target_dir: &'a str) -> &'a str {
        self.source_aliases
            .get(target_dir)
            .map(String::as_str)
            .unwrap_or(target_dir)
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the root-level files and the per-region layout
    pub sectors_root: PathBuf,
    /// Directory scanned recursively for INFO source files
    pub source_base: PathBuf,
    /// Lookup tables
    pub layout: SectorLayout,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, log actions but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sectors_root: PathBuf::from(SECTORS_ROOT_DEFAULT),
            source_base: PathBuf::from(SOURCE_BASE_DEFAULT),
            layout: SectorLayout::default(),
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(sectors_root: impl Into<PathBuf>, source_base: impl Into<PathBuf>) -> Self {
        Self {
            sectors_root: sectors_root.into(),
            source_base: source_base.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_reference_tables() {
        let layout = SectorLayout::default();
        assert_eq!(layout.target_dirs.len(), 10);
        assert_eq!(layout.target_dirs[0], "FSS");
        assert_eq!(layout.renamed_stem("PRC"), "FSS");
        assert_eq!(layout.renamed_stem("ZBPE"), "ZBPE");
        assert_eq!(layout.source_stem("FSS"), "PRC");
        assert_eq!(layout.source_stem("ZSHA"), "ZSHA");
        assert!(layout.is_recognized_extension("SCT"));
        assert!(layout.is_recognized_extension("ese"));
        assert!(!layout.is_recognized_extension("txt"));
    }

    #[test]
    fn log_level_parsing() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!("quiet".parse::<LogLevel>(), Ok(LogLevel::Quiet));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
