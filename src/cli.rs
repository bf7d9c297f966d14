//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Every flag is optional; running without arguments uses `./Sectors` and `.`.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// CLI wrapper for the sector_sort library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Clean, organize and sync INFO blocks of .sct/.ese sector files"
)]
pub struct Args {
    /// Directory holding root-level sector files and the per-region layout.
    #[arg(long, value_hint = ValueHint::DirPath, help = "Sectors root directory (default: Sectors)")]
    pub root: Option<PathBuf>,

    /// Directory searched recursively for INFO source .sct files.
    #[arg(
        long,
        value_hint = ValueHint::DirPath,
        help = "Where to look for INFO source files (default: current directory)"
    )]
    pub source_base: Option<PathBuf>,

    /// Explicit config file (otherwise $SECTOR_SORT_CONFIG or the platform default).
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Print which config file would be used, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a template config file to the default location, then exit.
    #[arg(long, help = "Write a template config.xml and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.sectors_root = root.clone();
        }
        if let Some(base) = &self.source_base {
            cfg.source_base = base.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
