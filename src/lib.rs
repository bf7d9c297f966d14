//! Core library for `sector_sort`.
//!
//! Cleans up root-level sector files (`.sct`/`.ese`), sorts them into the
//! per-region directory layout, and copies `[INFO]` metadata from source
//! sector files into the relocated targets.
//!
//! Modules:
//! - config: Config/SectorLayout types, XML loading, directory guard
//! - encoding: encoding detection and same-encoding write back
//! - text: noise stripping, keyword substitution, INFO extraction/splicing
//! - pipeline: transform, relocate, index and splice stages plus `run`
//! - fs_ops: rename/move helpers with contextual I/O errors
//! - errors: typed error enum
//! - output: user-facing colored messages

pub mod cli;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod pipeline;
pub mod text;

pub use config::{Config, LogLevel, SectorLayout, default_config_path, path_has_symlink_ancestor};
pub use encoding::{Detection, SectorEncoding};
pub use errors::SectorError;
pub use pipeline::{RunSummary, run};

/// Convenience re-exports for callers and tests.
pub mod prelude {
    pub use crate::config::{Config, LogLevel, SectorLayout, load_config};
    pub use crate::errors::SectorError as Error;
    pub use crate::pipeline::{RunSummary, SourceIndex, run};
    pub use crate::text::{extract_info, replace_keywords, splice_info, strip_noise};
    pub type SSResult<T> = anyhow::Result<T>;
}
