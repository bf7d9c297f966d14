use clap::Parser;
use sector_sort::cli::Args;
use sector_sort::config::types::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn no_arguments_keeps_defaults() {
    let args = Args::parse_from(["sector_sort"]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.sectors_root, PathBuf::from("Sectors"));
    assert_eq!(cfg.source_base, PathBuf::from("."));
    assert_eq!(cfg.log_level, LogLevel::Normal);
    assert!(!cfg.dry_run);
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["sector_sort", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["sector_sort", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["sector_sort", "--log-level", "shouty"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "sector_sort",
        "--root",
        "/data/Sectors",
        "--source-base",
        "/data/upstream",
        "--log-file",
        "/tmp/sector_sort.log",
        "--dry-run",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.sectors_root, PathBuf::from("/data/Sectors"));
    assert_eq!(cfg.source_base, PathBuf::from("/data/upstream"));
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/sector_sort.log")));
    assert!(cfg.dry_run);
}
