//! User-facing console output.
//! Prefixed, colored status lines (colors only on a TTY) and the end-of-run summary.

use owo_colors::OwoColorize;

use crate::pipeline::RunSummary;

pub fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

enum Tone {
    Info,
    Warn,
    Error,
    Ok,
}

fn emit(tone: Tone, msg: &str) {
    let tty = is_tty();
    let (label, to_stderr) = match tone {
        Tone::Info => ("info:", false),
        Tone::Warn => ("warn:", true),
        Tone::Error => ("error:", true),
        Tone::Ok => ("ok:", false),
    };
    let prefix = if !tty {
        label.to_string()
    } else {
        match tone {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Ok => label.green().bold().to_string(),
        }
    };
    if to_stderr {
        eprintln!("{prefix} {msg}");
    } else {
        println!("{prefix} {msg}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Ok, msg);
}

/// Print a plain line (no prefix). Summary lines go through here so scripts can grep them.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Lines of the end-of-run summary, without any styling.
pub fn summary_lines(summary: &RunSummary, dry_run: bool) -> Vec<String> {
    let mut lines = vec![
        if dry_run {
            "=== Dry run finished (no files were changed) ===".to_string()
        } else {
            "=== Processing finished ===".to_string()
        },
        format!("Files found: {}", summary.files_seen),
        format!("Processed: {}", summary.processed),
        format!("Rewritten: {}", summary.rewritten),
        format!("Noise removed from: {}", summary.noise_cleaned),
        format!("Keyword replacements: {}", summary.keyword_replacements),
        format!("Renamed: {}", summary.renamed),
        format!("Moved: {}", summary.moved),
        format!("Orphaned (left in place): {}", summary.orphans.len()),
        format!("Failed: {}", summary.failures.len()),
        format!("Source files indexed: {}", summary.sources_indexed),
        format!("Duplicate source stems: {}", summary.source_collisions),
        format!("INFO blocks updated: {}", summary.info_updated),
        format!("INFO updates skipped: {}", summary.info_skipped.len()),
    ];
    lines.extend(
        summary
            .orphans
            .iter()
            .map(|p| format!("  orphan: {}", p.display())),
    );
    lines.extend(
        summary
            .failures
            .iter()
            .map(|f| format!("  failed: {}: {}", f.path.display(), f.error)),
    );
    lines
}

pub fn print_summary(summary: &RunSummary, dry_run: bool) {
    for line in summary_lines(summary, dry_run) {
        print_user(&line);
    }
}
