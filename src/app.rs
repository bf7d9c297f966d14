//! Application orchestrator.
//! Loads/merges config, initializes logging, runs the pipeline once and prints the summary.

use anyhow::Result;
use tracing::{debug, error};

use sector_sort::cli::Args;
use sector_sort::config::{create_template_config, load_config, resolve_config_path};
use sector_sort::output as out;
use sector_sort::{LogLevel, SectorError, default_config_path, run as run_pipeline};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        match resolve_config_path(args.config.as_deref()) {
            Some(src) => {
                let origin = if src.explicit { "explicit" } else { "default" };
                out::print_info(&format!("Config file ({origin}):\n  {}", src.path.display()));
                if !src.path.exists() {
                    out::print_info("No file exists there yet; built-in defaults apply. Use --init-config to create one.");
                }
            }
            None => out::print_error("Could not determine a default config path"),
        }
        return Ok(());
    }

    if args.init_config {
        let Some(path) = args.config.clone().or_else(default_config_path) else {
            out::print_error("Could not determine a default config path; pass --config PATH");
            anyhow::bail!("no config path available");
        };
        create_template_config(&path)?;
        out::print_success(&format!("Template config written to: {}", path.display()));
        return Ok(());
    }

    // XML (or defaults), then CLI wins.
    let mut cfg = load_config(args.config.as_deref()).inspect_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
    })?;
    args.apply_overrides(&mut cfg);
    if let Some(raw) = args.log_level.as_deref() {
        if LogLevel::parse(raw).is_none() {
            out::print_warn(&format!("Unknown log level '{raw}'; using '{}'", cfg.log_level));
        }
    }

    // Held until the end of run so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting sector_sort: {:?}", args);
    out::print_info(&format!(
        "Processing sector files under {}",
        cfg.sectors_root.display()
    ));

    match run_pipeline(&cfg) {
        Ok(summary) => {
            out::print_summary(&summary, cfg.dry_run);
            Ok(())
        }
        Err(e) => {
            if let Some(se) = e.downcast_ref::<SectorError>() {
                let code = se.code();
                match se {
                    SectorError::RootMissing(p) | SectorError::RootNotDirectory(p) => {
                        error!(code, kind = "root_invalid", path = %p.display(), "Aborting before touching any file")
                    }
                    _ => error!(code, error = %se, "Run aborted"),
                }
            } else {
                error!(error = ?e, "Run aborted");
            }
            out::print_error(&format!("{e}"));
            Err(e)
        }
    }
}
