//! Directory guard.
//! The sectors root must exist and be a directory before anything is touched.

use anyhow::{Context, Result};
use std::fs;
use tracing::{debug, info, warn};

use crate::errors::SectorError;

use super::types::Config;

impl Config {
    /// Check the sectors root; a missing source base is only a warning.
    pub fn validate(&self) -> Result<()> {
        let root = &self.sectors_root;
        if !root.exists() {
            return Err(SectorError::RootMissing(root.clone()).into());
        }
        if !root.is_dir() {
            return Err(SectorError::RootNotDirectory(root.clone()).into());
        }
        fs::read_dir(root).with_context(|| {
            format!("Cannot read sectors root '{}'; check permissions", root.display())
        })?;
        debug!("sectors_root readable: {}", root.display());

        if !self.source_base.is_dir() {
            warn!(
                source_base = %self.source_base.display(),
                "Source base is not a directory; no INFO sources will be found"
            );
        }

        info!(
            "Config validated: root='{}' source_base='{}' targets={} dry_run={}",
            root.display(),
            self.source_base.display(),
            self.layout.target_dirs.len(),
            self.dry_run
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_typed_error() {
        let td = tempfile::tempdir().unwrap();
        let cfg = Config::new(td.path().join("Sectors"), td.path());
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SectorError>(),
            Some(SectorError::RootMissing(_))
        ));
    }

    #[test]
    fn file_as_root_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let f = td.path().join("Sectors");
        fs::write(&f, "not a dir").unwrap();
        let err = Config::new(&f, td.path()).validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SectorError>(),
            Some(SectorError::RootNotDirectory(_))
        ));
    }

    #[test]
    fn existing_root_passes() {
        let td = tempfile::tempdir().unwrap();
        fs::create_dir(td.path().join("Sectors")).unwrap();
        Config::new(td.path().join("Sectors"), td.path())
            .validate()
            .unwrap();
    }
}
