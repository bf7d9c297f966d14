//! XML configuration support.
//! - Loads overrides for the built-in layout from config.xml (quick_xml).
//! - Resolves which config file applies (flag, env, platform default).
//! - Writes a commented template on request.
//!
//! Notes:
//! - Absent elements keep their built-in defaults.
//! - Repeated elements (`<rename>`, `<source_alias>`, `<keyword>`) must be
//!   listed next to each other.
//! - Unknown elements are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::{CONFIG_ENV, SECTORS_ROOT_DEFAULT, SOURCE_BASE_DEFAULT};

use crate::config::types::{Config, LogLevel};
use crate::errors::SectorError;
use crate::fs_ops::io_error_with_help;
use crate::text::KeywordRule;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    sectors_root: Option<String>,
    source_base: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    targets: Option<XmlTargets>,
    #[serde(rename = "rename", default)]
    renames: Vec<XmlRename>,
    #[serde(rename = "source_alias", default)]
    source_aliases: Vec<XmlAlias>,
    #[serde(rename = "keyword", default)]
    keywords: Vec<KeywordRule>,
}

#[derive(Debug, Deserialize)]
struct XmlTargets {
    #[serde(rename = "dir", default)]
    dirs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct XmlRename {
    #[serde(rename = "@from")]
    from: String,
    #[serde(rename = "@to")]
    to: String,
}

#[derive(Debug, Deserialize)]
struct XmlAlias {
    #[serde(rename = "@target")]
    target: String,
    #[serde(rename = "@source")]
    source: String,
}

/// Where the config came from; explicit paths must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub explicit: bool,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(root) = non_empty(parsed.sectors_root) {
        cfg.sectors_root = PathBuf::from(root);
    }
    if let Some(base) = non_empty(parsed.source_base) {
        cfg.source_base = PathBuf::from(base);
    }
    if let Some(lf) = non_empty(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(lf));
    }
    if let Some(lvl) = non_empty(parsed.log_level) {
        cfg.log_level = lvl.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }

    if let Some(targets) = parsed.targets {
        let dirs: Vec<String> = targets
            .dirs
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if !dirs.is_empty() {
            cfg.layout.target_dirs = dirs;
        }
    }
    if !parsed.renames.is_empty() {
        cfg.layout.renames = parsed
            .renames
            .into_iter()
            .map(|r| (r.from.trim().to_string(), r.to.trim().to_string()))
            .collect::<BTreeMap<_, _>>();
    }
    if !parsed.source_aliases.is_empty() {
        cfg.layout.source_aliases = parsed
            .source_aliases
            .into_iter()
            .map(|a| (a.target.trim().to_string(), a.source.trim().to_string()))
            .collect::<BTreeMap<_, _>>();
    }
    if !parsed.keywords.is_empty() {
        if parsed.keywords.iter().any(|k| k.find.is_empty()) {
            bail!("<keyword> entries need a non-empty find attribute");
        }
        cfg.layout.keywords = parsed.keywords;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(io_error_with_help("read config xml", path))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Pick the config file: `explicit` flag, then $SECTOR_SORT_CONFIG, then the
/// platform default. `None` only when no default location can be determined.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<ConfigSource> {
    if let Some(p) = explicit {
        return Some(ConfigSource {
            path: p.to_path_buf(),
            explicit: true,
        });
    }
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(ConfigSource {
            path: PathBuf::from(p),
            explicit: true,
        });
    }
    default_config_path().map(|path| ConfigSource {
        path,
        explicit: false,
    })
}

/// Load the effective Config. A missing default file means built-in defaults;
/// a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let Some(source) = resolve_config_path(explicit) else {
        return Ok(Config::default());
    };
    if !source.path.exists() {
        if source.explicit {
            return Err(SectorError::ConfigNotFound(source.path).into());
        }
        return Ok(Config::default());
    }
    load_config_from_xml_path(&source.path)
}

/// Write the template config to `path`. Refuses to overwrite an existing
/// file or to write below a symlinked directory.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(io_error_with_help("create config directory", parent))?;
    }

    let content = format!(
        "<!--\n  sector_sort configuration (XML)\n\n  sectors_root   -> directory with the root-level .sct/.ese files and the per-region layout\n  source_base    -> directory searched recursively for INFO source .sct files\n  log_level      -> quiet | normal | info | debug\n  log_file       -> optional log file (stdout is always used)\n  targets/dir    -> per-region directory names\n  rename         -> stem renamed before relocation\n  source_alias   -> target directory whose INFO source has another stem\n  keyword        -> literal substitution, applied in order (put longer phrases first)\n\n  CLI flags override XML values. Repeated elements must be adjacent.\n-->\n<config>\n  <sectors_root>{}</sectors_root>\n  <source_base>{}</source_base>\n  <log_level>normal</log_level>\n  <targets>\n{}  </targets>\n  <rename from=\"PRC\" to=\"FSS\"/>\n  <source_alias target=\"FSS\" source=\"PRC\"/>\n  <keyword find=\"China Sector Package Studio\" replace=\"Flyleague-Collection\"/>\n  <keyword find=\"China Sector Package\" replace=\"China-Mainland-Sector\"/>\n</config>\n",
        SECTORS_ROOT_DEFAULT,
        SOURCE_BASE_DEFAULT,
        Config::default()
            .layout
            .target_dirs
            .iter()
            .map(|d| format!("    <dir>{d}</dir>\n"))
            .collect::<String>()
    );

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_error_with_help("create config file", path))?;
    file.write_all(content.as_bytes())
        .map_err(io_error_with_help("write config file", path))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectorLayout;

    #[test]
    fn template_parses_back_to_defaults() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("nested").join("config.xml");
        create_template_config(&p).unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.layout, SectorLayout::default());
        assert_eq!(cfg.sectors_root, PathBuf::from(SECTORS_ROOT_DEFAULT));
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    fn template_is_not_overwritten() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config/>").unwrap();
        assert!(create_template_config(&p).is_err());
        assert_eq!(fs::read_to_string(&p).unwrap(), "<config/>");
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("absent.xml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SectorError>(),
            Some(SectorError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><log_level>loud</log_level></config>").unwrap();
        let err = load_config_from_xml_path(&p).unwrap_err();
        assert!(format!("{err:#}").contains("invalid log level"));
    }
}
