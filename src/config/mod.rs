//! Config module.
//! Provides configuration types, the built-in sector layout, default paths,
//! XML loading, and validation of the sectors root.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel, SectorLayout, default_keywords};
pub use xml::{
    ConfigSource, create_template_config, load_config, load_config_from_xml_path,
    resolve_config_path,
};

/// Directory (relative to the working directory) holding the organized layout.
pub const SECTORS_ROOT_DEFAULT: &str = "Sectors";
/// Where source sector files are searched for.
pub const SOURCE_BASE_DEFAULT: &str = ".";
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SECTOR_SORT_CONFIG";
