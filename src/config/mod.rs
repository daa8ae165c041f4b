//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor, resolve_config_path};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml_path, load_or_default};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILE_HELPER_CONFIG";
/// Folder name of the downloads backup inside the documents directory.
pub const BACKUP_DIR_NAME: &str = "Downloads_Copy";
