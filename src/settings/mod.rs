//! Parser settings and their configuration file.
//!
//! This module provides:
//! - The [`Settings`] bag consulted by every parser operation
//! - Loading overrides from `cfgparser.toml`
//! - Settings file discovery (search upward from current directory)
//! - Merging CLI args, settings file, and defaults
//! - Template generation with `init`

mod file;
mod init;
mod merge;
mod model;
mod toml_schema;

pub use file::{find_file_upward, find_settings_file, load_settings, SettingsError};
pub use init::{generate_init_file, generate_init_file_in, CFGPARSER_TOML_TEMPLATE};
pub use merge::{merge_settings, CliSettingsOptions};
pub use model::{Settings, PLATFORM_LINEBREAK};
pub use toml_schema::{CfgParserToml, SettingsOverrides};
