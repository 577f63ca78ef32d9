//! Settings file discovery and loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::toml_schema::CfgParserToml;

/// File name searched for during discovery
const SETTINGS_FILE_NAME: &str = "cfgparser.toml";

/// Error type for settings file loading
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Search upward from `start_dir` for a file with the given name.
///
/// If `stop_at_git_root` is true, stops searching when a `.git` directory is found.
/// Returns `None` if the file is not found.
pub fn find_file_upward(
    start_dir: &Path,
    filename: &str,
    stop_at_git_root: bool,
) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let file_path = current.join(filename);
        if file_path.is_file() {
            return Some(file_path);
        }

        if stop_at_git_root && current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find cfgparser.toml by searching upward from the given directory,
/// stopping at the git repository root.
pub fn find_settings_file(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, SETTINGS_FILE_NAME, true)
}

/// Load and parse cfgparser.toml from the given path.
pub fn load_settings(path: &Path) -> Result<CfgParserToml, SettingsError> {
    let content = fs::read_to_string(path)?;
    let parsed: CfgParserToml = toml::from_str(&content)?;
    Ok(parsed)
}
