//! Template generation for the `init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Template cfgparser.toml with documentation
pub const CFGPARSER_TOML_TEMPLATE: &str = r#"# cfgparser.toml - Settings for the cfgparser INI reader/writer
#
# cfgparser always accepts these INI dialect variants on input:
# - '#' comments (rewritten to ';' comments)
# - 'key: value' delimiters (rewritten to 'key = value')
# - indented lines and double-quoted values
#
# The settings below control how files are written and how errors are
# reported - uncomment and modify as needed.

[settings]
# Delimiter written between keys and values.
# Default: "="
# delimiter = "="

# Put a blank space around the delimiter. A colon delimiter only gets
# the space after it.
# Default: true
# space_around_delimiters = true

# Line terminator used on output.
# Default: "\r\n" on Windows, "\n" elsewhere
# linebreak = "\n"

# Return errors instead of logging them and carrying on with an empty
# result.
# Default: true
# throw_exceptions = true

# Keep ';' comment lines of loaded files.
# Default: true
# save_comments = true
"#;

/// Generate cfgparser.toml in the specified directory (or current directory if None).
///
/// Returns an error if cfgparser.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(
        || PathBuf::from("cfgparser.toml"),
        |d| d.join("cfgparser.toml"),
    );

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "cfgparser.toml already exists",
        ));
    }

    fs::write(&path, CFGPARSER_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate cfgparser.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
