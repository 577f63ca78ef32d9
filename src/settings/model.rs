use crate::error::ErrorPolicy;

use super::toml_schema::SettingsOverrides;

/// Linebreak written by default: `\r\n` on Windows, `\n` elsewhere.
pub const PLATFORM_LINEBREAK: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Settings used when parsing and writing configuration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Delimiter written between keys and values (default: `=`)
    pub delimiter: String,
    /// Pad the delimiter with blanks on output (default: true)
    pub space_around_delimiters: bool,
    /// Line terminator written on output (default: platform newline)
    pub linebreak: String,
    /// Return errors to the caller instead of logging them (default: true)
    pub throw_exceptions: bool,
    /// Reserved; values are never interpolated (default: false)
    pub interpolation: bool,
    /// Keep comment lines of loaded files (default: true)
    pub save_comments: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: "=".to_string(),
            space_around_delimiters: true,
            linebreak: PLATFORM_LINEBREAK.to_string(),
            throw_exceptions: true,
            interpolation: false,
            save_comments: true,
        }
    }
}

impl Settings {
    /// Merge every override that is set over the current values.
    pub fn add(&mut self, overrides: &SettingsOverrides) -> &mut Self {
        if let Some(delimiter) = &overrides.delimiter {
            self.delimiter.clone_from(delimiter);
        }
        if let Some(space) = overrides.space_around_delimiters {
            self.space_around_delimiters = space;
        }
        if let Some(linebreak) = &overrides.linebreak {
            self.linebreak.clone_from(linebreak);
        }
        if let Some(throw) = overrides.throw_exceptions {
            self.throw_exceptions = throw;
        }
        if let Some(interpolation) = overrides.interpolation {
            self.interpolation = interpolation;
        }
        if let Some(save) = overrides.save_comments {
            self.save_comments = save;
        }
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        ErrorPolicy::new(self.throw_exceptions)
    }
}
