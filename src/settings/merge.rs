//! Settings layering
//!
//! Priority: CLI args > cfgparser.toml > defaults

use super::model::Settings;
use super::toml_schema::SettingsOverrides;

/// CLI options that can override settings file values.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliSettingsOptions {
    pub delimiter: Option<String>,
    /// If Some(true), write delimiters without padding (inverted in settings)
    pub no_space: Option<bool>,
    pub linebreak: Option<String>,
    /// If Some(true), log errors instead of returning them (inverted in settings)
    pub no_throw: Option<bool>,
}

impl CliSettingsOptions {
    fn as_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            delimiter: self.delimiter.clone(),
            space_around_delimiters: self.no_space.map(|no| !no),
            linebreak: self.linebreak.clone(),
            throw_exceptions: self.no_throw.map(|no| !no),
            ..Default::default()
        }
    }
}

/// Merge settings from CLI, TOML, and defaults.
pub fn merge_settings(cli: &CliSettingsOptions, toml: Option<&SettingsOverrides>) -> Settings {
    let mut settings = Settings::default();
    if let Some(toml) = toml {
        settings.add(toml);
    }
    settings.add(&cli.as_overrides());
    settings
}
