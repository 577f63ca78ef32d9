//! TOML schema definitions for cfgparser.toml

use serde::Deserialize;

/// Root structure for cfgparser.toml
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CfgParserToml {
    /// Parser settings
    #[serde(default)]
    pub settings: SettingsOverrides,
}

/// `[settings]` section in cfgparser.toml. Unset fields keep their default.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SettingsOverrides {
    pub delimiter: Option<String>,
    pub space_around_delimiters: Option<bool>,
    pub linebreak: Option<String>,
    pub throw_exceptions: Option<bool>,
    pub interpolation: Option<bool>,
    pub save_comments: Option<bool>,
}
