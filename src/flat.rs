//! Accessors for configuration files without sections.

use crate::coerce::{coerce_float, coerce_int};
use crate::document::{Section, Table, NO_SECTION};
use crate::engine::{Flat, Parser};
use crate::error::Result;

/// Parser for INI files made only of `key = value` lines.
pub type NoSectionsConfigParser = Parser<Flat>;

impl Parser<Flat> {
    fn options_section(&self) -> Option<&Section> {
        self.document.get(NO_SECTION)
    }

    /// Option names, valueless keys included.
    pub fn options(&self) -> Vec<&str> {
        self.options_section()
            .map(|s| s.option_names().collect())
            .unwrap_or_default()
    }

    /// Options that carry a value.
    pub fn items(&self) -> Vec<(&str, &str)> {
        self.options_section()
            .map(|s| {
                s.iterate()
                    .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.lookup(option).is_some()
    }

    fn lookup(&self, option: &str) -> Option<&str> {
        self.options_section().and_then(|s| s.value(option))
    }

    /// Value of `option`, then `fallback`, then the parser defaults.
    pub fn get(&self, option: &str, fallback: Option<&str>) -> Result<Option<String>> {
        self.resolve(None, option, self.lookup(option), fallback)
    }

    pub fn get_int(&self, option: &str, fallback: Option<&str>) -> Result<i64> {
        let value = self.get(option, fallback)?;
        Ok(coerce_int(value.as_deref().unwrap_or_default()))
    }

    pub fn get_float(&self, option: &str, fallback: Option<&str>) -> Result<f64> {
        let value = self.get(option, fallback)?;
        Ok(coerce_float(value.as_deref().unwrap_or_default()))
    }

    pub fn get_boolean(&self, option: &str, fallback: Option<&str>) -> Result<Option<bool>> {
        let value = self.get(option, fallback)?;
        self.to_boolean(option, value)
    }

    pub fn set(&mut self, option: &str, value: impl ToString) -> &mut Self {
        self.document
            .section_entry(NO_SECTION)
            .set_value(option, value.to_string());
        self
    }
}
