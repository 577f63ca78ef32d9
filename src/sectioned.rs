//! Accessors for configuration files made of `[section]` blocks.

use crate::coerce::{coerce_float, coerce_int};
use crate::document::{is_default_section, Section, Table, DEFAULT_SECTION, NO_SECTION};
use crate::engine::{Parser, Sectioned};
use crate::error::{Error, Result};

/// Parser for sectioned INI files.
///
/// The empty section name addresses the default scope: options written
/// before the first header, then the file's `[DEFAULT]` section.
pub type ConfigParser = Parser<Sectioned>;

impl Parser<Sectioned> {
    /// Names of the regular sections, without the default scope.
    pub fn sections(&self) -> Vec<&str> {
        self.document
            .section_names()
            .filter(|name| !name.is_empty() && !is_default_section(name))
            .collect()
    }

    pub fn add_section(&mut self, name: &str) -> Result<()> {
        if is_default_section(name) {
            let err = Error::InvalidArgument {
                name: name.to_string(),
                reason: "reserved for the default section",
            };
            return self.policy().report(err, ());
        }
        if name.is_empty() {
            let err = Error::InvalidArgument {
                name: String::new(),
                reason: "section names must not be empty",
            };
            return self.policy().report(err, ());
        }
        if self.document.has(name) {
            return self
                .policy()
                .report(Error::DuplicateSection(name.to_string()), ());
        }

        self.document.set(name, Section::new());
        Ok(())
    }

    /// Never true for the default section.
    pub fn has_section(&self, name: &str) -> bool {
        !name.is_empty() && !is_default_section(name) && self.document.has(name)
    }

    /// Returns true if the section existed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.has_section(name) && self.document.remove(name).is_some()
    }

    /// Sections consulted when looking up an option in `section`.
    fn scope(&self, section: &str) -> Vec<&Section> {
        if section.is_empty() {
            [self.document.get(NO_SECTION), self.document.default_section()]
                .into_iter()
                .flatten()
                .collect()
        } else {
            self.document.get(section).into_iter().collect()
        }
    }

    /// Option names declared in `section`, valueless keys included.
    pub fn options(&self, section: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.scope(section).into_iter().flat_map(Section::option_names) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Options of `section` that carry a value.
    pub fn items(&self, section: &str) -> Vec<(&str, &str)> {
        self.options(section)
            .into_iter()
            .filter_map(|name| self.lookup(section, name).map(|value| (name, value)))
            .collect()
    }

    /// False when the section is missing or the key has no value.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.lookup(section, option).is_some()
    }

    fn lookup(&self, section: &str, option: &str) -> Option<&str> {
        self.scope(section)
            .into_iter()
            .find_map(|s| s.value(option))
    }

    /// Value of `option` in `section`.
    ///
    /// Falls back to `fallback`, then the `[DEFAULT]` section, then the
    /// parser defaults. `Ok(None)` is only returned when errors are logged
    /// rather than raised.
    pub fn get(&self, section: &str, option: &str, fallback: Option<&str>) -> Result<Option<String>> {
        self.resolve(Some(section), option, self.lookup(section, option), fallback)
    }

    /// Integer value, read permissively: non-numeric text is 0.
    pub fn get_int(&self, section: &str, option: &str, fallback: Option<&str>) -> Result<i64> {
        let value = self.get(section, option, fallback)?;
        Ok(coerce_int(value.as_deref().unwrap_or_default()))
    }

    /// Float value, read permissively: non-numeric text is 0.0.
    pub fn get_float(&self, section: &str, option: &str, fallback: Option<&str>) -> Result<f64> {
        let value = self.get(section, option, fallback)?;
        Ok(coerce_float(value.as_deref().unwrap_or_default()))
    }

    /// Accepts `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off` in any
    /// case. Anything else is an [`Error::UnexpectedValue`].
    pub fn get_boolean(
        &self,
        section: &str,
        option: &str,
        fallback: Option<&str>,
    ) -> Result<Option<bool>> {
        let value = self.get(section, option, fallback)?;
        self.to_boolean(option, value)
    }

    /// Store `value` as a string. The section must exist; the empty name
    /// writes to the unsectioned namespace. Any spelling of the default
    /// section name writes to the file's default section, creating
    /// `[DEFAULT]` if there is none.
    pub fn set(&mut self, section: &str, option: &str, value: impl ToString) -> Result<()> {
        let name = if section.is_empty() {
            NO_SECTION.to_string()
        } else if is_default_section(section) {
            self.document
                .default_section_name()
                .unwrap_or(DEFAULT_SECTION)
                .to_string()
        } else if self.document.has(section) {
            section.to_string()
        } else {
            return self
                .policy()
                .report(Error::NoSection(section.to_string()), ());
        };

        self.document
            .section_entry(&name)
            .set_value(option, value.to_string());
        Ok(())
    }
}
