//! In-memory configuration model: sections of ordered options.

use indexmap::IndexMap;

/// Name of the section whose options act as defaults for every other
/// section. Matched case-insensitively.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Key of the namespace that holds options outside any section.
pub const NO_SECTION: &str = "";

/// Returns true if `name` is reserved for the default section.
pub fn is_default_section(name: &str) -> bool {
    name.eq_ignore_ascii_case(DEFAULT_SECTION)
}

/// Uniform keyed access shared by [`Document`] and [`Section`].
pub trait Table {
    type Value;

    fn get(&self, name: &str) -> Option<&Self::Value>;

    /// Insert or replace an entry. Replacing keeps the original position.
    fn set(&mut self, name: impl Into<String>, value: Self::Value);

    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn remove(&mut self, name: &str) -> Option<Self::Value>;

    /// Entries in insertion order.
    fn iterate(&self) -> impl Iterator<Item = (&str, &Self::Value)> + '_;

    fn size(&self) -> usize;
}

/// Ordered option name to value mapping.
///
/// A `None` value records a key that was declared without a delimiter.
/// Such keys are listed but never resolve to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    options: IndexMap<String, Option<String>>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `option`, skipping valueless keys.
    pub fn value(&self, option: &str) -> Option<&str> {
        self.options.get(option).and_then(|v| v.as_deref())
    }

    pub fn has_value(&self, option: &str) -> bool {
        self.value(option).is_some()
    }

    pub fn set_value(&mut self, option: impl Into<String>, value: impl Into<String>) {
        self.options.insert(option.into(), Some(value.into()));
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.options.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Overwrite same-named options with those of `other`, keeping the rest.
    pub fn merge(&mut self, other: Section) {
        self.options.extend(other.options);
    }
}

impl Table for Section {
    type Value = Option<String>;

    fn get(&self, name: &str) -> Option<&Option<String>> {
        self.options.get(name)
    }

    fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        self.options.insert(name.into(), value);
    }

    fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.options.shift_remove(name)
    }

    fn iterate(&self) -> impl Iterator<Item = (&str, &Option<String>)> + '_ {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn size(&self) -> usize {
        self.options.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Section
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

/// Ordered section name to [`Section`] mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Section `name`, created empty at the end if missing.
    pub fn section_entry(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// The first section whose name is reserved for defaults.
    pub fn default_section(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(name, _)| is_default_section(name))
            .map(|(_, section)| section)
    }

    /// Stored name of the default section, in whatever case it was read.
    pub fn default_section_name(&self) -> Option<&str> {
        self.section_names().find(|name| is_default_section(name))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Section-level replace: every section in `from` replaces the
    /// same-named section here wholesale.
    pub fn merge_sections(&mut self, from: Document) {
        self.sections.extend(from.sections);
    }

    /// Option-level merge: options in `from` overwrite same-named options
    /// here, other options survive.
    pub fn merge_options(&mut self, from: Document) {
        for (name, section) in from.sections {
            self.section_entry(&name).merge(section);
        }
    }
}

impl Table for Document {
    type Value = Section;

    fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    fn set(&mut self, name: impl Into<String>, value: Section) {
        self.sections.insert(name.into(), value);
    }

    fn remove(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    fn iterate(&self) -> impl Iterator<Item = (&str, &Section)> + '_ {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn size(&self) -> usize {
        self.sections.len()
    }
}

/// A lone section becomes the unsectioned namespace.
impl From<Section> for Document {
    fn from(section: Section) -> Self {
        Self {
            sections: IndexMap::from([(NO_SECTION.to_string(), section)]),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Section)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Section)>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
