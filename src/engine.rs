//! The parser engine shared by the sectioned and flat parsers.
//!
//! [`Parser`] owns the document, the construction-time defaults, the
//! settings and the list of files loaded so far. The [`Layout`] parameter
//! decides how a newly read file merges into the current document.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexMap;

use crate::coerce::coerce_bool;
use crate::document::Document;
use crate::error::{Error, ErrorPolicy, Result};
use crate::parser::parse;
use crate::sanitize::sanitize;
use crate::serialize::serialize;
use crate::settings::Settings;

/// Selects between the sectioned and the flat document shape.
pub trait Layout: fmt::Debug + Clone + Copy + Default {
    const HAS_SECTIONS: bool;

    /// Fold a freshly parsed file into the current document.
    fn merge(into: &mut Document, from: Document);
}

/// Files made of `[section]` blocks. A later file replaces whole sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sectioned;

impl Layout for Sectioned {
    const HAS_SECTIONS: bool = true;

    fn merge(into: &mut Document, from: Document) {
        into.merge_sections(from);
    }
}

/// Files of bare `key = value` lines. A later file overwrites single keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat;

impl Layout for Flat {
    const HAS_SECTIONS: bool = false;

    fn merge(into: &mut Document, from: Document) {
        into.merge_options(from);
    }
}

/// A file that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Size in bytes at load time
    pub len: u64,
    pub modified: Option<SystemTime>,
    /// Raw `;` comment lines, kept when `save_comments` is on
    pub comments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Parser<L: Layout> {
    pub(crate) document: Document,
    defaults: IndexMap<String, String>,
    settings: Settings,
    files: Vec<LoadedFile>,
    _layout: PhantomData<L>,
}

impl<L: Layout> Default for Parser<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Layout> Parser<L> {
    pub fn new() -> Self {
        Self::from_parts(IndexMap::new(), Settings::default())
    }

    /// Parser whose lookups fall back to `defaults` when an option is
    /// missing everywhere else.
    pub fn with_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let defaults = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_parts(defaults, Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::from_parts(IndexMap::new(), settings)
    }

    pub fn from_parts(defaults: IndexMap<String, String>, settings: Settings) -> Self {
        if settings.interpolation {
            tracing::warn!("interpolation is not supported, values are returned verbatim");
        }
        Self {
            document: Document::new(),
            defaults,
            settings,
            files: Vec::new(),
            _layout: PhantomData,
        }
    }

    pub fn defaults(&self) -> &IndexMap<String, String> {
        &self.defaults
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn loaded_files(&self) -> &[LoadedFile] {
        &self.files
    }

    /// Comment lines of every loaded file, in load order.
    pub fn comments(&self) -> impl Iterator<Item = &str> + '_ {
        self.files
            .iter()
            .flat_map(|f| f.comments.iter().map(String::as_str))
    }

    // ===========================================
    // Reading
    // ===========================================

    /// Read every readable file among `paths`, in order, merging each into
    /// the current document. Paths that cannot be read are skipped without
    /// error, so a list of candidate locations can be passed as-is.
    ///
    /// Returns the paths that were loaded.
    ///
    /// When a file fails to parse and errors are raised, the files before it
    /// stay merged and listed in [`loaded_files`](Self::loaded_files); the
    /// returned error carries the failing path.
    pub fn read<I, P>(&mut self, paths: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut loaded = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let (raw, record) = match self.load(path) {
                Ok(found) => found,
                Err(e) => {
                    tracing::debug!("skipping {}: {e}", path.display());
                    continue;
                }
            };

            if self.merge_text(&raw, Some(path))? {
                self.files.push(record);
                loaded.push(path.to_path_buf());
            }
        }

        Ok(loaded)
    }

    /// Read a single file that is expected to exist.
    ///
    /// Unlike [`read`](Self::read), a missing or unreadable file is an error.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            return self
                .policy()
                .report(Error::FileNotFound(path.to_path_buf()), false);
        }

        let (raw, record) = match self.load(path) {
            Ok(found) => found,
            Err(source) => {
                let err = Error::Read {
                    path: path.to_path_buf(),
                    source,
                };
                return self.policy().report(err, false);
            }
        };

        let merged = self.merge_text(&raw, Some(path))?;
        if merged {
            self.files.push(record);
        }
        Ok(merged)
    }

    /// Replace the document with the contents of `text`.
    pub fn read_string(&mut self, text: &str) -> Result<()> {
        match parse(&sanitize(text), L::HAS_SECTIONS) {
            Ok(doc) => {
                self.document = doc;
                Ok(())
            }
            Err(source) => self.policy().report(Error::Parse { origin: None, source }, ()),
        }
    }

    /// Replace the document with an already built one.
    pub fn read_array(&mut self, document: impl Into<Document>) {
        self.document = document.into();
    }

    /// Read every previously loaded file again, in original order.
    pub fn reload(&mut self) -> Result<()> {
        for idx in 0..self.files.len() {
            let path = self.files[idx].path.clone();
            let (raw, record) = match self.load(&path) {
                Ok(found) => found,
                Err(e) => {
                    tracing::debug!("skipping {} on reload: {e}", path.display());
                    continue;
                }
            };

            if self.merge_text(&raw, Some(&path))? {
                self.files[idx] = record;
            }
        }
        Ok(())
    }

    fn load(&self, path: &Path) -> io::Result<(String, LoadedFile)> {
        let bytes = fs::read(path)?;
        let metadata = fs::metadata(path)?;
        // Legacy encodings still load; invalid bytes become U+FFFD.
        let raw = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{} is not valid UTF-8, decoding lossily", path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let comments = if self.settings.save_comments {
            raw.lines()
                .filter(|line| line.trim().starts_with(';'))
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        let record = LoadedFile {
            path: path.to_path_buf(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
            comments,
        };
        Ok((raw, record))
    }

    /// Sanitize, parse and merge. Returns false when a parse failure was
    /// logged instead of raised.
    fn merge_text(&mut self, raw: &str, origin: Option<&Path>) -> Result<bool> {
        match parse(&sanitize(raw), L::HAS_SECTIONS) {
            Ok(doc) => {
                L::merge(&mut self.document, doc);
                if let Some(path) = origin {
                    tracing::info!("loaded {}", path.display());
                }
                Ok(true)
            }
            Err(source) => {
                let err = Error::Parse {
                    origin: origin.map(Path::to_path_buf),
                    source,
                };
                self.policy().report(err, false)
            }
        }
    }

    // ===========================================
    // Writing
    // ===========================================

    /// Write the canonical form of the document to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        match fs::write(path, self.to_ini_string()) {
            Ok(()) => {
                tracing::info!("wrote {}", path.display());
                Ok(true)
            }
            Err(source) => {
                let err = Error::Write {
                    path: path.to_path_buf(),
                    source,
                };
                self.policy().report(err, false)
            }
        }
    }

    /// Write the document back to the last file loaded.
    pub fn save(&self) -> Result<bool> {
        match self.files.last() {
            Some(file) => self.write(&file.path),
            None => self.policy().report(Error::NoLoadedFile, false),
        }
    }

    pub fn to_ini_string(&self) -> String {
        serialize(&self.document, &self.settings, L::HAS_SECTIONS)
    }

    /// Print the canonical form to standard output.
    pub fn output(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(self.to_ini_string().as_bytes())?;
        stdout.flush()
    }

    // ===========================================
    // Document
    // ===========================================

    /// Drop all parsed data. Loaded file records are kept for `save`.
    pub fn clear(&mut self) {
        self.document.clear();
    }

    pub fn dump(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    // ===========================================
    // Accessor support
    // ===========================================

    pub(crate) fn policy(&self) -> ErrorPolicy {
        self.settings.policy()
    }

    /// Resolve a lookup: the stored value, then the caller's fallback, then
    /// the DEFAULT section (sectioned only), then the defaults map.
    pub(crate) fn resolve(
        &self,
        section: Option<&str>,
        option: &str,
        found: Option<&str>,
        fallback: Option<&str>,
    ) -> Result<Option<String>> {
        let from_default_section = || {
            L::HAS_SECTIONS
                .then(|| self.document.default_section())
                .flatten()
                .and_then(|s| s.value(option))
        };

        let value = found
            .or(fallback)
            .or_else(from_default_section)
            .or_else(|| self.defaults.get(option).map(String::as_str));

        match value {
            Some(v) => Ok(Some(v.to_string())),
            None => {
                let err = Error::NoOption {
                    section: section.map(str::to_string),
                    option: option.to_string(),
                };
                self.policy().report(err, None)
            }
        }
    }

    /// Boolean view of a resolved value. A missing value stays missing.
    pub(crate) fn to_boolean(&self, option: &str, value: Option<String>) -> Result<Option<bool>> {
        let Some(value) = value else {
            return Ok(None);
        };

        match coerce_bool(&value) {
            Some(b) => Ok(Some(b)),
            None => {
                let err = Error::UnexpectedValue {
                    option: option.to_string(),
                    value,
                };
                self.policy().report(err, None)
            }
        }
    }
}
