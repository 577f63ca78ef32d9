//! Error kinds and the throw-or-log reporting policy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Structural failure found while parsing sanitized INI text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number in the parsed text
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("section '{0}' already exists")]
    DuplicateSection(String),

    #[error("invalid section name '{name}': {reason}")]
    InvalidArgument { name: String, reason: &'static str },

    #[error("no section '{0}'")]
    NoSection(String),

    #[error("no option '{option}' in section {}", display_section(.section))]
    NoOption {
        section: Option<String>,
        option: String,
    },

    #[error("option '{option}' is not a boolean: '{value}'")]
    UnexpectedValue { option: String, value: String },

    #[error("failed to parse {}: {source}", display_origin(.origin))]
    Parse {
        origin: Option<PathBuf>,
        #[source]
        source: ParseError,
    },

    #[error("unable to write configuration to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no configuration file has been loaded")]
    NoLoadedFile,
}

fn display_section(section: &Option<String>) -> String {
    match section {
        Some(name) => format!("'{name}'"),
        None => "<none>".to_string(),
    }
}

fn display_origin(origin: &Option<PathBuf>) -> String {
    match origin {
        Some(path) => path.display().to_string(),
        None => "<string>".to_string(),
    }
}

/// Decides whether a failure reaches the caller or is logged away.
///
/// With `throw` set the error is returned as-is. Otherwise it is logged at
/// error level and the operation yields the supplied sentinel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub throw: bool,
}

impl ErrorPolicy {
    pub fn new(throw: bool) -> Self {
        Self { throw }
    }

    pub fn report<T>(self, err: Error, sentinel: T) -> Result<T> {
        if self.throw {
            Err(err)
        } else {
            tracing::error!("{err}");
            Ok(sentinel)
        }
    }
}
