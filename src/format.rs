//! Canonical rewriting of whole INI files.

use crate::error::ParseError;
use crate::parser::parse;
use crate::sanitize::sanitize;
use crate::serialize::serialize;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct FormatResult {
    pub original: String,
    pub content: String,
    /// Lines carrying a comment, whole or trailing, that `content` no
    /// longer has
    pub dropped_comments: usize,
}

impl FormatResult {
    pub fn has_changes(&self) -> bool {
        self.original != self.content
    }
}

/// Run `content` through sanitize, parse and serialize.
pub fn format_content(
    content: &str,
    settings: &Settings,
    has_sections: bool,
) -> Result<FormatResult, ParseError> {
    let sanitized = sanitize(content);
    let doc = parse(&sanitized, has_sections)?;
    Ok(FormatResult {
        original: content.to_string(),
        content: serialize(&doc, settings, has_sections),
        dropped_comments: count_comment_lines(&sanitized),
    })
}

/// Sanitized text has no quotes left, so every `;` opens a comment.
fn count_comment_lines(sanitized: &str) -> usize {
    sanitized.lines().filter(|line| line.contains(';')).count()
}
