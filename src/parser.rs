//! Structural parsing of sanitized INI text into a [`Document`].

use crate::document::{Document, Section, Table, NO_SECTION};
use crate::error::ParseError;

/// Parse sanitized text.
///
/// Values are kept raw: nothing is coerced or unescaped. With
/// `has_sections` false, section headers are validated but ignored and
/// every option lands in the [`NO_SECTION`] namespace.
pub fn parse(text: &str, has_sections: bool) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    let mut current = NO_SECTION.to_string();

    for (line_idx, raw_line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let name = parse_header(line, line_no)?;
            if has_sections {
                // A repeated header starts over rather than extending.
                doc.set(name, Section::new());
                current = name.to_string();
            }
            continue;
        }

        let (key, value) = parse_option(line, line_no)?;
        doc.section_entry(&current).set(key, value);
    }

    Ok(doc)
}

fn parse_header(line: &str, line_no: usize) -> Result<&str, ParseError> {
    let Some(close) = line.find(']') else {
        return Err(ParseError::new(line_no, "unterminated section header"));
    };

    let trailing = line[close + 1..].trim_start();
    if !trailing.is_empty() && !trailing.starts_with(';') {
        return Err(ParseError::new(
            line_no,
            format!("unexpected characters after section header: '{trailing}'"),
        ));
    }

    let name = line[1..close].trim();
    if name.is_empty() {
        return Err(ParseError::new(line_no, "empty section name"));
    }

    Ok(name)
}

fn parse_option(line: &str, line_no: usize) -> Result<(&str, Option<String>), ParseError> {
    let Some((key, value)) = line.split_once('=') else {
        return Ok((strip_inline_comment(line).trim_end(), None));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::new(line_no, "option without a name"));
    }

    Ok((key, Some(parse_value(value.trim(), line_no)?)))
}

/// A double-quoted value is taken verbatim between the quotes. An unquoted
/// value ends at the first `;`.
fn parse_value(value: &str, line_no: usize) -> Result<String, ParseError> {
    if let Some(quoted) = value.strip_prefix('"') {
        let Some(close) = quoted.find('"') else {
            return Err(ParseError::new(line_no, "unterminated quoted value"));
        };
        let trailing = quoted[close + 1..].trim_start();
        if !trailing.is_empty() && !trailing.starts_with(';') {
            return Err(ParseError::new(
                line_no,
                format!("unexpected characters after quoted value: '{trailing}'"),
            ));
        }
        return Ok(quoted[..close].to_string());
    }

    Ok(strip_inline_comment(value).trim_end().to_string())
}

fn strip_inline_comment(text: &str) -> &str {
    text.split_once(';').map_or(text, |(before, _)| before)
}
