//! Dialect normalization applied to raw INI text before parsing.
//!
//! Accepted dialect differences:
//! - `#` comments are rewritten to `;` comments
//! - `key: value` delimiters are rewritten to `key = value`
//! - indentation is dropped and double quotes are removed

use std::sync::LazyLock;

use regex::Regex;

/// First colon that is not at the start of the line and not preceded by
/// another colon.
static COLON_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:]):").expect("static regex"));

/// Normalize raw INI text line by line.
///
/// Lines are split on `\n` and rejoined with `\n`, so a trailing `\r` stays
/// on its line and is left for the parser to trim.
pub fn sanitize(raw: &str) -> String {
    raw.split('\n')
        .map(sanitize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a single line. Rule order matters: a line that starts a `#`
/// comment never gets its colons rewritten.
pub fn sanitize_line(line: &str) -> String {
    let line = line.trim_start();

    let line = match line.strip_prefix('#') {
        Some(rest) => format!(";{rest}"),
        None => COLON_DELIMITER.replace(line, "${1} =").into_owned(),
    };

    line.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Leading whitespace
    // ===========================================

    #[test]
    fn test_strip_leading_whitespace() {
        assert_eq!(sanitize_line("   key = value"), "key = value");
        assert_eq!(sanitize_line("\t\tkey = value"), "key = value");
    }

    #[test]
    fn test_trailing_content_preserved() {
        assert_eq!(sanitize_line("key = value  "), "key = value  ");
        assert_eq!(sanitize("key = value\r\n"), "key = value\r\n");
    }

    #[test]
    fn test_empty_lines_unchanged() {
        assert_eq!(sanitize("a = 1\n\nb = 2"), "a = 1\n\nb = 2");
        assert_eq!(sanitize(""), "");
    }

    // ===========================================
    // Comment markers
    // ===========================================

    #[test]
    fn test_hash_comment_becomes_semicolon() {
        assert_eq!(sanitize_line("# comment"), "; comment");
    }

    #[test]
    fn test_indented_hash_comment() {
        assert_eq!(sanitize_line("    # indented"), "; indented");
    }

    #[test]
    fn test_only_leading_hash_replaced() {
        assert_eq!(sanitize_line("## twice"), ";# twice");
        assert_eq!(sanitize_line("key = a#b"), "key = a#b");
    }

    #[test]
    fn test_url_in_hash_comment_not_substituted() {
        assert_eq!(sanitize_line("# see http://x"), "; see http://x");
    }

    // ===========================================
    // Colon delimiter
    // ===========================================

    #[test]
    fn test_colon_delimiter_becomes_equals() {
        assert_eq!(sanitize_line("key: value"), "key = value");
    }

    #[test]
    fn test_colon_with_spaces_around() {
        assert_eq!(
            sanitize_line("you can also use : to delimit keys from values"),
            "you can also use  = to delimit keys from values"
        );
    }

    #[test]
    fn test_only_first_colon_replaced() {
        assert_eq!(sanitize_line("time: 12:30"), "time = 12:30");
    }

    #[test]
    fn test_leading_colon_not_replaced() {
        assert_eq!(sanitize_line(":key"), ":key");
    }

    #[test]
    fn test_double_colon_skips_to_following_colon() {
        // The second colon of "a::" is preceded by a colon, so the first
        // eligible match is "a:" itself.
        assert_eq!(sanitize_line("a::b"), "a =:b");
    }

    #[test]
    fn test_semicolon_comment_still_gets_colon_rule() {
        assert_eq!(sanitize_line("; note: here"), "; note = here");
    }

    // ===========================================
    // Quotes
    // ===========================================

    #[test]
    fn test_double_quotes_removed() {
        assert_eq!(sanitize_line("key = \"value\""), "key = value");
        assert_eq!(sanitize_line("\"quoted key\": x"), "quoted key = x");
    }

    #[test]
    fn test_single_quotes_kept() {
        assert_eq!(sanitize_line("chorus: I'm okay"), "chorus = I'm okay");
    }

    #[test]
    fn test_multiline_document() {
        let input = "[Simple Values]\n  key=value\n# comment\nspaces in keys: allowed\n";
        let expected = "[Simple Values]\nkey=value\n; comment\nspaces in keys = allowed\n";
        assert_eq!(sanitize(input), expected);
    }
}
