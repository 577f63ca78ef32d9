//! Permissive conversions from stored strings to typed values.
//!
//! Numeric conversions never fail: they read the longest numeric prefix of
//! the text and fall back to zero when there is none, so `"12abc"` is 12 and
//! `"abc"` is 0. Callers rely on this, keep it.

use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("static regex")
});

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("static regex"));

fn numeric_prefix(text: &str) -> Option<&str> {
    NUMERIC_PREFIX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Integer value of `text`. Fractions truncate toward zero and values out
/// of range saturate.
pub fn coerce_int(text: &str) -> i64 {
    let Some(prefix) = numeric_prefix(text) else {
        return 0;
    };

    if INTEGER.is_match(prefix) {
        return prefix.parse::<i64>().unwrap_or(if prefix.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
    }

    // `as` saturates on overflow and maps NaN to 0
    prefix.parse::<f64>().map_or(0, |f| f as i64)
}

pub fn coerce_float(text: &str) -> f64 {
    numeric_prefix(text)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Boolean value of `text`, case-insensitively. `None` for anything
/// outside the accepted words.
pub fn coerce_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
