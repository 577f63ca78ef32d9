use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// Role of a piece of CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Warning,
    Success,
    Info,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Error => "\x1b[31m",   // Red
            Tone::Warning => "\x1b[33m", // Yellow
            Tone::Success => "\x1b[32m", // Green
            Tone::Info => "\x1b[36m",    // Cyan
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Wrap `text` in the escape codes for `tone`, or return it unchanged
    /// when colors are off.
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if self.enabled {
            format!("{}{text}{RESET}", tone.code())
        } else {
            text.to_string()
        }
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > CLICOLOR_FORCE env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    io::stdout().is_terminal()
}
