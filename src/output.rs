use crate::colors::{Colors, Tone};
use crate::error::ParseError;
use crate::format::FormatResult;
use crate::settings::Settings;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

pub struct Config {
    pub check_only: bool,
    pub settings: Settings,
    pub has_sections: bool,
    /// Rewrite files even when their comments would be lost
    pub strip_comments: bool,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool, show_progress: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
            show_progress,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files_fixed: usize,
    pub files_with_problems: usize,
    /// Files left untouched because rewriting them would drop comments
    pub files_kept: usize,
    pub errors: usize,
}

impl RunResult {
    pub fn has_problems(&self) -> bool {
        self.files_with_problems > 0 || self.files_kept > 0 || self.errors > 0
    }
}

pub fn print_check_result(path: &Path, result: &FormatResult, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => print_diff(path, result, &ctx.colors),
        OutputMode::Normal => {
            println!("{} {}", ctx.colors.paint(Tone::Error, "Error:"), path.display());
            println!("  - not in canonical form");
        }
    }
}

pub fn print_fix_result(path: &Path, result: &FormatResult, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => print_diff(path, result, &ctx.colors),
        OutputMode::Normal => {
            println!("{} {}", ctx.colors.paint(Tone::Success, "Fixed:"), path.display());
        }
    }
}

pub fn print_comment_loss(path: &Path, dropped: usize, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }
    println!("{} {}", ctx.colors.paint(Tone::Warning, "Kept:"), path.display());
    println!("  - rewriting would drop {dropped} comment line(s), pass --strip-comments to allow");
}

pub fn print_parse_error(path: &Path, err: &ParseError, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }
    println!(
        "{} {}:{} {}",
        ctx.colors.paint(Tone::Error, "Error:"),
        path.display(),
        err.line,
        err.message
    );
}

pub fn print_checked(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!("{} {}", ctx.colors.paint(Tone::Info, "Checked:"), path.display());
}

pub fn print_skipped(path: &Path, reason: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{} {}",
        ctx.colors.paint(Tone::Warning, &format!("Skipping {reason}:")),
        path.display()
    );
}

/// Unified diff between a file and its canonical form. Removed lines are
/// painted as errors, added lines as successes.
pub fn print_diff(path: &Path, result: &FormatResult, colors: &Colors) {
    let diff = TextDiff::from_lines(&result.original, &result.content);

    println!("--- {}", path.display());
    println!("+++ {} (canonical)", path.display());

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for change in group.iter().flat_map(|op| diff.iter_changes(op)) {
            let (sign, tone) = match change.tag() {
                ChangeTag::Delete => ('-', Some(Tone::Error)),
                ChangeTag::Insert => ('+', Some(Tone::Success)),
                ChangeTag::Equal => (' ', None),
            };
            let line = format!("{sign}{}", change.value().trim_end_matches(['\r', '\n']));
            match tone {
                Some(tone) => println!("{}", colors.paint(tone, &line)),
                None => println!("{line}"),
            }
        }
    }
}

pub fn print_summary(result: &RunResult, config: &Config, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    let mut parts = vec![];
    if config.check_only && result.files_with_problems > 0 {
        parts.push(ctx.colors.paint(
            Tone::Error,
            &format!("{} files not canonical", result.files_with_problems),
        ));
    }
    if result.files_fixed > 0 {
        parts.push(ctx.colors.paint(
            Tone::Success,
            &format!("{} files rewritten", result.files_fixed),
        ));
    }
    if result.files_kept > 0 {
        parts.push(ctx.colors.paint(
            Tone::Warning,
            &format!("{} files kept to preserve comments", result.files_kept),
        ));
    }
    if result.errors > 0 {
        parts.push(ctx.colors.paint(Tone::Error, &format!("{} errors", result.errors)));
    }

    if !parts.is_empty() {
        println!();
        println!("{}", parts.join(", "));
    }
}
