//! INI-style configuration files: a tolerant reader, typed accessors and a
//! canonical writer.
//!
//! [`ConfigParser`] handles files made of `[section]` blocks and
//! [`NoSectionsConfigParser`] handles bare `key = value` files. Both accept
//! `#` or `;` comments and `=` or `:` delimiters, merge several candidate
//! files in order, and write back a normalized form.

pub mod coerce;
pub mod colors;
pub mod document;
pub mod engine;
pub mod error;
pub mod flat;
pub mod format;
mod output;
pub mod parser;
pub mod progress;
pub mod sanitize;
pub mod sectioned;
pub mod serialize;
pub mod settings;
pub mod walker;

pub use colors::{should_use_colors, Colors, Tone};
pub use document::{is_default_section, Document, Section, Table, DEFAULT_SECTION, NO_SECTION};
pub use engine::{Flat, Layout, LoadedFile, Parser, Sectioned};
pub use error::{Error, ErrorPolicy, ParseError, Result};
pub use flat::NoSectionsConfigParser;
pub use format::{format_content, FormatResult};
pub use output::{print_diff, Config, OutputContext, OutputMode, RunResult};
pub use progress::ProgressReporter;
pub use sanitize::{sanitize, sanitize_line};
pub use sectioned::ConfigParser;
pub use settings::{
    find_settings_file, generate_init_file, load_settings, merge_settings, CfgParserToml,
    CliSettingsOptions, Settings, SettingsError, SettingsOverrides, CFGPARSER_TOML_TEMPLATE,
};
pub use walker::walk_paths;

use std::fs;
use std::io;
use std::path::Path;

const BINARY_CHECK_SIZE: usize = 8192;

/// Check if content is binary by looking for null bytes in first 8192 bytes
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_CHECK_SIZE);
    content[..check_len].contains(&0)
}

/// Rewrite (or check) every INI file under the given paths
pub fn run(paths: &[String], config: &Config, ctx: &OutputContext) -> io::Result<RunResult> {
    let mut result = RunResult::default();

    // Count files for progress bar (2-pass approach)
    let file_count: u64 = walk_paths(paths).filter_map(|r| r.ok()).count() as u64;

    let progress = ProgressReporter::new(file_count, ctx.show_progress);

    for path in walk_paths(paths) {
        let path = path?;

        if let Some(name) = path.file_name() {
            progress.set_message(&name.to_string_lossy());
        }

        if let Err(e) = process_file(&path, config, &mut result, ctx) {
            result.errors += 1;
            if ctx.mode != OutputMode::Quiet {
                eprintln!("Error processing {}: {e}", path.display());
            }
        }

        progress.inc();
    }

    progress.finish();

    output::print_summary(&result, config, ctx);

    Ok(result)
}

fn process_file(
    path: &Path,
    config: &Config,
    result: &mut RunResult,
    ctx: &OutputContext,
) -> io::Result<()> {
    let bytes = fs::read(path)?;

    if bytes.is_empty() {
        if ctx.verbose {
            output::print_skipped(path, "empty", ctx);
        }
        return Ok(());
    }

    if is_binary(&bytes) {
        if ctx.verbose {
            output::print_skipped(path, "binary", ctx);
        }
        return Ok(());
    }

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => {
            if ctx.verbose {
                output::print_skipped(path, "non-UTF-8", ctx);
            }
            return Ok(());
        }
    };

    let formatted = match format_content(&content, &config.settings, config.has_sections) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::debug!("parse failure in {}: {e}", path.display());
            result.errors += 1;
            output::print_parse_error(path, &e, ctx);
            return Ok(());
        }
    };

    if !formatted.has_changes() {
        if ctx.verbose {
            output::print_checked(path, ctx);
        }
        return Ok(());
    }

    if !config.check_only && formatted.dropped_comments > 0 && !config.strip_comments {
        result.files_kept += 1;
        output::print_comment_loss(path, formatted.dropped_comments, ctx);
        return Ok(());
    }

    if config.check_only {
        result.files_with_problems += 1;
        output::print_check_result(path, &formatted, ctx);
    } else {
        fs::write(path, &formatted.content)?;
        result.files_fixed += 1;
        output::print_fix_result(path, &formatted, ctx);
    }

    Ok(())
}
