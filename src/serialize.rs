//! Canonical INI output.

use crate::document::{Document, Section, Table, NO_SECTION};
use crate::settings::Settings;

/// Render `doc` as INI text.
///
/// Every value is wrapped in double quotes; valueless keys are written bare
/// so they stay valueless when read back. No blank lines are inserted
/// between sections. Options outside any section are written first, before
/// the first header.
pub fn serialize(doc: &Document, settings: &Settings, has_sections: bool) -> String {
    let mut output = String::new();

    if !has_sections {
        for (_, section) in doc.iterate() {
            write_options(&mut output, section, settings);
        }
        return output;
    }

    if let Some(unsectioned) = doc.get(NO_SECTION) {
        write_options(&mut output, unsectioned, settings);
    }

    for (name, section) in doc.iterate().filter(|(name, _)| *name != NO_SECTION) {
        output.push('[');
        output.push_str(name);
        output.push(']');
        output.push_str(&settings.linebreak);
        write_options(&mut output, section, settings);
    }

    output
}

fn write_options(output: &mut String, section: &Section, settings: &Settings) {
    for (key, value) in section.iterate() {
        output.push_str(key);
        if let Some(value) = value {
            output.push_str(&delimiter(settings));
            output.push('"');
            output.push_str(value);
            output.push('"');
        }
        output.push_str(&settings.linebreak);
    }
}

/// The padded delimiter. A colon never gets a leading blank; the trailing
/// blank follows `space_around_delimiters` alone.
fn delimiter(settings: &Settings) -> String {
    let mut out = String::new();
    if settings.space_around_delimiters && settings.delimiter != ":" {
        out.push(' ');
    }
    out.push_str(&settings.delimiter);
    if settings.space_around_delimiters {
        out.push(' ');
    }
    out
}
