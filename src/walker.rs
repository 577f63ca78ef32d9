use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions picked up when walking a directory
const INI_EXTENSIONS: &[&str] = &["ini", "cfg", "conf"];

fn has_ini_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| INI_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Collect the INI files named by `paths`, honoring gitignore rules.
///
/// A path naming a file is taken as-is whatever its extension. Directories
/// are searched recursively for files with an INI extension, skipping
/// hidden entries.
pub fn walk_paths(paths: &[String]) -> impl Iterator<Item = io::Result<PathBuf>> {
    let mut found = Vec::new();

    for path in paths.iter().map(Path::new) {
        if path.is_file() {
            found.push(Ok(path.to_path_buf()));
        } else {
            collect_ini_files(path, &mut found);
        }
    }

    found.into_iter()
}

fn collect_ini_files(root: &Path, found: &mut Vec<io::Result<PathBuf>>) {
    let entries = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                found.push(Err(io::Error::other(e.to_string())));
                continue;
            }
        };

        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && has_ini_extension(entry.path()) {
            found.push(Ok(entry.into_path()));
        }
    }
}
