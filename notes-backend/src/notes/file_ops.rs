//! File operations for the notes system
//!
//! Low-level helpers that operate on already-sanitized paths.

use super::sanitize::is_valid_filename;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temp files start with `.~`, which no valid note filename can contain,
/// so half-written files never show up in listings.
const TEMP_PREFIX: &str = ".~";

/// Fixed-length sibling name, so the longest valid note name still fits
/// the filesystem's name limit.
fn temp_path_for(path: &Path) -> PathBuf {
    path.with_file_name(format!(
        "{}{}.tmp",
        TEMP_PREFIX,
        uuid::Uuid::new_v4().simple()
    ))
}

/// Replace the file at `path` with `content`.
///
/// Writes a sibling temp file and renames it over the target, so concurrent
/// readers see either the previous or the new content.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let tmp = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Read a note file as raw bytes, `None` if it does not exist
pub fn read_bytes(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// True if `path` is a regular file (following symlinks)
pub fn is_note_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// List note filenames directly inside `notes_dir` (no recursion), sorted.
///
/// Only regular files with valid note filenames are returned; directories,
/// symlinks and temp files are skipped.
pub fn list_note_names(notes_dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    if !notes_dir.exists() {
        return Ok(names);
    }

    for entry in fs::read_dir(notes_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_valid_filename(&name) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}
