//! Filename validation and sandbox confinement for the notes root.

use super::NoteError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Longest filename accepted, in bytes
pub const MAX_FILENAME_LEN: usize = 255;

static FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("filename pattern is valid"));

/// Pure syntactic check, no filesystem access.
pub fn is_valid_filename(filename: &str) -> bool {
    check_syntax(filename).is_ok()
}

fn check_syntax(filename: &str) -> Result<(), String> {
    if filename.is_empty() {
        return Err("Filename cannot be empty.".to_string());
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err("Filename cannot contain path separators (/, \\) or directory navigation (..). Use only simple filenames like 'mynote.txt'.".to_string());
    }
    if !FILENAME_PATTERN.is_match(filename) {
        return Err("Filename contains invalid characters. Only letters, numbers, dots, dashes, and underscores are allowed.".to_string());
    }
    if filename.len() > MAX_FILENAME_LEN {
        return Err(format!(
            "Filename is too long. Maximum length is {} characters.",
            MAX_FILENAME_LEN
        ));
    }
    if filename == "." {
        return Err("Filename cannot refer to the notes folder itself.".to_string());
    }
    Ok(())
}

/// Resolve the root to an absolute path, following symlinks when it exists.
fn resolve_root(root: &Path) -> Result<PathBuf, std::io::Error> {
    if root.exists() {
        root.canonicalize()
    } else {
        std::path::absolute(root)
    }
}

/// Validate `filename` and return its path inside `root`.
///
/// If the target already exists it is resolved through any symlinks and
/// must still be a direct child of the resolved root.
pub fn sanitize(root: &Path, filename: &str) -> Result<PathBuf, NoteError> {
    check_syntax(filename).map_err(|reason| NoteError::invalid(filename, reason))?;

    let canonical_root = resolve_root(root)
        .map_err(|e| NoteError::invalid(filename, format!("Cannot resolve notes folder: {}", e)))?;
    let candidate = canonical_root.join(filename);

    // symlink_metadata so a dangling link still counts as "exists"
    if fs::symlink_metadata(&candidate).is_ok() {
        let resolved = candidate.canonicalize().map_err(|_| {
            NoteError::invalid(filename, "Path cannot be resolved inside the notes folder.")
        })?;
        if resolved.parent() != Some(canonical_root.as_path()) {
            log::warn!(
                "[NOTES] Rejected '{}': resolves outside notes root to {}",
                filename,
                resolved.display()
            );
            return Err(NoteError::invalid(
                filename,
                "Path resolves outside the notes folder.",
            ));
        }
    }

    Ok(candidate)
}
