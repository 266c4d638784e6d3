//! NoteStore: read, write, list and delete confined to one notes directory
//!
//! Holds no note content in memory; every call goes to disk. There is no
//! store-wide lock, so operations on different notes never wait on each
//! other and concurrent writes to one note are last-writer-wins.

use super::sanitize::sanitize;
use super::{file_ops, NoteError};
use std::fs;
use std::path::{Path, PathBuf};

/// What a successful write persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Unicode scalar values written
    pub chars: usize,
    pub bytes: usize,
    /// False when an existing note was overwritten
    pub created: bool,
}

pub struct NoteStore {
    notes_dir: PathBuf,
    max_note_bytes: Option<usize>,
}

impl NoteStore {
    pub fn new(notes_dir: PathBuf, max_note_bytes: Option<usize>) -> Self {
        Self {
            notes_dir,
            max_note_bytes,
        }
    }

    /// Get the notes directory path
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn max_note_bytes(&self) -> Option<usize> {
        self.max_note_bytes
    }

    /// Create the notes directory if it is missing
    pub fn ensure_dir(&self) -> Result<(), NoteError> {
        fs::create_dir_all(&self.notes_dir)
            .map_err(|e| NoteError::io(&self.notes_dir.to_string_lossy(), e))
    }

    pub fn read(&self, filename: &str) -> Result<String, NoteError> {
        let path = sanitize(&self.notes_dir, filename)?;

        if fs::symlink_metadata(&path).is_ok() && !file_ops::is_note_file(&path) {
            // e.g. a directory with a note-like name
            return Err(NoteError::NotFound {
                filename: filename.to_string(),
            });
        }

        let bytes = file_ops::read_bytes(&path)
            .map_err(|e| NoteError::io(filename, e))?
            .ok_or_else(|| NoteError::NotFound {
                filename: filename.to_string(),
            })?;

        String::from_utf8(bytes).map_err(|_| NoteError::InvalidEncoding {
            filename: filename.to_string(),
        })
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<WriteOutcome, NoteError> {
        let path = sanitize(&self.notes_dir, filename)?;

        if let Some(max) = self.max_note_bytes {
            if content.len() > max {
                return Err(NoteError::TooLarge {
                    filename: filename.to_string(),
                    size: content.len(),
                    max,
                });
            }
        }

        self.ensure_dir()?;

        if path.is_dir() {
            return Err(NoteError::invalid(
                filename,
                "A folder with this name already exists.",
            ));
        }

        let created = !path.exists();
        file_ops::write_atomic(&path, content).map_err(|e| NoteError::io(filename, e))?;

        let outcome = WriteOutcome {
            chars: content.chars().count(),
            bytes: content.len(),
            created,
        };
        log::info!(
            "[NOTES] {} '{}' ({} bytes)",
            if created { "Created" } else { "Overwrote" },
            filename,
            outcome.bytes
        );
        Ok(outcome)
    }

    /// Note filenames in the root, sorted ascending
    pub fn list(&self) -> Result<Vec<String>, NoteError> {
        file_ops::list_note_names(&self.notes_dir)
            .map_err(|e| NoteError::io(&self.notes_dir.to_string_lossy(), e))
    }

    pub fn delete(&self, filename: &str) -> Result<(), NoteError> {
        let path = sanitize(&self.notes_dir, filename)?;

        if !file_ops::is_note_file(&path) {
            return Err(NoteError::NotFound {
                filename: filename.to_string(),
            });
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("[NOTES] Deleted '{}'", filename);
                Ok(())
            }
            // lost a race with another delete
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(NoteError::NotFound {
                filename: filename.to_string(),
            }),
            Err(e) => Err(NoteError::io(filename, e)),
        }
    }

    #[cfg(test)]
    pub fn exists(&self, filename: &str) -> bool {
        sanitize(&self.notes_dir, filename)
            .map(|p| file_ops::is_note_file(&p))
            .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.list().map(|names| names.len()).unwrap_or(0)
    }
}
