use std::fmt;
use std::io;

/// Failure of a note store operation
#[derive(Debug)]
pub enum NoteError {
    /// Filename failed validation or resolved outside the notes root
    InvalidFilename { filename: String, reason: String },
    /// Read or delete of a note that does not exist
    NotFound { filename: String },
    /// Write rejected by the configured maximum note size
    TooLarge {
        filename: String,
        size: usize,
        max: usize,
    },
    /// Note exists but its bytes are not valid UTF-8
    InvalidEncoding { filename: String },
    /// Unexpected filesystem failure (permissions, disk full, ...)
    Io { filename: String, source: io::Error },
}

impl NoteError {
    pub fn invalid(filename: &str, reason: impl Into<String>) -> Self {
        NoteError::InvalidFilename {
            filename: filename.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(filename: &str, source: io::Error) -> Self {
        NoteError::Io {
            filename: filename.to_string(),
            source,
        }
    }

    /// Errors the caller caused and can fix by changing the request.
    /// Everything else is an internal failure.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, NoteError::Io { .. })
    }
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::InvalidFilename { filename, reason } => {
                write!(f, "Invalid filename '{}': {}", filename, reason)
            }
            NoteError::NotFound { filename } => write!(f, "Note '{}' not found", filename),
            NoteError::TooLarge {
                filename,
                size,
                max,
            } => write!(
                f,
                "Note '{}' is too large ({} bytes, maximum is {} bytes)",
                filename, size, max
            ),
            NoteError::InvalidEncoding { filename } => write!(
                f,
                "Cannot read '{}'. The file contains invalid characters.",
                filename
            ),
            NoteError::Io { filename, source } => {
                write!(f, "Filesystem error on '{}': {}", filename, source)
            }
        }
    }
}

impl std::error::Error for NoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NoteError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
