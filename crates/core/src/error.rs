//! Error types shared by the reader, writer and editor.

use std::path::PathBuf;

/// Broad classification of an [`Error`], for callers that only care about
/// which boundary failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File system or stream failure.
    Io,
    /// The input does not follow the SRT grammar, or its numbering has no
    /// room left for an edit.
    Format,
    /// An editor operation referenced a subtitle number that is not present.
    NotFound,
}

/// Errors produced while reading, editing or writing subtitles.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A grammar violation, tagged with the 1-based line it was found on.
    #[error("[Line: {line}] {message}")]
    Format { line: usize, message: String },

    /// A timestamp that is not exactly `HH:MM:SS,mmm`.
    #[error("{0:?} is not a valid HH:MM:SS,mmm time")]
    InvalidTime(String),

    #[error("subtitle {0} could not be found")]
    NotFound(u32),

    /// Renumbering would move subtitle `u32::MAX` past the largest number.
    #[error("subtitle {0} cannot be renumbered past {max}", max = u32::MAX)]
    NumberOverflow(u32),
}

impl Error {
    pub fn format<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile(_) | Self::NotAFile(_) | Self::Io(_) => ErrorKind::Io,
            Self::Format { .. } | Self::InvalidTime(_) | Self::NumberOverflow(_) => {
                ErrorKind::Format
            }
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Line number for grammar violations found by the reader.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display() {
        let err = Error::format(3, "Missing subtitle text information");
        assert_eq!(err.to_string(), "[Line: 3] Missing subtitle text information");
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(Error::NotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(Error::NotFound(7).to_string(), "subtitle 7 could not be found");
        assert_eq!(
            Error::MissingFile(PathBuf::from("foo.srt")).kind(),
            ErrorKind::Io
        );
        assert_eq!(Error::InvalidTime("x".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::InvalidTime("x".into()).line(), None);
    }

    #[test]
    fn number_overflow_display() {
        let err = Error::NumberOverflow(u32::MAX);
        assert_eq!(
            err.to_string(),
            "subtitle 4294967295 cannot be renumbered past 4294967295"
        );
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
