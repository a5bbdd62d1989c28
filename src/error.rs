//! Error type shared by the line processor, the translation service and its backends.

use std::io;

use thiserror::Error;

/// Result alias used throughout the translation core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop a translation run.
///
/// Unmatched quotes are deliberately absent: a line with a single `"` is passed through.
#[derive(Debug, Error)]
pub enum Error {
    /// The target language string is not a well-formed language tag.
    #[error("Invalid language tag: '{tag}' ({reason})")]
    InvalidLanguageTag { tag: String, reason: String },

    /// The translation backend could not be set up.
    #[error("Translation backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A single translation call failed. The message comes from the backend as-is.
    #[error("{0}")]
    TranslationFailed(String),

    /// The provider answered, but with no translation at all.
    #[error("Translation returned an empty response for text: {text}")]
    EmptyTranslationResponse { text: String },

    /// The input stream failed while reading `line` (1-based).
    #[error("Failed to read input at line {line}: {source}")]
    StreamRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// Line `line` is longer than `limit` bytes.
    #[error("Failed to read input at line {line}: line too long (limit is {limit} bytes)")]
    LineTooLong { line: usize, limit: usize },

    /// Line `line` is not valid UTF-8.
    #[error("Failed to read input at line {line}: input is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    /// Writing line `line` to the output failed.
    #[error("Failed to write output at line {line}: {source}")]
    StreamWrite {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// The service was already closed.
    #[error("Translation service is closed")]
    ServiceClosed,

    /// The run was interrupted.
    #[error("Translation cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` for failures of the input stream.
    pub const fn is_stream_read(&self) -> bool {
        matches!(
            self,
            Self::StreamRead { .. } | Self::LineTooLong { .. } | Self::InvalidUtf8 { .. }
        )
    }

    /// Returns `true` for failures reported by (or about) the translation backend.
    pub const fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable(_)
                | Self::TranslationFailed(_)
                | Self::EmptyTranslationResponse { .. }
        )
    }
}
