//! # Deck Error Types
//!
//! All errors that can occur while configuring or binding the deck.
//!
//! Unparseable metric text is NOT an error: the element keeps its static
//! text and no animation is started.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the deck runtime.
#[derive(Error, Debug)]
pub enum DeckError {
    /// A configuration or page file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration or page file is not valid TOML for its schema.
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configuration value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The page model references an element that does not exist.
    #[error("unknown element: {0}")]
    UnknownElement(u32),

    /// The host environment refused a DOM operation.
    #[error("dom binding failed: {0}")]
    Dom(String),
}

impl DeckError {
    /// Wraps an I/O error with the path that produced it.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;
