//! Error types for the objinv-core library.
//!
//! This module provides error handling using the `thiserror` crate. The
//! taxonomy is deliberately small: building an inventory is pure in-memory
//! work and cannot fail, so the only failure mode left is the compressor
//! acting up while the body is encoded.

use thiserror::Error;

/// Result type alias for objinv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all objinv operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Compressing the inventory body failed
    ///
    /// The compressor receives well-formed text, so this is a defensive
    /// variant rather than an expected condition. There is nothing transient
    /// to retry; the failure is surfaced to the caller unchanged.
    #[error("failed to compress inventory body: {source}")]
    Compress {
        /// Underlying I/O error reported by the compressor
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new compression error
    pub fn compress(source: std::io::Error) -> Self {
        Self::Compress { source }
    }
}
