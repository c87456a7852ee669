//! Error types for bit-level stream operations.
//!
//! `PackError` covers everything that can go wrong below the codec: opening
//! the byte source or sink, failures while reading or writing it, a stream
//! whose final partial code is not encoder padding, and cooperative
//! cancellation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for lzwpack stream operations.
#[derive(Debug, Error)]
pub enum PackError {
    /// The byte source or sink could not be opened.
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from the byte source failed mid-stream.
    #[error("Read error: {0}")]
    Read(#[source] io::Error),

    /// Writing to the byte sink failed mid-stream.
    #[error("Write error: {0}")]
    Write(#[source] io::Error),

    /// The stream ended with leftover bits that are not zero padding.
    #[error("Truncated code stream: {bits} trailing bits with value {value:#x}")]
    TrailingBits {
        /// Number of leftover bits in the buffer.
        bits: u8,
        /// Value of the leftover bits.
        value: u64,
    },

    /// The operation was cancelled through a [`CancelToken`](crate::CancelToken).
    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type alias for lzwpack stream operations.
pub type Result<T> = std::result::Result<T, PackError>;

impl PackError {
    /// Create an open error for `path`.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a trailing-bits error.
    pub fn trailing_bits(bits: u8, value: u64) -> Self {
        Self::TrailingBits { bits, value }
    }

    /// Returns `true` if the error came from the byte source or sink.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read(_) | Self::Write(_))
    }

    /// Returns `true` if the error means the input stream is corrupt.
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(self, Self::TrailingBits { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PackError::trailing_bits(5, 0x13);
        assert!(err.to_string().contains("5 trailing bits"));
        assert!(err.is_corrupt_stream());
        assert!(!err.is_io());

        let err = PackError::open(
            "missing.bin",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("missing.bin"));
        assert!(err.is_io());
    }

    #[test]
    fn test_cancelled_is_neither_io_nor_corrupt() {
        let err = PackError::Cancelled;
        assert!(!err.is_io());
        assert!(!err.is_corrupt_stream());
        assert_eq!(err.to_string(), "Operation cancelled");
    }
}
