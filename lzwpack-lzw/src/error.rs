//! LZW-specific error types.

use lzwpack_core::PackError;
use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Code width or dictionary size out of range.
    #[error("Invalid configuration ({code_bits}-bit codes, {max_dict_size} entries): {reason}")]
    InvalidConfig {
        /// Requested code width.
        code_bits: u8,
        /// Requested dictionary cap.
        max_dict_size: usize,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// Stream header does not hold the expected initial dictionary size.
    #[error("Header mismatch: expected initial dictionary size {expected}, found {found}")]
    HeaderMismatch {
        /// Value this decoder was built for.
        expected: u32,
        /// Value stored in the stream.
        found: u32,
    },

    /// Stream ended inside the header.
    #[error("Truncated header: {found} of 4 bytes present")]
    TruncatedHeader {
        /// Number of header bytes read before end of stream.
        found: usize,
    },

    /// A code that no valid encoder could have produced at this point.
    #[error("Invalid LZW code {code} at bit position {position} (dictionary size {dict_size})")]
    InvalidCode {
        /// The offending code.
        code: u32,
        /// Decoder dictionary size when the code was read.
        dict_size: usize,
        /// Bit position of the code in the payload.
        position: u64,
    },

    /// Bit-level stream or I/O failure.
    #[error(transparent)]
    Pack(#[from] PackError),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

impl LzwError {
    pub(crate) fn invalid_config(code_bits: u8, max_dict_size: usize, reason: &'static str) -> Self {
        Self::InvalidConfig {
            code_bits,
            max_dict_size,
            reason,
        }
    }

    /// Returns `true` if the input stream is corrupt or truncated.
    pub fn is_corrupt_stream(&self) -> bool {
        match self {
            Self::InvalidCode { .. } | Self::TruncatedHeader { .. } => true,
            Self::Pack(e) => e.is_corrupt_stream(),
            _ => false,
        }
    }

    /// Returns `true` if the byte source or sink failed.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Pack(e) if e.is_io())
    }

    /// Returns `true` if the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Pack(PackError::Cancelled))
    }
}
