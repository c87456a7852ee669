//! LZW configuration: code width and dictionary cap.

use crate::error::{LzwError, Result};

/// A dictionary code.
pub type Code = u32;

/// Number of single-byte root entries seeded into every dictionary.
///
/// This is also the value stored in the stream header.
pub const INIT_DICT_SIZE: usize = 256;

/// Narrowest supported code width. Anything smaller cannot address a single
/// non-root entry.
pub const MIN_CODE_BITS: u8 = 9;

/// Widest supported code width.
pub const MAX_CODE_BITS: u8 = 24;

/// LZW configuration parameters.
///
/// Both sides of a stream must use the same configuration; the header only
/// carries [`INIT_DICT_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Width of every code in bits.
    code_bits: u8,
    /// Maximum number of dictionary entries, roots included.
    max_dict_size: usize,
}

impl LzwConfig {
    /// Default configuration: 14-bit codes, 16384 entries.
    pub const DEFAULT: Self = Self {
        code_bits: 14,
        max_dict_size: 1 << 14,
    };

    /// Create a validated configuration.
    ///
    /// Requires `MIN_CODE_BITS <= code_bits <= MAX_CODE_BITS` and
    /// `INIT_DICT_SIZE <= max_dict_size <= 2^code_bits`.
    pub fn new(code_bits: u8, max_dict_size: usize) -> Result<Self> {
        if !(MIN_CODE_BITS..=MAX_CODE_BITS).contains(&code_bits) {
            return Err(LzwError::invalid_config(
                code_bits,
                max_dict_size,
                "code width must be between 9 and 24 bits",
            ));
        }
        if max_dict_size < INIT_DICT_SIZE {
            return Err(LzwError::invalid_config(
                code_bits,
                max_dict_size,
                "dictionary must hold at least the 256 root entries",
            ));
        }
        if max_dict_size > 1usize << code_bits {
            return Err(LzwError::invalid_config(
                code_bits,
                max_dict_size,
                "dictionary size exceeds what the code width can address",
            ));
        }

        Ok(Self {
            code_bits,
            max_dict_size,
        })
    }

    /// Configuration using every code the width can address.
    pub fn with_code_bits(code_bits: u8) -> Result<Self> {
        if !(MIN_CODE_BITS..=MAX_CODE_BITS).contains(&code_bits) {
            return Err(LzwError::invalid_config(
                code_bits,
                0,
                "code width must be between 9 and 24 bits",
            ));
        }
        Self::new(code_bits, 1usize << code_bits)
    }

    /// Width of every code in bits.
    pub fn code_bits(&self) -> u8 {
        self.code_bits
    }

    /// Maximum number of dictionary entries, roots included.
    pub fn max_dict_size(&self) -> usize {
        self.max_dict_size
    }

    /// Number of entries that can be added beyond the roots.
    pub fn growable_entries(&self) -> usize {
        self.max_dict_size - INIT_DICT_SIZE
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
