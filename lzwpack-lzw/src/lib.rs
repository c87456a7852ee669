//! # lzwpack-lzw: Fixed-Width LZW Compression
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression and decompression
//! for arbitrary byte streams, using fixed-width codes and a capped
//! dictionary.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Fixed-width codes**: Every code uses the same width (14 bits by default)
//! - **LSB-first packing**: Codes are packed low bit first, low byte first
//! - **Capped dictionary**: Once full, the dictionary simply stops growing
//! - **Streaming**: Works over any `Read`/`Write` pair with bounded memory
//!
//! ## Stream Format
//!
//! ```text
//! +----------------+------------------------------------------+
//! | header (4 B)   | codes, `code_bits` each, LSB-first       |
//! | u32 LE = 256   | last byte zero-padded in its high bits   |
//! +----------------+------------------------------------------+
//! ```
//!
//! - No clear codes and no end-of-information code: the stream ends where
//!   the bytes end
//! - The header records the initial dictionary size only; both sides must
//!   agree on `code_bits` and the dictionary cap out of band
//!
//! ## Example
//!
//! ```rust
//! use lzwpack_lzw::{compress_default, decompress_default};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress_default(original).unwrap();
//!
//! // Decompress
//! let decompressed = decompress_default(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use lzwpack_lzw::{LzwConfig, compress_stream, decompress_stream};
//!
//! let config = LzwConfig::new(12, 4096).unwrap();
//! let input = b"abracadabra abracadabra abracadabra".to_vec();
//!
//! let mut compressed = Vec::new();
//! let stats = compress_stream(&input[..], &mut compressed, config).unwrap();
//! assert_eq!(stats.bytes_in, input.len() as u64);
//!
//! let mut restored = Vec::new();
//! decompress_stream(&compressed[..], &mut restored, config).unwrap();
//! assert_eq!(restored, input);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod header;
mod index;
mod stats;

pub use config::{Code, INIT_DICT_SIZE, LzwConfig, MAX_CODE_BITS, MIN_CODE_BITS};
pub use decoder::LzwDecoder;
pub use dictionary::{DecodeDictionary, EncodeDictionary, EncodeEntry};
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};
pub use header::{HEADER_LEN, read_header, read_raw_header, write_header};
pub use index::LookupIndex;
pub use lzwpack_core::CancelToken;
pub use stats::CodecStats;

use std::io::{Read, Write};

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use lzwpack_lzw::{compress, LzwConfig};
///
/// let data = vec![b'X'; 1000];
/// let compressed = compress(&data, LzwConfig::DEFAULT).unwrap();
/// assert!(compressed.len() < data.len() / 4);
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwEncoder::new(config).encode(data)
}

/// Decompress an LZW stream produced with the same configuration.
///
/// # Example
///
/// ```rust
/// use lzwpack_lzw::{compress, decompress, LzwConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
/// let decompressed = decompress(&compressed, LzwConfig::DEFAULT).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(config).decode(data)
}

/// Compress everything `reader` yields into `writer`.
///
/// Returns the statistics of the run. `writer` receives the complete stream
/// (header included); wrap it in a `BufWriter` if it is unbuffered.
pub fn compress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: LzwConfig,
) -> Result<CodecStats> {
    LzwEncoder::new(config).encode_stream(reader, writer)
}

/// Decompress a complete stream from `reader` into `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: LzwConfig,
) -> Result<CodecStats> {
    LzwDecoder::new(config).decode_stream(reader, writer)
}

/// Compress with the default configuration (14-bit codes, 16384 entries).
///
/// This is equivalent to `compress(data, LzwConfig::DEFAULT)`.
pub fn compress_default(data: &[u8]) -> Result<Vec<u8>> {
    compress(data, LzwConfig::DEFAULT)
}

/// Decompress with the default configuration (14-bit codes, 16384 entries).
///
/// This is equivalent to `decompress(data, LzwConfig::DEFAULT)`.
pub fn decompress_default(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data, LzwConfig::DEFAULT)
}
