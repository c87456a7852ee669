//! # lzwpack Core
//!
//! Core components for the lzwpack compressor.
//!
//! This crate provides the building blocks the LZW codec sits on:
//!
//! - [`bitstream`]: fixed-width code I/O across byte boundaries
//! - [`cancel`]: cooperative cancellation for long-running calls
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     compress / decompress / test / info                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec (lzwpack-lzw)                                     │
//! │     header, dictionaries, lookup index, encoder/decoder │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     CodeReader/CodeWriter, CancelToken, PackError       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lzwpack_core::bitstream::{CodeReader, CodeWriter};
//!
//! let mut output = Vec::new();
//! let mut writer = CodeWriter::new(&mut output, 12);
//! writer.write_code(0xABC).unwrap();
//! writer.flush().unwrap();
//!
//! let mut reader = CodeReader::new(&output[..], 12);
//! assert_eq!(reader.read_code().unwrap(), Some(0xABC));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod cancel;
pub mod error;

// Re-exports for convenience
pub use bitstream::{CodeReader, CodeWriter, MAX_CODE_BITS};
pub use cancel::CancelToken;
pub use error::{PackError, Result};
