//! Fixed-width code I/O over byte streams.
//!
//! This module provides `CodeWriter` and `CodeReader`, which pack and unpack
//! codes of a constant bit width across byte boundaries.
//!
//! # Bit Ordering
//!
//! Codes are LSB-first: the least significant bit of a code is stored first,
//! and bytes are filled starting from their least significant bit. The final
//! byte of a stream is zero-padded in its high bits.
//!
//! # Example
//!
//! ```
//! use lzwpack_core::bitstream::{CodeReader, CodeWriter};
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = CodeWriter::new(&mut output, 14);
//!     writer.write_code(65).unwrap();
//!     writer.write_code(66).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, [0x41, 0x80, 0x10, 0x00]);
//!
//! let mut reader = CodeReader::new(&output[..], 14);
//! assert_eq!(reader.read_code().unwrap(), Some(65));
//! assert_eq!(reader.read_code().unwrap(), Some(66));
//! assert_eq!(reader.read_code().unwrap(), None);
//! ```

use crate::error::{PackError, Result};
use std::io::{ErrorKind, Read, Write};

/// Widest code the bit buffers can carry.
pub const MAX_CODE_BITS: u8 = 32;

#[inline]
fn code_mask(code_bits: u8) -> u64 {
    (1u64 << code_bits) - 1
}

/// A fixed-width code writer that wraps any `Write` implementation.
///
/// Complete bytes are pushed to the sink as soon as they are available.
/// Call `flush()` when done to emit the last partial byte.
#[derive(Debug)]
pub struct CodeWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Width of every code in bits.
    code_bits: u8,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Codes accepted so far.
    codes_written: u64,
    /// Bytes handed to the underlying writer so far.
    bytes_written: u64,
}

impl<W: Write> CodeWriter<W> {
    /// Create a new `CodeWriter` emitting `code_bits`-wide codes.
    pub fn new(writer: W, code_bits: u8) -> Self {
        debug_assert!(
            (1..=MAX_CODE_BITS).contains(&code_bits),
            "code width must be 1..=32 bits"
        );
        Self {
            writer,
            code_bits,
            buffer: 0,
            bits_in_buffer: 0,
            codes_written: 0,
            bytes_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Width of every code in bits.
    pub fn code_bits(&self) -> u8 {
        self.code_bits
    }

    /// Number of codes written so far.
    pub fn codes_written(&self) -> u64 {
        self.codes_written
    }

    /// Number of bytes emitted to the underlying writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Append the low `code_bits` bits of `code` to the stream.
    #[inline]
    pub fn write_code(&mut self, code: u32) -> Result<()> {
        let value = code as u64 & code_mask(self.code_bits);
        self.buffer |= value << self.bits_in_buffer;
        self.bits_in_buffer += self.code_bits;
        self.codes_written += 1;

        self.flush_bytes()
    }

    /// Push every complete byte in the buffer to the writer, lowest first.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        let mut bytes = [0u8; 8];
        let mut count = 0;
        while self.bits_in_buffer >= 8 {
            bytes[count] = (self.buffer & 0xFF) as u8;
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
            count += 1;
        }

        if count > 0 {
            self.writer
                .write_all(&bytes[..count])
                .map_err(PackError::Write)?;
            self.bytes_written += count as u64;
        }
        Ok(())
    }

    /// Emit any remaining partial byte, zero-padded in its high bits, and
    /// flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let byte = (self.buffer & 0xFF) as u8;
            self.writer.write_all(&[byte]).map_err(PackError::Write)?;
            self.bytes_written += 1;
        }
        self.buffer = 0;
        self.bits_in_buffer = 0;

        self.writer.flush().map_err(PackError::Write)
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

/// A fixed-width code reader that wraps any `Read` implementation.
///
/// Distinguishes a clean end of stream (no bits left, or only zero padding)
/// from a truncated one (leftover bits that are not all zero).
#[derive(Debug)]
pub struct CodeReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Width of every code in bits.
    code_bits: u8,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits consumed as codes (for error reporting).
    total_bits_read: u64,
    /// Bytes pulled from the underlying reader.
    bytes_read: u64,
}

impl<R: Read> CodeReader<R> {
    /// Create a new `CodeReader` extracting `code_bits`-wide codes.
    pub fn new(reader: R, code_bits: u8) -> Self {
        debug_assert!(
            (1..=MAX_CODE_BITS).contains(&code_bits),
            "code width must be 1..=32 bits"
        );
        Self {
            reader,
            code_bits,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
            bytes_read: 0,
        }
    }

    /// Consume this `CodeReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Width of every code in bits.
    pub fn code_bits(&self) -> u8 {
        self.code_bits
    }

    /// Get the current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of bytes pulled from the underlying reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Read one byte, retrying on `Interrupted`.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PackError::Read(e)),
            }
        }
    }

    /// Decide what an exhausted source with a partial buffer means.
    fn finish(&mut self) -> Result<Option<u32>> {
        if self.bits_in_buffer > 0 && self.buffer != 0 {
            return Err(PackError::trailing_bits(self.bits_in_buffer, self.buffer));
        }

        self.buffer = 0;
        self.bits_in_buffer = 0;
        Ok(None)
    }

    /// Read the next code.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    #[inline]
    pub fn read_code(&mut self) -> Result<Option<u32>> {
        while self.bits_in_buffer < self.code_bits {
            match self.next_byte()? {
                Some(byte) => {
                    self.buffer |= (byte as u64) << self.bits_in_buffer;
                    self.bits_in_buffer += 8;
                }
                None => return self.finish(),
            }
        }

        let code = (self.buffer & code_mask(self.code_bits)) as u32;
        self.buffer >>= self.code_bits;
        self.bits_in_buffer -= self.code_bits;
        self.total_bits_read += self.code_bits as u64;

        Ok(Some(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn write_all(codes: &[u32], code_bits: u8) -> Vec<u8> {
        let mut output = Vec::new();
        {
            let mut writer = CodeWriter::new(&mut output, code_bits);
            for &code in codes {
                writer.write_code(code).unwrap();
            }
            writer.flush().unwrap();
        }
        output
    }

    fn read_all(data: &[u8], code_bits: u8) -> Vec<u32> {
        let mut reader = CodeReader::new(Cursor::new(data), code_bits);
        let mut codes = Vec::new();
        while let Some(code) = reader.read_code().unwrap() {
            codes.push(code);
        }
        codes
    }

    #[test]
    fn test_writer_layout_14_bits() {
        // 65 fills byte 0, 66 straddles bytes 1..3, 4 bits of padding.
        assert_eq!(write_all(&[65, 66], 14), vec![0x41, 0x80, 0x10, 0x00]);
    }

    #[test]
    fn test_writer_masks_high_bits() {
        // Only the low 9 bits of 0xFFFF survive.
        let output = write_all(&[0xFFFF], 9);
        assert_eq!(output, vec![0xFF, 0x01]);
    }

    #[test]
    fn test_byte_aligned_stream_has_no_padding() {
        // 4 codes * 14 bits = 56 bits = 7 bytes exactly.
        let output = write_all(&[1, 2, 3, 4], 14);
        assert_eq!(output.len(), 7);
        assert_eq!(read_all(&output, 14), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_roundtrip_various_widths() {
        for code_bits in [9u8, 12, 14, 16, 20, 24] {
            let max = (1u32 << code_bits) - 1;
            let codes: Vec<u32> = vec![0, 1, 255, 256, max / 2, max, 0, max];
            let output = write_all(&codes, code_bits);
            assert_eq!(read_all(&output, code_bits), codes, "width {}", code_bits);
        }
    }

    #[test]
    fn test_zero_code_is_not_padding() {
        // A whole zero code must come back even though its bits are all zero.
        let output = write_all(&[7, 0], 12);
        assert_eq!(read_all(&output, 12), vec![7, 0]);
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = CodeReader::new(Cursor::new(Vec::<u8>::new()), 14);
        assert_eq!(reader.read_code().unwrap(), None);
        assert_eq!(reader.read_code().unwrap(), None);
    }

    #[test]
    fn test_nonzero_trailing_bits_rejected() {
        let data = [0x41, 0x80, 0x10, 0xF0];
        let mut reader = CodeReader::new(Cursor::new(data), 14);
        assert_eq!(reader.read_code().unwrap(), Some(65));
        assert_eq!(reader.read_code().unwrap(), Some(66));

        match reader.read_code() {
            Err(PackError::TrailingBits { bits, value }) => {
                assert_eq!(bits, 4);
                assert_eq!(value, 0xF);
            }
            other => panic!("expected TrailingBits, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_stream_rejected() {
        // Drop the last byte of a 3-code stream: the partial third code is nonzero.
        let mut output = write_all(&[300, 301, 302], 14);
        output.pop();
        let mut reader = CodeReader::new(Cursor::new(output), 14);
        assert_eq!(reader.read_code().unwrap(), Some(300));
        assert_eq!(reader.read_code().unwrap(), Some(301));
        assert!(reader.read_code().unwrap_err().is_corrupt_stream());
    }

    #[test]
    fn test_counters() {
        let mut output = Vec::new();
        let mut writer = CodeWriter::new(&mut output, 14);
        writer.write_code(1).unwrap();
        writer.write_code(2).unwrap();
        assert_eq!(writer.codes_written(), 2);
        assert_eq!(writer.bytes_written(), 3);
        writer.flush().unwrap();
        assert_eq!(writer.bytes_written(), 4);

        let mut reader = CodeReader::new(Cursor::new(output), 14);
        reader.read_code().unwrap();
        assert_eq!(reader.bit_position(), 14);
        assert_eq!(reader.bytes_read(), 2);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut writer = CodeWriter::new(FailingWriter, 14);
        let err = writer.write_code(65).unwrap_err();
        assert!(matches!(err, PackError::Write(_)));
    }

    struct InterruptOnce {
        inner: Cursor<Vec<u8>>,
        interrupted: bool,
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let data = write_all(&[1000], 14);
        let source = InterruptOnce {
            inner: Cursor::new(data),
            interrupted: false,
        };
        let mut reader = CodeReader::new(source, 14);
        assert_eq!(reader.read_code().unwrap(), Some(1000));
    }
}
