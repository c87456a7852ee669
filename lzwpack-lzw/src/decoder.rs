//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one step behind it: the
//! entry the encoder adds while emitting code `i` is added here right after
//! code `i + 1` is resolved. The only code that can refer to an entry the
//! decoder has not built yet is the one equal to the current dictionary
//! size (the "KwKwK" case), and its string is fully determined by the
//! previous code.

use crate::config::{Code, LzwConfig};
use crate::dictionary::DecodeDictionary;
use crate::error::{LzwError, Result};
use crate::header::{HEADER_LEN, read_header};
use crate::stats::CodecStats;
use log::{debug, trace};
use lzwpack_core::{CancelToken, CodeReader, PackError};
use std::io::{BufReader, Read, Write};
use std::time::Instant;

/// LZW decoder for decompression.
#[derive(Debug, Clone, Default)]
pub struct LzwDecoder {
    config: LzwConfig,
    cancel: Option<CancelToken>,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Check `token` once per code and stop with `PackError::Cancelled`
    /// when it fires.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Decode an in-memory stream.
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 2);
        self.decode_stream(input, &mut output)?;
        Ok(output)
    }

    /// Decode a complete stream from `reader` into `writer`.
    ///
    /// Bytes are written as soon as each code is resolved; wrap `writer` in a
    /// `BufWriter` for unbuffered sinks. On error the output written so far
    /// is unusable.
    pub fn decode_stream<R: Read, W: Write>(&self, reader: R, mut writer: W) -> Result<CodecStats> {
        let start = Instant::now();
        let code_bits = self.config.code_bits();

        let mut reader = BufReader::new(reader);
        read_header(&mut reader)?;
        let mut codes = CodeReader::new(reader, code_bits);
        let mut dict = DecodeDictionary::new(&self.config);

        let mut stats = CodecStats::default();
        let invalid = |code: Code, dict_size: usize, codes: &CodeReader<_>| LzwError::InvalidCode {
            code,
            dict_size,
            position: codes.bit_position() - code_bits as u64,
        };

        // AwaitingFirstCode: only a root can come first.
        let Some(first) = codes.read_code()? else {
            writer.flush().map_err(PackError::Write)?;
            debug!("decoded header-only stream");
            stats.bytes_in = HEADER_LEN as u64 + codes.bytes_read();
            stats.dict_peak = dict.len();
            stats.elapsed = start.elapsed();
            return Ok(stats);
        };
        let seq = dict
            .get(first)
            .ok_or_else(|| invalid(first, dict.len(), &codes))?;
        writer.write_all(seq).map_err(PackError::Write)?;
        stats.bytes_out += seq.len() as u64;
        stats.longest_match = seq.len();
        stats.codes = 1;

        // Running: resolve each code against the previous one.
        let mut prev = first;
        while let Some(code) = codes.read_code()? {
            if let Some(token) = &self.cancel {
                token.check()?;
            }

            let dict_size = dict.len();
            let (first_byte, len) = if let Some(seq) = dict.get(code) {
                writer.write_all(seq).map_err(PackError::Write)?;
                (seq[0], seq.len())
            } else if code as usize == dict_size && !dict.is_full() {
                // KwKwK: the string is prev + first byte of prev.
                let prev_seq = dict
                    .get(prev)
                    .ok_or_else(|| invalid(prev, dict_size, &codes))?;
                let first_byte = prev_seq[0];
                writer.write_all(prev_seq).map_err(PackError::Write)?;
                writer.write_all(&[first_byte]).map_err(PackError::Write)?;
                trace!("code {} resolved from unfinished entry", code);
                (first_byte, prev_seq.len() + 1)
            } else {
                return Err(invalid(code, dict_size, &codes));
            };

            stats.bytes_out += len as u64;
            stats.longest_match = stats.longest_match.max(len);
            stats.codes += 1;

            dict.insert(prev, first_byte);
            prev = code;
        }

        writer.flush().map_err(PackError::Write)?;

        stats.bytes_in = HEADER_LEN as u64 + codes.bytes_read();
        stats.dict_peak = dict.len();
        stats.elapsed = start.elapsed();
        debug!(
            "decoded {} codes into {} bytes, dictionary {} entries",
            stats.codes, stats.bytes_out, stats.dict_peak
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;
    use crate::header::write_header;
    use lzwpack_core::CodeWriter;

    /// Build a stream from an explicit code sequence.
    fn stream_of(codes: &[Code], code_bits: u8) -> Vec<u8> {
        let mut output = Vec::new();
        write_header(&mut output).unwrap();
        let mut writer = CodeWriter::new(&mut output, code_bits);
        for &code in codes {
            writer.write_code(code).unwrap();
        }
        writer.flush().unwrap();
        output
    }

    #[test]
    fn test_decode_abababab_codes() {
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let stream = stream_of(&[65, 66, 256, 258, 66], 14);
        assert_eq!(decoder.decode(&stream).unwrap(), b"ABABABAB");
    }

    #[test]
    fn test_decode_kwkwk_run() {
        // "AAAAAA": 65, then 256 (= "AA") before the decoder has built it.
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let stream = stream_of(&[65, 256, 257], 14);
        assert_eq!(decoder.decode(&stream).unwrap(), b"AAAAAA");
    }

    #[test]
    fn test_decode_header_only() {
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let mut output = Vec::new();
        let stats = decoder
            .decode_stream(&[0x00, 0x01, 0x00, 0x00][..], &mut output)
            .unwrap();
        assert!(output.is_empty());
        assert_eq!(stats.codes, 0);
        assert_eq!(stats.bytes_in, 4);
    }

    #[test]
    fn test_decode_rejects_non_root_first_code() {
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let stream = stream_of(&[256], 14);
        match decoder.decode(&stream) {
            Err(LzwError::InvalidCode {
                code,
                dict_size,
                position,
            }) => {
                assert_eq!(code, 256);
                assert_eq!(dict_size, 256);
                assert_eq!(position, 0);
            }
            other => panic!("expected InvalidCode, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_code_beyond_dictionary() {
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        // After one code the decoder holds 256 entries; 257 is out of reach.
        let stream = stream_of(&[65, 257], 14);
        match decoder.decode(&stream) {
            Err(LzwError::InvalidCode {
                code, position, ..
            }) => {
                assert_eq!(code, 257);
                assert_eq!(position, 14);
            }
            other => panic!("expected InvalidCode, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_kwkwk_when_full() {
        // Cap 257: the first new entry fills the table, so code 257 is never valid.
        let config = LzwConfig::new(9, 257).unwrap();
        let decoder = LzwDecoder::new(config);
        let stream = stream_of(&[65, 66, 256, 257], 9);
        let err = decoder.decode(&stream).unwrap_err();
        assert!(err.is_corrupt_stream());
    }

    #[test]
    fn test_decode_header_mismatch() {
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let mut stream = stream_of(&[65], 14);
        stream[0] = 0xFF;
        assert!(matches!(
            decoder.decode(&stream),
            Err(LzwError::HeaderMismatch {
                expected: 256,
                found: 0x1FF
            })
        ));
    }

    #[test]
    fn test_decode_trailing_garbage() {
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let mut stream = stream_of(&[65, 66], 14);
        // Set a bit inside the 4 padding bits of the last byte.
        *stream.last_mut().unwrap() |= 0x80;
        let err = decoder.decode(&stream).unwrap_err();
        assert!(matches!(err, LzwError::Pack(PackError::TrailingBits { .. })));
    }

    #[test]
    fn test_decode_stats_mirror_encode() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT";
        let encoder = LzwEncoder::new(LzwConfig::DEFAULT);
        let mut compressed = Vec::new();
        let enc = encoder.encode_stream(&data[..], &mut compressed).unwrap();

        let decoder = LzwDecoder::new(LzwConfig::DEFAULT);
        let mut output = Vec::new();
        let dec = decoder.decode_stream(&compressed[..], &mut output).unwrap();

        assert_eq!(output, data);
        assert_eq!(dec.codes, enc.codes);
        assert_eq!(dec.bytes_in, enc.bytes_out);
        assert_eq!(dec.bytes_out, enc.bytes_in);
        assert_eq!(dec.longest_match, enc.longest_match);
        // Both sides add one entry per code after the first.
        assert_eq!(dec.dict_peak, enc.dict_peak);
    }

    #[test]
    fn test_decode_cancelled() {
        let token = CancelToken::new();
        let decoder = LzwDecoder::new(LzwConfig::DEFAULT).with_cancel(token.clone());
        let stream = stream_of(&[65, 66, 67], 14);
        token.cancel();
        assert!(decoder.decode(&stream).unwrap_err().is_cancelled());
    }
}
