//! LZW encoder (compression).

use crate::config::{Code, LzwConfig};
use crate::dictionary::EncodeDictionary;
use crate::error::Result;
use crate::header::{HEADER_LEN, write_header};
use crate::stats::CodecStats;
use log::{debug, trace};
use lzwpack_core::{CancelToken, CodeWriter, PackError};
use std::io::{BufReader, Read, Write};
use std::time::Instant;

/// LZW encoder for compression.
///
/// The encoder holds only configuration; every call builds its own
/// dictionary and index, so one encoder can serve many independent runs.
#[derive(Debug, Clone, Default)]
pub struct LzwEncoder {
    config: LzwConfig,
    cancel: Option<CancelToken>,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Check `token` once per input byte and stop with
    /// `PackError::Cancelled` when it fires.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Encode an in-memory buffer.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(HEADER_LEN + input.len() / 2);
        self.encode_stream(input, &mut output)?;
        Ok(output)
    }

    /// Encode everything `reader` yields into `writer`.
    ///
    /// # Algorithm
    ///
    /// Greedy longest match over the dictionary:
    /// 1. Seed the dictionary with the 256 single-byte codes
    /// 2. `W` = code of the first byte (empty input emits no codes)
    /// 3. For each next byte `k`: if `W+k` is known, `W` becomes its code;
    ///    otherwise emit `W`, add `W+k` (unless full) and restart at `k`
    /// 4. Emit the final `W` and flush the zero-padded last byte
    ///
    /// The writer receives the header first. On error the output is
    /// incomplete and must be discarded.
    pub fn encode_stream<R: Read, W: Write>(&self, reader: R, mut writer: W) -> Result<CodecStats> {
        let start = Instant::now();
        let mut dict = EncodeDictionary::new(&self.config);

        write_header(&mut writer)?;
        let mut codes = CodeWriter::new(writer, self.config.code_bits());

        let mut input = BufReader::new(reader).bytes();
        let mut bytes_in = 0u64;
        let mut longest_match = 0usize;
        let mut full_logged = false;

        let mut current: Code = match input.next() {
            Some(byte) => {
                bytes_in += 1;
                byte.map_err(PackError::Read)? as Code
            }
            None => {
                codes.flush()?;
                debug!("encoded empty input into header-only stream");
                return Ok(CodecStats {
                    bytes_out: HEADER_LEN as u64,
                    dict_peak: dict.len(),
                    elapsed: start.elapsed(),
                    ..Default::default()
                });
            }
        };

        for byte in input {
            if let Some(token) = &self.cancel {
                token.check()?;
            }
            let byte = byte.map_err(PackError::Read)?;
            bytes_in += 1;

            if let Some(code) = dict.find(current, byte) {
                current = code;
                continue;
            }

            codes.write_code(current)?;
            longest_match = longest_match.max(dict.sequence_len(current).unwrap_or(0));

            if let Some(code) = dict.insert(current, byte) {
                trace!("code {} = code {} + {:#04x}", code, current, byte);
            } else if !full_logged {
                full_logged = true;
                debug!(
                    "dictionary full at {} entries after {} input bytes",
                    dict.len(),
                    bytes_in
                );
            }
            current = byte as Code;
        }

        codes.write_code(current)?;
        longest_match = longest_match.max(dict.sequence_len(current).unwrap_or(0));
        codes.flush()?;

        let stats = CodecStats {
            bytes_in,
            bytes_out: HEADER_LEN as u64 + codes.bytes_written(),
            codes: codes.codes_written(),
            dict_peak: dict.len(),
            longest_match,
            elapsed: start.elapsed(),
        };
        debug!(
            "encoded {} bytes into {} codes ({} bytes), dictionary {} entries",
            stats.bytes_in, stats.codes, stats.bytes_out, stats.dict_peak
        );
        Ok(stats)
    }
}
