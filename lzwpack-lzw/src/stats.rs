//! Per-run statistics handed to reporting code.

use std::time::Duration;

/// Metrics collected by one encode or decode call.
///
/// For encoding `bytes_in` is the raw input and `bytes_out` the compressed
/// stream (header included); for decoding it is the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CodecStats {
    /// Bytes consumed from the source.
    pub bytes_in: u64,
    /// Bytes written to the sink.
    pub bytes_out: u64,
    /// Number of codes emitted or consumed.
    pub codes: u64,
    /// Dictionary size at the end of the run, roots included.
    pub dict_peak: usize,
    /// Length of the longest string a single code stood for.
    pub longest_match: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl CodecStats {
    /// Output size relative to input size (`bytes_out / bytes_in`).
    ///
    /// Returns `0.0` for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }

    /// Percentage saved, `(1 - bytes_out / bytes_in) * 100`.
    ///
    /// Negative when the output is larger than the input.
    pub fn space_savings(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            (1.0 - self.ratio()) * 100.0
        }
    }

    /// Input throughput in MiB per second.
    pub fn throughput_mib_s(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            0.0
        } else {
            self.bytes_in as f64 / (1024.0 * 1024.0) / secs
        }
    }
}
