//! Command implementations for the lzwpack CLI.

pub mod compress;
pub mod decompress;
pub mod info;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use test::cmd_test;

use lzwpack_lzw::LzwConfig;

/// Settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    /// Codec configuration built from `--code-bits` / `--max-dict-size`.
    pub config: LzwConfig,
    /// Replace existing output files.
    pub force: bool,
    /// Suppress reports on stdout.
    pub quiet: bool,
}
