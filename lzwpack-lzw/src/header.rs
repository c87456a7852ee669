//! Stream header: the initial dictionary size as a little-endian `u32`.

use crate::config::INIT_DICT_SIZE;
use crate::error::{LzwError, Result};
use lzwpack_core::PackError;
use std::io::{ErrorKind, Read, Write};

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 4;

/// Write the header for a fresh stream.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writer
        .write_all(&(INIT_DICT_SIZE as u32).to_le_bytes())
        .map_err(PackError::Write)?;
    Ok(())
}

/// Read the raw header value without validating it.
pub fn read_raw_header<R: Read>(reader: &mut R) -> Result<u32> {
    let mut bytes = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => return Err(LzwError::TruncatedHeader { found: filled }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(PackError::Read(e).into()),
        }
    }
    Ok(u32::from_le_bytes(bytes))
}

/// Read the header and check it against [`INIT_DICT_SIZE`].
pub fn read_header<R: Read>(reader: &mut R) -> Result<()> {
    let found = read_raw_header(reader)?;
    if found as usize != INIT_DICT_SIZE {
        return Err(LzwError::HeaderMismatch {
            expected: INIT_DICT_SIZE as u32,
            found,
        });
    }
    Ok(())
}
