//! Info command implementation.

use super::GlobalOptions;
use crate::utils::{CliResult, open_input};
use lzwpack_lzw::{HEADER_LEN, INIT_DICT_SIZE, LzwError, read_raw_header};
use serde::Serialize;
use std::io::BufReader;
use std::path::Path;

/// What the header and payload length say about a stream.
#[derive(Debug, Serialize, PartialEq)]
struct StreamLayout {
    header: u32,
    header_valid: bool,
    payload_bytes: u64,
    /// Codes implied by the payload length at the configured width.
    codes: u64,
    padding_bits: u64,
}

#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    size: u64,
    code_bits: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<StreamLayout>,
}

fn stream_layout(header: u32, size: u64, code_bits: u8) -> StreamLayout {
    let payload_bytes = size.saturating_sub(HEADER_LEN as u64);
    let payload_bits = payload_bytes * 8;
    let codes = payload_bits / code_bits as u64;
    StreamLayout {
        header,
        header_valid: header as usize == INIT_DICT_SIZE,
        payload_bytes,
        codes,
        padding_bits: payload_bits - codes * code_bits as u64,
    }
}

pub fn cmd_info(path: &Path, json: bool, opts: &GlobalOptions) -> CliResult<()> {
    let file = open_input(path)?;
    let size = file.metadata()?.len();
    let code_bits = opts.config.code_bits();

    let stream = match read_raw_header(&mut BufReader::new(file)) {
        Ok(header) => Some(stream_layout(header, size, code_bits)),
        Err(LzwError::TruncatedHeader { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    if json {
        let report = InfoJson {
            file: path.display().to_string(),
            size,
            code_bits,
            stream,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File Information");
    println!("================");
    println!("File: {}", path.display());
    println!("File size: {} bytes", size);

    match stream {
        Some(layout) if layout.header_valid => {
            println!();
            println!("LZW stream ({}-bit codes):", code_bits);
            println!("  Initial dictionary size: {}", layout.header);
            println!("  Payload: {} bytes", layout.payload_bytes);
            println!("  Codes: {}", layout.codes);
            println!("  Padding bits: {}", layout.padding_bits);
        }
        Some(layout) => {
            println!();
            println!(
                "Not an LZW stream (header {:#010x}, expected {})",
                layout.header, INIT_DICT_SIZE
            );
        }
        None => {
            println!();
            println!("Not an LZW stream (shorter than the {}-byte header)", HEADER_LEN);
        }
    }

    Ok(())
}
