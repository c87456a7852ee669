//! Compress command implementation.

use super::GlobalOptions;
use crate::utils::{
    CliResult, copy_mtime, create_progress_bar, default_compress_output, open_input, print_report,
    write_atomically,
};
use log::info;
use lzwpack_lzw::{CodecStats, LzwEncoder};
use serde::Serialize;
use std::path::Path;

/// JSON report for one compression run.
#[derive(Debug, Serialize)]
struct CompressJson<'a> {
    input: String,
    output: String,
    code_bits: u8,
    max_dict_size: usize,
    space_savings: f64,
    stats: &'a CodecStats,
}

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    progress: bool,
    opts: &GlobalOptions,
) -> CliResult<()> {
    let output = output.map_or_else(|| default_compress_output(input), Path::to_path_buf);

    let file = open_input(input)?;
    let len = file.metadata()?.len();
    let pb = create_progress_bar(len, progress && !opts.quiet);
    let reader = pb.wrap_read(file);

    info!("compressing {} -> {}", input.display(), output.display());
    let encoder = LzwEncoder::new(opts.config);
    let stats = write_atomically(&output, opts.force, |writer| {
        Ok(encoder.encode_stream(reader, writer)?)
    })?;
    pb.finish_and_clear();
    copy_mtime(input, &output)?;

    info!(
        "{} codes, dictionary {} entries, {:.1} MiB/s",
        stats.codes,
        stats.dict_peak,
        stats.throughput_mib_s()
    );

    if json {
        let report = CompressJson {
            input: input.display().to_string(),
            output: output.display().to_string(),
            code_bits: opts.config.code_bits(),
            max_dict_size: opts.config.max_dict_size(),
            space_savings: stats.space_savings(),
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !opts.quiet {
        print_report(
            "Compression Summary",
            &[
                ("Original file size", format!("{} bytes", stats.bytes_in)),
                ("Compressed file size", format!("{} bytes", stats.bytes_out)),
                ("Compression ratio", format!("{:.2}%", stats.space_savings())),
            ],
        );
    }

    Ok(())
}
