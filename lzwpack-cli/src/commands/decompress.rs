//! Decompress command implementation.

use super::GlobalOptions;
use crate::utils::{
    CliResult, copy_mtime, create_progress_bar, default_decompress_output, open_input,
    write_atomically,
};
use log::info;
use lzwpack_lzw::LzwDecoder;
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    progress: bool,
    opts: &GlobalOptions,
) -> CliResult<()> {
    let output = output.map_or_else(|| default_decompress_output(input), Path::to_path_buf);

    let file = open_input(input)?;
    let len = file.metadata()?.len();
    let pb = create_progress_bar(len, progress && !opts.quiet);
    let reader = pb.wrap_read(file);

    info!("decompressing {} -> {}", input.display(), output.display());
    let decoder = LzwDecoder::new(opts.config);
    let stats = write_atomically(&output, opts.force, |writer| {
        Ok(decoder.decode_stream(reader, writer)?)
    })?;
    pb.finish_and_clear();
    copy_mtime(input, &output)?;

    if !opts.quiet {
        println!(
            "Decompression complete: {} -> {} ({} bytes)",
            input.display(),
            output.display(),
            stats.bytes_out
        );
    }

    Ok(())
}
