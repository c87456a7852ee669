//! Utility functions for the CLI.

use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use lzwpack_core::PackError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Extension used for compressed streams.
pub const LZW_EXTENSION: &str = "lzw";

/// Extension appended when a decompressed name cannot be derived.
const FALLBACK_EXTENSION: &str = "out";

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Create a byte-counting progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Open an input file, keeping the path in the error.
pub fn open_input(path: &Path) -> Result<File, PackError> {
    File::open(path).map_err(|e| PackError::open(path, e))
}

/// `<input>.lzw`
pub fn default_compress_output(input: &Path) -> PathBuf {
    append_extension(input, LZW_EXTENSION)
}

/// Strip a trailing `.lzw`, otherwise append `.out`.
pub fn default_decompress_output(input: &Path) -> PathBuf {
    let is_lzw = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LZW_EXTENSION));
    match input.file_stem() {
        Some(stem) if is_lzw && !stem.is_empty() => input.with_file_name(stem),
        _ => append_extension(input, FALLBACK_EXTENSION),
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Hidden sibling path used while `path` is being written.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(path.as_os_str()));
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Write `output` through `write`, replacing it only on success.
///
/// The data goes to a hidden sibling file that is renamed over `output`
/// once `write` returns `Ok` and the buffer is flushed. On any error the
/// temporary file is removed and `output` is left untouched. Refuses to
/// replace an existing `output` unless `force` is set.
pub fn write_atomically<T, F>(output: &Path, force: bool, write: F) -> CliResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> CliResult<T>,
{
    if output.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }

    let temp = temp_path_for(output);
    let file = File::create(&temp).map_err(|e| PackError::open(&temp, e))?;
    let mut writer = BufWriter::new(file);

    let result = write(&mut writer).and_then(|value| {
        let file = writer.into_inner().map_err(|e| PackError::Write(e.into_error()))?;
        file.sync_all().map_err(PackError::Write)?;
        fs::rename(&temp, output)?;
        Ok(value)
    });

    if result.is_err() && temp.exists() {
        debug!("removing partial output {}", temp.display());
        let _ = fs::remove_file(&temp);
    }
    result
}

/// Copy the modification time of `source` onto `target`.
pub fn copy_mtime(source: &Path, target: &Path) -> CliResult<()> {
    let metadata = fs::metadata(source)?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(target, mtime)?;
    Ok(())
}

/// Print a short labelled figure block, like the size/ratio report.
pub fn print_report(title: &str, rows: &[(&str, String)]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{:<width$}  {}", format!("{}:", label), value, width = width + 1);
    }
}
