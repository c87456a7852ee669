//! lzwpack CLI - fixed-width LZW compression
//!
//! Compresses arbitrary files into headered LZW streams and back.

mod commands;
mod utils;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{GlobalOptions, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use log::{LevelFilter, debug};
use lzwpack_lzw::LzwConfig;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;
use utils::CliResult;

#[derive(Parser)]
#[command(name = "lzwpack")]
#[command(author, version, about = "Fixed-width LZW compressor")]
#[command(long_about = "
lzwpack compresses files with LZW using fixed-width codes (14 bits by
default) and a capped dictionary. Streams carry a 4-byte header; the code
width and dictionary cap must match between compression and decompression.

Examples:
  lzwpack compress image.bin
  lzwpack compress image.bin out.lzw --json
  lzwpack decompress image.bin.lzw
  lzwpack --code-bits 12 compress data.raw
  lzwpack test *.lzw
  lzwpack info image.bin.lzw
  lzwpack completions bash
")]
struct Cli {
    /// Width of every code in bits (9-24)
    #[arg(long, global = true, default_value_t = 14, value_parser = clap::value_parser!(u8).range(9..=24))]
    code_bits: u8,

    /// Dictionary cap, roots included (default: every code the width can address)
    #[arg(long, global = true)]
    max_dict_size: Option<usize>,

    /// Overwrite existing output files
    #[arg(short, long, global = true)]
    force: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <input>.lzw)
        output: Option<PathBuf>,

        /// Print the run statistics as JSON
        #[arg(short, long)]
        json: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Stream to decompress
        input: PathBuf,

        /// Output file (default: input without .lzw, or <input>.out)
        output: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Test stream integrity by decoding without writing
    #[command(alias = "t")]
    Test {
        /// Streams to test
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// List every file
        #[arg(short = 'l', long)]
        list: bool,
    },

    /// Show size and stream layout of a file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

fn build_config(code_bits: u8, max_dict_size: Option<usize>) -> lzwpack_lzw::Result<LzwConfig> {
    match max_dict_size {
        Some(max) => LzwConfig::new(code_bits, max),
        None => LzwConfig::with_code_bits(code_bits),
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let opts = GlobalOptions {
        config: build_config(cli.code_bits, cli.max_dict_size)?,
        force: cli.force,
        quiet: cli.quiet,
    };
    debug!(
        "config: {}-bit codes, {} dictionary entries",
        opts.config.code_bits(),
        opts.config.max_dict_size()
    );

    match cli.command {
        Commands::Compress {
            input,
            output,
            json,
            progress,
        } => cmd_compress(&input, output.as_deref(), json, progress, &opts),
        Commands::Decompress {
            input,
            output,
            progress,
        } => cmd_decompress(&input, output.as_deref(), progress, &opts),
        Commands::Test { inputs, list } => cmd_test(&inputs, list, &opts),
        Commands::Info { file, json } => cmd_info(&file, json, &opts),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "lzwpack", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compress_with_globals() {
        let cli = Cli::try_parse_from([
            "lzwpack", "compress", "in.bin", "out.lzw", "--code-bits", "12", "-f", "--json",
        ])
        .unwrap();
        assert_eq!(cli.code_bits, 12);
        assert!(cli.force);
        match cli.command {
            Commands::Compress {
                input,
                output,
                json,
                progress,
            } => {
                assert_eq!(input, PathBuf::from("in.bin"));
                assert_eq!(output, Some(PathBuf::from("out.lzw")));
                assert!(json);
                assert!(!progress);
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_parse_aliases_and_defaults() {
        let cli = Cli::try_parse_from(["lzwpack", "d", "x.lzw"]).unwrap();
        assert_eq!(cli.code_bits, 14);
        assert_eq!(cli.max_dict_size, None);
        assert!(matches!(cli.command, Commands::Decompress { .. }));

        let cli = Cli::try_parse_from(["lzwpack", "-vv", "t", "a.lzw", "b.lzw"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Test { ref inputs, .. } if inputs.len() == 2));
    }

    #[test]
    fn test_rejects_out_of_range_width() {
        assert!(Cli::try_parse_from(["lzwpack", "--code-bits", "8", "c", "x"]).is_err());
        assert!(Cli::try_parse_from(["lzwpack", "--code-bits", "25", "c", "x"]).is_err());
        assert!(Cli::try_parse_from(["lzwpack", "test"]).is_err());
    }

    #[test]
    fn test_build_config() {
        assert_eq!(build_config(14, None).unwrap(), LzwConfig::DEFAULT);
        assert_eq!(build_config(12, None).unwrap().max_dict_size(), 4096);
        assert_eq!(build_config(12, Some(1000)).unwrap().max_dict_size(), 1000);
        assert!(build_config(12, Some(5000)).is_err());
    }
}
