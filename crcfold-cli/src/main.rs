//! crcfold CLI - CRC-64/XZ checksums with carry-less folding
//!
//! Checksums files or standard input, verifies expected digests, and reports
//! which carry-less multiply backend the CPU provides.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{SumOptions, cmd_check, cmd_info, cmd_sum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crcfold")]
#[command(author, version, about = "CRC-64/XZ checksums with carry-less multiplication folding")]
#[command(long_about = "
crcfold computes CRC-64/XZ (ECMA-182) checksums. Large inputs are folded
16 bytes at a time with PCLMULQDQ (x86_64) or PMULL (aarch64) when the CPU
has them, and with slicing-by-8 tables otherwise.

Set CRCFOLD_FORCE_PORTABLE=1 to disable hardware carry-less multiply.

Examples:
  crcfold sum disk.img
  crcfold sum --mmap a.bin b.bin
  cat data.bin | crcfold sum
  crcfold check disk.img 995dc9bbdf1939fa
  crcfold info --json
  crcfold completions bash
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CRC-64 of each file
    #[command(alias = "s")]
    Sum {
        /// Files to checksum ("-" or none reads standard input)
        files: Vec<PathBuf>,

        /// Use slicing-by-8 tables only
        #[arg(long)]
        software: bool,

        /// Memory-map files instead of reading them
        #[arg(short, long)]
        mmap: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Verify a file against an expected CRC-64
    #[command(alias = "c")]
    Check {
        /// File to verify ("-" reads standard input)
        file: PathBuf,

        /// Expected CRC-64 as hex (optional 0x prefix)
        expected: String,
    },

    /// Show the detected carry-less multiply backend
    #[command(alias = "i")]
    Info {
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

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sum {
            files,
            software,
            mmap,
            json,
            progress,
        } => cmd_sum(
            &files,
            SumOptions {
                software,
                mmap,
                json,
                progress,
            },
        ),
        Commands::Check { file, expected } => cmd_check(&file, &expected),
        Commands::Info { json } => cmd_info(json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "crcfold", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
