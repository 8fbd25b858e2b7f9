//! Sum command implementation.

use crate::utils::{checksum_path, display_name, format_line, is_stdin, new_crc};
use crcfold_core::mmap::MappedFile;
use crcfold_core::parallel::{DEFAULT_CHUNK_SIZE, checksum_parallel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Flags for `crcfold sum`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOptions {
    /// Use slicing-by-8 tables only.
    pub software: bool,
    /// Memory-map files instead of reading them.
    pub mmap: bool,
    /// Print JSON instead of text lines.
    pub json: bool,
    /// Show a progress bar while reading.
    pub progress: bool,
}

/// JSON serializable checksum of one input.
#[derive(Debug, Serialize, Deserialize)]
struct SumJson {
    file: String,
    crc64: String,
    bytes: u64,
    implementation: String,
}

pub fn cmd_sum(files: &[PathBuf], options: SumOptions) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = [PathBuf::from("-")];
    let files = if files.is_empty() { &stdin[..] } else { files };

    let implementation = new_crc(options.software).implementation_name();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let (crc, bytes) = checksum_one(path, options)?;
        tracing::info!(file = %path.display(), bytes, crc = %format!("{crc:016x}"), "checksummed");

        if options.json {
            results.push(SumJson {
                file: display_name(path),
                crc64: format!("{:016x}", crc),
                bytes,
                implementation: implementation.to_string(),
            });
        } else {
            println!("{}", format_line(crc, &display_name(path)));
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn checksum_one(path: &Path, options: SumOptions) -> crcfold_core::Result<(u64, u64)> {
    if !options.mmap || is_stdin(path) {
        return checksum_path(path, new_crc(options.software), options.progress);
    }

    let mapped = MappedFile::open(path)?;
    let data = mapped.as_slice();
    let crc = if !options.software && data.len() >= 2 * DEFAULT_CHUNK_SIZE {
        tracing::debug!(bytes = data.len(), "checksumming mapping in parallel");
        checksum_parallel(data, DEFAULT_CHUNK_SIZE)
    } else {
        let mut crc = new_crc(options.software);
        crc.update(data);
        crc.finalize()
    };
    Ok((crc, data.len() as u64))
}
