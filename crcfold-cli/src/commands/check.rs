//! Check command implementation.

use crate::utils::{checksum_path, display_name, new_crc};
use crcfold_core::CrcError;
use crcfold_core::error::parse_digest;
use std::path::Path;

pub fn cmd_check(file: &Path, expected: &str) -> Result<(), Box<dyn std::error::Error>> {
    let expected = parse_digest(expected)?;
    let (computed, bytes) = checksum_path(file, new_crc(false), false)?;
    tracing::debug!(file = %file.display(), bytes, "verified input");

    verify(expected, computed)?;
    println!("{}: OK", display_name(file));
    Ok(())
}

fn verify(expected: u64, computed: u64) -> crcfold_core::Result<()> {
    if expected == computed {
        Ok(())
    } else {
        Err(CrcError::mismatch(expected, computed))
    }
}
