//! Parallel checksums over the rayon thread pool.
//!
//! The input is cut into chunks, each chunk is checksummed independently, and
//! the partial CRCs are merged with [`crc64_combine`]. Merging is associative,
//! so rayon's ordered reduction yields the CRC of the whole buffer.

use crate::combine::crc64_combine;
use crate::crc::Crc64;
use rayon::prelude::*;

/// Default chunk size for [`checksum_parallel`] (4MB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024 * 1024;

/// Chunks smaller than this are not worth a task.
const MIN_CHUNK_SIZE: usize = 64 * 1024;

/// CRC-64 of `data`, computed in parallel chunks of `chunk_size` bytes.
///
/// # Example
///
/// ```
/// use crcfold_core::{Crc64, parallel::checksum_parallel};
///
/// let data = vec![0x5Au8; 1 << 20];
/// assert_eq!(checksum_parallel(&data, 128 * 1024), Crc64::compute(&data));
/// ```
pub fn checksum_parallel(data: &[u8], chunk_size: usize) -> u64 {
    let chunk_size = chunk_size.max(MIN_CHUNK_SIZE);
    if data.len() <= chunk_size {
        return Crc64::compute(data);
    }

    let (crc, _len) = data
        .par_chunks(chunk_size)
        .map(|chunk| (Crc64::compute(chunk), chunk.len() as u64))
        .reduce(|| (0, 0), merge);
    crc
}

/// Merge `(crc, len)` pairs of adjacent pieces, left first.
fn merge(left: (u64, u64), right: (u64, u64)) -> (u64, u64) {
    (crc64_combine(left.0, right.0, right.1), left.1 + right.1)
}
