//! Table-driven CRC-64/XZ.
//!
//! Used for inputs too short to fold and as the reference the folding engine
//! is checked against. Both functions operate on the raw register (seeded
//! with `0xFFFFFFFFFFFFFFFF`, not yet complemented).

/// CRC-64/ECMA-182 polynomial, reflected.
pub const POLY_REFLECTED: u64 = 0xC96C5795D7870F42;

/// CRC-64/ECMA-182 lookup table (polynomial 0xC96C5795D7870F42, reflected).
pub const CRC64_TABLE: [u64; 256] = {
    let mut table = [0u64; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u64;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY_REFLECTED;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// CRC-64 slicing-by-8 lookup tables.
/// This pre-computes 8 tables for processing 8 bytes in parallel.
const CRC64_TABLE_SLICE: [[u64; 256]; 8] = {
    let mut tables = [[0u64; 256]; 8];
    tables[0] = CRC64_TABLE;

    let mut t = 1;
    while t < 8 {
        let mut i = 0usize;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = CRC64_TABLE[(prev & 0xFF) as usize] ^ (prev >> 8);
            i += 1;
        }
        t += 1;
    }

    tables
};

/// Byte-at-a-time CRC-64 register update.
#[inline]
pub fn update_bytewise(mut crc: u64, data: &[u8]) -> u64 {
    for &byte in data {
        let index = ((crc ^ byte as u64) & 0xFF) as usize;
        crc = CRC64_TABLE[index] ^ (crc >> 8);
    }
    crc
}

/// Slicing-by-8 CRC-64 register update.
/// Processes 8 bytes at a time, then finishes the tail byte by byte.
#[inline]
pub fn update_slice8(mut crc: u64, data: &[u8]) -> u64 {
    let mut words = data.chunks_exact(8);

    for word in &mut words {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(word);
        let c = crc ^ u64::from_le_bytes(bytes);

        crc = CRC64_TABLE_SLICE[7][(c & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[6][((c >> 8) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[5][((c >> 16) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[4][((c >> 24) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[3][((c >> 32) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[2][((c >> 40) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[1][((c >> 48) & 0xFF) as usize]
            ^ CRC64_TABLE_SLICE[0][(c >> 56) as usize];
    }

    update_bytewise(crc, words.remainder())
}
