//! Checksumming adapters for [`std::io`] streams.

use crate::crc::Crc64;
use crate::error::Result;
use std::io::{self, Read, Write};

/// Default buffer size for [`checksum_reader`] (64KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// A reader that checksums everything read through it.
///
/// # Example
///
/// ```
/// use crcfold_core::io::Crc64Reader;
/// use std::io::Read;
///
/// let mut reader = Crc64Reader::new(&b"123456789"[..]);
/// let mut sink = Vec::new();
/// reader.read_to_end(&mut sink).unwrap();
/// assert_eq!(reader.crc64(), 0x995DC9BBDF1939FA);
/// ```
#[derive(Debug)]
pub struct Crc64Reader<R> {
    inner: R,
    crc: Crc64,
    bytes: u64,
}

impl<R: Read> Crc64Reader<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self::with_crc(inner, Crc64::new())
    }

    /// Wrap a reader, continuing from an existing calculator.
    pub fn with_crc(inner: R, crc: Crc64) -> Self {
        Self {
            inner,
            crc,
            bytes: 0,
        }
    }

    /// CRC of the bytes read so far.
    pub fn crc64(&self) -> u64 {
        self.crc.value()
    }

    /// Number of bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes
    }

    /// Unwrap into the inner reader and the CRC.
    pub fn into_parts(self) -> (R, u64) {
        (self.inner, self.crc.finalize())
    }
}

impl<R: Read> Read for Crc64Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.crc.update(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }
}

/// A writer that checksums everything written through it.
#[derive(Debug)]
pub struct Crc64Writer<W> {
    inner: W,
    crc: Crc64,
    bytes: u64,
}

impl<W: Write> Crc64Writer<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            crc: Crc64::new(),
            bytes: 0,
        }
    }

    /// CRC of the bytes written so far.
    pub fn crc64(&self) -> u64 {
        self.crc.value()
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Unwrap into the inner writer and the CRC.
    pub fn into_parts(self) -> (W, u64) {
        (self.inner, self.crc.finalize())
    }
}

impl<W: Write> Write for Crc64Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.crc.update(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Checksum a reader to the end.
///
/// Returns `(crc, bytes_read)`.
///
/// # Errors
///
/// Returns [`crate::error::CrcError::Io`] if reading fails.
pub fn checksum_reader<R: Read>(reader: R) -> Result<(u64, u64)> {
    checksum_reader_with(reader, Crc64::new())
}

/// Checksum a reader to the end with a specific calculator.
pub fn checksum_reader_with<R: Read>(mut reader: R, mut crc: Crc64) -> Result<(u64, u64)> {
    let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        crc.update(&buffer[..n]);
        total += n as u64;
    }

    tracing::trace!(bytes = total, "checksummed reader");
    Ok((crc.finalize(), total))
}
