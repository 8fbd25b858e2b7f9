//! Async checksumming for Tokio readers.
//!
//! # Example
//!
//! ```rust,ignore
//! use crcfold_core::async_io::checksum_async_reader;
//!
//! async fn crc_of(file: tokio::fs::File) -> crcfold_core::Result<u64> {
//!     let (crc, _len) = checksum_async_reader(file).await?;
//!     Ok(crc)
//! }
//! ```
//!
//! # Feature Flag
//!
//! This module is only available when the `async-io` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! crcfold-core = { version = "0.1.0", features = ["async-io"] }
//! ```

use crate::crc::Crc64;
use crate::error::Result;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

/// Default buffer size for async operations (64KB).
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// An async reader that checksums everything read through it.
#[derive(Debug)]
pub struct AsyncCrc64Reader<R> {
    inner: R,
    crc: Crc64,
    bytes: u64,
}

impl<R: AsyncRead + Unpin> AsyncCrc64Reader<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            crc: Crc64::new(),
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
}

impl<R: AsyncRead + Unpin> AsyncRead for AsyncCrc64Reader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        ready!(Pin::new(&mut this.inner).poll_read(cx, buf))?;

        let fresh = &buf.filled()[before..];
        this.crc.update(fresh);
        this.bytes += fresh.len() as u64;
        Poll::Ready(Ok(()))
    }
}

/// Checksum an async reader to the end.
///
/// Returns `(crc, bytes_read)`.
pub async fn checksum_async_reader<R>(mut reader: R) -> Result<(u64, u64)>
where
    R: AsyncRead + Unpin,
{
    let mut crc = Crc64::new();
    let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        crc.update(&buffer[..n]);
        total += n as u64;
    }

    Ok((crc.finalize(), total))
}
