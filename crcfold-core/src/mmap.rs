//! Memory-mapped file checksumming.
//!
//! Large disk images are checksummed fastest by handing the whole mapping to
//! the folding engine in one call, which lets it stay in its 16-byte loop
//! instead of restarting per read buffer.
//!
//! # Example
//!
//! ```no_run
//! use crcfold_core::mmap::checksum_file;
//!
//! let (crc, len) = checksum_file("disk.img")?;
//! println!("{crc:016x}  {len} bytes");
//! # Ok::<(), crcfold_core::error::CrcError>(())
//! ```
//!
//! # Safety
//!
//! Memory-mapped files can be dangerous if the underlying file is modified by
//! another process while mapped. This implementation uses read-only mappings
//! to minimize risks.

use crate::crc::Crc64;
use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// A read-only memory-mapped file.
#[derive(Debug)]
pub struct MappedFile {
    /// `None` for empty files, which cannot be mapped portably.
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Open and map a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CrcError::Io`] if the file cannot be opened or
    /// mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        MmapOptions::new().open(path)
    }

    /// Map an already-open file.
    pub fn from_file(file: &File) -> Result<Self> {
        MmapOptions::new().open_file(file)
    }

    /// Length of the mapping in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The mapped bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// CRC-64 of the whole file.
    pub fn crc64(&self) -> u64 {
        Crc64::compute(self.as_slice())
    }
}

/// Options for mapping a file.
#[derive(Debug, Default, Clone)]
pub struct MmapOptions {
    /// Whether to populate (prefault) the memory mapping.
    populate: bool,
}

impl MmapOptions {
    /// Create a new `MmapOptions` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to populate the memory mapping.
    ///
    /// When enabled, the operating system reads the file into memory up
    /// front. This helps when the whole file is checksummed anyway.
    pub fn populate(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }

    /// Open a file with the configured options.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<MappedFile> {
        let file = File::open(path.as_ref())?;
        self.open_file(&file)
    }

    /// Map a file handle with the configured options.
    pub fn open_file(self, file: &File) -> Result<MappedFile> {
        if file.metadata()?.len() == 0 {
            return Ok(MappedFile { mmap: None });
        }

        let mmap = if self.populate {
            // SAFETY: Read-only mapping, caller responsible for file stability
            unsafe { memmap2::MmapOptions::new().populate().map(file)? }
        } else {
            // SAFETY: Read-only mapping, caller responsible for file stability
            unsafe { Mmap::map(file)? }
        };

        Ok(MappedFile { mmap: Some(mmap) })
    }
}

/// Checksum a file through a read-only mapping.
///
/// Returns `(crc, length)`.
pub fn checksum_file<P: AsRef<Path>>(path: P) -> Result<(u64, u64)> {
    let mapped = MappedFile::open(path.as_ref())?;
    let crc = mapped.crc64();
    tracing::debug!(
        path = %path.as_ref().display(),
        bytes = mapped.len(),
        "checksummed mapped file"
    );
    Ok((crc, mapped.len() as u64))
}
