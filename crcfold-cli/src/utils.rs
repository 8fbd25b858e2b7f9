//! Utility functions for the CLI.

use crcfold_core::io::checksum_reader_with;
use crcfold_core::{Crc64, Crc64Dispatcher, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io;
use std::path::Path;

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}

/// A fresh calculator, table-only when `software` is set.
pub fn new_crc(software: bool) -> Crc64 {
    if software {
        Crc64::with_dispatcher(Crc64Dispatcher::software_only())
    } else {
        Crc64::new()
    }
}

/// Whether `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Checksum a file or standard input by reading it.
///
/// Returns `(crc, bytes)`.
pub fn checksum_path(path: &Path, crc: Crc64, progress: bool) -> Result<(u64, u64)> {
    if is_stdin(path) {
        return checksum_reader_with(io::stdin().lock(), crc);
    }

    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let pb = create_progress_bar(len, progress);
    pb.set_message(display_name(path));

    let result = checksum_reader_with(pb.wrap_read(file), crc);
    pb.finish_and_clear();
    result
}

/// Name shown next to a digest.
pub fn display_name(path: &Path) -> String {
    path.display().to_string()
}

/// One `sum` output line: 16 lowercase hex digits, two spaces, name.
pub fn format_line(crc: u64, name: &str) -> String {
    format!("{:016x}  {}", crc, name)
}

/// A temporary file for tests, removed on drop.
#[cfg(test)]
pub(crate) struct TempFile(std::path::PathBuf);

#[cfg(test)]
impl TempFile {
    pub(crate) fn create(name: &str, contents: &[u8]) -> Self {
        let path =
            std::env::temp_dir().join(format!("crcfold_cli_{}_{}", name, std::process::id()));
        std::fs::write(&path, contents).expect("write failed");
        Self(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
