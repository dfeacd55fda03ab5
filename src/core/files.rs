//! Whole-file read and in-place write-back.
//!
//! Write-back overwrites the original directly. There is no temp file, so a
//! failed write can leave the file truncated.

use std::path::Path;

use crate::error::{DoxyfillError, Result};

/// Read a whole source file as UTF-8
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DoxyfillError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite a source file with `text` verbatim
pub fn write_source(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| DoxyfillError::Write {
        path: path.to_path_buf(),
        source,
    })
}
