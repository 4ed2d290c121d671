//! Input checks that run before any PDF parsing
//!
//! The PDF backend is linked at build time, so the only thing left to verify
//! up front is that the input actually exists and is a readable file. Doing
//! it here gives a filesystem error naming the path instead of a parser
//! error.

use lopdf::Document;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::FormError;

pub fn ensure_readable(path: &Path) -> Result<(), FormError> {
    let metadata = fs::metadata(path).map_err(|source| FormError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(FormError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Pre-flight the path, then parse the whole document into memory.
pub fn load_document(path: &Path) -> Result<Document, FormError> {
    ensure_readable(path)?;
    let bytes = fs::read(path)?;
    let document = Document::load_mem(&bytes)?;
    debug!(
        "Loaded {} ({} bytes, {} page(s))",
        path.display(),
        bytes.len(),
        document.get_pages().len()
    );
    Ok(document)
}
