//! Local filesystem source.

use std::path::Path;

/// Read a document from disk.
pub fn read_text(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
}
