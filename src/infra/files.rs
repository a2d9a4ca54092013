use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SyncError};

pub fn read_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "Read file");
    Ok(content)
}

/// Overwrite `path` in place with `content`.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| SyncError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}
