//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Temporary sibling used while writing `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to a temporary sibling file, then renamed
/// over the target, so a reader never sees a half-written summary.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path(path);
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
