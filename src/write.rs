use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

// What happened to the addressbook file
#[derive(Debug, PartialEq)]
pub enum WriteOutcome {
    Unchanged,
    Written { backup: PathBuf },
}

// The backup sits next to the addressbook, "addressbook" -> "addressbook.bak"
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

// Writes the new content to the addressbook if it differs from what was there at the start of
// the run. The previous content is saved to the backup file first, so the backup always holds
// the state right before this run. Nothing is touched when the content is the same
pub fn write_addressbook(path: &Path, previous: &str, content: &str) -> Result<WriteOutcome> {
    if previous == content {
        debug!(path = %path.display(), "addressbook unchanged");
        return Ok(WriteOutcome::Unchanged);
    }
    let backup = backup_path(path);
    fs::write(&backup, previous)
        .with_context(|| format!("Could not write backup {}", backup.display()))?;
    fs::write(path, content)
        .with_context(|| format!("Could not write addressbook {}", path.display()))?;
    debug!(path = %path.display(), backup = %backup.display(), "addressbook written");
    Ok(WriteOutcome::Written { backup })
}
