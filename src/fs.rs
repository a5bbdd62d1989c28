//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A writer that replaces `target` only when [`AtomicFile::commit`] is called.
///
/// Output goes to a uniquely named temp file next to the target so the final rename stays
/// on one filesystem. Dropping without committing deletes the temp file and leaves the
/// target untouched.
pub struct AtomicFile {
    target: PathBuf,
    writer: Option<BufWriter<NamedTempFile>>,
}

impl AtomicFile {
    pub fn create(target: impl AsRef<Path>) -> Result<Self> {
        let target = target.as_ref().to_path_buf();
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let temp = tempfile::Builder::new()
            .prefix(".qtl-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;

        Ok(Self {
            target,
            writer: Some(BufWriter::new(temp)),
        })
    }

    /// Flushes the temp file and renames it over the target, keeping the target's
    /// permissions.
    pub fn commit(mut self) -> Result<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| io::Error::other("atomic file already committed"))?;
        let temp = writer
            .into_inner()
            .map_err(io::IntoInnerError::into_error)
            .with_context(|| format!("Failed to write {}", self.target.display()))?;

        if let Ok(metadata) = fs::metadata(&self.target) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .with_context(|| {
                    format!("Failed to copy permissions of {}", self.target.display())
                })?;
        }
        temp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync {}", temp.path().display()))?;

        temp.persist(&self.target)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace file: {}", self.target.display()))?;

        Ok(())
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<NamedTempFile>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("atomic file already committed"))
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    // The temp file is only read after commit, so per-line flushes can stay in the buffer.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
