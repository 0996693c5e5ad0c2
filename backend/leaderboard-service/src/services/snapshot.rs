//! Whole-file replacement on disk.
//!
//! Each write goes to its own temp file next to the target, is fsynced, then
//! renamed over `path`. Readers see either the previous file or the new one,
//! never a torn write, and overlapping writers never share a temp file. A
//! failed write removes its temp file; a crash may leave one behind.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let path = path.to_path_buf();
    let contents = contents.to_vec();

    tokio::task::spawn_blocking(move || write_atomic_blocking(&path, &contents))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

fn write_atomic_blocking(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = format!(
        ".{}.",
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    );

    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    // Dropping the PersistError drops the temp file, which deletes it
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
