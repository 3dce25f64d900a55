//! JSON file I/O with atomic writes
//!
//! Data files are written to a sibling temp file, synced, then renamed over
//! the target, so a crash leaves either the old or the new contents.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CashbookError, CashbookResult};

fn parse_file<T: DeserializeOwned>(path: &Path) -> CashbookResult<T> {
    let file = File::open(path)
        .map_err(|e| CashbookError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CashbookError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read JSON from a file, or `T::default()` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> CashbookResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from a file, `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> CashbookResult<Option<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    parse_file(path).map(Some)
}

/// Write a file atomically, with `write` producing the contents
pub fn write_atomic<P, F>(path: P, write: F) -> CashbookResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> CashbookResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CashbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let result = File::create(&temp_path)
        .map_err(|e| CashbookError::Storage(format!("Failed to create temp file: {}", e)))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer
                .flush()
                .and_then(|_| writer.get_ref().sync_all())
                .map_err(|e| CashbookError::Storage(format!("Failed to flush data: {}", e)))
        })
        .and_then(|_| {
            fs::rename(&temp_path, path)
                .map_err(|e| CashbookError::Storage(format!("Failed to rename temp file: {}", e)))
        });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write pretty-printed JSON atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> CashbookResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| CashbookError::Storage(format!("Failed to serialize data: {}", e)))
    })
}
