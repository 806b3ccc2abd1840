//! Saving analysis output as timestamped text reports.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};

use crate::error::{StoreError, StoreResult};

/// Prefix used when the caller's prefix is unusable.
const DEFAULT_PREFIX: &str = "report";

/// Highest `_<n>` suffix tried before giving up on a free report name.
const MAX_SUFFIX: u32 = 1000;

/// Write `content` to `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.txt`.
///
/// Creates `dir` if it does not exist. A blank prefix, or one containing
/// path separators or `..`, is replaced with `report`. When a report with
/// that name already exists (two saves in the same second), `_2`, `_3`, ...
/// is appended; an existing file is never overwritten. Returns the path of
/// the written file.
#[tracing::instrument(skip(content), fields(content_len = content.len()))]
pub fn save_report(dir: &Utf8Path, prefix: &str, content: &str) -> StoreResult<Utf8PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let stem = format!(
        "{}_{}",
        sanitize_prefix(prefix),
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let (path, mut file) = create_unique(dir, &stem)?;

    file.write_all(content.as_bytes()).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path, "report saved");
    Ok(path)
}

/// Create `<stem>.txt`, or the first free `<stem>_<n>.txt` for n >= 2.
fn create_unique(dir: &Utf8Path, stem: &str) -> StoreResult<(Utf8PathBuf, File)> {
    for n in 1..=MAX_SUFFIX {
        let name = if n == 1 {
            format!("{stem}.txt")
        } else {
            format!("{stem}_{n}.txt")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(StoreError::Io { path, source }),
        }
    }
    Err(StoreError::Io {
        path: dir.join(format!("{stem}.txt")),
        source: ErrorKind::AlreadyExists.into(),
    })
}

fn sanitize_prefix(prefix: &str) -> &str {
    let prefix = prefix.trim();
    if prefix.is_empty() || prefix.contains(['/', '\\']) || prefix.contains("..") {
        DEFAULT_PREFIX
    } else {
        prefix
    }
}
