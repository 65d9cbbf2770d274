use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;

use super::{BlobStore, StoreError};

const VALUE_EXTENSION: &str = "json";

/// Blob store backed by a directory: each key is one `<key>.json` file.
///
/// Writes go to a temp file in the same directory which is then renamed over
/// the target, so a reader never observes a half-written value. The temp file
/// is removed again if any step of the write fails.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|err| {
            warn!(
                "event=blob_write module=storage status=error key={} error={}",
                key, err.error
            );
            io_err(err.error)
        })?;

        debug!(
            "event=blob_write module=storage status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}

/// Keys become file names, so only allow a conservative character set.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
