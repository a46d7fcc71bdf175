use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::store::{KvStore, Result, StoreError};

const EXTENSION: &str = "json";

/// One file per key under a base directory.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.{EXTENSION}")))
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyquest")
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Written to a temp file and renamed over the old value, so a crash
    /// mid-write never leaves a torn record behind.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key)?;
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.file_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes only the value files this store writes; the log and anything
    /// else in the directory are left alone.
    fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|x| x.to_str()) == Some(EXTENSION) {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
