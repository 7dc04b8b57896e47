//! File-based persistence of whole store snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, StoreSnapshot};

/// Saves and loads [`StoreSnapshot`]s as bincode files.
///
/// # File Format
///
/// Each save is `{name}.bin`, written to `{name}.bin.tmp` first and renamed
/// into place so a crash never leaves a half-written save behind.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    fn save_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.bin"))
    }

    pub fn save(&self, name: &str, snapshot: &StoreSnapshot) -> Result<()> {
        let path = self.save_path(name);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved store snapshot '{}' to {}", name, path.display());
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Option<StoreSnapshot>> {
        let path = self.save_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded store snapshot '{}' from {}", name, path.display());
        Ok(Some(snapshot))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.save_path(name).exists()
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.save_path(name);
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted store snapshot '{}'", name);
        }
        Ok(())
    }

    /// Names of every save in the directory, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let path = entry.map_err(RepositoryError::Io)?.path();
            if let Some(name) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(".bin"))
            {
                names.push(name.to_owned());
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}
