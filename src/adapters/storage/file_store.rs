use crate::ports::{KeyValueStorage, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// One JSON file per slot under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_dir>/todo-projects`, the platform's per-user data location.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("todo-projects"))
    }

    fn slot_path(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.dir.join(format!("{key}.json")))
    }

    fn invalid_key(key: &str) -> String {
        format!("`{key}` is not a valid slot name")
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key).ok_or_else(|| StorageError::Read {
            key: key.to_string(),
            reason: Self::invalid_key(key),
        })?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_error = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };
        let path = self
            .slot_path(key)
            .ok_or_else(|| write_error(Self::invalid_key(key)))?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| write_error(format!("{}: {e}", self.dir.display())))?;

        // Readers see either the previous snapshot or the new one.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .map_err(|e| write_error(format!("{}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| write_error(format!("{}: {e}", path.display())))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_slot_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("never-created"));
        assert_eq!(storage.get_item("userData").unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_replaces_content() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("userData", "{\"idCounter\":1}").unwrap();
        storage.set_item("userData", "{\"idCounter\":2}").unwrap();

        assert_eq!(
            storage.get_item("userData").unwrap().as_deref(),
            Some("{\"idCounter\":2}")
        );
        let on_disk = fs::read_to_string(dir.path().join("nested/userData.json")).unwrap();
        assert_eq!(on_disk, "{\"idCounter\":2}");
        assert!(!dir.path().join("nested/userData.json.tmp").exists());
    }

    #[test]
    fn slots_are_independent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(StorageError::Write { .. })
        ));
        assert!(matches!(
            storage.get_item(""),
            Err(StorageError::Read { .. })
        ));
    }
}
