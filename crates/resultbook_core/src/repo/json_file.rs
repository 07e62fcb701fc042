//! JSON file persistence backend.
//!
//! # Responsibility
//! - Store the record set as one JSON array in a single file.
//!
//! # Invariants
//! - `save` writes a sibling temp file and renames it over the target, so a
//!   reader never observes a half-written array.
//! - A missing file means "nothing stored", not an error.

use crate::model::student_result::StudentResult;
use crate::repo::persistence::{
    decode_records, encode_records, PersistenceAdapter, PersistenceResult,
};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed adapter.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistenceAdapter for JsonFilePersistence {
    fn backend(&self) -> &'static str {
        "json_file"
    }

    fn try_load(&self) -> PersistenceResult<Vec<StudentResult>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => decode_records(Some(payload.as_str()), self.backend()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, records: &[StudentResult]) -> PersistenceResult<()> {
        let payload = encode_records(records)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.temp_path();
        fs::write(&temp_path, payload)?;
        fs::rename(&temp_path, &self.path)?;
        debug!(
            "event=records_save module=repo status=ok backend=json_file count={}",
            records.len()
        );
        Ok(())
    }

    fn clear(&mut self) -> PersistenceResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFilePersistence;
    use crate::repo::persistence::{PersistenceAdapter, PersistenceError};

    #[test]
    fn missing_file_loads_empty_and_clear_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFilePersistence::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
        store.clear().unwrap();
    }

    #[test]
    fn truncated_file_loads_empty_but_fails_try_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "[{\"id\":").unwrap();
        let store = JsonFilePersistence::new(&path);
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.json");
        let mut store = JsonFilePersistence::new(&path);
        store.save(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(!dir.path().join("nested").join("results.json.tmp").exists());
    }
}
