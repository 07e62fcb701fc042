//! Store configuration.
//!
//! # Responsibility
//! - Describe which backend holds the record set and where.
//! - Open the configured `PersistenceAdapter`.
//!
//! # Invariants
//! - `data_dir` is absolute once a config has been normalized.
//! - Backend file names are fixed per backend.

use crate::logging::default_log_level;
use crate::repo::json_file::JsonFilePersistence;
use crate::repo::persistence::{PersistenceAdapter, PersistenceError};
use crate::repo::sqlite_kv::SqlitePersistence;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const JSON_FILE_NAME: &str = "student_results.json";
pub const SQLITE_FILE_NAME: &str = "student_results.sqlite3";

/// Storage backend for the record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Self::Json => JSON_FILE_NAME,
            Self::Sqlite => SQLITE_FILE_NAME,
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(format!("unsupported backend `{other}`; expected json|sqlite")),
        }
    }
}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub log_level: String,
    /// File logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Builds a config rooted at `data_dir` with default backend and level.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::default(),
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Resolves relative directories against `base` and rejects empty ones.
    pub fn normalized(mut self, base: &Path) -> Result<Self, String> {
        self.data_dir = absolutize(&self.data_dir, base, "data_dir")?;
        self.log_dir = self
            .log_dir
            .map(|dir| absolutize(&dir, base, "log_dir"))
            .transpose()?;
        Ok(self)
    }

    /// Full path of the backend's storage file.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(self.backend.file_name())
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    /// - `PersistenceError::Io` when the data directory cannot be created.
    /// - `PersistenceError::Db` when the SQLite store cannot be opened.
    pub fn open_adapter(&self) -> Result<Box<dyn PersistenceAdapter>, PersistenceError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let path = self.data_path();
        Ok(match self.backend {
            Backend::Json => Box::new(JsonFilePersistence::new(path)),
            Backend::Sqlite => Box::new(SqlitePersistence::open(path)?),
        })
    }
}

fn absolutize(dir: &Path, base: &Path, name: &str) -> Result<PathBuf, String> {
    if dir.as_os_str().is_empty() {
        return Err(format!("{name} cannot be empty"));
    }
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(base.join(dir))
    }
}
