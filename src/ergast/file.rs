//! Dataset file loader. Format follows the extension: `.yaml` / `.yml` is
//! YAML, anything else is JSON. The file is re-read on every call so edits
//! show up without a restart.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DataError, Dataset, ErgastSource, Race};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Yaml,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => DatasetFormat::Yaml,
            _ => DatasetFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Dataset, DataError> {
        let shown = self.path.display().to_string();
        let raw = std::fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: shown.clone(),
            source,
        })?;
        let format = DatasetFormat::from_path(&self.path);
        debug!(path = %shown, ?format, bytes = raw.len(), "loading dataset");

        let parsed = match format {
            DatasetFormat::Yaml => serde_yaml::from_str(&raw).map_err(|e| e.to_string()),
            DatasetFormat::Json => serde_json::from_str(&raw).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| DataError::Parse {
            path: shown,
            message,
        })
    }
}

impl ErgastSource for FileSource {
    fn races(&self, year: u16) -> Result<Vec<Race>, DataError> {
        Ok(self.load()?.season(year))
    }
}
