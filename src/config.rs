//! Runtime configuration. Each setting resolves flag > environment > default,
//! with blank environment values treated as unset.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cmd::Services;
use crate::ergast::{ErgastSource, FileSource, Unconfigured};
use crate::utils::system_clock;

pub const DATA_ENV: &str = "F1BOT_DATA";
pub const PREFIX_ENV: &str = "F1BOT_CHAT_PREFIX";
pub const DEFAULT_CHAT_PREFIX: &str = "!f1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Dataset file; `None` leaves every data command failing with a hint.
    pub data: Option<PathBuf>,
    pub chat_prefix: String,
}

impl Config {
    /// Resolve against the process environment.
    pub fn from_env(data: Option<PathBuf>, prefix: Option<String>) -> Self {
        Self::resolve(data, prefix, |key| std::env::var(key).ok())
    }

    pub fn resolve<F>(data: Option<PathBuf>, prefix: Option<String>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let data = data.or_else(|| lookup(DATA_ENV).map(PathBuf::from));
        let chat_prefix = prefix
            .filter(|p| !p.trim().is_empty())
            .or_else(|| lookup(PREFIX_ENV))
            .unwrap_or_else(|| DEFAULT_CHAT_PREFIX.to_string());
        Self { data, chat_prefix }
    }

    pub fn services(&self) -> Services {
        let source: Arc<dyn ErgastSource> = match &self.data {
            Some(path) => {
                debug!(path = %path.display(), "using dataset file");
                Arc::new(FileSource::new(path.clone()))
            }
            None => {
                warn!("no dataset configured; set --data or {DATA_ENV}");
                Arc::new(Unconfigured)
            }
        };
        Services::new(source, system_clock())
    }
}
