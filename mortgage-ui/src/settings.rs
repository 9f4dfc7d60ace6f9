//! TOML settings for the `mortgage` binary.
//!
//! Every key is optional; anything missing falls back to the built-in
//! defaults.
//!
//! ```toml
//! [calculator]
//! home_price = "525000"
//! interest_rate = "6.125"
//!
//! [logging]
//! level = "info"
//! file = "mortgage.log"
//! console = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use mortgage_core::LoanForm;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,

    /// Log file to append to, if any.
    pub file: Option<PathBuf>,

    /// Whether log lines are echoed to stderr.
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            console: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting values for the calculator inputs.
    pub calculator: LoanForm,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_toml(
        text: &str,
        path: &Path,
    ) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
