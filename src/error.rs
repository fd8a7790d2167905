use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Data directory not found at {0}. Run 'sweetbook init' to create it.")]
    DataDirNotFound(PathBuf),

    #[error("Settings file not found: {0}")]
    SettingsFileNotFound(PathBuf),

    #[error("Failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse state file {path}: {source}")]
    StateParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize ledger state: {0}")]
    StateSerialize(#[from] toml::ser::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Not enough stock for '{product}': requested {requested}, only {available} available")]
    InsufficientStock {
        product: String,
        requested: f64,
        available: f64,
    },

    #[error("No {kind} with id {id}")]
    RecordNotFound { kind: &'static str, id: u64 },

    #[error("Invalid calculation: {0}")]
    InvalidCalculation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
