use std::cell::RefCell;
use std::path::PathBuf;

use super::{load_state, save_state, LedgerState};
use crate::error::Result;

/// Persistence port for the ledger blob.
pub trait StateStore {
    /// `None` when nothing has been saved yet.
    fn load_state(&self) -> Result<Option<LedgerState>>;
    fn save_state(&self, state: &LedgerState) -> Result<()>;
}

/// Keeps the ledger in `state.toml` inside the data directory.
#[derive(Debug, Clone)]
pub struct TomlStore {
    dir: PathBuf,
}

impl TomlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl StateStore for TomlStore {
    fn load_state(&self) -> Result<Option<LedgerState>> {
        load_state(&self.dir)
    }

    fn save_state(&self, state: &LedgerState) -> Result<()> {
        save_state(&self.dir, state)
    }
}

/// Holds a serialized copy in memory, so saves still go through TOML.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved TOML text.
    pub fn contents(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load_state(&self) -> Result<Option<LedgerState>> {
        match self.blob.borrow().as_deref() {
            Some(text) => toml::from_str(text)
                .map(Some)
                .map_err(|e| crate::error::LedgerError::StateParse {
                    path: PathBuf::from("<memory>"),
                    source: e,
                }),
            None => Ok(None),
        }
    }

    fn save_state(&self, state: &LedgerState) -> Result<()> {
        let text = toml::to_string_pretty(state)?;
        *self.blob.borrow_mut() = Some(text);
        Ok(())
    }
}
