mod settings;
pub mod state;
mod store;

pub use settings::{Business, DisplaySettings, Settings};
pub use state::{Counter, GoalSettings, Goals, LedgerState};
pub use store::{MemoryStore, StateStore, TomlStore};

use crate::error::{LedgerError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SETTINGS_FILE: &str = "config.toml";
pub const STATE_FILE: &str = "state.toml";

/// Get the data directory path (XDG data dir, falling back to ~/.sweetbook/)
pub fn data_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "sweetbook") {
        return Ok(proj_dirs.data_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        LedgerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".sweetbook"))
}

/// Fail unless `init` has been run for this directory.
pub fn ensure_initialized(data_dir: &Path) -> Result<()> {
    if !data_dir.exists() {
        return Err(LedgerError::DataDirNotFound(data_dir.to_path_buf()));
    }
    Ok(())
}

/// Create the data directory and write the settings template
pub fn init_data_dir(data_dir: &Path) -> Result<()> {
    if data_dir.exists() {
        return Err(LedgerError::AlreadyInitialized(data_dir.to_path_buf()));
    }
    fs::create_dir_all(data_dir)?;
    fs::write(data_dir.join(SETTINGS_FILE), SETTINGS_TEMPLATE)?;
    save_state(data_dir, &LedgerState::default())?;
    debug!("Initialized data directory {}", data_dir.display());
    Ok(())
}

/// Load config.toml
pub fn load_settings(data_dir: &Path) -> Result<Settings> {
    let path = data_dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Err(LedgerError::SettingsFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| LedgerError::SettingsParse { path, source: e })
}

/// Load state.toml, `None` on first run
pub fn load_state(data_dir: &Path) -> Result<Option<LedgerState>> {
    let path = data_dir.join(STATE_FILE);
    if !path.exists() {
        debug!("No state file at {}", path.display());
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let state: LedgerState =
        toml::from_str(&content).map_err(|e| LedgerError::StateParse { path, source: e })?;
    debug!(
        expenses = state.expenses.len(),
        sales = state.sales.len(),
        products = state.products.len(),
        "Loaded ledger state"
    );
    Ok(Some(state))
}

/// Save state.toml
pub fn save_state(data_dir: &Path, state: &LedgerState) -> Result<()> {
    let path = data_dir.join(STATE_FILE);
    let content = toml::to_string_pretty(state)?;
    fs::write(&path, content)?;
    debug!("Saved ledger state to {}", path.display());
    Ok(())
}

/// Template content for config.toml
pub const SETTINGS_TEMPLATE: &str = r#"[business]
name = "Your Bakery"
# owner = "Jane Baker"    # optional

[display]
currency_symbol = "$"
"#;
