//! Application configuration for TibiaDex.
//!
//! User config lives at `~/.tibiadex/tibiadex.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TibiaDexError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "tibiadex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".tibiadex";

// ---------------------------------------------------------------------------
// Config structs (matching tibiadex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Output settings for the CLI.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[parser]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Replacement for the built-in list of creatures whose names contain "of".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creatures_file: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON records.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.tibiadex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TibiaDexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.tibiadex/tibiadex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TibiaDexError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TibiaDexError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TibiaDexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| TibiaDexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TibiaDexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
