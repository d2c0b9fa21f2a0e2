//! Configuration for medialib.
//!
//! Configuration sources (highest priority first):
//! 1. `--data-file` command-line flag
//! 2. Environment variable (MEDIALIB_DATA_FILE)
//! 3. Config file (.medialib/config.yaml, then ~/.medialib/config.yaml)
//! 4. Defaults (PRJ4Rentals.txt in the current directory)
//!
//! Config file discovery:
//! - Searches current directory and parents for .medialib/config.yaml
//! - Paths in the config file are relative to the project root (the parent
//!   of the .medialib/ directory)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the load file location
pub const DATA_FILE_ENV: &str = "MEDIALIB_DATA_FILE";

/// Load file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "PRJ4Rentals.txt";

const CONFIG_DIR: &str = ".medialib";
const CONFIG_FILE: &str = "config.yaml";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Load file (relative to the project root)
    pub data_file: Option<String>,
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub on_start: Option<bool>,
    pub on_exit: Option<bool>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Path of the load file
    pub data_file: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Listing behavior of the interactive menu
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Show the whole library after loading
    pub on_start: bool,
    /// Show the whole library before exiting
    pub on_exit: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            on_start: true,
            on_exit: true,
        }
    }
}

impl ResolvedConfig {
    /// Replace the load file (used for the `--data-file` flag)
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Find the project config, falling back to the one in the home directory
fn find_config_file() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file_from(&cwd))
        .or_else(|| {
            let path = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
            path.exists().then_some(path)
        })
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Combine an optional config file with the environment override
fn resolve(
    config_file: Option<PathBuf>,
    parsed: Option<ConfigFile>,
    env_data_file: Option<String>,
) -> ResolvedConfig {
    let from_file = match (&config_file, &parsed) {
        (Some(path), Some(cfg)) => cfg.data_file.as_ref().map(|data_file| {
            // Base directory is the parent of .medialib/
            let base_dir = path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));
            resolve_path(base_dir, data_file)
        }),
        _ => None,
    };

    let data_file = env_data_file
        .map(PathBuf::from)
        .or(from_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let display_cfg = parsed.and_then(|c| c.display);
    let defaults = DisplaySettings::default();
    let display = DisplaySettings {
        on_start: display_cfg
            .as_ref()
            .and_then(|d| d.on_start)
            .unwrap_or(defaults.on_start),
        on_exit: display_cfg
            .as_ref()
            .and_then(|d| d.on_exit)
            .unwrap_or(defaults.on_exit),
    };

    ResolvedConfig {
        data_file,
        config_file,
        display,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let parsed = config_file.as_deref().map(load_config_file).transpose()?;
    let env_data_file = std::env::var(DATA_FILE_ENV).ok();

    Ok(resolve(config_file, parsed, env_data_file))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
