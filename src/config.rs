//! Configuration for abi-export paths.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (--input, --output)
//! 2. Environment variables (ABI_EXPORT_INPUT, ABI_EXPORT_OUTPUT)
//! 3. Config file (abi-export.yaml)
//! 4. Defaults (./build/contracts/ -> ./abi/)
//!
//! Flags and environment variables are both read by clap, so they arrive
//! here together as [`ConfigOverrides`].
//!
//! Config file discovery:
//! - Searches current directory and parents for abi-export.yaml
//! - Paths in config file are relative to the directory containing it

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file name searched for in the current directory and its parents
pub const CONFIG_FILE_NAME: &str = "abi-export.yaml";

/// Default artifact directory (Truffle's build output)
pub const DEFAULT_INPUT_DIR: &str = "./build/contracts/";

/// Default ABI output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./abi/";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Artifact directory (relative to config file)
    pub input: Option<String>,
    /// ABI output directory (relative to config file)
    pub output: Option<String>,
}

/// Where to read artifacts from and where to write ABIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory tree of build artifacts
    pub input_dir: PathBuf,

    /// Flat directory receiving one ABI file per artifact
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ExportConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Values that take priority over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub export: ExportConfig,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file deserializes to unit, not a mapping
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Load configuration, searching for a config file from the current directory
pub fn load_config(overrides: ConfigOverrides) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    load_config_from(&cwd, overrides)
}

/// Load configuration, searching for a config file from `start`
pub fn load_config_from(start: &Path, overrides: ConfigOverrides) -> Result<ResolvedConfig> {
    let defaults = ExportConfig::default();
    let config_file = find_config_file(start);

    let (input_dir, output_dir) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        let base_dir = config_path.parent().unwrap_or(Path::new("."));

        let input_dir = match overrides.input_dir {
            Some(dir) => dir,
            None => config
                .paths
                .input
                .as_deref()
                .map(|p| resolve_path(base_dir, p))
                .unwrap_or(defaults.input_dir),
        };

        let output_dir = match overrides.output_dir {
            Some(dir) => dir,
            None => config
                .paths
                .output
                .as_deref()
                .map(|p| resolve_path(base_dir, p))
                .unwrap_or(defaults.output_dir),
        };

        (input_dir, output_dir)
    } else {
        (
            overrides.input_dir.unwrap_or(defaults.input_dir),
            overrides.output_dir.unwrap_or(defaults.output_dir),
        )
    };

    Ok(ResolvedConfig {
        export: ExportConfig {
            input_dir,
            output_dir,
        },
        config_file,
    })
}
