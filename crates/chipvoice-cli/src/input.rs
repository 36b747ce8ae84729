//! Voice configuration loading for CLI commands.
//!
//! A configuration comes from an optional JSON file followed by any number of
//! `key=value` overrides. Both stages are lenient: bad values are clamped or
//! defaulted and reported as warnings, and only unreadable files, documents
//! that are not JSON objects, and overrides without `=` are errors.

use chipvoice_spec::{BackendError, ConfigError, ConfigWarning, VoiceConfig};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A configuration ready to render with.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The normalized configuration.
    pub config: VoiceConfig,
    /// Everything that was clamped, defaulted, or ignored, file first.
    pub warnings: Vec<ConfigWarning>,
    /// BLAKE3 hash of the config file content (hex string), if a file was read.
    pub source_hash: Option<String>,
}

/// Errors that can occur during config loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a JSON object.
    Config { path: PathBuf, source: ConfigError },

    /// An override was not `key=value`.
    Override { source: ConfigError },
}

impl InputError {
    /// Stable CLI error code for JSON output.
    pub fn code(&self) -> &'static str {
        use crate::commands::json_output::error_codes;
        match self {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::Config { .. } => error_codes::CONFIG_PARSE,
            InputError::Override { .. } => error_codes::MALFORMED_OVERRIDE,
        }
    }

    /// Path of the file involved, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputError::FileRead { path, .. } | InputError::Config { path, .. } => Some(path),
            InputError::Override { .. } => None,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::Config { path, source } => {
                write!(
                    f,
                    "invalid config '{}' [{}]: {}",
                    path.display(),
                    source.code(),
                    source.message()
                )
            }
            InputError::Override { source } => {
                write!(f, "[{}] {}", source.code(), source.message())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::Config { source, .. } | InputError::Override { source } => Some(source),
        }
    }
}

/// Loads a configuration file (or the defaults) and applies overrides in order.
///
/// # Arguments
/// * `path` - Optional path to a JSON config file
/// * `overrides` - `key=value` assignments applied after the file
///
/// # Example
/// ```
/// use chipvoice_cli::input::load_config;
///
/// let loaded = load_config(None, &["bit_depth=12".to_string()]).unwrap();
/// assert_eq!(loaded.config.bit_depth, 8);
/// assert_eq!(loaded.warnings.len(), 1);
/// ```
pub fn load_config(path: Option<&Path>, overrides: &[String]) -> Result<LoadedConfig, InputError> {
    let (mut config, mut warnings, source_hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
            let parsed =
                VoiceConfig::from_json_str(&content).map_err(|e| InputError::Config {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            (parsed.config, parsed.warnings, Some(source_hash))
        }
        None => (VoiceConfig::default(), Vec::new(), None),
    };

    for assignment in overrides {
        let applied = config
            .set_override(assignment)
            .map_err(|e| InputError::Override { source: e })?;
        warnings.extend(applied);
    }

    for warning in &warnings {
        warn!(key = %warning.key, "{}", warning.message);
    }

    Ok(LoadedConfig {
        config,
        warnings,
        source_hash,
    })
}
