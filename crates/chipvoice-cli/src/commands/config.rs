//! Config command implementation
//!
//! Prints the effective voice configuration after loading and overrides.

use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    config_warnings_to_json, error_codes, CommandOutput, ConfigResult, JsonError,
};
use crate::input::{load_config, InputError, LoadedConfig};

/// Run the config command
///
/// # Arguments
/// * `config_path` - Optional JSON config file
/// * `overrides` - `key=value` overrides applied after the file
/// * `json` - Whether to wrap the config in the machine-readable envelope
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(config_path: Option<&str>, overrides: &[String], json: bool) -> Result<ExitCode> {
    if json {
        run_json(config_path, overrides)
    } else {
        run_human(config_path, overrides)
    }
}

/// Prints the normalized config as JSON; warnings go to stderr.
fn run_human(config_path: Option<&str>, overrides: &[String]) -> Result<ExitCode> {
    let LoadedConfig {
        config, warnings, ..
    } = load_config(config_path.map(Path::new), overrides).map_err(|e| anyhow!("{}", e))?;

    for warning in &warnings {
        eprintln!("{} {}", "WARNING".yellow().bold(), warning);
    }

    super::print_json(&config)?;
    Ok(ExitCode::SUCCESS)
}

fn run_json(config_path: Option<&str>, overrides: &[String]) -> Result<ExitCode> {
    let loaded = match load_config(config_path.map(Path::new), overrides) {
        Ok(loaded) => loaded,
        Err(e) => {
            super::print_json(&CommandOutput::<ConfigResult>::failure(
                vec![input_error_to_json(&e)],
                Vec::new(),
            ))?;
            return Ok(ExitCode::from(1));
        }
    };

    let warnings = config_warnings_to_json(&loaded.warnings);
    let config_hash = match loaded.config.canonical_hash() {
        Ok(hash) => hash,
        Err(e) => {
            let error = JsonError::new(error_codes::JSON_SERIALIZE, e.to_string());
            super::print_json(&CommandOutput::<ConfigResult>::failure(vec![error], warnings))?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = ConfigResult {
        config: loaded.config,
        config_hash,
        source_hash: loaded.source_hash,
    };
    super::print_json(&CommandOutput::success(result, warnings))?;
    Ok(ExitCode::SUCCESS)
}

/// Converts a config loading error to a JSON error.
pub(crate) fn input_error_to_json(error: &InputError) -> JsonError {
    let json_error = JsonError::new(error.code(), error.to_string());
    match error.path() {
        Some(path) => json_error.with_file(path.display().to_string()),
        None => json_error,
    }
}
