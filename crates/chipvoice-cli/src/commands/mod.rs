//! CLI command implementations

pub mod config;
pub mod json_output;
pub mod phonemize;
pub mod render;

use anyhow::{Context, Result};
use serde::Serialize;

/// Text spoken when none is given.
pub const DEFAULT_TEXT: &str = "FIRE";

/// Returns `text`, or [`DEFAULT_TEXT`] when it is blank.
pub fn effective_text(text: &str) -> &str {
    if text.trim().is_empty() {
        DEFAULT_TEXT
    } else {
        text
    }
}

/// Prints `output` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(output: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(output).with_context(|| {
        format!(
            "[{}] failed to serialize JSON output",
            json_output::error_codes::JSON_SERIALIZE
        )
    })?;
    println!("{}", json);
    Ok(())
}
