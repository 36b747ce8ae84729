//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. Output is a single pretty-printed object on
//! stdout with a `success` flag, structured errors and warnings, and a
//! command-specific `result` on success.

use chipvoice_spec::{ConfigWarning, VoiceConfig};
use chipvoice_synth::SyllableUnit;
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Config file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Config file is not a JSON object
    pub const CONFIG_PARSE: &str = "CLI_002";
    /// `--set` value is not `key=value`
    pub const MALFORMED_OVERRIDE: &str = "CLI_003";
    /// Synthesis failed (wraps SYNTH_xxx errors)
    pub const SYNTHESIS: &str = "CLI_004";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_005";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_006";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// A config value was clamped, defaulted, or ignored
    pub const CONFIG_VALUE: &str = "CLI_W001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "CLI_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Config key the warning refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the config key for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&ConfigWarning> for JsonWarning {
    fn from(warning: &ConfigWarning) -> Self {
        JsonWarning::new(warning_codes::CONFIG_VALUE, warning.message.clone())
            .with_path(warning.key.clone())
    }
}

/// Converts config warnings to JSON warnings.
pub fn config_warnings_to_json(warnings: &[ConfigWarning]) -> Vec<JsonWarning> {
    warnings.iter().map(JsonWarning::from).collect()
}

/// A syllable unit with its diagnostic label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitInfo {
    /// Label such as `KYA` or `TO*`
    pub label: String,
    /// The unit itself
    #[serde(flatten)]
    pub unit: SyllableUnit,
}

impl From<&SyllableUnit> for UnitInfo {
    fn from(unit: &SyllableUnit) -> Self {
        Self {
            label: unit.label(),
            unit: unit.clone(),
        }
    }
}

/// Successful `render` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// Path the WAV file was written to
    pub output_path: String,
    /// Space-separated unit labels
    pub phonemes: String,
    /// Number of syllable units
    pub unit_count: usize,
    /// Seed the random source was created from
    pub seed: u32,
    /// Sample rate of the written file in Hz
    pub sample_rate: u32,
    /// Number of samples in the written file
    pub num_samples: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// BLAKE3 hash of the canonical effective config
    pub config_hash: String,
}

/// Successful `phonemize` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonemizeResult {
    /// The input text
    pub text: String,
    /// Space-separated unit labels
    pub phonemes: String,
    /// Units in temporal order
    pub units: Vec<UnitInfo>,
}

/// Successful `config` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResult {
    /// The normalized effective config
    pub config: VoiceConfig,
    /// BLAKE3 hash of the canonical config
    pub config_hash: String,
    /// BLAKE3 hash of the config file content, if one was read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Top-level JSON output shared by all commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Config warnings
    pub warnings: Vec<JsonWarning>,
    /// Command-specific result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}
