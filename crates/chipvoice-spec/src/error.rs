//! Error and warning types for configuration handling.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while loading a voice configuration.
///
/// Individual bad values never produce an error; see [`ConfigWarning`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON, or could not be converted to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but its top level is not an object.
    #[error("config must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A `key=value` override was not of that shape.
    #[error("malformed override '{0}': expected key=value")]
    MalformedOverride(String),
}

impl BackendError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::Json(_) => "CONFIG_001",
            ConfigError::NotAnObject { .. } => "CONFIG_002",
            ConfigError::MalformedOverride(_) => "CONFIG_003",
        }
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// A recovered configuration problem.
///
/// Produced when a value was clamped, defaulted, or ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Key the warning refers to, as it appeared in the input.
    pub key: String,
    /// Human-readable description of what was done.
    pub message: String,
}

impl ConfigWarning {
    /// Creates a new warning.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Trait for errors reported with a stable code.
///
/// Implemented by the configuration and synthesis error types so the CLI can
/// print machine-readable diagnostics without knowing each concrete type.
///
/// # Example
///
/// ```
/// use chipvoice_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "CONFIG_001" or "SYNTH_002". These codes
    /// are stable and can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = ConfigError::NotAnObject { found: "array" };
        assert_eq!(err.code(), "CONFIG_002");
        assert_eq!(err.category(), "config");
        assert!(err.message().contains("array"));

        let err = ConfigError::MalformedOverride("pitch".to_string());
        assert_eq!(err.code(), "CONFIG_003");
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::new("bit_depth", "clamped 12 to 8");
        assert_eq!(warning.to_string(), "bit_depth: clamped 12 to 8");
    }
}
