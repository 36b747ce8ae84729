//! Chipvoice voice configuration library.
//!
//! This crate holds the declarative side of Chipvoice: the [`VoiceConfig`]
//! that selects rates, bit depth, pitch and the lo-fi character of a render,
//! plus the rules that turn loosely-typed user input into a configuration
//! the synthesizer can trust.
//!
//! # Error policy
//!
//! Configuration favors silent recovery. Out-of-range values are clamped to
//! their documented bounds and unparseable values fall back to the field
//! default; both cases are reported as [`ConfigWarning`]s rather than errors.
//! Only a document that is not JSON (or not a JSON object) is rejected.
//!
//! # Example
//!
//! ```
//! use chipvoice_spec::VoiceConfig;
//!
//! let parsed = VoiceConfig::from_json_str(r#"{"bit_depth": 12, "base_pitch": "abc"}"#).unwrap();
//! assert_eq!(parsed.config.bit_depth, 8);
//! assert_eq!(parsed.config.base_pitch, 110.0);
//! assert_eq!(parsed.warnings.len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`config`]: Voice configuration, bounds, and lenient parsing
//! - [`error`]: Error and warning types, and the [`BackendError`] reporting trait
//! - [`hash`]: Canonical JSON hashing for reports

pub mod config;
pub mod error;
pub mod hash;

pub use config::{ConfigField, ParsedConfig, VoiceConfig};
pub use error::{BackendError, ConfigError, ConfigWarning};
pub use hash::{canonical_value_hash, canonicalize_json};
