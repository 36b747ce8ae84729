//! Voice configuration, bounds, and lenient parsing.
//!
//! A [`VoiceConfig`] can be built in code, deserialized strictly with serde,
//! or parsed leniently from loosely-typed input with
//! [`VoiceConfig::from_json_str`] and [`VoiceConfig::set`]. The lenient path
//! accepts numbers, booleans, and numeric strings, and never fails on a bad
//! value: the value is replaced by the field default and a warning is recorded.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigWarning};
use crate::hash::canonical_value_hash;

/// Default synthesis sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;
/// Default output sample rate in Hz.
pub const DEFAULT_OUTPUT_RATE: u32 = 8_000;
/// Default quantization depth in bits.
pub const DEFAULT_BIT_DEPTH: u8 = 4;
/// Default base pitch in Hz.
pub const DEFAULT_BASE_PITCH: f64 = 110.0;
/// Default speaking-rate multiplier.
pub const DEFAULT_SPEAKING_RATE: f64 = 1.0;
/// Default unvoiced noise amount.
pub const DEFAULT_NOISE_AMOUNT: f64 = 0.05;
/// Default formant gain.
pub const DEFAULT_FORMANT_GAIN: f64 = 1.0;
/// Default cabinet delay in seconds.
pub const DEFAULT_CABINET_DELAY: f64 = 0.01;

/// Accepted synthesis sample rates in Hz.
pub const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 4_000..=48_000;
/// Lowest accepted output sample rate in Hz. The upper bound is the synthesis rate.
pub const MIN_OUTPUT_RATE: u32 = 1_000;
/// Accepted quantization depths in bits.
pub const BIT_DEPTH_RANGE: RangeInclusive<u8> = 3..=8;
/// Accepted base pitch in Hz.
pub const BASE_PITCH_RANGE: RangeInclusive<f64> = 70.0..=180.0;
/// Accepted speaking-rate multipliers.
pub const SPEAKING_RATE_RANGE: RangeInclusive<f64> = 0.6..=1.6;
/// Accepted noise amounts. The lower bound is a floor, not just a validation limit.
pub const NOISE_AMOUNT_RANGE: RangeInclusive<f64> = 0.02..=1.0;
/// Accepted formant gains.
pub const FORMANT_GAIN_RANGE: RangeInclusive<f64> = 0.5..=2.0;
/// Accepted cabinet delays in seconds.
pub const CABINET_DELAY_RANGE: RangeInclusive<f64> = 0.0..=0.08;

/// Configuration for one render.
///
/// Serde field names are the snake_case names below; the lenient parser also
/// accepts the short aliases listed on [`ConfigField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Synthesis sample rate in Hz.
    pub sample_rate: u32,
    /// Output sample rate in Hz (never above `sample_rate`).
    pub output_rate: u32,
    /// Quantization depth in bits (3-8).
    pub bit_depth: u8,
    /// Base pitch of the voiced excitation in Hz (70-180).
    pub base_pitch: f64,
    /// Speaking-rate multiplier (0.6-1.6). Higher is faster.
    pub speaking_rate: f64,
    /// Noise mixed into unvoiced excitation (0.02-1.0).
    pub noise_amount: f64,
    /// Gain applied to the summed formant bands (0.5-2.0).
    pub formant_gain: f64,
    /// Single-tap cabinet echo delay in seconds (0-0.08).
    pub cabinet_delay: f64,
    /// Raise the third formant of consonants and open the anti-alias filter.
    pub bright_consonant: bool,
    /// Insert the ring-modulation pass into the lo-fi chain.
    pub vocoder: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            output_rate: DEFAULT_OUTPUT_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
            base_pitch: DEFAULT_BASE_PITCH,
            speaking_rate: DEFAULT_SPEAKING_RATE,
            noise_amount: DEFAULT_NOISE_AMOUNT,
            formant_gain: DEFAULT_FORMANT_GAIN,
            cabinet_delay: DEFAULT_CABINET_DELAY,
            bright_consonant: false,
            vocoder: false,
        }
    }
}

/// A recognized configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// `sample_rate` (alias `sr`).
    SampleRate,
    /// `output_rate` (alias `fs_out`, `fsOut`).
    OutputRate,
    /// `bit_depth` (alias `bit`, `bits`).
    BitDepth,
    /// `base_pitch` (alias `pitch`, `f0`).
    BasePitch,
    /// `speaking_rate` (alias `rate`).
    SpeakingRate,
    /// `noise_amount` (alias `noise`).
    NoiseAmount,
    /// `formant_gain` (alias `formantGain`).
    FormantGain,
    /// `cabinet_delay` (alias `delay`).
    CabinetDelay,
    /// `bright_consonant` (alias `brightConsonant`, `bright`).
    BrightConsonant,
    /// `vocoder`.
    Vocoder,
}

impl ConfigField {
    /// All fields, in serialization order.
    pub const ALL: [ConfigField; 10] = [
        ConfigField::SampleRate,
        ConfigField::OutputRate,
        ConfigField::BitDepth,
        ConfigField::BasePitch,
        ConfigField::SpeakingRate,
        ConfigField::NoiseAmount,
        ConfigField::FormantGain,
        ConfigField::CabinetDelay,
        ConfigField::BrightConsonant,
        ConfigField::Vocoder,
    ];

    /// Canonical key name.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigField::SampleRate => "sample_rate",
            ConfigField::OutputRate => "output_rate",
            ConfigField::BitDepth => "bit_depth",
            ConfigField::BasePitch => "base_pitch",
            ConfigField::SpeakingRate => "speaking_rate",
            ConfigField::NoiseAmount => "noise_amount",
            ConfigField::FormantGain => "formant_gain",
            ConfigField::CabinetDelay => "cabinet_delay",
            ConfigField::BrightConsonant => "bright_consonant",
            ConfigField::Vocoder => "vocoder",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            ConfigField::SampleRate => &["sr"],
            ConfigField::OutputRate => &["fs_out", "fsout"],
            ConfigField::BitDepth => &["bit", "bits"],
            ConfigField::BasePitch => &["pitch", "f0"],
            ConfigField::SpeakingRate => &["rate"],
            ConfigField::NoiseAmount => &["noise"],
            ConfigField::FormantGain => &["formantgain"],
            ConfigField::CabinetDelay => &["delay"],
            ConfigField::BrightConsonant => &["brightconsonant", "bright"],
            ConfigField::Vocoder => &[],
        }
    }

    /// Looks up a field by canonical key or alias, ignoring ASCII case.
    pub fn from_key(key: &str) -> Option<ConfigField> {
        let key = key.trim();
        Self::ALL.into_iter().find(|field| {
            field.key().eq_ignore_ascii_case(key)
                || field.aliases().iter().any(|a| a.eq_ignore_ascii_case(key))
        })
    }

    fn is_flag(&self) -> bool {
        matches!(self, ConfigField::BrightConsonant | ConfigField::Vocoder)
    }
}

/// A leniently parsed configuration together with everything that was recovered.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// The normalized configuration.
    pub config: VoiceConfig,
    /// Values that were clamped, defaulted, or ignored.
    pub warnings: Vec<ConfigWarning>,
}

impl VoiceConfig {
    /// Parses a configuration document leniently.
    ///
    /// Missing keys keep their defaults. The result is always normalized.
    ///
    /// # Errors
    /// Returns an error only when `input` is not JSON or its top level is not an object.
    pub fn from_json_str(input: &str) -> Result<ParsedConfig, ConfigError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(&value)
    }

    /// Parses an already-decoded JSON document leniently.
    ///
    /// # Errors
    /// Returns an error when `value` is not a JSON object.
    pub fn from_json_value(value: &Value) -> Result<ParsedConfig, ConfigError> {
        let object = value.as_object().ok_or(ConfigError::NotAnObject {
            found: json_type_name(value),
        })?;

        let mut config = VoiceConfig::default();
        let mut warnings = Vec::new();

        for (key, raw) in object {
            match ConfigField::from_key(key) {
                Some(field) => {
                    if let Some(warning) = config.apply(field, key, raw) {
                        warnings.push(warning);
                    }
                }
                None => warnings.push(ConfigWarning::new(key.as_str(), "unknown key ignored")),
            }
        }

        warnings.extend(config.normalize());
        debug!(warnings = warnings.len(), "parsed voice config");

        Ok(ParsedConfig { config, warnings })
    }

    /// Applies one `key`/`value` override given as text, then re-normalizes.
    ///
    /// Unknown keys are ignored with a warning.
    pub fn set(&mut self, key: &str, value: &str) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        match ConfigField::from_key(key) {
            Some(field) => {
                let raw = Value::String(value.to_string());
                if let Some(warning) = self.apply(field, key, &raw) {
                    warnings.push(warning);
                }
            }
            None => warnings.push(ConfigWarning::new(key, "unknown key ignored")),
        }
        warnings.extend(self.normalize());
        warnings
    }

    /// Applies a `key=value` override string.
    ///
    /// # Errors
    /// Returns [`ConfigError::MalformedOverride`] when there is no `=`.
    pub fn set_override(&mut self, assignment: &str) -> Result<Vec<ConfigWarning>, ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedOverride(assignment.to_string()))?;
        Ok(self.set(key, value))
    }

    /// Returns a copy with every field clamped to its bounds.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Clamps every field to its bounds in place.
    ///
    /// Non-finite numbers fall back to the field default; infinities clamp to
    /// the nearest bound. The output rate is capped at the synthesis rate.
    pub fn normalize(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        self.sample_rate = clamp_u32(
            ConfigField::SampleRate,
            self.sample_rate,
            *SAMPLE_RATE_RANGE.start(),
            *SAMPLE_RATE_RANGE.end(),
            &mut warnings,
        );
        self.output_rate = clamp_u32(
            ConfigField::OutputRate,
            self.output_rate,
            MIN_OUTPUT_RATE,
            self.sample_rate,
            &mut warnings,
        );
        self.bit_depth = clamp_u32(
            ConfigField::BitDepth,
            self.bit_depth as u32,
            *BIT_DEPTH_RANGE.start() as u32,
            *BIT_DEPTH_RANGE.end() as u32,
            &mut warnings,
        ) as u8;

        self.base_pitch = clamp_f64(
            ConfigField::BasePitch,
            self.base_pitch,
            &BASE_PITCH_RANGE,
            DEFAULT_BASE_PITCH,
            &mut warnings,
        );
        self.speaking_rate = clamp_f64(
            ConfigField::SpeakingRate,
            self.speaking_rate,
            &SPEAKING_RATE_RANGE,
            DEFAULT_SPEAKING_RATE,
            &mut warnings,
        );
        self.noise_amount = clamp_f64(
            ConfigField::NoiseAmount,
            self.noise_amount,
            &NOISE_AMOUNT_RANGE,
            DEFAULT_NOISE_AMOUNT,
            &mut warnings,
        );
        self.formant_gain = clamp_f64(
            ConfigField::FormantGain,
            self.formant_gain,
            &FORMANT_GAIN_RANGE,
            DEFAULT_FORMANT_GAIN,
            &mut warnings,
        );
        self.cabinet_delay = clamp_f64(
            ConfigField::CabinetDelay,
            self.cabinet_delay,
            &CABINET_DELAY_RANGE,
            DEFAULT_CABINET_DELAY,
            &mut warnings,
        );

        warnings
    }

    /// Computes the BLAKE3 hash of the canonical JSON form of this config.
    ///
    /// # Errors
    /// Returns an error if the config cannot be converted to JSON.
    pub fn canonical_hash(&self) -> Result<String, ConfigError> {
        let value = serde_json::to_value(self)?;
        Ok(canonical_value_hash(&value))
    }

    /// Stores a raw value into `field`, falling back to the default when it
    /// cannot be read. Range clamping is left to [`VoiceConfig::normalize`].
    fn apply(&mut self, field: ConfigField, key: &str, raw: &Value) -> Option<ConfigWarning> {
        if field.is_flag() {
            let flag = match value_as_bool(raw) {
                Some(flag) => flag,
                None => {
                    self.reset(field);
                    return Some(unparseable(key, raw));
                }
            };
            match field {
                ConfigField::BrightConsonant => self.bright_consonant = flag,
                _ => self.vocoder = flag,
            }
            return None;
        }

        let number = match value_as_f64(raw) {
            Some(n) if !n.is_nan() => n,
            _ => {
                self.reset(field);
                return Some(unparseable(key, raw));
            }
        };

        match field {
            ConfigField::SampleRate => self.sample_rate = saturating_u32(number),
            ConfigField::OutputRate => self.output_rate = saturating_u32(number),
            ConfigField::BitDepth => self.bit_depth = saturating_u32(number).min(u8::MAX as u32) as u8,
            ConfigField::BasePitch => self.base_pitch = number,
            ConfigField::SpeakingRate => self.speaking_rate = number,
            ConfigField::NoiseAmount => self.noise_amount = number,
            ConfigField::FormantGain => self.formant_gain = number,
            ConfigField::CabinetDelay => self.cabinet_delay = number,
            ConfigField::BrightConsonant | ConfigField::Vocoder => {}
        }
        None
    }

    fn reset(&mut self, field: ConfigField) {
        let defaults = VoiceConfig::default();
        match field {
            ConfigField::SampleRate => self.sample_rate = defaults.sample_rate,
            ConfigField::OutputRate => self.output_rate = defaults.output_rate,
            ConfigField::BitDepth => self.bit_depth = defaults.bit_depth,
            ConfigField::BasePitch => self.base_pitch = defaults.base_pitch,
            ConfigField::SpeakingRate => self.speaking_rate = defaults.speaking_rate,
            ConfigField::NoiseAmount => self.noise_amount = defaults.noise_amount,
            ConfigField::FormantGain => self.formant_gain = defaults.formant_gain,
            ConfigField::CabinetDelay => self.cabinet_delay = defaults.cabinet_delay,
            ConfigField::BrightConsonant => self.bright_consonant = defaults.bright_consonant,
            ConfigField::Vocoder => self.vocoder = defaults.vocoder,
        }
    }
}

fn unparseable(key: &str, raw: &Value) -> ConfigWarning {
    ConfigWarning::new(key, format!("unparseable value {}, using default", raw))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Truncates toward zero and saturates into `u32`.
fn saturating_u32(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

fn clamp_u32(
    field: ConfigField,
    value: u32,
    min: u32,
    max: u32,
    warnings: &mut Vec<ConfigWarning>,
) -> u32 {
    let clamped = value.clamp(min, max.max(min));
    if clamped != value {
        warnings.push(ConfigWarning::new(
            field.key(),
            format!("clamped {} to {}", value, clamped),
        ));
    }
    clamped
}

fn clamp_f64(
    field: ConfigField,
    value: f64,
    range: &RangeInclusive<f64>,
    default: f64,
    warnings: &mut Vec<ConfigWarning>,
) -> f64 {
    if value.is_nan() {
        warnings.push(ConfigWarning::new(
            field.key(),
            format!("not a number, using default {}", default),
        ));
        return default;
    }
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        warnings.push(ConfigWarning::new(
            field.key(),
            format!("clamped {} to {}", value, clamped),
        ));
    }
    clamped
}
