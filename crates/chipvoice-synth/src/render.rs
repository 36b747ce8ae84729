//! End-to-end pipeline: text to WAV bytes.

use chipvoice_spec::VoiceConfig;
use rand::Rng;
use tracing::info;

use crate::buffer::AudioBuffer;
use crate::engine::{synthesize, SynthParams};
use crate::error::SynthResult;
use crate::lofi::{post_process, LofiParams};
use crate::phonemize::phonemize;
use crate::unit::SyllableUnit;
use crate::wav::WavResult;

/// Everything one render produces, intermediate stages included.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Phoneme sequence, for diagnostics.
    pub units: Vec<SyllableUnit>,
    /// Engine output at the synthesis rate.
    pub raw: AudioBuffer,
    /// Lo-fi chain output at the output rate.
    pub processed: AudioBuffer,
    /// Serialized `processed`.
    pub wav: WavResult,
}

/// Renders text with a configuration.
///
/// The configuration is normalized first, so out-of-range values are clamped
/// rather than rejected.
///
/// # Example
///
/// ```
/// use chipvoice_spec::VoiceConfig;
/// use chipvoice_synth::{render, rng::create_rng};
///
/// let out = render("FIRE", &VoiceConfig::default(), &mut create_rng(42)).unwrap();
/// assert_eq!(out.units.len(), 3);
/// assert_eq!(out.processed.sample_rate, 8000);
/// assert_eq!(out.wav.wav_data.len(), 44 + 2 * out.processed.len());
/// ```
///
/// # Errors
/// Propagates engine and chain errors; with a normalized configuration these
/// cannot occur.
pub fn render<R: Rng + ?Sized>(
    text: &str,
    config: &VoiceConfig,
    rng: &mut R,
) -> SynthResult<RenderOutput> {
    let config = config.clone().normalized();

    let units = phonemize(text);
    let raw = synthesize(&units, &SynthParams::from(&config), rng)?;
    let processed = post_process(&raw, &LofiParams::from(&config))?;
    let wav = WavResult::from_buffer(&processed);

    info!(
        units = units.len(),
        samples = processed.len(),
        sample_rate = processed.sample_rate,
        pcm_hash = %wav.pcm_hash,
        "rendered"
    );

    Ok(RenderOutput {
        units,
        raw,
        processed,
        wav,
    })
}
