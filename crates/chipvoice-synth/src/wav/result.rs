//! Serialized render result.

use std::io::{self, Write};

use serde::Serialize;

use crate::buffer::AudioBuffer;

use super::writer::{serialize, write_wav, HEADER_LEN};

/// WAV bytes plus the facts reports need about them.
#[derive(Debug, Clone, Serialize)]
pub struct WavResult {
    /// Complete WAV file bytes.
    #[serde(skip)]
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Serializes a buffer.
    pub fn from_buffer(buffer: &AudioBuffer) -> Self {
        let wav_data = serialize(buffer);
        let pcm_hash = blake3::hash(&wav_data[HEADER_LEN..])
            .to_hex()
            .to_string();

        Self {
            wav_data,
            pcm_hash,
            sample_rate: buffer.sample_rate,
            num_samples: buffer.len(),
        }
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// The PCM payload without the header.
    pub fn pcm_data(&self) -> &[u8] {
        &self.wav_data[HEADER_LEN..]
    }

    /// Writes the WAV file to `writer`; the bytes equal `wav_data`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_wav(writer, self.sample_rate, self.pcm_data())
    }
}
