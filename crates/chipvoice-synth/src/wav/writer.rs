//! Header layout and sample conversion.

use std::io::{self, Write};

use crate::buffer::AudioBuffer;

/// Size of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

/// Channel count; output is always mono.
pub const CHANNELS: u16 = 1;

/// Bits per sample.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per sample frame.
pub const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Builds the 44-byte RIFF/WAVE header for `data_len` bytes of PCM.
pub fn wav_header(sample_rate: u32, data_len: u32) -> [u8; HEADER_LEN] {
    let byte_rate = sample_rate.wrapping_mul(BLOCK_ALIGN as u32);
    let riff_size = 36u32.wrapping_add(data_len); // file size minus the 8-byte RIFF preamble

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // fmt chunk size for PCM
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // format tag: PCM
    header[22..24].copy_from_slice(&CHANNELS.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
    header[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}

/// Converts one sample to a 16-bit PCM value.
///
/// The sample is clamped to `[-1, 1]`, then scaled by 32768 when negative
/// and 32767 otherwise, so both full-scale ends are reachable.
#[inline]
pub fn sample_to_pcm16(sample: f32) -> i16 {
    let clipped = (sample as f64).clamp(-1.0, 1.0);
    let scaled = if clipped < 0.0 {
        clipped * 32768.0
    } else {
        clipped * 32767.0
    };
    scaled.round() as i16
}

/// Converts samples to little-endian 16-bit PCM bytes.
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample_to_pcm16(sample).to_le_bytes());
    }
    pcm
}

/// Writes a complete WAV file for already-converted PCM data.
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&wav_header(sample_rate, pcm_data.len() as u32))?;
    writer.write_all(pcm_data)
}

/// Serializes a buffer to WAV bytes at the buffer's own sample rate.
pub fn serialize(buffer: &AudioBuffer) -> Vec<u8> {
    let pcm = samples_to_pcm16(&buffer.samples);
    let mut bytes = Vec::with_capacity(HEADER_LEN + pcm.len());
    bytes.extend_from_slice(&wav_header(buffer.sample_rate, pcm.len() as u32));
    bytes.extend_from_slice(&pcm);
    bytes
}
