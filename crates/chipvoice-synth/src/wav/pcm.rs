//! WAV inspection: PCM payload extraction and payload hashing.

fn u32_at(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
}

/// Extracts the PCM payload from WAV bytes by walking the chunk list.
///
/// Returns None if there is no RIFF/WAVE preamble or no complete data chunk.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32_at(wav_data, pos + 4) as usize;
        let start = pos + 8;
        let end = start.checked_add(chunk_size)?;

        if chunk_id == b"data" {
            return wav_data.get(start..end);
        }

        // Chunks are word aligned.
        pos = end + chunk_size % 2;
    }

    None
}

/// BLAKE3 hex digest of the PCM payload of WAV bytes.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
