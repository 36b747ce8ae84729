//! Deterministic mono WAV serialization.
//!
//! Output is always 16-bit little-endian PCM, one channel, with the canonical
//! 44-byte header and no metadata chunks, so identical buffers serialize to
//! identical bytes. The BLAKE3 hash of the PCM payload identifies a render.

mod pcm;
mod result;
mod writer;


pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{
    sample_to_pcm16, samples_to_pcm16, serialize, wav_header, write_wav, BITS_PER_SAMPLE,
    BLOCK_ALIGN, CHANNELS, HEADER_LEN,
};
