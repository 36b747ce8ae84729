//! Chipvoice synthesis core.
//!
//! Converts short text into speech in the style of an early hardware speech
//! chip: formant voice at a low sample rate and low bit depth, with the
//! crude decimation and cabinet echo that give it its character.
//!
//! # Pipeline
//!
//! ```text
//! text ─► phonemize ─► synthesize ─► post_process ─► serialize
//!         (units)      (raw @ sr)    (@ output rate) (WAV bytes)
//! ```
//!
//! Every stage is a plain function over owned values. Filter state and the
//! random source are scoped to a single call, so separate calls can run in
//! parallel without locking. Passing a seeded RNG from [`rng::create_rng`]
//! makes the whole render bit-reproducible.
//!
//! # Modules
//!
//! - [`phonemize`]: Text to syllable units (syllabary, dictionary, clusters)
//! - [`tables`]: Vowel formants and consonant noise bands
//! - [`engine`]: Source-filter synthesis
//! - [`lofi`]: Anti-alias, ring mod, bit crush, echo, clip, decimate
//! - [`wav`]: 16-bit mono WAV serialization and inspection
//! - [`render`](mod@render): The whole pipeline in one call

pub mod buffer;
pub mod engine;
pub mod error;
pub mod filter;
pub mod lofi;
pub mod phonemize;
pub mod render;
pub mod rng;
pub mod tables;
pub mod unit;
pub mod wav;

pub use buffer::AudioBuffer;
pub use engine::{synthesize, SynthParams};
pub use error::{SynthError, SynthResult};
pub use lofi::{post_process, LofiParams};
pub use phonemize::phonemize;
pub use render::{render, RenderOutput};
pub use unit::{format_units, SyllableUnit, Vowel};
pub use wav::{serialize, WavResult};
