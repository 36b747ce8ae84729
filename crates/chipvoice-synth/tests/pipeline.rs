//! End-to-end tests of the synthesis pipeline.

use std::io::Cursor;

use chipvoice_spec::VoiceConfig;
use chipvoice_synth::lofi::{decimation_ratio, post_process, LofiParams};
use chipvoice_synth::rng::create_rng;
use chipvoice_synth::wav::{compute_pcm_hash, HEADER_LEN};
use chipvoice_synth::{phonemize, render, serialize, synthesize, AudioBuffer, SynthParams};
use pretty_assertions::assert_eq;

#[test]
fn test_render_is_reproducible_with_a_seed() {
    let config = VoiceConfig::default();
    let a = render("ミッション スタート", &config, &mut create_rng(7)).unwrap();
    let b = render("ミッション スタート", &config, &mut create_rng(7)).unwrap();
    assert_eq!(a.wav.wav_data, b.wav.wav_data);
    assert_eq!(a.wav.pcm_hash, b.wav.pcm_hash);

    let c = render("ミッション スタート", &config, &mut create_rng(8)).unwrap();
    assert_ne!(a.wav.pcm_hash, c.wav.pcm_hash);
}

#[test]
fn test_synthesize_twice_is_byte_identical() {
    let units = phonemize("WARNING");
    let params = SynthParams::default();
    let a = synthesize(&units, &params, &mut create_rng(99)).unwrap();
    let b = synthesize(&units, &params, &mut create_rng(99)).unwrap();
    assert_eq!(serialize(&a), serialize(&b));
}

#[test]
fn test_render_stage_rates() {
    let config = VoiceConfig {
        sample_rate: 22050,
        output_rate: 11025,
        ..VoiceConfig::default()
    };
    let out = render("READY GO", &config, &mut create_rng(1)).unwrap();
    assert_eq!(out.raw.sample_rate, 22050);
    assert_eq!(out.processed.sample_rate, 11025);
    assert_eq!(out.processed.len(), out.raw.len() / 2);
    assert_eq!(out.wav.sample_rate, 11025);
    assert_eq!(out.wav.num_samples, out.processed.len());
}

#[test]
fn test_render_clamps_wild_config() {
    let config = VoiceConfig {
        sample_rate: 1_000_000,
        output_rate: 0,
        bit_depth: 0,
        speaking_rate: f64::NAN,
        base_pitch: -5.0,
        ..VoiceConfig::default()
    };
    let out = render("FIRE", &config, &mut create_rng(3)).unwrap();
    assert_eq!(out.raw.sample_rate, 48000);
    assert_eq!(out.processed.sample_rate, 1000);
}

#[test]
fn test_empty_text_renders_tail_only() {
    let out = render("", &VoiceConfig::default(), &mut create_rng(0)).unwrap();
    assert!(out.units.is_empty());
    assert_eq!(out.raw.len(), 4800);
    assert_eq!(out.processed.len(), 2400);
}

#[test]
fn test_wav_container_is_valid() {
    let out = render("テスト", &VoiceConfig::default(), &mut create_rng(5)).unwrap();
    let bytes = &out.wav.wav_data;
    let len = out.processed.len() as u32;

    let u32_at = |pos: usize| {
        u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
    };
    assert_eq!(bytes.len(), HEADER_LEN + 2 * len as usize);
    assert_eq!(u32_at(4), 36 + 2 * len);
    assert_eq!(u32_at(28), 2 * 8000);
    assert_eq!(u32_at(40), 2 * len);

    let mut reader = hound::WavReader::new(Cursor::new(bytes.clone())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), out.processed.len());
    // The chain clips at 0.98, so full scale is never reached.
    assert!(samples.iter().all(|&s| (s as i32).abs() <= 32113));

    assert_eq!(compute_pcm_hash(bytes), Some(out.wav.pcm_hash.clone()));
}

#[test]
fn test_decimation_length_law() {
    for (sr, out_rate) in [(16000, 8000), (16000, 7000), (44100, 8000), (8000, 8000), (12000, 5000)] {
        let buf = AudioBuffer::silence(12345, sr);
        let params = LofiParams {
            output_rate: out_rate,
            ..LofiParams::default()
        };
        let out = post_process(&buf, &params).unwrap();
        let ratio = ((sr / out_rate) as usize).max(1);
        assert_eq!(ratio, decimation_ratio(sr, out_rate));
        assert_eq!(out.len(), 12345 / ratio, "{} -> {}", sr, out_rate);
    }
}

#[test]
fn test_parallel_renders_match_serial() {
    let config = VoiceConfig::default();
    let serial: Vec<String> = (0..4)
        .map(|seed| render("BOSS", &config, &mut create_rng(seed)).unwrap().wav.pcm_hash)
        .collect();

    let parallel: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let config = &config;
                scope.spawn(move || {
                    render("BOSS", config, &mut create_rng(seed))
                        .unwrap()
                        .wav
                        .pcm_hash
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, parallel);
}
