//! Tests for the lo-fi chain.

use std::f64::consts::PI;

use super::*;

fn tone(freq: f64, amplitude: f32, sample_rate: u32, len: usize) -> AudioBuffer {
    let samples = (0..len)
        .map(|i| ((2.0 * PI * freq * i as f64 / sample_rate as f64).sin() as f32) * amplitude)
        .collect();
    AudioBuffer::new(samples, sample_rate)
}

fn params(output_rate: u32) -> LofiParams {
    LofiParams {
        output_rate,
        ..LofiParams::default()
    }
}

#[test]
fn test_cutoff() {
    assert_eq!(anti_alias_cutoff(8000, false), 3900.0);
    assert_eq!(anti_alias_cutoff(16000, false), 4200.0);
    assert_eq!(anti_alias_cutoff(16000, true), 4500.0);
    assert_eq!(anti_alias_cutoff(48000, true), 4500.0);
    assert_eq!(anti_alias_cutoff(100, false), MIN_CUTOFF_HZ);
}

#[test]
fn test_quantize_levels() {
    assert_eq!(quantization_levels(4), 16);
    assert_eq!(quantization_levels(1), 8);
    assert_eq!(quantization_levels(12), 256);

    // 3 bits: 7 steps of 2/7.
    assert_eq!(quantize(1.0, 3), 1.0);
    assert_eq!(quantize(-1.0, 3), -1.0);
    assert_eq!(quantize(5.0, 3), 1.0);
    assert!((quantize(0.0, 3) - 1.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_quantize_is_idempotent() {
    for i in 0..=100 {
        let x = -1.0 + i as f64 * 0.02;
        let q = quantize(x, 5);
        assert!((quantize(q, 5) - q).abs() < 1e-12);
    }
}

#[test]
fn test_echo_is_single_tap() {
    let mut samples = vec![0.0; 20];
    samples[0] = 1.0;
    cabinet_echo(&mut samples, 5);
    assert_eq!(samples[5], 0.25);
    // A recursive echo would also write 0.0625 at 10.
    assert_eq!(samples[10], 0.0);
}

#[test]
fn test_short_echo_is_disabled() {
    let mut samples = vec![0.0; 20];
    samples[0] = 1.0;
    cabinet_echo(&mut samples, 4);
    assert_eq!(samples[4], 0.0);
    cabinet_echo(&mut samples, 50);
    assert_eq!(samples.iter().sum::<f64>(), 1.0);
}

#[test]
fn test_decimation() {
    assert_eq!(decimation_ratio(16000, 8000), 2);
    assert_eq!(decimation_ratio(16000, 6000), 2);
    assert_eq!(decimation_ratio(16000, 16000), 1);
    assert_eq!(decimation_ratio(16000, 20000), 1);

    let samples: Vec<f64> = (0..7).map(|i| i as f64).collect();
    assert_eq!(decimate(&samples, 2), vec![0.0, 2.0, 4.0]);
    assert_eq!(decimate(&samples, 1), samples);
}

#[test]
fn test_output_length_and_rate() {
    let buf = tone(440.0, 0.5, 16000, 7041);
    let out = post_process(&buf, &params(8000)).unwrap();
    assert_eq!(out.sample_rate, 8000);
    assert_eq!(out.len(), 3520);

    let out = post_process(&buf, &params(5000)).unwrap();
    assert_eq!(out.sample_rate, 5000);
    assert_eq!(out.len(), 7041 / 3);
}

#[test]
fn test_output_rate_is_capped() {
    let buf = tone(440.0, 0.5, 8000, 800);
    let out = post_process(&buf, &params(16000)).unwrap();
    assert_eq!(out.sample_rate, 8000);
    assert_eq!(out.len(), 800);
}

#[test]
fn test_output_is_clipped() {
    let buf = tone(200.0, 4.0, 16000, 4000);
    let out = post_process(&buf, &params(8000)).unwrap();
    assert!(out.peak() as f64 <= CLIP_LEVEL + 1e-6);
    assert!(out.peak() > 0.5);
}

#[test]
fn test_vocoder_changes_output() {
    let buf = tone(300.0, 0.5, 16000, 3200);
    let plain = post_process(&buf, &params(8000)).unwrap();
    let ringed = post_process(
        &buf,
        &LofiParams {
            vocoder: true,
            ..params(8000)
        },
    )
    .unwrap();
    assert_eq!(plain.len(), ringed.len());
    assert_ne!(plain.samples, ringed.samples);
}

#[test]
fn test_out_of_range_params_are_clamped() {
    let buf = tone(440.0, 0.5, 16000, 1600);
    let wild = LofiParams {
        output_rate: 8000,
        bit_depth: 16,
        cabinet_delay: 5.0,
        bright_consonant: false,
        vocoder: false,
    };
    let tame = LofiParams {
        bit_depth: 8,
        cabinet_delay: 0.08,
        ..wild.clone()
    };
    assert_eq!(
        post_process(&buf, &wild).unwrap(),
        post_process(&buf, &tame).unwrap()
    );
}

#[test]
fn test_zero_rates_are_rejected() {
    let buf = tone(440.0, 0.5, 16000, 100);
    assert!(matches!(
        post_process(&buf, &params(0)),
        Err(SynthError::InvalidSampleRate { rate: 0 })
    ));
    let empty = AudioBuffer::silence(100, 0);
    assert!(post_process(&empty, &params(8000)).is_err());
}

#[test]
fn test_non_finite_delay_is_rejected() {
    let buf = tone(440.0, 0.5, 16000, 100);
    let bad = LofiParams {
        cabinet_delay: f64::NAN,
        ..params(8000)
    };
    assert!(post_process(&buf, &bad).is_err());
}

#[test]
fn test_empty_buffer() {
    let out = post_process(&AudioBuffer::silence(0, 16000), &params(8000)).unwrap();
    assert!(out.is_empty());
}

mod props {
    use super::super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn quantized_samples_lie_on_the_lattice(x in -4.0f64..4.0, bits in 0u8..12) {
            let q = quantize(x, bits);
            let step = (quantization_levels(bits) - 1) as f64;
            let index = (q + 1.0) / 2.0 * step;
            prop_assert!((-1.0..=1.0).contains(&q));
            prop_assert!((index - index.round()).abs() < 1e-9);
        }

        #[test]
        fn decimated_length_follows_ratio(
            len in 0usize..5000,
            sample_rate in 4000u32..48000,
            output_rate in 1000u32..48000,
        ) {
            let buffer = AudioBuffer::silence(len, sample_rate);
            let params = LofiParams { output_rate, ..LofiParams::default() };
            let out = post_process(&buffer, &params).unwrap();
            let ratio = decimation_ratio(sample_rate, output_rate.min(sample_rate));
            prop_assert_eq!(out.len(), len / ratio);
            prop_assert_eq!(out.sample_rate, output_rate.min(sample_rate));
        }
    }
}
