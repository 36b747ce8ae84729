//! Integration tests for the CLI commands, run through the library entry points.

use chipvoice_cli::commands;
use chipvoice_spec::VoiceConfig;
use chipvoice_synth::rng::create_rng;
use pretty_assertions::assert_eq;
use std::process::ExitCode;

fn wav_samples(path: &std::path::Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

#[test]
fn test_render_writes_wav() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fire.wav");
    let out_str = out.to_str().unwrap();

    let code = commands::render::run("FIRE", out_str, None, &[], Some(42), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (spec, samples) = wav_samples(&out);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, 8000);
    assert!(!samples.is_empty());
}

#[test]
fn test_written_file_matches_library_render() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("konnichiha.wav");

    let code =
        commands::render::run("KONNICHIHA", out.to_str().unwrap(), None, &[], Some(77), false)
            .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let expected =
        chipvoice_synth::render("KONNICHIHA", &VoiceConfig::default(), &mut create_rng(77))
            .unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), expected.wav.wav_data);
}

#[test]
fn test_render_is_reproducible_with_seed() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    let overrides = vec!["vocoder=on".to_string(), "base_pitch=95".to_string()];

    for path in [&a, &b] {
        let code =
            commands::render::run("MISSHON", path.to_str().unwrap(), None, &overrides, Some(9), true)
                .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn test_render_applies_config_file_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("voice.json");
    std::fs::write(&config, r#"{"sample_rate": 22050, "output_rate": 11025}"#).unwrap();
    let out = dir.path().join("out.wav");

    let code = commands::render::run(
        "",
        out.to_str().unwrap(),
        config.to_str(),
        &["output_rate=99999".to_string()],
        Some(1),
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    // Output rate is capped at the synthesis rate.
    let (spec, _) = wav_samples(&out);
    assert_eq!(spec.sample_rate, 22050);
}

#[test]
fn test_render_json_failure_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.wav");

    let code = commands::render::run(
        "FIRE",
        out.to_str().unwrap(),
        Some("/nonexistent/voice.json"),
        &[],
        Some(1),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!out.exists());
}

#[test]
fn test_render_human_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.wav");
    let result = commands::render::run(
        "FIRE",
        out.to_str().unwrap(),
        None,
        &["pitch".to_string()],
        Some(1),
        false,
    );
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn test_render_to_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("out.wav");
    let out_str = out.to_str().unwrap();

    let code = commands::render::run("FIRE", out_str, None, &[], Some(1), true).unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(commands::render::run("FIRE", out_str, None, &[], Some(1), false).is_err());
}

#[test]
fn test_phonemize_never_fails() {
    assert_eq!(
        commands::phonemize::run("キャット", false).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(commands::phonemize::run("", true).unwrap(), ExitCode::SUCCESS);
    assert_eq!(
        commands::phonemize::run("%%%", false).unwrap(),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_config_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("voice.json");
    std::fs::write(&config, r#"{"bit_depth": 40}"#).unwrap();

    let code = commands::config::run(config.to_str(), &[], true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    std::fs::write(&config, "not json").unwrap();
    let code = commands::config::run(config.to_str(), &[], true).unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(commands::config::run(config.to_str(), &[], false).is_err());
}
