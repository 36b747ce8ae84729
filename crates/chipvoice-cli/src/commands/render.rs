//! Render command implementation
//!
//! Speaks text through the full pipeline and writes a 16-bit mono WAV file.

use anyhow::{anyhow, Context, Result};
use chipvoice_spec::BackendError;
use chipvoice_synth::rng::{create_entropy_rng, create_rng};
use chipvoice_synth::{format_units, render, RenderOutput, WavResult};
use colored::Colorize;
use rand::RngCore;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::config::input_error_to_json;
use super::json_output::{
    config_warnings_to_json, error_codes, CommandOutput, JsonError, JsonWarning, RenderResult,
};
use crate::input::load_config;

/// Run the render command
///
/// # Arguments
/// * `text` - Text to speak; blank text uses the default phrase
/// * `output` - Path of the WAV file to write
/// * `config_path` - Optional JSON config file
/// * `overrides` - `key=value` overrides applied after the file
/// * `seed` - Seed for a reproducible render; drawn from entropy when absent
/// * `json` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    text: &str,
    output: &str,
    config_path: Option<&str>,
    overrides: &[String],
    seed: Option<u32>,
    json: bool,
) -> Result<ExitCode> {
    let text = super::effective_text(text);
    let seed = seed.unwrap_or_else(|| create_entropy_rng().next_u32());
    if json {
        run_json(text, output, config_path, overrides, seed)
    } else {
        run_human(text, output, config_path, overrides, seed)
    }
}

fn run_human(
    text: &str,
    output: &str,
    config_path: Option<&str>,
    overrides: &[String],
    seed: u32,
) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Rendering:".cyan().bold(), text);

    let loaded =
        load_config(config_path.map(Path::new), overrides).map_err(|e| anyhow!("{}", e))?;
    for warning in &loaded.warnings {
        println!("  {} {}", "WARNING".yellow().bold(), warning);
    }

    let rendered = render(text, &loaded.config, &mut create_rng(seed))
        .map_err(|e| anyhow!("[{}] {}", e.code(), e.message()))?;
    write_output(output, &rendered.wav)
        .with_context(|| format!("failed to write '{}'", output))?;

    let duration_ms = start.elapsed().as_millis() as u64;
    print_render_summary(&rendered, seed);
    println!(
        "\n{} Wrote {} ({:.2}s @ {} Hz, {}ms)",
        "SUCCESS".green().bold(),
        output,
        rendered.wav.duration_seconds(),
        rendered.wav.sample_rate,
        duration_ms
    );

    Ok(ExitCode::SUCCESS)
}

/// Writes the WAV file through a buffered writer.
fn write_output(path: &str, wav: &WavResult) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    wav.write_to(&mut writer)?;
    writer.flush()
}

fn print_render_summary(rendered: &RenderOutput, seed: u32) {
    let phonemes = if rendered.units.is_empty() {
        "(silence)".dimmed().to_string()
    } else {
        format_units(&rendered.units)
    };
    println!("  {} {}", "Phonemes:".dimmed(), phonemes);
    println!("  {} {}", "Seed:".dimmed(), seed);
    println!(
        "  {} {} @ {} Hz",
        "Samples:".dimmed(),
        rendered.wav.num_samples,
        rendered.wav.sample_rate
    );
    println!("  {} {}", "PCM hash:".dimmed(), rendered.wav.pcm_hash);
}

fn run_json(
    text: &str,
    output: &str,
    config_path: Option<&str>,
    overrides: &[String],
    seed: u32,
) -> Result<ExitCode> {
    let loaded = match load_config(config_path.map(Path::new), overrides) {
        Ok(loaded) => loaded,
        Err(e) => return fail(vec![input_error_to_json(&e)], Vec::new()),
    };
    let warnings = config_warnings_to_json(&loaded.warnings);

    let rendered = match render(text, &loaded.config, &mut create_rng(seed)) {
        Ok(rendered) => rendered,
        Err(e) => {
            let error = JsonError::new(
                error_codes::SYNTHESIS,
                format!("[{}] {}", e.code(), e.message()),
            );
            return fail(vec![error], warnings);
        }
    };

    if let Err(e) = write_output(output, &rendered.wav) {
        let error = JsonError::new(error_codes::FILE_WRITE, e.to_string()).with_file(output);
        return fail(vec![error], warnings);
    }

    let config_hash = loaded
        .config
        .canonical_hash()
        .unwrap_or_else(|_| "unknown".to_string());

    let result = RenderResult {
        output_path: output.to_string(),
        phonemes: format_units(&rendered.units),
        unit_count: rendered.units.len(),
        seed,
        sample_rate: rendered.wav.sample_rate,
        num_samples: rendered.wav.num_samples,
        duration_seconds: rendered.wav.duration_seconds(),
        pcm_hash: rendered.wav.pcm_hash,
        config_hash,
    };
    super::print_json(&CommandOutput::success(result, warnings))?;
    Ok(ExitCode::SUCCESS)
}

fn fail(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Result<ExitCode> {
    super::print_json(&CommandOutput::<RenderResult>::failure(errors, warnings))?;
    Ok(ExitCode::from(1))
}
