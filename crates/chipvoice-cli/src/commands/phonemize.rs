//! Phonemize command implementation
//!
//! Prints the syllable units the synthesizer would voice for some text.

use anyhow::Result;
use chipvoice_synth::{format_units, phonemize};
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::{CommandOutput, PhonemizeResult, UnitInfo};

/// Run the phonemize command
///
/// # Arguments
/// * `text` - Text to phonemize; blank text uses the default phrase
/// * `json` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 always; phonemization cannot fail
pub fn run(text: &str, json: bool) -> Result<ExitCode> {
    let text = super::effective_text(text);
    let units = phonemize(text);
    let phonemes = format_units(&units);

    if json {
        let result = PhonemizeResult {
            text: text.to_string(),
            phonemes,
            units: units.iter().map(UnitInfo::from).collect(),
        };
        super::print_json(&CommandOutput::success(result, Vec::new()))?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Phonemizing:".cyan().bold(), text);
    if units.is_empty() {
        println!("  {}", "(no speakable units)".dimmed());
    } else {
        println!("  {}", phonemes.bold());
        for unit in &units {
            let nasal = if unit.is_moraic_nasal() { " nasal" } else { "" };
            println!(
                "    {:<6} {:>4} ms{}",
                unit.label(),
                unit.duration_ms,
                nasal.dimmed()
            );
        }
    }
    println!("\n{} {} unit(s)", "DONE".green().bold(), units.len());

    Ok(ExitCode::SUCCESS)
}
