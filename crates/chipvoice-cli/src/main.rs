//! Chipvoice CLI - Command-line interface for lo-fi speech rendering
//!
//! This binary speaks text through the chip-style formant synthesizer and
//! writes the result as a 16-bit mono WAV file.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use chipvoice_cli::commands;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "CHIPVOICE_LOG";

/// Chipvoice - Retro Speech Chip Synthesizer
#[derive(Parser)]
#[command(name = "chipvoice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Speak text and write a WAV file
    Render {
        /// Text to speak (romaji, kana, or English-ish words)
        #[arg(short, long, default_value = commands::DEFAULT_TEXT)]
        text: String,

        /// Output WAV file path
        #[arg(short, long, default_value = "chipvoice.wav")]
        output: String,

        /// Path to a JSON voice config
        #[arg(short, long)]
        config: Option<String>,

        /// Override a config value (repeatable), e.g. --set base_pitch=90
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Seed for a reproducible render
        #[arg(long)]
        seed: Option<u32>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the syllable units for text without rendering audio
    Phonemize {
        /// Text to phonemize
        #[arg(short, long, default_value = commands::DEFAULT_TEXT)]
        text: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective voice config after clamping and overrides
    Config {
        /// Path to a JSON voice config
        #[arg(short, long)]
        config: Option<String>,

        /// Override a config value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Wrap the config with warnings and hashes
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            text,
            output,
            config,
            overrides,
            seed,
            json,
        } => commands::render::run(&text, &output, config.as_deref(), &overrides, seed, json),
        Commands::Phonemize { text, json } => commands::phonemize::run(&text, json),
        Commands::Config {
            config,
            overrides,
            json,
        } => commands::config::run(config.as_deref(), &overrides, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
