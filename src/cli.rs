//! CLI argument parsing with clap.

use clap::Parser;

use crate::ports::photo_transformer::DEFAULT_MODEL;

/// Vintage photo modernization CLI - revive old portraits with Gemini.
#[derive(Parser, Debug)]
#[command(name = "reviver", version, about)]
pub struct Cli {
    /// Path to the vintage photo to revive.
    pub input: String,

    /// Output file path (default: revived-photo.png).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Model identifier for the transform service.
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
