//! Reviver - vintage photo modernization CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod controller;
mod error;
mod intake;
mod output;
mod ports;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::controller::{Controller, ViewState};
use crate::output::resolve_output_path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), error::ReviveError> {
    // Load config (fails fast on malformed TOML)
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::ReviveError::Config)?;

    if cli.verbose {
        eprintln!("Model: {}", cli.model);
        eprintln!("Config: {}", config_path.display());
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("REVIVER_REPLAY").ok();
    let is_recording = std::env::var("REVIVER_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        if cli.verbose {
            eprintln!("Recording mode enabled");
        }
        let (ctx, session) = ServiceContext::recording(&config, &config_path)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config, &config_path)?, None)
    };

    // Upload
    let mut controller = Controller::new(ctx.transformer, cli.model.clone());
    controller.upload_image(Path::new(&cli.input))?;

    if cli.verbose {
        if let Some(source) = controller.source() {
            eprintln!("Uploaded: {} ({}, {} bytes)", cli.input, source.mime_type, source.raw_bytes.len());
        }
    }

    // Generate
    eprintln!("Reviving photo...");
    if let ViewState::Failed(message) = controller.generate().await {
        return Err(error::ReviveError::Transform(message.clone()));
    }

    // Download
    let output_path = resolve_output_path(cli.output.as_deref());
    if controller.download(&output_path)? {
        eprintln!("Saved: {}", output_path.display());
    }

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(())
}
