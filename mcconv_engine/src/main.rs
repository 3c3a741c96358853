//! # mcconv
//!
//! Loads a motor-control profile (TOML), derives the register-ready
//! constants and writes them as TOML, JSON or a C header.
//!
//! Logs go to stderr so the rendered constants can be piped from stdout.

use clap::{Parser, ValueEnum};
use mcconv_common::consts::DEFAULT_PROFILE_PATH;
use mcconv_common::prelude::{ConfigLoader, LogLevel, ProfileConfig};
use mcconv_engine::derive;
use mcconv_engine::header::render_header;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Output format of the derived constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed TOML.
    Toml,
    /// Pretty-printed JSON.
    Json,
    /// C header with `#define` lines.
    Header,
}

/// mcconv: motor-control parameter derivation
#[derive(Parser, Debug)]
#[command(name = "mcconv")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Derive register-ready motor-control constants from a physical profile")]
struct Args {
    /// Path to the profile TOML.
    #[arg(default_value = DEFAULT_PROFILE_PATH)]
    profile: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Toml)]
    format: OutputFormat,

    /// Write to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // The profile carries the log level, so it is read before tracing is up.
    let profile = ProfileConfig::load(&args.profile);
    let log_level = profile
        .as_ref()
        .map_or(LogLevel::default(), |p| p.shared.log_level);
    setup_tracing(&args, log_level);

    info!("mcconv v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = match profile {
        Ok(profile) => run(&args, &profile),
        Err(e) => Err(format!("cannot load profile {}: {e}", args.profile.display()).into()),
    };
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, profile: &ProfileConfig) -> Result<(), Box<dyn std::error::Error>> {
    profile.validate()?;
    info!(
        "Profile '{}' loaded: {} drive(s)",
        profile.shared.service_name,
        profile.physical.drives.len()
    );

    let constants = derive(&profile.physical)?;

    let rendered = match args.format {
        OutputFormat::Toml => toml::to_string_pretty(&constants)?,
        OutputFormat::Json => serde_json::to_string_pretty(&constants)? + "\n",
        OutputFormat::Header => render_header(&profile.shared.service_name, &constants)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Constants written to {}", path.display());
        }
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

/// Level directive for the filter; `--verbose` overrides the profile.
fn level_directive(verbose: bool, log_level: LogLevel) -> &'static str {
    if verbose { "debug" } else { log_level.as_str() }
}

fn setup_tracing(args: &Args, log_level: LogLevel) {
    let directive: Directive = level_directive(args.verbose, log_level)
        .parse()
        .unwrap_or_else(|_| Level::INFO.into());
    let filter = EnvFilter::from_default_env().add_directive(directive);

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}
