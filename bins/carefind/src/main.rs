//! Carefind CLI - nearby care facilities from the terminal.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;

use commands::{geocode, nearby, settings};

/// Find nearby care facilities ranked by travel distance and wait time
#[derive(Parser)]
#[command(name = "carefind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank facilities within the active radius
    Nearby {
        /// Search radius in kilometers (persisted as the new default)
        #[arg(short, long)]
        radius: Option<u32>,

        /// Current latitude, for when the saved preference is the device
        /// position
        #[arg(long, env = "CAREFIND_LAT", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Current longitude
        #[arg(long, env = "CAREFIND_LNG", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Inspect or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Geocode an address to check how the provider resolves it
    Geocode {
        /// The address to resolve
        address: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the saved settings
    Show,

    /// Save a new search radius
    Radius {
        /// Radius in kilometers (> 0)
        km: u32,
    },

    /// Save a manual address as the location preference
    Address {
        /// The address to search from
        address: String,
    },

    /// Use the device position as the location preference
    UseDevice,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = carefind_telemetry::TelemetryConfig {
        log_level: if cli.verbose { "debug" } else { "warn" }.to_string(),
        ..Default::default()
    };
    if let Err(e) = carefind_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Nearby { radius, lat, lng } => {
            nearby::run(radius, lat, lng, &cli.format).await
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => settings::show(&cli.format),
            ConfigAction::Radius { km } => settings::set_radius(km),
            ConfigAction::Address { address } => settings::set_address(&address),
            ConfigAction::UseDevice => settings::use_device(),
        },

        Commands::Geocode { address } => geocode::run(&address, &cli.format).await,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
