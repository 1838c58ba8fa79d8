//! Clearwell - a terminal client for public drinking water system data.
//!
//! Look up water systems with their advisory safety status and violation
//! history. Operator and regulator tokens unlock the role-specific views.

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clearwell::app::App;
use clearwell::commands;

#[derive(Parser)]
#[command(name = "clearwell")]
#[command(about = "Water quality lookup for public drinking water systems", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a bearer token
    Login {
        /// Token value; falls back to CLEARWELL_TOKEN or an interactive prompt
        token: Option<String>,
    },
    /// Sign out and discard the stored token
    Logout,
    /// Show the current session and role
    Whoami,
    /// Search systems by name, PWSID, or 5-digit zip code
    Search {
        /// Name fragment, PWSID fragment, or exact zip
        query: String,
    },
    /// Full water quality report for one system
    Report {
        /// Public water system id, e.g. GA0670000
        pwsid: String,
    },
    /// Statewide system statistics
    Stats,
    /// Find the water system nearest a coordinate
    Near {
        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees, negative west of the meridian
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// List violations recorded for a system
    Violations {
        /// Public water system id
        pwsid: String,
    },
    /// Operator dashboard for your system (requires the Operator role)
    Dashboard {
        /// System to show; remembered as the default for later runs
        #[arg(long)]
        system: Option<String>,
    },
    /// Regulator overview of systems and their status (requires the Regulator role)
    Map {
        /// Restrict the listing to systems matching this search
        #[arg(long)]
        query: Option<String>,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    debug!("clearwell starting");

    let cli = Cli::parse();
    let mut app = App::new()?;

    match cli.command {
        Commands::Login { token } => commands::login(&mut app, token).await,
        Commands::Logout => commands::logout(&mut app),
        Commands::Whoami => commands::whoami(&app),
        Commands::Search { query } => commands::search(&app, &query).await,
        Commands::Report { pwsid } => commands::report(&app, &pwsid).await,
        Commands::Stats => commands::stats(&app).await,
        Commands::Near { lat, lon } => commands::near(&app, lat, lon).await,
        Commands::Violations { pwsid } => commands::violations(&app, &pwsid).await,
        Commands::Dashboard { system } => commands::dashboard(&mut app, system).await,
        Commands::Map { query } => commands::map(&app, query).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_near_accepts_negative_longitude() {
        // Every longitude in the covered state is west of the meridian
        let cli = Cli::try_parse_from(["clearwell", "near", "33.749", "-84.388"])
            .expect("negative longitude should parse as a value");
        match cli.command {
            Commands::Near { lat, lon } => {
                assert_eq!(lat, 33.749);
                assert_eq!(lon, -84.388);
            }
            _ => panic!("expected the near command"),
        }
    }

    #[test]
    fn test_near_accepts_negative_latitude() {
        let cli = Cli::try_parse_from(["clearwell", "near", "-33.9", "151.2"]).unwrap();
        match cli.command {
            Commands::Near { lat, lon } => {
                assert_eq!(lat, -33.9);
                assert_eq!(lon, 151.2);
            }
            _ => panic!("expected the near command"),
        }
    }
}
