use anyhow::Context;
use clap::{Parser, Subcommand};
use maps_gateway::{
    sdk::config::MapsConfig,
    sdk::maps::{Coordinate, Envelope, MapsGateway, Outcome},
    sdk::util::log::init_logging,
};
use serde::Serialize;
use std::process::ExitCode;

/// Geocoding, search and routing through the configured maps provider.
///
/// The provider is selected with MAPS_PROVIDER (google_maps or here_maps)
/// and authenticated with MAPS_API_KEY; both may live in a .env file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an address to a place
    Geocode { address: String },

    /// Find the place at a "lat,lng" coordinate
    Reverse {
        #[arg(allow_hyphen_values = true)]
        location: Coordinate,
    },

    /// Search places matching a query near a "lat,lng" coordinate
    Search {
        query: String,
        #[arg(allow_hyphen_values = true)]
        location: Coordinate,
    },

    /// Travel duration (s) and distance (m) between two "lat,lng" points
    Distance {
        #[arg(allow_hyphen_values = true)]
        origin: Coordinate,
        #[arg(allow_hyphen_values = true)]
        destination: Coordinate,
    },

    /// Like distance, plus the decoded path
    Route {
        #[arg(allow_hyphen_values = true)]
        origin: Coordinate,
        #[arg(allow_hyphen_values = true)]
        destination: Coordinate,
    },
}

fn print<T: Serialize>(outcome: Outcome<T>) -> anyhow::Result<bool> {
    let envelope = Envelope::from_outcome(outcome);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(envelope.is_ok())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // A bad selector or missing key stops us before any request is made.
    let config = MapsConfig::from_env().context("Failed to load maps configuration")?;
    let gateway = MapsGateway::new(&config).context("Failed to build maps gateway")?;
    log::info!("Using provider {}", gateway.provider_name());

    let ok = match cli.command {
        Command::Geocode { address } => print(gateway.geocode(&address).await)?,
        Command::Reverse { location } => print(gateway.reverse_geocode(location).await)?,
        Command::Search { query, location } => {
            print(gateway.search_nearby(&query, location).await)?
        }
        Command::Distance {
            origin,
            destination,
        } => print(gateway.distance(origin, destination).await)?,
        Command::Route {
            origin,
            destination,
        } => print(gateway.route(origin, destination).await)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
