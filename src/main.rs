//! OpenSky Network query CLI
//!
//! Thin wrapper around the library: one subcommand per API endpoint,
//! results printed as JSON.

use clap::{Args, Parser, Subcommand};
use opensky_api::{
    Authentication, BoundingBox, ClientConfig, Icao24, OpenSkyClient, OwnStatesQuery, StatesQuery,
    TimeInterval,
};
use serde::Serialize;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "opensky")]
#[command(about = "Query the OpenSky Network REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSky username (anonymous when omitted)
    #[arg(long, env = "OPENSKY_USERNAME", global = true)]
    username: Option<String>,

    /// OpenSky password
    #[arg(long, env = "OPENSKY_PASSWORD", global = true)]
    password: Option<String>,

    /// API base URL
    #[arg(long, default_value = opensky_api::DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Args)]
struct IntervalArgs {
    /// Interval start in seconds since the Unix epoch
    #[arg(long)]
    begin: u64,

    /// Interval end in seconds since the Unix epoch
    #[arg(long)]
    end: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Current state vectors for all aircraft
    States {
        /// Unix timestamp to retrieve states for
        #[arg(long)]
        time: Option<u64>,

        /// Minimum latitude of the query area
        #[arg(long, requires = "lon_min")]
        lat_min: Option<f64>,

        /// Minimum longitude of the query area
        #[arg(long, requires = "lat_max")]
        lon_min: Option<f64>,

        /// Maximum latitude of the query area
        #[arg(long, requires = "lon_max")]
        lat_max: Option<f64>,

        /// Maximum longitude of the query area
        #[arg(long, requires = "lat_min")]
        lon_max: Option<f64>,

        /// Include the aircraft category
        #[arg(long)]
        extended: bool,
    },

    /// State vectors seen by your own sensors (requires credentials)
    OwnStates {
        /// Transponder addresses to query (repeatable)
        #[arg(long = "icao24", required = true)]
        icao24: Vec<Icao24>,

        /// Unix timestamp to retrieve states for
        #[arg(long)]
        time: Option<u64>,

        /// Restrict to these receiver serials (repeatable)
        #[arg(long = "serial")]
        serials: Vec<u64>,

        /// Include the aircraft category
        #[arg(long)]
        extended: bool,
    },

    /// All flights within a time interval (max 2 hours)
    Flights {
        #[command(flatten)]
        interval: IntervalArgs,
    },

    /// Arrivals at an airport within a time interval (max 7 days)
    Arrivals {
        /// ICAO airport code, e.g. EDDF
        #[arg(long)]
        airport: String,

        #[command(flatten)]
        interval: IntervalArgs,
    },

    /// Departures from an airport within a time interval (max 7 days)
    Departures {
        /// ICAO airport code, e.g. EDDF
        #[arg(long)]
        airport: String,

        #[command(flatten)]
        interval: IntervalArgs,
    },

    /// Flights flown by specific aircraft (max 30 days, non-zero span)
    Aircraft {
        /// Transponder addresses to query (repeatable)
        #[arg(long = "icao24", required = true)]
        icao24: Vec<Icao24>,

        #[command(flatten)]
        interval: IntervalArgs,
    },

    /// Historical track of one aircraft
    Track {
        /// Transponder address
        #[arg(long)]
        icao24: Icao24,

        /// Unix timestamp within the flight, or 0 for the latest track
        #[arg(long, default_value = "0")]
        time: u64,
    },
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ClientConfig::new()
        .with_base_url(cli.base_url.clone())
        .with_timeout(Duration::from_secs(cli.timeout));

    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        config = config.with_authentication(Authentication::new(username, password));
    }

    let client = OpenSkyClient::new(config)?;

    match cli.command {
        Commands::States {
            time,
            lat_min,
            lon_min,
            lat_max,
            lon_max,
            extended,
        } => {
            let area = match (lat_min, lon_min, lat_max, lon_max) {
                (Some(lat_min), Some(lon_min), Some(lat_max), Some(lon_max)) => {
                    Some(BoundingBox::new(lat_min, lon_min, lat_max, lon_max))
                }
                _ => None,
            };
            let states = client
                .all_state_vectors(&StatesQuery {
                    time,
                    area,
                    include_category: extended,
                })
                .await?;
            tracing::info!("Received {} state vectors", states.states.len());
            print_json(&states)?;
        }

        Commands::OwnStates {
            icao24,
            time,
            serials,
            extended,
        } => {
            let states = client
                .own_state_vectors(
                    &icao24,
                    &OwnStatesQuery {
                        time,
                        serials,
                        include_category: extended,
                    },
                )
                .await?;
            tracing::info!("Received {} state vectors", states.states.len());
            print_json(&states)?;
        }

        Commands::Flights { interval } => {
            let interval = TimeInterval::new(interval.begin, interval.end)?;
            let flights = client.all_flights(interval).await?;
            tracing::info!("Received {} flights", flights.len());
            print_json(&flights)?;
        }

        Commands::Arrivals { airport, interval } => {
            let interval = TimeInterval::new(interval.begin, interval.end)?;
            let flights = client.arrivals(&airport, interval).await?;
            tracing::info!("Received {} arrivals at {}", flights.len(), airport);
            print_json(&flights)?;
        }

        Commands::Departures { airport, interval } => {
            let interval = TimeInterval::new(interval.begin, interval.end)?;
            let flights = client.departures(&airport, interval).await?;
            tracing::info!("Received {} departures from {}", flights.len(), airport);
            print_json(&flights)?;
        }

        Commands::Aircraft { icao24, interval } => {
            let interval = TimeInterval::new(interval.begin, interval.end)?;
            let flights = client.flights_by_aircraft(&icao24, interval).await?;
            tracing::info!("Received {} flights", flights.len());
            print_json(&flights)?;
        }

        Commands::Track { icao24, time } => match client.track(&icao24, time).await? {
            Some(track) => {
                tracing::info!("Received track with {} waypoints", track.path.len());
                print_json(&track)?;
            }
            None => eprintln!("No track data for {} at time {}", icao24, time),
        },
    }

    Ok(())
}
