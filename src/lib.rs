//! Typed client for the OpenSky Network flight-tracking REST API.
//!
//! This library provides functionality to:
//! - Query flights by time interval, airport, or transponder address
//! - Fetch live aircraft state vectors, globally or for your own sensors
//! - Fetch the historical track of one aircraft
//! - Validate all parameters before anything touches the network
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │───▶│   Query     │───▶│   Client    │
//! │ (Validated) │    │ (Encoding)  │    │ (HTTP GET)  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              │
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │   Models    │
//!                                       │ (Decoding)  │
//!                                       └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use opensky_api::{
//!     Authentication, BoundingBox, ClientConfig, OpenSkyClient, StatesQuery,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new()
//!         .with_authentication(Authentication::new("username", "password"));
//!
//!     let client = OpenSkyClient::new(config)?;
//!
//!     // State vectors over the Alps
//!     let states = client
//!         .all_state_vectors(&StatesQuery {
//!             area: Some(BoundingBox::new(45.8, 5.9, 47.8, 10.5)),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("{} aircraft", states.states.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod models;
pub(crate) mod query;
pub mod types;

pub use client::{
    Authentication, ClientConfig, Error, OpenSkyClient, OwnStatesQuery, StatesQuery,
    DEFAULT_BASE_URL,
};
pub use models::{Flight, StateVector, StateVectors, Track, Waypoint};
pub use types::{BoundingBox, Icao24, TimeInterval, ValidationError};
