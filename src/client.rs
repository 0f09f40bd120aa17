//! HTTP client for the OpenSky Network REST API.

use crate::models::{Flight, StateVectors, Track};
use crate::query::QueryBuilder;
use crate::types::{BoundingBox, Icao24, TimeInterval, ValidationError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Public API root of the OpenSky Network.
pub const DEFAULT_BASE_URL: &str = "https://opensky-network.org/api";

/// Maximum interval span for `flights/all`: 2 hours.
const MAX_SPAN_ALL_FLIGHTS: u64 = 2 * 60 * 60;
/// Maximum interval span for arrivals/departures by airport: 7 days.
const MAX_SPAN_AIRPORT_FLIGHTS: u64 = 7 * 24 * 60 * 60;
/// Maximum interval span for `flights/aircraft`: 30 days.
const MAX_SPAN_AIRCRAFT_FLIGHTS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request parameters: {0}")]
    Validation(#[from] ValidationError),
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP Basic credentials for the API.
///
/// Sent as an `Authorization` header, never embedded in the URL.
#[derive(Clone, PartialEq, Eq)]
pub struct Authentication {
    username: String,
    password: String,
}

impl Authentication {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

// The password must never reach logs.
impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for [`OpenSkyClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; path segments like `flights/all` are appended to it.
    pub base_url: String,
    /// Optional Basic-auth credentials; absence means anonymous calls.
    pub authentication: Option<Authentication>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            authentication: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Optional filters for [`OpenSkyClient::all_state_vectors`].
#[derive(Debug, Clone, Default)]
pub struct StatesQuery {
    /// Unix timestamp to retrieve states for; the server uses "now"
    /// when absent.
    pub time: Option<u64>,
    /// Geographic filter.
    pub area: Option<BoundingBox>,
    /// Include the aircraft category with each state vector.
    pub include_category: bool,
}

/// Optional filters for [`OpenSkyClient::own_state_vectors`].
#[derive(Debug, Clone, Default)]
pub struct OwnStatesQuery {
    /// Unix timestamp to retrieve states for; the server uses "now"
    /// when absent.
    pub time: Option<u64>,
    /// Restrict results to a subset of your receivers.
    pub serials: Vec<u64>,
    /// Include the aircraft category with each state vector.
    pub include_category: bool,
}

/// Client for the OpenSky Network REST API.
///
/// Each endpoint method performs exactly one GET request. Parameters
/// are validated before anything touches the network, so a malformed
/// request never leaves the process. Instances hold no mutable state
/// and are safe to share across concurrent calls.
pub struct OpenSkyClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl OpenSkyClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("opensky-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Flights that were active within the interval, across all aircraft.
    ///
    /// The interval span must not exceed two hours.
    pub async fn all_flights(&self, interval: TimeInterval) -> Result<Vec<Flight>, Error> {
        interval.check_span(MAX_SPAN_ALL_FLIGHTS)?;

        let query = QueryBuilder::new()
            .param("begin", interval.begin())
            .param("end", interval.end());

        Ok(self.get("flights/all", query).await?.unwrap_or_default())
    }

    /// Flights that arrived at the given airport within the interval.
    ///
    /// `airport` is an ICAO airport code (e.g. `"EDDF"`). The interval
    /// span must not exceed seven days.
    pub async fn arrivals(
        &self,
        airport: &str,
        interval: TimeInterval,
    ) -> Result<Vec<Flight>, Error> {
        interval.check_span(MAX_SPAN_AIRPORT_FLIGHTS)?;

        let query = QueryBuilder::new()
            .param("airport", airport)
            .param("begin", interval.begin())
            .param("end", interval.end());

        Ok(self.get("flights/arrival", query).await?.unwrap_or_default())
    }

    /// Flights that departed from the given airport within the interval.
    ///
    /// `airport` is an ICAO airport code. The interval span must not
    /// exceed seven days.
    pub async fn departures(
        &self,
        airport: &str,
        interval: TimeInterval,
    ) -> Result<Vec<Flight>, Error> {
        interval.check_span(MAX_SPAN_AIRPORT_FLIGHTS)?;

        let query = QueryBuilder::new()
            .param("airport", airport)
            .param("begin", interval.begin())
            .param("end", interval.end());

        Ok(self
            .get("flights/departure", query)
            .await?
            .unwrap_or_default())
    }

    /// Flights flown by a specific set of aircraft within the interval.
    ///
    /// Requires at least one transponder address. The interval span
    /// must be non-zero and must not exceed thirty days.
    pub async fn flights_by_aircraft(
        &self,
        transponders: &[Icao24],
        interval: TimeInterval,
    ) -> Result<Vec<Flight>, Error> {
        // The upstream API silently ignores calls without transponders,
        // so reject that shape before looking at the interval.
        if transponders.is_empty() {
            return Err(ValidationError::NoTransponders.into());
        }
        interval.check_span_nonzero(MAX_SPAN_AIRCRAFT_FLIGHTS)?;

        let query = QueryBuilder::new()
            .repeated("icao24", transponders)
            .param("begin", interval.begin())
            .param("end", interval.end());

        Ok(self
            .get("flights/aircraft", query)
            .await?
            .unwrap_or_default())
    }

    /// Current state vectors for all aircraft, optionally filtered.
    pub async fn all_state_vectors(&self, filters: &StatesQuery) -> Result<StateVectors, Error> {
        let mut query = QueryBuilder::new().opt_param("time", filters.time);

        if let Some(area) = filters.area {
            query = query
                .param("lamin", area.lat_min)
                .param("lomin", area.lon_min)
                .param("lamax", area.lat_max)
                .param("lomax", area.lon_max);
        }
        query = query.flag("extended", filters.include_category);

        Ok(self.get("states/all", query).await?.unwrap_or_default())
    }

    /// State vectors as seen by your own sensors, without rate limits.
    ///
    /// Requires at least one transponder address, and authentication
    /// configured on the client.
    pub async fn own_state_vectors(
        &self,
        transponders: &[Icao24],
        filters: &OwnStatesQuery,
    ) -> Result<StateVectors, Error> {
        if transponders.is_empty() {
            return Err(ValidationError::NoTransponders.into());
        }

        let query = QueryBuilder::new()
            .repeated("icao24", transponders)
            .repeated("serials", filters.serials.iter())
            .opt_param("time", filters.time)
            .flag("extended", filters.include_category);

        Ok(self.get("states/own", query).await?.unwrap_or_default())
    }

    /// Historical track of one aircraft around the given time.
    ///
    /// `time` is a Unix timestamp anywhere within the flight, or `0`
    /// for the most recent track. Returns `None` when the API has no
    /// track data for that aircraft and time.
    pub async fn track(&self, transponder: &Icao24, time: u64) -> Result<Option<Track>, Error> {
        let query = QueryBuilder::new()
            .param("icao24", transponder)
            .param("time", time);

        self.get("tracks/all", query).await
    }

    /// Issue one GET request and decode the response.
    ///
    /// `Ok(None)` means the API answered 404, which it uses for
    /// "nothing matched" rather than as an error.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryBuilder,
    ) -> Result<Option<T>, Error> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let mut request = self.client.get(&url).query(&query.into_items());
        if let Some(auth) = &self.config.authentication {
            request = request.basic_auth(auth.username(), Some(auth.password()));
        }

        tracing::debug!("Fetching: {}", url);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        decode_response(status, &body)
    }
}

/// Map an HTTP status and body to a typed outcome.
fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, Error> {
    match status {
        StatusCode::OK => serde_json::from_str(body)
            .map(Some)
            .map_err(Error::MalformedResponse),
        StatusCode::NOT_FOUND => Ok(None),
        status => Err(Error::RequestFailed {
            status,
            body: body.to_string(),
        }),
    }
}
