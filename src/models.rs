//! Domain records decoded from OpenSky JSON responses.
//!
//! Two wire shapes exist: keyed objects ([`Flight`], [`Track`],
//! [`StateVectors`]) and a positional array for [`Waypoint`]. The
//! positional shape carries no field names at all, so its mapping lives
//! in one place here and is checked strictly by arity.

use crate::types::Icao24;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One flight as reported by the `flights/*` endpoints.
///
/// The distance estimates are opaque signed integers; the upstream API
/// does not document their units or sign convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub icao24: Icao24,
    /// Time the flight was first seen, in seconds since the Unix epoch.
    pub first_seen: u64,
    /// Time the flight was last seen, in seconds since the Unix epoch.
    pub last_seen: u64,
    pub est_departure_airport: Option<String>,
    pub est_arrival_airport: Option<String>,
    pub callsign: Option<String>,
    pub est_departure_airport_horiz_distance: Option<i64>,
    pub est_departure_airport_vert_distance: Option<i64>,
    pub est_arrival_airport_horiz_distance: Option<i64>,
    pub est_arrival_airport_vert_distance: Option<i64>,
    pub departure_airport_candidates_count: i64,
    pub arrival_airport_candidates_count: i64,
}

/// One point along a flight's historical track.
///
/// On the wire this is the positional array
/// `[time, latitude, longitude, baro_altitude, true_track, on_ground]`.
/// Latitude through true track are independently nullable because
/// sensor coverage is partial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Seconds since the Unix epoch.
    pub time: u64,
    /// WGS-84 latitude in decimal degrees.
    pub latitude: Option<f32>,
    /// WGS-84 longitude in decimal degrees.
    pub longitude: Option<f32>,
    /// Barometric altitude in meters.
    pub baro_altitude: Option<f32>,
    /// Track in decimal degrees clockwise from north.
    pub true_track: Option<f32>,
    /// Whether the position came from a surface position report.
    pub on_ground: bool,
}

const WAYPOINT_SLOTS: usize = 6;

impl<'de> Deserialize<'de> for Waypoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WaypointVisitor;

        impl<'de> Visitor<'de> for WaypointVisitor {
            type Value = Waypoint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(
                    "a 6-element array [time, latitude, longitude, \
                     baro_altitude, true_track, on_ground]",
                )
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Waypoint, A::Error> {
                // Field identity is purely positional; never infer it
                // from the element type.
                let time: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let latitude: Option<f32> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let longitude: Option<f32> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let baro_altitude: Option<f32> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let true_track: Option<f32> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let on_ground: bool = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(5, &self))?;

                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom(format!(
                        "waypoint array has more than {WAYPOINT_SLOTS} elements"
                    )));
                }

                Ok(Waypoint {
                    time,
                    latitude,
                    longitude,
                    baro_altitude,
                    true_track,
                    on_ground,
                })
            }
        }

        deserializer.deserialize_seq(WaypointVisitor)
    }
}

impl Serialize for Waypoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(WAYPOINT_SLOTS)?;
        tup.serialize_element(&self.time)?;
        tup.serialize_element(&self.latitude)?;
        tup.serialize_element(&self.longitude)?;
        tup.serialize_element(&self.baro_altitude)?;
        tup.serialize_element(&self.true_track)?;
        tup.serialize_element(&self.on_ground)?;
        tup.end()
    }
}

/// Historical trajectory of one aircraft from the `tracks/all` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub icao24: Icao24,
    /// Time of the first waypoint, in seconds since the Unix epoch.
    pub start_time: u64,
    /// Time of the last waypoint, in seconds since the Unix epoch.
    pub end_time: u64,
    /// Callsign held for the whole track, when known.
    pub callsign: Option<String>,
    /// Waypoints in wire order, which is chronological.
    pub path: Vec<Waypoint>,
}

/// Snapshot of one aircraft's position, velocity, and identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub icao24: Icao24,
    pub callsign: Option<String>,
    pub origin_country: String,
    /// Unix timestamp of the last position report, if any.
    pub time_position: Option<u64>,
    /// Unix timestamp of the last message received from this aircraft.
    pub last_contact: u64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Barometric altitude in meters.
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    /// Ground speed in m/s.
    pub velocity: Option<f64>,
    /// Track in decimal degrees clockwise from north.
    pub true_track: Option<f64>,
    /// Vertical rate in m/s; negative means descending.
    pub vertical_rate: Option<f64>,
    /// Serials of the receivers that contributed, for own-sensor queries.
    pub sensors: Option<Vec<u64>>,
    /// Geometric altitude in meters.
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    /// Special-purpose indicator.
    pub spi: bool,
    pub position_source: i32,
    /// Aircraft category, present only when the extended flag was sent.
    pub category: Option<i32>,
}

/// Timestamped collection of state vectors.
///
/// The API returns `"states": null` when nothing matched; that
/// normalizes to an empty vec here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateVectors {
    /// Unix timestamp the states are valid for.
    pub time: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub states: Vec<StateVector>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<StateVector>, D::Error> {
    Ok(Option::<Vec<StateVector>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_all_fields_present() {
        let wp: Waypoint =
            serde_json::from_str("[1690000000, 34.05, -118.25, 1200.0, 270.5, false]").unwrap();
        assert_eq!(wp.time, 1_690_000_000);
        assert_eq!(wp.latitude, Some(34.05));
        assert_eq!(wp.longitude, Some(-118.25));
        assert_eq!(wp.baro_altitude, Some(1200.0));
        assert_eq!(wp.true_track, Some(270.5));
        assert!(!wp.on_ground);
    }

    #[test]
    fn test_waypoint_nullable_slots() {
        let wp: Waypoint =
            serde_json::from_str("[1690000000, null, null, null, null, true]").unwrap();
        assert_eq!(wp.time, 1_690_000_000);
        assert_eq!(wp.latitude, None);
        assert_eq!(wp.longitude, None);
        assert_eq!(wp.baro_altitude, None);
        assert_eq!(wp.true_track, None);
        assert!(wp.on_ground);
    }

    #[test]
    fn test_waypoint_arity_is_strict() {
        let short = serde_json::from_str::<Waypoint>("[1690000000, 34.05, -118.25, 1200.0, 270.5]");
        assert!(short.is_err());

        let long = serde_json::from_str::<Waypoint>(
            "[1690000000, 34.05, -118.25, 1200.0, 270.5, false, 7]",
        );
        assert!(long.is_err());

        let keyed = serde_json::from_str::<Waypoint>(r#"{"time": 1690000000}"#);
        assert!(keyed.is_err());
    }

    #[test]
    fn test_flight_decodes_keyed_object() {
        let json = r#"{
            "icao24": "3C6444",
            "firstSeen": 1517227317,
            "estDepartureAirport": "EDDF",
            "lastSeen": 1517230657,
            "estArrivalAirport": null,
            "callsign": "DLH9LF  ",
            "estDepartureAirportHorizDistance": 191,
            "estDepartureAirportVertDistance": 54,
            "estArrivalAirportHorizDistance": null,
            "estArrivalAirportVertDistance": null,
            "departureAirportCandidatesCount": 1,
            "arrivalAirportCandidatesCount": 0,
            "someFutureField": true
        }"#;

        let flight: Flight = serde_json::from_str(json).unwrap();
        assert_eq!(flight.icao24.as_str(), "3c6444");
        assert_eq!(flight.first_seen, 1_517_227_317);
        assert_eq!(flight.est_departure_airport.as_deref(), Some("EDDF"));
        assert_eq!(flight.est_arrival_airport, None);
        assert_eq!(flight.callsign.as_deref(), Some("DLH9LF  "));
        assert_eq!(flight.est_departure_airport_horiz_distance, Some(191));
        assert_eq!(flight.est_arrival_airport_vert_distance, None);
        assert_eq!(flight.departure_airport_candidates_count, 1);
    }

    #[test]
    fn test_flight_requires_mandatory_fields() {
        // lastSeen missing
        let json = r#"{
            "icao24": "3c6444",
            "firstSeen": 1517227317,
            "departureAirportCandidatesCount": 1,
            "arrivalAirportCandidatesCount": 0
        }"#;
        assert!(serde_json::from_str::<Flight>(json).is_err());
    }

    #[test]
    fn test_state_vectors_null_states() {
        let sv: StateVectors =
            serde_json::from_str(r#"{"time": 1690000000, "states": null}"#).unwrap();
        assert_eq!(sv.time, 1_690_000_000);
        assert!(sv.states.is_empty());

        let sv: StateVectors = serde_json::from_str(r#"{"time": 1690000000}"#).unwrap();
        assert!(sv.states.is_empty());
    }

    #[test]
    fn test_state_vector_decodes() {
        let json = r#"{
            "time": 1690000000,
            "states": [{
                "icao24": "4b1805",
                "callsign": "SWR193V ",
                "origin_country": "Switzerland",
                "time_position": 1689999998,
                "last_contact": 1689999999,
                "longitude": 8.5492,
                "latitude": 47.4612,
                "baro_altitude": null,
                "on_ground": true,
                "velocity": 0.51,
                "true_track": 217.5,
                "vertical_rate": null,
                "sensors": null,
                "geo_altitude": null,
                "squawk": "2000",
                "spi": false,
                "position_source": 0
            }]
        }"#;

        let sv: StateVectors = serde_json::from_str(json).unwrap();
        assert_eq!(sv.states.len(), 1);
        let state = &sv.states[0];
        assert_eq!(state.icao24.as_str(), "4b1805");
        assert_eq!(state.origin_country, "Switzerland");
        assert!(state.on_ground);
        assert_eq!(state.baro_altitude, None);
        assert_eq!(state.category, None);
    }

    #[test]
    fn test_track_round_trip() {
        let json = r#"{
            "icao24": "3c4b26",
            "startTime": 1689990000,
            "endTime": 1690000000,
            "callsign": "DLH2CL",
            "path": [
                [1689990000, 50.033, 8.570, null, 85.0, true],
                [1689990060, 50.041, 8.612, 450.0, 87.5, false],
                [1690000000, null, null, null, null, false]
            ]
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.icao24.as_str(), "3c4b26");
        assert_eq!(track.path.len(), 3);
        assert!(track.path[0].on_ground);
        assert_eq!(track.path[1].baro_altitude, Some(450.0));

        let encoded = serde_json::to_string(&track).unwrap();
        let decoded: Track = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, track);
    }

    #[test]
    fn test_track_rejects_bad_icao24() {
        let json = r#"{
            "icao24": "not-hex",
            "startTime": 0,
            "endTime": 1,
            "callsign": null,
            "path": []
        }"#;
        assert!(serde_json::from_str::<Track>(json).is_err());
    }
}
