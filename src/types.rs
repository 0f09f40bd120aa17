//! Core value types shared by every endpoint: transponder identifiers,
//! time intervals, and geographic bounding boxes.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid ICAO 24-bit address {0:?}: expected exactly 6 hex digits")]
    InvalidIcao24(String),
    #[error("invalid time interval: begin {begin} is after end {end}")]
    IntervalBeginAfterEnd { begin: u64, end: u64 },
    #[error("invalid time interval: this endpoint requires a non-zero span")]
    IntervalEmpty,
    #[error("time interval spans {span}s, exceeding the {max}s limit for this endpoint")]
    IntervalTooLarge { span: u64, max: u64 },
    #[error("at least one transponder address is required")]
    NoTransponders,
}

/// ICAO 24-bit aircraft transponder address.
///
/// Stored as the canonical lower-case 6-digit hexadecimal string the
/// OpenSky API uses on the wire (e.g. `"3c6444"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Icao24(String);

impl Icao24 {
    /// Validate and normalize a transponder address.
    ///
    /// Accepts exactly 6 hexadecimal digits in any case; anything else
    /// fails with [`ValidationError::InvalidIcao24`].
    pub fn new(addr: &str) -> Result<Self, ValidationError> {
        if addr.len() == 6 && addr.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(addr.to_ascii_lowercase()))
        } else {
            Err(ValidationError::InvalidIcao24(addr.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Icao24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Icao24 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Icao24 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Icao24 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let addr = String::deserialize(deserializer)?;
        Icao24::new(&addr).map_err(de::Error::custom)
    }
}

/// Closed time interval `[begin, end]` in seconds since the Unix epoch.
///
/// `begin <= end` is enforced at construction. Per-endpoint span limits
/// are checked separately, because each endpoint allows a different
/// maximum range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    begin: u64,
    end: u64,
}

impl TimeInterval {
    pub fn new(begin: u64, end: u64) -> Result<Self, ValidationError> {
        if begin > end {
            return Err(ValidationError::IntervalBeginAfterEnd { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> u64 {
        self.begin
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn span(&self) -> u64 {
        self.end - self.begin
    }

    /// Reject intervals wider than the given endpoint limit.
    pub(crate) fn check_span(&self, max: u64) -> Result<(), ValidationError> {
        let span = self.span();
        if span > max {
            return Err(ValidationError::IntervalTooLarge { span, max });
        }
        Ok(())
    }

    /// Like [`check_span`](Self::check_span), but additionally rejects
    /// zero-width intervals.
    pub(crate) fn check_span_nonzero(&self, max: u64) -> Result<(), ValidationError> {
        if self.span() == 0 {
            return Err(ValidationError::IntervalEmpty);
        }
        self.check_span(max)
    }
}

/// WGS-84 bounding box for geographic state-vector queries.
///
/// No cross-field invariant is enforced; the API accepts any
/// well-formed floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Bounding box covering the entire world.
    pub const GLOBAL: Self = Self {
        lat_min: -90.0,
        lon_min: -180.0,
        lat_max: 90.0,
        lon_max: 180.0,
    };

    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icao24_normalizes_case() {
        let addr = Icao24::new("3C6444").unwrap();
        assert_eq!(addr.as_str(), "3c6444");
        assert_eq!(format!("{}", addr), "3c6444");

        let lower = Icao24::new("3c6444").unwrap();
        assert_eq!(addr, lower);
    }

    #[test]
    fn test_icao24_rejects_bad_input() {
        for bad in ["", "3c644", "3c64444", "3c644g", "3c 444", "abcdé"] {
            assert!(
                matches!(Icao24::new(bad), Err(ValidationError::InvalidIcao24(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_icao24_from_str() {
        let addr: Icao24 = "AbCdEf".parse().unwrap();
        assert_eq!(addr.as_str(), "abcdef");
        assert!("xyz123".parse::<Icao24>().is_err());
    }

    #[test]
    fn test_interval_ordering() {
        let interval = TimeInterval::new(100, 200).unwrap();
        assert_eq!(interval.begin(), 100);
        assert_eq!(interval.end(), 200);
        assert_eq!(interval.span(), 100);

        assert!(matches!(
            TimeInterval::new(200, 100),
            Err(ValidationError::IntervalBeginAfterEnd {
                begin: 200,
                end: 100
            })
        ));
    }

    #[test]
    fn test_interval_span_limits() {
        let interval = TimeInterval::new(0, 7200).unwrap();
        assert!(interval.check_span(7200).is_ok());
        assert!(matches!(
            interval.check_span(7199),
            Err(ValidationError::IntervalTooLarge {
                span: 7200,
                max: 7199
            })
        ));
    }

    #[test]
    fn test_interval_nonzero_span() {
        let instant = TimeInterval::new(500, 500).unwrap();
        assert!(instant.check_span(3600).is_ok());
        assert!(matches!(
            instant.check_span_nonzero(3600),
            Err(ValidationError::IntervalEmpty)
        ));

        let interval = TimeInterval::new(500, 501).unwrap();
        assert!(interval.check_span_nonzero(3600).is_ok());
    }

    #[test]
    fn test_global_bbox() {
        let bbox = BoundingBox::GLOBAL;
        assert_eq!(bbox.lat_min, -90.0);
        assert_eq!(bbox.lat_max, 90.0);
        assert_eq!(bbox.lon_min, -180.0);
        assert_eq!(bbox.lon_max, 180.0);
    }
}
