use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::{QuakeError, Result};

/// A single seismic event as reported by the feed.
///
/// Instances can only be built through [`Earthquake::new`], which rejects
/// malformed values, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Earthquake {
    magnitude: f64,
    location: String,
    occurred_at_millis: i64,
    detail_url: String,
}

impl Earthquake {
    pub fn new(
        magnitude: f64,
        location: impl Into<String>,
        occurred_at_millis: i64,
        detail_url: impl Into<String>,
    ) -> Result<Self> {
        if magnitude.is_nan() || magnitude < 0.0 {
            return Err(QuakeError::InvalidRecord(format!(
                "magnitude must be a non-negative number, got {}",
                magnitude
            )));
        }

        let location = location.into();
        if location.is_empty() {
            return Err(QuakeError::InvalidRecord("location is empty".into()));
        }

        if occurred_at_millis < 0 || DateTime::from_timestamp_millis(occurred_at_millis).is_none()
        {
            return Err(QuakeError::InvalidRecord(format!(
                "time {} is not a valid epoch timestamp",
                occurred_at_millis
            )));
        }

        Ok(Self {
            magnitude,
            location,
            occurred_at_millis,
            detail_url: detail_url.into(),
        })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Raw place description, e.g. "74km NW of Rumoi, Japan".
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn occurred_at_millis(&self) -> i64 {
        self.occurred_at_millis
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        // Range was checked in `new`.
        DateTime::from_timestamp_millis(self.occurred_at_millis).unwrap_or_default()
    }

    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://earthquake.usgs.gov/earthquakes/eventpage/us1000abcd";

    #[test]
    fn test_new_valid() {
        let quake = Earthquake::new(7.2, "88km N of Yelizovo, Russia", 1454124312220, URL).unwrap();
        assert_eq!(quake.magnitude(), 7.2);
        assert_eq!(quake.location(), "88km N of Yelizovo, Russia");
        assert_eq!(quake.occurred_at_millis(), 1454124312220);
        assert_eq!(quake.detail_url(), URL);
        assert_eq!(quake.occurred_at().timestamp_millis(), 1454124312220);
    }

    #[test]
    fn test_zero_magnitude_is_allowed() {
        assert!(Earthquake::new(0.0, "Somewhere", 0, URL).is_ok());
    }

    #[test]
    fn test_negative_magnitude_rejected() {
        let err = Earthquake::new(-1.0, "Somewhere", 0, URL).unwrap_err();
        assert!(matches!(err, QuakeError::InvalidRecord(_)));
    }

    #[test]
    fn test_nan_magnitude_rejected() {
        assert!(Earthquake::new(f64::NAN, "Somewhere", 0, URL).is_err());
    }

    #[test]
    fn test_empty_location_rejected() {
        assert!(Earthquake::new(5.0, "", 0, URL).is_err());
    }

    #[test]
    fn test_negative_time_rejected() {
        assert!(Earthquake::new(5.0, "Somewhere", -1, URL).is_err());
    }

    #[test]
    fn test_out_of_range_time_rejected() {
        assert!(Earthquake::new(5.0, "Somewhere", i64::MAX, URL).is_err());
    }
}
