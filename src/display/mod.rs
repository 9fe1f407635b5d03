//! Display fields derived from a single [`Earthquake`].
//!
//! Everything here is a pure function of its input (plus the local timezone
//! for the `format_date` / `format_time` shorthands).

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::domain::Earthquake;

/// Offset used when the place has no "<distance> of" prefix.
pub const NEAR_THE: &str = "Near the";

const LOCATION_DELIMITER: &str = "of";
const DATE_FORMAT: &str = "%-d %b, %Y";
const TIME_FORMAT: &str = "%-I:%M %p";

/// Highest color bucket, shown as "10+".
pub const MAX_BUCKET: u8 = 10;

/// Magnitude with one decimal place.
///
/// The binary value is rounded to the nearest tenth; exact decimal ties go
/// to the even digit. `6.98` gives `"7.0"`.
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{:.1}", magnitude)
}

/// Color bucket 1..=10 from the integer floor of the magnitude.
///
/// Floors of 0 and 1 share bucket 1; everything from 10 up is bucket 10.
pub fn magnitude_color_bucket(magnitude: f64) -> u8 {
    let floor = magnitude.floor();
    if floor.is_nan() || floor <= 1.0 {
        1
    } else if floor >= MAX_BUCKET as f64 {
        MAX_BUCKET
    } else {
        floor as u8
    }
}

pub fn bucket_label(bucket: u8) -> String {
    if bucket >= MAX_BUCKET {
        format!("{}+", MAX_BUCKET)
    } else {
        bucket.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationParts {
    pub offset: String,
    pub primary: String,
}

/// Split "74km NW of Rumoi, Japan" into "74km NW of" and "Rumoi, Japan".
///
/// Splits right after the first literal "of", wherever it occurs, even
/// inside a word. Without one the offset is "Near the" and the place is
/// returned unchanged.
pub fn split_location(raw: &str) -> LocationParts {
    match raw.find(LOCATION_DELIMITER) {
        Some(index) => {
            let (offset, rest) = raw.split_at(index + LOCATION_DELIMITER.len());
            LocationParts {
                offset: offset.to_string(),
                primary: rest.trim().to_string(),
            }
        }
        None => LocationParts {
            offset: NEAR_THE.to_string(),
            primary: raw.to_string(),
        },
    }
}

/// "3 Mar, 1984" in the local timezone.
pub fn format_date(occurred_at_millis: i64) -> String {
    format_date_in(occurred_at_millis, &Local)
}

/// "4:30 PM" in the local timezone.
pub fn format_time(occurred_at_millis: i64) -> String {
    format_time_in(occurred_at_millis, &Local)
}

pub fn format_date_in<Tz>(occurred_at_millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in(occurred_at_millis, tz, DATE_FORMAT)
}

pub fn format_time_in<Tz>(occurred_at_millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in(occurred_at_millis, tz, TIME_FORMAT)
}

fn format_in<Tz>(occurred_at_millis: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(occurred_at_millis)
        .map(|utc| utc.with_timezone(tz).format(pattern).to_string())
        .unwrap_or_default()
}

/// All display fields for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuakeRow {
    pub magnitude: String,
    pub bucket: u8,
    pub location: LocationParts,
    pub date: String,
    pub time: String,
    /// Passed through untouched for the "open in browser" action.
    pub detail_url: String,
}

impl QuakeRow {
    pub fn new(quake: &Earthquake) -> Self {
        Self::in_timezone(quake, &Local)
    }

    pub fn in_timezone<Tz>(quake: &Earthquake, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            magnitude: format_magnitude(quake.magnitude()),
            bucket: magnitude_color_bucket(quake.magnitude()),
            location: split_location(quake.location()),
            date: format_date_in(quake.occurred_at_millis(), tz),
            time: format_time_in(quake.occurred_at_millis(), tz),
            detail_url: quake.detail_url().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn millis(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_format_magnitude_pinned() {
        assert_eq!(format_magnitude(5.0), "5.0");
        assert_eq!(format_magnitude(6.98), "7.0");
        assert_eq!(format_magnitude(7.2), "7.2");
        assert_eq!(format_magnitude(4.449), "4.4");
        assert_eq!(format_magnitude(4.46), "4.5");
        assert_eq!(format_magnitude(0.0), "0.0");
        assert_eq!(format_magnitude(10.04), "10.0");
    }

    #[test]
    fn test_bucket_table() {
        let cases = [
            (0.0, 1),
            (0.9, 1),
            (1.0, 1),
            (1.99, 1),
            (2.0, 2),
            (3.5, 3),
            (4.2, 4),
            (5.9, 5),
            (6.0, 6),
            (7.7, 7),
            (8.1, 8),
            (9.99, 9),
            (10.0, 10),
            (12.3, 10),
        ];
        for (magnitude, bucket) in cases {
            assert_eq!(magnitude_color_bucket(magnitude), bucket, "magnitude {}", magnitude);
        }
    }

    #[test]
    fn test_bucket_monotonic_and_saturating() {
        let mut previous = 0;
        for tenths in 0..=150 {
            let bucket = magnitude_color_bucket(tenths as f64 / 10.0);
            assert!(bucket >= previous);
            assert!((1..=MAX_BUCKET).contains(&bucket));
            previous = bucket;
        }
        assert_eq!(magnitude_color_bucket(1000.0), MAX_BUCKET);
    }

    #[test]
    fn test_bucket_of_malformed_magnitude() {
        assert_eq!(magnitude_color_bucket(-3.0), 1);
        assert_eq!(magnitude_color_bucket(f64::NAN), 1);
    }

    #[test]
    fn test_bucket_label() {
        assert_eq!(bucket_label(1), "1");
        assert_eq!(bucket_label(9), "9");
        assert_eq!(bucket_label(10), "10+");
    }

    #[test]
    fn test_split_location_with_offset() {
        let parts = split_location("74km NW of Rumoi, Japan");
        assert_eq!(parts.offset, "74km NW of");
        assert_eq!(parts.primary, "Rumoi, Japan");
    }

    #[test]
    fn test_split_location_without_offset() {
        let parts = split_location("Pacific-Antarctic Ridge");
        assert_eq!(parts.offset, "Near the");
        assert_eq!(parts.primary, "Pacific-Antarctic Ridge");
    }

    #[test]
    fn test_split_location_reconstructs_input() {
        let places = [
            "74km NW of Rumoi, Japan",
            "5km SSE of Ocotillo Wells, California",
            "1km N of The Geysers, CA",
            "120km SW of Isla of Something",
        ];
        for place in places {
            let parts = split_location(place);
            assert_eq!(format!("{} {}", parts.offset, parts.primary), place.trim());
        }
    }

    #[test]
    fn test_split_location_uses_first_of_literally() {
        // "Gulf of California" has no offset phrase but still splits.
        let parts = split_location("Gulf of California");
        assert_eq!(parts.offset, "Gulf of");
        assert_eq!(parts.primary, "California");

        let parts = split_location("10km E of Bay of Plenty");
        assert_eq!(parts.offset, "10km E of");
        assert_eq!(parts.primary, "Bay of Plenty");

        let parts = split_location("Southwest of");
        assert_eq!(parts.offset, "Southwest of");
        assert_eq!(parts.primary, "");
    }

    #[test]
    fn test_split_location_is_case_sensitive() {
        let parts = split_location("OFFSHORE CHIAPAS");
        assert_eq!(parts.offset, NEAR_THE);
        assert_eq!(parts.primary, "OFFSHORE CHIAPAS");
    }

    #[test]
    fn test_format_date_and_time_utc() {
        let ms = millis(1984, 3, 3, 16, 30);
        assert_eq!(format_date_in(ms, &Utc), "3 Mar, 1984");
        assert_eq!(format_time_in(ms, &Utc), "4:30 PM");
    }

    #[test]
    fn test_format_morning_and_midnight() {
        assert_eq!(format_time_in(millis(2016, 1, 30, 9, 5), &Utc), "9:05 AM");
        assert_eq!(format_time_in(millis(2016, 1, 30, 0, 0), &Utc), "12:00 AM");
        assert_eq!(format_time_in(millis(2016, 1, 30, 12, 0), &Utc), "12:00 PM");
    }

    #[test]
    fn test_format_respects_timezone() {
        let ms = millis(1984, 3, 3, 16, 30);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_in(ms, &tokyo), "4 Mar, 1984");
        assert_eq!(format_time_in(ms, &tokyo), "1:30 AM");
    }

    #[test]
    fn test_quake_row() {
        let ms = millis(2016, 5, 3, 11, 50);
        let quake = Earthquake::new(
            6.98,
            "74km NW of Rumoi, Japan",
            ms,
            "https://earthquake.usgs.gov/earthquakes/eventpage/us10005iyt",
        )
        .unwrap();

        let row = QuakeRow::in_timezone(&quake, &Utc);
        assert_eq!(row.magnitude, "7.0");
        assert_eq!(row.bucket, 6);
        assert_eq!(row.location.offset, "74km NW of");
        assert_eq!(row.location.primary, "Rumoi, Japan");
        assert_eq!(row.date, "3 May, 2016");
        assert_eq!(row.time, "11:50 AM");
        assert_eq!(row.detail_url, quake.detail_url());
    }
}
