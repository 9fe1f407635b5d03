use serde::Deserialize;
use serde_json::Value;

use crate::app::{QuakeError, Result};
use crate::domain::Earthquake;

/// Top-level GeoJSON container. Features are kept as raw values so a single
/// bad record cannot fail the whole collection.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    time: Option<i64>,
    url: Option<String>,
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Decode a feature collection into earthquakes, in source order.
    ///
    /// Fails only when the container itself is not a feature collection.
    /// Features with a missing or mistyped `mag`, `place`, `time` or `url`,
    /// or with values `Earthquake::new` rejects, are left out.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Earthquake>> {
        let collection: FeatureCollection =
            serde_json::from_slice(body).map_err(|e| QuakeError::Decode(e.to_string()))?;

        let earthquakes = collection
            .features
            .into_iter()
            .filter_map(|value| Self::normalize_feature(value).ok())
            .collect();

        Ok(earthquakes)
    }

    fn normalize_feature(value: Value) -> Result<Earthquake> {
        let feature: Feature =
            serde_json::from_value(value).map_err(|e| QuakeError::InvalidRecord(e.to_string()))?;
        let props = feature.properties;

        let missing = |field: &str| QuakeError::InvalidRecord(format!("missing {}", field));
        let magnitude = props.mag.ok_or_else(|| missing("mag"))?;
        let place = props.place.ok_or_else(|| missing("place"))?;
        let time = props.time.ok_or_else(|| missing("time"))?;
        let url = props.url.ok_or_else(|| missing("url"))?;

        Earthquake::new(magnitude, place, time, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FEATURES: &str = r#"{
  "type": "FeatureCollection",
  "metadata": {"generated": 1462295443000, "count": 2},
  "features": [
    {
      "type": "Feature",
      "properties": {
        "mag": 7.2,
        "place": "88km N of Yelizovo, Russia",
        "time": 1454124312220,
        "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us20004vvx"
      },
      "id": "us20004vvx"
    },
    {
      "type": "Feature",
      "properties": {
        "place": "94km SSE of Taron, Papua New Guinea",
        "time": 1453777820750,
        "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us20004uks"
      },
      "id": "us20004uks"
    }
  ]
}"#;

    fn feature(mag: &str, place: &str, time: &str, url: &str) -> String {
        format!(
            r#"{{"type":"Feature","properties":{{"mag":{},"place":{},"time":{},"url":{}}}}}"#,
            mag, place, time, url
        )
    }

    fn collection(features: &[String]) -> String {
        format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
    }

    #[test]
    fn test_feature_missing_mag_is_skipped() {
        let quakes = Normalizer::new().normalize(TWO_FEATURES.as_bytes()).unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].magnitude(), 7.2);
        assert_eq!(quakes[0].location(), "88km N of Yelizovo, Russia");
        assert_eq!(quakes[0].occurred_at_millis(), 1454124312220);
        assert_eq!(
            quakes[0].detail_url(),
            "https://earthquake.usgs.gov/earthquakes/eventpage/us20004vvx"
        );
    }

    #[test]
    fn test_source_order_preserved() {
        let body = collection(&[
            feature("4.1", r#""Older, Place""#, "1000", r#""https://e/1""#),
            feature("6.3", r#""Newest, Place""#, "3000", r#""https://e/2""#),
            feature("5.0", r#""Middle, Place""#, "2000", r#""https://e/3""#),
        ]);
        let quakes = Normalizer::new().normalize(body.as_bytes()).unwrap();
        let places: Vec<_> = quakes.iter().map(|q| q.location()).collect();
        assert_eq!(places, vec!["Older, Place", "Newest, Place", "Middle, Place"]);
    }

    #[test]
    fn test_mistyped_fields_are_skipped() {
        let body = collection(&[
            feature(r#""5.5""#, r#""String mag""#, "1000", r#""https://e/1""#),
            feature("5.5", "42", "1000", r#""https://e/2""#),
            feature("5.5", r#""Float time""#, "1000.5", r#""https://e/3""#),
            feature("5.5", r#""Null url""#, "1000", "null"),
            feature("5.5", r#""Good""#, "1000", r#""https://e/5""#),
        ]);
        let quakes = Normalizer::new().normalize(body.as_bytes()).unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].location(), "Good");
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        let body = collection(&[
            feature("-0.4", r#""Negative""#, "1000", r#""https://e/1""#),
            feature("2.0", r#""""#, "1000", r#""https://e/2""#),
            feature("2.0", r#""Before epoch""#, "-5", r#""https://e/3""#),
        ]);
        let quakes = Normalizer::new().normalize(body.as_bytes()).unwrap();
        assert!(quakes.is_empty());
    }

    #[test]
    fn test_feature_without_properties_is_skipped() {
        let body = r#"{"features":[{"type":"Feature"}, 17, "text"]}"#;
        let quakes = Normalizer::new().normalize(body.as_bytes()).unwrap();
        assert!(quakes.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let quakes = Normalizer::new()
            .normalize(br#"{"type":"FeatureCollection","features":[]}"#)
            .unwrap();
        assert!(quakes.is_empty());
    }

    #[test]
    fn test_malformed_container_is_decode_error() {
        let err = Normalizer::new().normalize(b"<html>oops</html>").unwrap_err();
        assert!(err.is_decode());

        let err = Normalizer::new().normalize(br#"{"type":"FeatureCollection"}"#).unwrap_err();
        assert!(err.is_decode());

        let err = Normalizer::new().normalize(br#"{"features": {}}"#).unwrap_err();
        assert!(err.is_decode());
    }
}
