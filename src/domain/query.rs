use url::Url;

use crate::app::{QuakeError, Result};

pub const DEFAULT_BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_MIN_MAGNITUDE: &str = "6";

/// Parameters of one request against the event service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub base_url: String,
    pub min_magnitude: String,
    pub limit: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FeedQuery {
    pub fn new(base_url: impl Into<String>, min_magnitude: impl Into<String>, limit: u32) -> Self {
        Self {
            base_url: base_url.into(),
            min_magnitude: min_magnitude.into(),
            limit,
        }
    }

    /// Minimum magnitude as a number. Must be a non-negative decimal.
    pub fn min_magnitude_value(&self) -> Result<f64> {
        let value: f64 = self.min_magnitude.trim().parse().map_err(|_| {
            QuakeError::InvalidQuery(format!(
                "minimum magnitude {:?} is not a decimal number",
                self.min_magnitude
            ))
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(QuakeError::InvalidQuery(format!(
                "minimum magnitude {} must be a non-negative number",
                self.min_magnitude
            )));
        }

        Ok(value)
    }

    /// Copy of this query with the minimum magnitude moved by `delta`,
    /// never going below zero.
    pub fn with_min_magnitude_delta(&self, delta: f64) -> Result<Self> {
        let current = self.min_magnitude_value()?;
        let next = (current + delta).max(0.0);
        let decimals =
            decimal_places(&self.min_magnitude).max(decimal_places(&delta.to_string()));
        Ok(Self {
            min_magnitude: trim_decimal(next, decimals),
            ..self.clone()
        })
    }

    /// Build the request URL:
    /// `<base>?format=geojson&limit=<n>&minmag=<m>&orderby=time`.
    pub fn to_url(&self) -> Result<Url> {
        if self.limit == 0 {
            return Err(QuakeError::InvalidQuery("limit must be at least 1".into()));
        }
        self.min_magnitude_value()?;

        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(QuakeError::InvalidQuery(format!(
                "{} is not a usable base URL",
                self.base_url
            )));
        }

        url.query_pairs_mut()
            .append_pair("format", "geojson")
            .append_pair("limit", &self.limit.to_string())
            .append_pair("minmag", self.min_magnitude.trim())
            .append_pair("orderby", "time");

        Ok(url)
    }
}

fn decimal_places(number: &str) -> usize {
    number
        .trim()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// Render with `decimals` places, dropping trailing zeros.
fn trim_decimal(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    }
}
