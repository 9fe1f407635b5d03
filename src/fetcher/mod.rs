pub mod feed_parser;
pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Earthquake;

pub use feed_parser::FeedParser;
pub use http_fetcher::HttpFetcher;

/// Raw transport: one GET, success status required, body returned as bytes.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Anything that can turn a request URL into an ordered list of earthquakes.
#[async_trait]
pub trait QuakeSource {
    async fn fetch_earthquakes(&self, url: &str) -> Result<Vec<Earthquake>>;
}
