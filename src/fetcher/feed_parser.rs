use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;
use crate::domain::Earthquake;
use crate::fetcher::{Fetcher, QuakeSource};
use crate::normalizer::Normalizer;

/// Fetches a feature collection over HTTP and decodes it.
///
/// Performs exactly one GET per call and does not retry, cache or log.
#[derive(Clone)]
pub struct FeedParser {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl FeedParser {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
        }
    }
}

#[async_trait]
impl QuakeSource for FeedParser {
    async fn fetch_earthquakes(&self, url: &str) -> Result<Vec<Earthquake>> {
        let url = Url::parse(url)?;
        let body = self.fetcher.fetch(url.as_str()).await?;
        self.normalizer.normalize(&body)
    }
}
