use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::FeedQuery;
use crate::fetcher::{FeedParser, Fetcher, HttpFetcher, QuakeSource};
use crate::loader::{LoadConsumer, QuakeLoader};

pub struct AppContext {
    pub config: Config,
    pub source: Arc<dyn QuakeSource + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.feed.timeout_secs);
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_timeout(timeout)?);
        Ok(Self::with_source(config, Arc::new(FeedParser::new(fetcher))))
    }

    pub fn with_source(config: Config, source: Arc<dyn QuakeSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    pub fn query(&self) -> FeedQuery {
        self.config.feed.query()
    }

    /// A loader for the configured query, delivering into `consumer`.
    pub fn loader<C: LoadConsumer>(&self, consumer: C) -> Result<QuakeLoader<C>> {
        self.loader_for(&self.query(), consumer)
    }

    pub fn loader_for<C: LoadConsumer>(
        &self,
        query: &FeedQuery,
        consumer: C,
    ) -> Result<QuakeLoader<C>> {
        let url = query.to_url()?;
        Ok(QuakeLoader::new(self.source.clone(), url.as_str(), consumer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::QuakeError;
    use crate::domain::Earthquake;

    struct Discard;

    impl LoadConsumer for Discard {
        fn on_delivered(&mut self, _earthquakes: Vec<Earthquake>) {}
        fn on_reset(&mut self) {}
    }

    #[test]
    fn test_loader_uses_configured_query() {
        let mut config = Config::default();
        config.feed.base_url = "http://localhost:9/query".into();
        config.feed.min_magnitude = "4.5".into();
        config.feed.limit = 3;

        let ctx = AppContext::new(config).unwrap();
        let loader = ctx.loader(Discard).unwrap();
        assert_eq!(
            loader.url(),
            "http://localhost:9/query?format=geojson&limit=3&minmag=4.5&orderby=time"
        );
    }

    #[test]
    fn test_invalid_query_rejected() {
        let mut config = Config::default();
        config.feed.min_magnitude = "big".into();

        let ctx = AppContext::new(config).unwrap();
        assert!(matches!(ctx.loader(Discard), Err(QuakeError::InvalidQuery(_))));
    }
}
