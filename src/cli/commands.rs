use std::path::Path;

use tracing::info;

use crate::app::{AppContext, QuakeError, Result};
use crate::display::QuakeRow;
use crate::domain::Earthquake;
use crate::loader::{LoadConsumer, LoadOutcome, LoadState};

/// Keeps only the latest delivery.
#[derive(Default)]
struct Collected(Vec<Earthquake>);

impl LoadConsumer for Collected {
    fn on_delivered(&mut self, earthquakes: Vec<Earthquake>) {
        self.0 = earthquakes;
    }

    fn on_reset(&mut self) {
        self.0.clear();
    }
}

/// Run one load to completion.
async fn load_once(ctx: &AppContext) -> Result<Vec<Earthquake>> {
    let mut loader = ctx.loader(Collected::default())?;
    info!("Fetching {}", loader.url());

    loader.start_loading();
    loader.settle().await;

    if let LoadState::Delivered {
        outcome: LoadOutcome::Failed { reason },
        ..
    } = loader.state()
    {
        eprintln!("Could not load earthquakes: {}", reason);
    }

    Ok(std::mem::take(&mut loader.consumer_mut().0))
}

pub async fn list_quakes(ctx: &AppContext, json: bool) -> Result<()> {
    let quakes = load_once(ctx).await?;

    if json {
        let out = serde_json::to_string_pretty(&quakes).map_err(|e| QuakeError::Other(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if quakes.is_empty() {
        println!("No earthquakes found");
        return Ok(());
    }

    for (index, quake) in quakes.iter().enumerate() {
        println!("{}", format_row(index + 1, &QuakeRow::new(quake)));
    }

    Ok(())
}

pub async fn open_quake(ctx: &AppContext, index: usize) -> Result<()> {
    let quakes = load_once(ctx).await?;

    let quake = index
        .checked_sub(1)
        .and_then(|i| quakes.get(i))
        .ok_or_else(|| {
            QuakeError::Other(format!(
                "No earthquake #{} (loaded {})",
                index,
                quakes.len()
            ))
        })?;

    println!("Opening {}", quake.detail_url());
    open::that(quake.detail_url())?;
    Ok(())
}

pub fn show_config(ctx: &AppContext, config_path: &Path) -> Result<()> {
    println!("Config file: {}", config_path.display());
    println!("Request URL: {}", ctx.query().to_url()?);
    Ok(())
}

fn format_row(position: usize, row: &QuakeRow) -> String {
    format!(
        "{:>3}. [{:>4}] {} {}  {} {}",
        position, row.magnitude, row.location.offset, row.location.primary, row.date, row.time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetcher::QuakeSource;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;

    struct FixedSource(Result<Vec<Earthquake>>);

    #[async_trait]
    impl QuakeSource for FixedSource {
        async fn fetch_earthquakes(&self, _url: &str) -> Result<Vec<Earthquake>> {
            match &self.0 {
                Ok(quakes) => Ok(quakes.clone()),
                Err(e) => Err(QuakeError::Other(e.to_string())),
            }
        }
    }

    fn quake(place: &str) -> Earthquake {
        Earthquake::new(6.6, place, 1_462_276_201_920, "https://example.com/event").unwrap()
    }

    #[tokio::test]
    async fn test_load_once_returns_delivery() {
        let source = FixedSource(Ok(vec![quake("74km NW of Rumoi, Japan"), quake("Fiji region")]));
        let ctx = AppContext::with_source(Config::default(), Arc::new(source));

        let quakes = load_once(&ctx).await.unwrap();
        assert_eq!(quakes.len(), 2);
        assert_eq!(quakes[1].location(), "Fiji region");
    }

    #[tokio::test]
    async fn test_load_once_folds_failure_to_empty() {
        let source = FixedSource(Err(QuakeError::HttpStatus(502)));
        let ctx = AppContext::with_source(Config::default(), Arc::new(source));

        let quakes = load_once(&ctx).await.unwrap();
        assert!(quakes.is_empty());
    }

    #[tokio::test]
    async fn test_open_out_of_range() {
        let source = FixedSource(Ok(vec![quake("Fiji region")]));
        let ctx = AppContext::with_source(Config::default(), Arc::new(source));

        assert!(open_quake(&ctx, 0).await.is_err());
        assert!(open_quake(&ctx, 2).await.is_err());
    }

    #[test]
    fn test_format_row() {
        let row = QuakeRow::in_timezone(&quake("74km NW of Rumoi, Japan"), &Utc);
        assert_eq!(
            format_row(1, &row),
            "  1. [ 6.6] 74km NW of Rumoi, Japan  3 May, 2016 11:50 AM"
        );
    }
}
