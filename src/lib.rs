//! # quakewatch
//!
//! Recent earthquakes from the USGS event service, in the terminal.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Loader → Display → UI
//! ```
//!
//! - [`fetcher`]: one HTTP GET per load, no retries
//! - [`normalizer`]: GeoJSON feature collection to [`Earthquake`](domain::Earthquake)s
//! - [`loader`]: generation-stamped, single-flight loading with reset/destroy
//! - [`display`]: magnitude, location, date and color fields for one earthquake
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Ten most recent earthquakes of magnitude 6 or more
//! quakewatch list
//!
//! # Lower the threshold for one run
//! quakewatch --min-magnitude 4.5 --limit 25 list
//!
//! # Launch TUI
//! quakewatch tui
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the HTTP fetcher and feed parser
/// to the loaded configuration and hands out loaders.
pub mod app;

/// Command-line interface using clap.
///
/// - `list [--json]` - Fetch and print the latest earthquakes
/// - `open <n>` - Open the n-th earthquake's detail page
/// - `tui` - Launch the TUI
/// - `config` - Show config path and request URL
pub mod cli;

/// Configuration loaded from `~/.config/quakewatch/config.toml`:
/// feed settings, colors (named or hex) and keybindings.
pub mod config;

/// Presentation fields derived from an earthquake.
pub mod display;

/// Core domain models.
///
/// - [`Earthquake`](domain::Earthquake): immutable, validated event record
/// - [`FeedQuery`](domain::FeedQuery): request parameters and URL building
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for raw GETs
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`QuakeSource`](fetcher::QuakeSource) / [`FeedParser`](fetcher::FeedParser):
///   URL in, earthquakes out
pub mod fetcher;

/// Lifecycle-gated earthquake loading.
pub mod loader;

/// GeoJSON decoding. Malformed features are skipped, never defaulted.
pub mod normalizer;

/// Terminal user interface.
///
/// Keybindings: j/k navigate, o opens the detail page, R reloads,
/// c clears, +/- change the minimum magnitude, q quits.
pub mod tui;
