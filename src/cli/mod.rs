pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "quakewatch")]
#[command(about = "Recent earthquakes from the USGS feed, in your terminal", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/quakewatch/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum magnitude to request, overriding the config file
    #[arg(short, long, global = true)]
    pub min_magnitude: Option<String>,

    /// Maximum number of earthquakes to request, overriding the config file
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print the latest earthquakes
    List {
        /// Print raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the detail page of the n-th earthquake (1-based) in the browser
    Open {
        index: usize,
    },
    /// Launch the TUI
    Tui,
    /// Show the config file location and the effective request URL
    Config,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(min_magnitude) = &self.min_magnitude {
            config.feed.min_magnitude = min_magnitude.clone();
        }
        if let Some(limit) = self.limit {
            config.feed.limit = limit;
        }
    }
}
