use ratatui::widgets::ListState;

use crate::app::Result;
use crate::display::QuakeRow;
use crate::domain::{Earthquake, FeedQuery};
use crate::loader::{LoadConsumer, LoadOutcome, LoadState, QuakeLoader};

pub const PAGE_SIZE: usize = 10;

/// Display rows of the latest delivery.
#[derive(Debug, Default)]
pub struct QuakeList {
    pub rows: Vec<QuakeRow>,
    /// Whether anything was delivered since the last reset.
    pub loaded: bool,
}

impl LoadConsumer for QuakeList {
    fn on_delivered(&mut self, earthquakes: Vec<Earthquake>) {
        self.rows = earthquakes.iter().map(QuakeRow::new).collect();
        self.loaded = true;
    }

    fn on_reset(&mut self) {
        self.rows.clear();
        self.loaded = false;
    }
}

pub struct TuiApp {
    pub loader: QuakeLoader<QuakeList>,
    pub query: FeedQuery,
    pub index: usize,
    pub list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(loader: QuakeLoader<QuakeList>, query: FeedQuery) -> Self {
        Self {
            loader,
            query,
            index: 0,
            list_state: ListState::default(),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn rows(&self) -> &[QuakeRow] {
        &self.loader.consumer().rows
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.consumer().loaded
    }

    pub fn selected_row(&self) -> Option<&QuakeRow> {
        self.rows().get(self.index)
    }

    /// Apply finished loads. Returns `true` when the list was replaced.
    pub fn poll_loader(&mut self) -> bool {
        let delivered = self.loader.poll();
        if delivered {
            self.sync_selection();
            self.report_outcome();
        }
        delivered
    }

    /// Surface a failed load in the status bar; the list itself is empty.
    fn report_outcome(&mut self) {
        if let LoadState::Delivered {
            outcome: LoadOutcome::Failed { reason },
            ..
        } = self.loader.state()
        {
            let message = format!("Load failed: {}", reason);
            self.set_status(message);
        }
    }

    /// Reload with the current query.
    pub fn refresh(&mut self) {
        self.loader.restart();
        self.sync_selection();
    }

    pub fn clear(&mut self) {
        self.loader.reset();
        self.sync_selection();
    }

    /// Move the minimum magnitude by `delta` and reload.
    pub fn change_min_magnitude(&mut self, delta: f64) -> Result<()> {
        let query = self.query.with_min_magnitude_delta(delta)?;
        let url = query.to_url()?;
        self.loader.set_url(url.as_str());
        self.query = query;
        self.refresh();
        Ok(())
    }

    pub fn move_up(&mut self) {
        if self.index > 0 {
            self.select(self.index - 1);
        }
    }

    pub fn move_down(&mut self) {
        let len = self.rows().len();
        if len > 0 && self.index < len - 1 {
            self.select(self.index + 1);
        }
    }

    pub fn next_page(&mut self) {
        let max_index = self.rows().len().saturating_sub(1);
        self.select((self.index + PAGE_SIZE).min(max_index));
    }

    pub fn prev_page(&mut self) {
        self.select(self.index.saturating_sub(PAGE_SIZE));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn select(&mut self, index: usize) {
        self.index = index;
        if self.rows().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(index));
        }
    }

    /// A delivery replaces the list wholesale, so start from the top.
    fn sync_selection(&mut self) {
        self.select(0);
    }
}
