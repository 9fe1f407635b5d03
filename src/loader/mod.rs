//! Lifecycle-gated, single-flight earthquake loading.
//!
//! A [`QuakeLoader`] runs each fetch on its own tokio task. Every call to
//! [`QuakeLoader::start_loading`] stamps the task with a new generation, and
//! the task posts its result back over a channel tagged with that generation.
//! The owner applies completions through [`QuakeLoader::poll`] or
//! [`QuakeLoader::settle`]; a completion whose generation is no longer the
//! one being loaded is dropped, so nothing is delivered after `reset` or
//! `destroy`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::app::{QuakeError, Result};
use crate::domain::Earthquake;
use crate::fetcher::QuakeSource;

/// Receiver of load notifications. Owned by the loader.
pub trait LoadConsumer {
    /// A load finished. Replaces whatever was delivered before; empty when
    /// nothing matched or the fetch failed.
    fn on_delivered(&mut self, earthquakes: Vec<Earthquake>);

    /// Previously delivered data is no longer valid and should be cleared.
    fn on_reset(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading { generation: u64 },
    Delivered { generation: u64, outcome: LoadOutcome },
    Reset,
    Destroyed,
}

#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<Vec<Earthquake>>,
}

enum Wake {
    Completion(Option<Completion>),
    WorkerExited(std::result::Result<(), JoinError>),
}

pub struct QuakeLoader<C: LoadConsumer> {
    source: Arc<dyn QuakeSource + Send + Sync>,
    url: String,
    consumer: C,
    state: LoadState,
    generation: u64,
    worker: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<C: LoadConsumer> QuakeLoader<C> {
    pub fn new(
        source: Arc<dyn QuakeSource + Send + Sync>,
        url: impl Into<String>,
        consumer: C,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            url: url.into(),
            consumer,
            state: LoadState::Idle,
            generation: 0,
            worker: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Generation of the most recently started load; 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Takes effect on the next `start_loading`.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    /// Start a load unless one is already running.
    ///
    /// Returns `false` (and does nothing) while `Loading` or after `destroy`.
    pub fn start_loading(&mut self) -> bool {
        match self.state {
            LoadState::Loading { generation } => {
                debug!("Load {} already in flight, ignoring start", generation);
                return false;
            }
            LoadState::Destroyed => {
                warn!("start_loading called on a destroyed loader");
                return false;
            }
            _ => {}
        }

        self.generation += 1;
        let generation = self.generation;
        let source = self.source.clone();
        let url = self.url.clone();
        let tx = self.tx.clone();

        debug!("Starting load {} from {}", generation, url);
        self.worker = Some(tokio::spawn(async move {
            let result = source.fetch_earthquakes(&url).await;
            // Receiver is gone only when the loader itself was dropped.
            let _ = tx.send(Completion { generation, result });
        }));
        self.state = LoadState::Loading { generation };
        true
    }

    /// Drop any delivered data and forget the in-flight load, if any.
    pub fn reset(&mut self) {
        if self.state == LoadState::Destroyed {
            return;
        }

        if let LoadState::Loading { generation } = self.state {
            debug!("Reset while load {} in flight; its result will be discarded", generation);
        }
        // The worker keeps running; its completion fails the generation check.
        self.worker = None;
        self.state = LoadState::Reset;
        self.consumer.on_reset();
    }

    /// Reset and immediately load again, e.g. after the query changed.
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start_loading()
    }

    /// Terminal. Aborts the in-flight worker and silences all further callbacks.
    pub fn destroy(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
        if self.state != LoadState::Destroyed {
            debug!("Loader destroyed at generation {}", self.generation);
        }
        self.state = LoadState::Destroyed;
    }

    /// Apply every completion that has already arrived without waiting.
    ///
    /// A worker that finished without posting a result (it panicked or was
    /// cancelled) is delivered as a failed, empty load.
    ///
    /// Returns `true` if the consumer received a delivery.
    pub fn poll(&mut self) -> bool {
        let mut delivered = self.drain();
        let worker_gone = self
            .worker
            .as_ref()
            .is_some_and(|worker| worker.is_finished());
        if self.is_loading() && worker_gone {
            // The completion is sent before the task finishes, so drain again.
            delivered |= self.drain();
            delivered |= self.abandon("load task ended without a result".to_string());
        }
        delivered
    }

    /// Wait for the in-flight load, if any, and deliver it.
    ///
    /// Returns immediately with `false` when nothing is loading.
    pub async fn settle(&mut self) -> bool {
        while self.is_loading() {
            let worker = match self.worker.as_mut() {
                Some(worker) => worker,
                None => break,
            };
            let wake = tokio::select! {
                biased;
                completion = self.rx.recv() => Wake::Completion(completion),
                joined = worker => Wake::WorkerExited(joined),
            };

            match wake {
                Wake::Completion(Some(completion)) => {
                    if self.apply(completion) {
                        return true;
                    }
                }
                Wake::Completion(None) => break,
                Wake::WorkerExited(joined) => {
                    self.worker = None;
                    if self.drain() {
                        return true;
                    }
                    let reason = match joined {
                        Ok(()) => "load task ended without a result".to_string(),
                        Err(e) => format!("load task ended without a result: {}", e),
                    };
                    return self.abandon(reason);
                }
            }
        }
        false
    }

    fn drain(&mut self) -> bool {
        let mut delivered = false;
        while let Ok(completion) = self.rx.try_recv() {
            delivered |= self.apply(completion);
        }
        delivered
    }

    /// Fold a load whose worker died into an empty delivery.
    fn abandon(&mut self, reason: String) -> bool {
        match self.state {
            LoadState::Loading { generation } => {
                self.finish(generation, Err(QuakeError::Other(reason)));
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        match self.state {
            LoadState::Loading { generation } if generation == completion.generation => {
                self.finish(generation, completion.result);
                true
            }
            _ => {
                debug!(
                    "Discarding stale result of load {} (state {:?})",
                    completion.generation, self.state
                );
                false
            }
        }
    }

    fn finish(&mut self, generation: u64, result: Result<Vec<Earthquake>>) {
        self.worker = None;
        let (earthquakes, outcome) = match result {
            Ok(earthquakes) => {
                info!("Load {} delivered {} earthquakes", generation, earthquakes.len());
                let count = earthquakes.len();
                (earthquakes, LoadOutcome::Loaded { count })
            }
            Err(e) => {
                warn!("Load {} failed: {}", generation, e);
                (
                    Vec::new(),
                    LoadOutcome::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        };

        self.state = LoadState::Delivered {
            generation,
            outcome,
        };
        self.consumer.on_delivered(earthquakes);
    }
}

impl<C: LoadConsumer> Drop for QuakeLoader<C> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}
