//! Runs recognition tasks off the UI thread.
//!
//! Every upload gets its own task on the tokio runtime, guarded by a child of
//! the analyzer's root [`CancellationToken`]. Tasks never touch session state;
//! they report back through a channel that the owner drains with
//! [`Analyzer::try_next`] or [`Analyzer::next`]. Dropping the analyzer cancels
//! everything still in flight.

use crate::model::{PartIdentification, RecordId};
use crate::provider::{RecognitionError, RecognitionProvider};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Outcome of one recognition task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisEvent {
    pub id: RecordId,
    pub outcome: Result<PartIdentification, RecognitionError>,
}

pub struct Analyzer {
    handle: Handle,
    provider: Arc<dyn RecognitionProvider>,
    root: CancellationToken,
    in_flight: HashMap<RecordId, CancellationToken>,
    tx: mpsc::UnboundedSender<AnalysisEvent>,
    rx: mpsc::UnboundedReceiver<AnalysisEvent>,
}

impl Analyzer {
    pub fn new(handle: Handle, provider: Arc<dyn RecognitionProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            handle,
            provider,
            root: CancellationToken::new(),
            in_flight: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Swaps the provider used for subsequent submissions. Tasks already
    /// running keep the provider they started with.
    pub fn set_provider(&mut self, provider: Arc<dyn RecognitionProvider>) {
        tracing::debug!(provider = provider.name(), "recognition provider replaced");
        self.provider = provider;
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Starts recognizing `image` for the record `id`.
    pub fn submit(&mut self, id: RecordId, image: Vec<u8>) {
        if self.root.is_cancelled() {
            tracing::warn!(%id, "analyzer is shut down; upload not analyzed");
            return;
        }
        let token = self.root.child_token();
        self.in_flight.insert(id.clone(), token.clone());

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tracing::info!(%id, bytes = image.len(), provider = provider.name(), "analysis started");
        self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(%id, "analysis cancelled");
                }
                outcome = provider.recognize(&image) => {
                    if token.is_cancelled() {
                        return;
                    }
                    // receiver gone means the analyzer was dropped
                    let _ = tx.send(AnalysisEvent { id, outcome });
                }
            }
        });
    }

    /// Cancels the task for `id`. Returns false when nothing was in flight.
    pub fn cancel(&mut self, id: &RecordId) -> bool {
        match self.in_flight.remove(id) {
            Some(token) => {
                token.cancel();
                tracing::debug!(%id, "analysis cancel requested");
                true
            }
            None => false,
        }
    }

    /// Cancels every in-flight task and refuses new ones.
    pub fn shutdown(&mut self) {
        if !self.in_flight.is_empty() {
            tracing::info!(pending = self.in_flight.len(), "cancelling in-flight analyses");
        }
        self.root.cancel();
        self.in_flight.clear();
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns a finished event without blocking, skipping events of tasks
    /// that were cancelled after they had already reported.
    pub fn try_next(&mut self) -> Option<AnalysisEvent> {
        while let Ok(event) = self.rx.try_recv() {
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
        None
    }

    /// Waits for the next finished event. Pending forever when nothing is in
    /// flight.
    pub async fn next(&mut self) -> Option<AnalysisEvent> {
        loop {
            let event = self.rx.recv().await?;
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
    }

    fn accept(&mut self, event: AnalysisEvent) -> Option<AnalysisEvent> {
        self.in_flight.remove(&event.id).map(|_| event)
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
