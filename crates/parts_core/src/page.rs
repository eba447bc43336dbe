//! The analyzer page: session state wired to the recognition tasks.

use crate::analyzer::Analyzer;
use crate::intake::{self, IntakeError};
use crate::model::RecordId;
use crate::notify::Notification;
use crate::provider::RecognitionProvider;
use crate::session::{Capabilities, Session, Slot};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Owns the page state and the tasks analyzing its uploads. Dropping the page
/// cancels any analysis still running.
pub struct PartAnalyzerPage {
    session: Session,
    analyzer: Analyzer,
}

impl PartAnalyzerPage {
    pub fn new(
        capabilities: Capabilities,
        handle: Handle,
        provider: Arc<dyn RecognitionProvider>,
    ) -> Self {
        Self::with_session(Session::new(capabilities), Analyzer::new(handle, provider))
    }

    pub fn with_session(session: Session, analyzer: Analyzer) -> Self {
        Self { session, analyzer }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn set_provider(&mut self, provider: Arc<dyn RecognitionProvider>) {
        self.analyzer.set_provider(provider);
    }

    /// Reads a picked or dropped file and starts analyzing it. A read failure
    /// leaves the history untouched.
    pub fn upload_file(&mut self, path: impl AsRef<Path>) -> Result<RecordId, IntakeError> {
        let uri = intake::read_data_uri(path)?;
        Ok(self.upload_data_uri(uri, Utc::now()))
    }

    /// For drops that arrive as bytes rather than a path.
    pub fn upload_bytes(&mut self, bytes: &[u8], mime_hint: Option<&str>) -> RecordId {
        let uri = intake::bytes_to_data_uri(bytes, mime_hint);
        self.upload_data_uri(uri, Utc::now())
    }

    pub fn upload_data_uri(&mut self, uri: String, now: DateTime<Utc>) -> RecordId {
        let payload = intake::decode_data_uri(&uri)
            .map(|(_, bytes)| bytes)
            .unwrap_or_default();
        let id = self.session.begin_upload(uri, now);
        self.analyzer.submit(id.clone(), payload);
        id
    }

    pub fn load_slot_file(&mut self, slot: Slot, path: impl AsRef<Path>) -> Result<(), IntakeError> {
        let uri = intake::read_data_uri(path)?;
        self.session.set_slot(slot, uri);
        Ok(())
    }

    pub fn load_slot_bytes(&mut self, slot: Slot, bytes: &[u8], mime_hint: Option<&str>) {
        self.session
            .set_slot(slot, intake::bytes_to_data_uri(bytes, mime_hint));
    }

    /// Applies every analysis that has finished since the last call.
    pub fn poll(&mut self) -> Vec<Notification> {
        let mut notes = Vec::new();
        while let Some(event) = self.analyzer.try_next() {
            notes.extend(self.session.apply(event));
        }
        notes
    }

    /// Waits for the next analysis to finish and applies it.
    pub async fn next_notification(&mut self) -> Option<Notification> {
        loop {
            let event = self.analyzer.next().await?;
            if let Some(note) = self.session.apply(event) {
                return Some(note);
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.analyzer.in_flight() > 0
    }

    pub fn shutdown(&mut self) {
        self.analyzer.shutdown();
    }
}
