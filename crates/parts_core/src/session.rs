//! UI-independent page state: history, active tab and the compare slots.

use crate::analyzer::AnalysisEvent;
use crate::model::{AnalysisResult, IdGenerator, RecordId, seed_history};
use crate::notify::Notification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which optional parts of the page are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub has_compare_tab: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            has_compare_tab: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Upload,
    History,
    Compare,
}

/// One of the two compare uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Source,
    Target,
}

/// Where a file dropped on the page goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Analyze it as a new upload.
    Upload,
    Slot(Slot),
}

/// What the compare result panel shows once both slots are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPreview<'a> {
    pub source: &'a str,
    /// The target photo as uploaded.
    pub before: &'a str,
    /// Shown under the "in development" overlay; identical to `before`.
    pub after: &'a str,
}

#[derive(Debug)]
pub struct Session {
    capabilities: Capabilities,
    active_tab: Tab,
    history: Vec<AnalysisResult>,
    source_image: Option<String>,
    target_image: Option<String>,
    ids: IdGenerator,
}

impl Session {
    /// A session pre-filled with the seed records.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            history: seed_history(),
            ..Self::empty(capabilities)
        }
    }

    pub fn empty(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            active_tab: Tab::Upload,
            history: Vec::new(),
            source_image: None,
            target_image: None,
            ids: IdGenerator::default(),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Applies new capabilities; an active compare tab that disappears falls
    /// back to the upload tab.
    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
        if !capabilities.has_compare_tab && self.active_tab == Tab::Compare {
            self.active_tab = Tab::Upload;
        }
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> Vec<Tab> {
        if self.capabilities.has_compare_tab {
            vec![Tab::Upload, Tab::Compare, Tab::History]
        } else {
            vec![Tab::Upload, Tab::History]
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Switches tabs. Returns false if the tab is not available.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if tab == Tab::Compare && !self.capabilities.has_compare_tab {
            return false;
        }
        if self.active_tab != tab {
            tracing::debug!(from = ?self.active_tab, to = ?tab, "tab switched");
            self.active_tab = tab;
        }
        true
    }

    /// Most recent first.
    pub fn history(&self) -> &[AnalysisResult] {
        &self.history
    }

    pub fn recent(&self, count: usize) -> &[AnalysisResult] {
        &self.history[..count.min(self.history.len())]
    }

    pub fn record(&self, id: &RecordId) -> Option<&AnalysisResult> {
        self.history.iter().find(|r| &r.id == id)
    }

    pub fn pending(&self) -> usize {
        self.history.iter().filter(|r| r.is_pending()).count()
    }

    /// Prepends a placeholder record for a freshly read upload and returns its
    /// id; the caller hands the id to the analyzer.
    pub fn begin_upload(&mut self, image: String, now: DateTime<Utc>) -> RecordId {
        let id = self.ids.next_at(now);
        let record = AnalysisResult::placeholder(id.clone(), image, now.date_naive());
        self.history.insert(0, record);
        tracing::info!(%id, history = self.history.len(), "upload recorded");
        id
    }

    /// Patches the record the event belongs to. Returns the notification to
    /// show, or `None` when the record is unknown or already finished.
    pub fn apply(&mut self, event: AnalysisEvent) -> Option<Notification> {
        let Some(record) = self.history.iter_mut().find(|r| r.id == event.id) else {
            tracing::warn!(id = %event.id, "analysis finished for unknown record");
            return None;
        };
        if !record.is_pending() {
            tracing::warn!(id = %event.id, "analysis finished twice; ignoring");
            return None;
        }
        match event.outcome {
            Ok(found) => {
                tracing::info!(id = %event.id, part = %found.part_number, "part identified");
                record.identify(found);
                Some(Notification::analysis_complete())
            }
            Err(err) => {
                tracing::warn!(id = %event.id, "analysis failed: {err}");
                let reason = err.to_string();
                record.fail(reason.clone());
                Some(Notification::analysis_failed(reason))
            }
        }
    }

    /// Routes a drop by the active tab: uploads are analyzed, the compare tab
    /// fills the source slot first and then the target. History ignores drops.
    pub fn drop_target(&self) -> Option<DropTarget> {
        match self.active_tab {
            Tab::Upload => Some(DropTarget::Upload),
            Tab::Compare if self.source_image.is_none() => Some(DropTarget::Slot(Slot::Source)),
            Tab::Compare => Some(DropTarget::Slot(Slot::Target)),
            Tab::History => None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Source => self.source_image.as_deref(),
            Slot::Target => self.target_image.as_deref(),
        }
    }

    /// Stores an image in a compare slot, replacing what was there.
    pub fn set_slot(&mut self, slot: Slot, image: String) {
        *self.slot_mut(slot) = Some(image);
    }

    pub fn clear_slot(&mut self, slot: Slot) {
        *self.slot_mut(slot) = None;
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Source => &mut self.source_image,
            Slot::Target => &mut self.target_image,
        }
    }

    /// The before/after panel, available only while both slots hold an image.
    pub fn comparison(&self) -> Option<ComparisonPreview<'_>> {
        let source = self.source_image.as_deref().filter(|s| !s.is_empty())?;
        let target = self.target_image.as_deref().filter(|s| !s.is_empty())?;
        Some(ComparisonPreview {
            source,
            before: target,
            after: target,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}
