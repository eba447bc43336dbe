//! The analyzer window: tab bar, panels, toasts and the settings window.

mod compare;
mod history;
mod settings;
mod thumbs;
mod toasts;
mod upload;

use crate::config::AppSettings;
use crate::i18n::Language;
use eframe::{App, Frame, egui};
use parts_core::{DropTarget, FixedProvider, PICKER_EXTENSIONS, PartAnalyzerPage, Slot, Tab};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thumbs::ThumbCache;
use toasts::Toasts;
use tokio::runtime::Handle;

const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct UiApp {
    page: PartAnalyzerPage,
    settings: AppSettings,
    /// Edited copy shown in the settings window until applied.
    pending_settings: AppSettings,
    language: Language,
    show_settings: bool,
    settings_status: String,
    status: String,
    thumbs: ThumbCache,
    toasts: Toasts,
    app_version: &'static str,
}

impl UiApp {
    pub fn new(settings: AppSettings, handle: Handle) -> Self {
        let provider = Arc::new(FixedProvider::new(settings.analysis_delay()));
        let page = PartAnalyzerPage::new(settings.capabilities(), handle, provider);
        Self {
            page,
            language: settings.language.resolve(),
            pending_settings: settings.clone(),
            settings,
            show_settings: false,
            settings_status: String::new(),
            status: String::new(),
            thumbs: ThumbCache::default(),
            toasts: Toasts::default(),
            app_version: env!("AUTOPARTS_VERSION"),
        }
    }

    fn tr(&self, ru: &'static str, en: &'static str) -> &'static str {
        self.language.pick(ru, en)
    }

    fn tab_label(&self, tab: Tab) -> String {
        match tab {
            Tab::Upload => format!("⬆ {}", self.tr("Загрузка", "Upload")),
            Tab::Compare => format!("⇄ {}", self.tr("Перенос детали", "Part transfer")),
            Tab::History => format!(
                "🕘 {} ({})",
                self.tr("История", "History"),
                self.page.session().history().len()
            ),
        }
    }

    fn upload_path(&mut self, path: PathBuf) {
        match self.page.upload_file(&path) {
            Ok(id) => {
                self.thumbs.forget(&thumbs::record_key(&id));
                self.status = format!(
                    "{}: {}",
                    self.tr("Анализируется", "Analyzing"),
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default()
                );
            }
            Err(e) => {
                tracing::warn!("Upload ignored: {:#}", anyhow::Error::from(e));
            }
        }
    }

    fn load_slot_path(&mut self, slot: Slot, path: PathBuf) {
        match self.page.load_slot_file(slot, &path) {
            Ok(()) => self.thumbs.forget(thumbs::slot_key(slot)),
            Err(e) => tracing::warn!("Photo for {slot:?} ignored: {:#}", anyhow::Error::from(e)),
        }
    }

    fn clear_slot(&mut self, slot: Slot) {
        self.page.session_mut().clear_slot(slot);
        self.thumbs.forget(thumbs::slot_key(slot));
    }

    /// Hands the first file dropped on the window to wherever the session
    /// routes it.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        let mime = (!file.mime.is_empty()).then_some(file.mime.as_str());
        match self.page.session().drop_target() {
            Some(DropTarget::Upload) => {
                if let Some(path) = file.path {
                    self.upload_path(path);
                } else if let Some(bytes) = file.bytes.as_deref() {
                    let id = self.page.upload_bytes(bytes, mime);
                    self.thumbs.forget(&thumbs::record_key(&id));
                }
            }
            Some(DropTarget::Slot(slot)) => {
                if let Some(path) = file.path {
                    self.load_slot_path(slot, path);
                } else if let Some(bytes) = file.bytes.as_deref() {
                    self.page.load_slot_bytes(slot, bytes, mime);
                    self.thumbs.forget(thumbs::slot_key(slot));
                }
            }
            None => {
                tracing::debug!(tab = ?self.page.session().active_tab(), "drop ignored");
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🔧").size(28.0));
            ui.vertical(|ui| {
                ui.heading("AutoParts AI");
                ui.label(
                    egui::RichText::new(self.tr("Анализ деталей по фото", "Part analysis from photos"))
                        .small()
                        .weak(),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(self.tr("⚙ Настройки", "⚙ Settings")).clicked() {
                    self.pending_settings = self.settings.clone();
                    self.settings_status.clear();
                    self.show_settings = true;
                }
                if !self.status.is_empty() {
                    ui.label(&self.status);
                }
            });
        });
    }

    fn render_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in self.page.session().tabs() {
                let selected = self.page.session().active_tab() == tab;
                let label = self.tab_label(tab);
                if ui.selectable_label(selected, label).clicked() {
                    self.page.session_mut().select_tab(tab);
                }
            }
        });
    }
}

/// Native picker limited to image files.
fn pick_image(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("Images", PICKER_EXTENSIONS)
        .pick_file()
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        for note in self.page.poll() {
            self.status.clear();
            self.toasts.push(note);
        }
        self.handle_dropped_files(ctx);
        let drag_hover = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_header(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_tabs(ui);
            ui.separator();
            ui.add_space(8.0);
            match self.page.session().active_tab() {
                Tab::Upload => self.render_upload_panel(ui, drag_hover),
                Tab::Compare => self.render_compare_panel(ui),
                Tab::History => self.render_history_panel(ui),
            }
        });

        let toasts_visible = self.toasts.show(ctx);
        if self.show_settings {
            self.render_settings_window(ctx);
        }

        if self.page.is_busy() || toasts_visible {
            ctx.request_repaint_after(REPAINT_INTERVAL);
        }
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        self.page.shutdown();
    }
}
