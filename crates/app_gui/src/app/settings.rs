//! Settings window for language, the compare tab and analysis timing.

use super::UiApp;
use crate::config::{AppSettings, RECENT_COUNT_RANGE};
use crate::i18n::{Language, LanguagePreference};
use eframe::egui;
use parts_core::FixedProvider;
use std::sync::Arc;

impl UiApp {
    /// Renders the settings window; changes are staged until applied.
    pub(super) fn render_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;
        egui::Window::new(self.tr("Настройки", "Settings"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| self.render_settings_body(ui));
        self.show_settings = open && self.show_settings;
    }

    fn render_settings_body(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.tr("Язык", "Language"));
            let language = self.language;
            let option_label = |pref: LanguagePreference| match (language, pref) {
                (Language::Russian, LanguagePreference::System) => "Системный (автоматически)",
                (Language::English, LanguagePreference::System) => "System (auto)",
                (Language::Russian, LanguagePreference::Russian) => "Русский",
                (Language::English, LanguagePreference::Russian) => "Russian",
                (Language::Russian, LanguagePreference::English) => "Английский",
                (Language::English, LanguagePreference::English) => "English",
            };
            let selected = &mut self.pending_settings.language;
            egui::ComboBox::from_id_salt("language-select")
                .selected_text(option_label(*selected))
                .show_ui(ui, |ui| {
                    for pref in [
                        LanguagePreference::System,
                        LanguagePreference::Russian,
                        LanguagePreference::English,
                    ] {
                        ui.selectable_value(selected, pref, option_label(pref));
                    }
                });
        });
        ui.add_space(8.0);

        let compare_label = self.tr(
            "Показывать вкладку «Перенос детали»",
            "Show the part transfer tab",
        );
        ui.checkbox(&mut self.pending_settings.compare_tab, compare_label);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(self.tr("Длительность анализа", "Analysis duration"));
            ui.add(
                egui::DragValue::new(&mut self.pending_settings.analysis_delay_ms)
                    .range(0..=30_000)
                    .speed(50)
                    .suffix(" ms"),
            );
        });
        ui.horizontal(|ui| {
            ui.label(self.tr("Последних анализов", "Recent analyses shown"));
            ui.add(
                egui::DragValue::new(&mut self.pending_settings.recent_count)
                    .range(RECENT_COUNT_RANGE)
                    .speed(1),
            );
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button(self.tr("Применить", "Apply")).clicked() {
                self.apply_settings(self.pending_settings.clone());
                self.settings_status = self.tr("Настройки применены.", "Settings applied.").to_string();
            }
            if ui.button(self.tr("Сохранить", "Save")).clicked() {
                self.apply_settings(self.pending_settings.clone());
                self.settings_status = match self.settings.save() {
                    Ok(path) => {
                        tracing::info!("Settings saved to {}", path.display());
                        format!("{}: {}", self.tr("Сохранено", "Saved"), path.display())
                    }
                    Err(e) => {
                        tracing::warn!("Settings not saved: {e:#}");
                        format!("{}: {e}", self.tr("Ошибка сохранения", "Save failed"))
                    }
                };
            }
        });
        if !self.settings_status.is_empty() {
            ui.label(&self.settings_status);
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label(format!(
            "{}: {}",
            self.tr("Версия приложения", "App version"),
            self.app_version
        ));
        ui.label(format!(
            "{}: {}",
            self.tr("Модуль распознавания", "Recognition provider"),
            self.page.analyzer().provider_name()
        ));
    }

    /// Makes `next` the active settings and pushes the changes into the
    /// running page.
    pub(super) fn apply_settings(&mut self, next: AppSettings) {
        if next.analysis_delay_ms != self.settings.analysis_delay_ms {
            self.page
                .set_provider(Arc::new(FixedProvider::new(next.analysis_delay())));
        }
        self.page.session_mut().set_capabilities(next.capabilities());
        self.language = next.language.resolve();
        tracing::debug!(?next, "settings applied");
        self.settings = next;
    }
}
