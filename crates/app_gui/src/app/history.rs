//! History grid and the record cards shared with the upload tab.

use super::UiApp;
use super::thumbs::{ThumbCache, record_key};
use crate::i18n::Language;
use eframe::egui;
use parts_core::{AnalysisResult, AnalysisStatus, export_history_csv};
use rfd::FileDialog;

const CARD_WIDTH: f32 = 240.0;

/// How much of a record a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CardStyle {
    Compact,
    Detailed,
}

pub(super) fn render_record_card(
    ui: &mut egui::Ui,
    thumbs: &mut ThumbCache,
    language: Language,
    record: &AnalysisResult,
    style: CardStyle,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            let image_size = egui::vec2(CARD_WIDTH, CARD_WIDTH * 9.0 / 16.0);
            thumbs
                .tile(ui, &record_key(&record.id), &record.image, image_size)
                .on_hover_text(&record.part_name);
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if record.is_pending() {
                    ui.spinner();
                }
                ui.label(egui::RichText::new(&record.part_name).strong().size(16.0));
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&record.part_number).monospace());
                if style == CardStyle::Detailed
                    && record.status == AnalysisStatus::Identified
                    && ui
                        .small_button("📋")
                        .on_hover_text(language.pick("Копировать номер", "Copy part number"))
                        .clicked()
                {
                    ui.ctx().copy_text(record.part_number.clone());
                }
            });
            ui.label(egui::RichText::new(format!("📅 {}", record.date_label())).small().weak());

            if style == CardStyle::Compact {
                return;
            }
            if let AnalysisStatus::Failed(reason) = &record.status {
                ui.colored_label(ui.visuals().error_fg_color, reason);
            }
            if !record.compatibility.is_empty() {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!(
                        "✔ {}",
                        language.pick("Совместимость", "Compatibility")
                    ))
                    .strong(),
                );
                ui.horizontal_wrapped(|ui| {
                    for model in &record.compatibility {
                        egui::Frame::NONE
                            .fill(ui.visuals().faint_bg_color)
                            .corner_radius(8.0)
                            .inner_margin(egui::Margin::symmetric(6, 2))
                            .show(ui, |ui| {
                                ui.label(egui::RichText::new(model).small());
                            });
                    }
                });
            }
        });
    });
}

impl UiApp {
    pub(super) fn render_history_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let total = self.page.session().history().len();
            let pending = self.page.session().pending();
            ui.label(format!(
                "{}: {total} · {}: {pending}",
                self.tr("Всего", "Total"),
                self.tr("в обработке", "in progress")
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_export = total > 0;
                if ui
                    .add_enabled(can_export, egui::Button::new(self.tr("Экспорт CSV", "Export CSV")))
                    .clicked()
                    && let Some(path) = FileDialog::new()
                        .add_filter("CSV", &["csv"])
                        .set_file_name("autoparts_history.csv")
                        .save_file()
                {
                    match export_history_csv(self.page.session().history(), &path) {
                        Ok(()) => {
                            tracing::info!("History exported to {}", path.display());
                            self.status = format!(
                                "{}: {}",
                                self.tr("CSV экспортирован", "CSV exported"),
                                path.display()
                            );
                        }
                        Err(e) => {
                            tracing::warn!("History export failed: {e:#}");
                            self.status =
                                format!("{}: {e}", self.tr("Ошибка экспорта", "Export failed"));
                        }
                    }
                }
            });
        });
        ui.add_space(8.0);

        let UiApp {
            page,
            thumbs,
            language,
            ..
        } = self;
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for record in page.session().history() {
                        render_record_card(ui, thumbs, *language, record, CardStyle::Detailed);
                    }
                });
            });
    }
}
