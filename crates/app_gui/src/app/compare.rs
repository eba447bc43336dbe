//! Part transfer visualization: two photos in, a placeholder result out.

use super::thumbs::slot_key;
use super::{UiApp, pick_image};
use eframe::egui;
use parts_core::{Slot, Tab};

const SLOT_IMAGE_HEIGHT: f32 = 256.0;
const RESULT_IMAGE_HEIGHT: f32 = 192.0;

impl UiApp {
    pub(super) fn render_compare_panel(&mut self, ui: &mut egui::Ui) {
        debug_assert_eq!(self.page.session().active_tab(), Tab::Compare);
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading(self.tr(
                    "Визуализация переноса детали",
                    "Part transfer visualization",
                ));
                ui.add_space(12.0);
                ui.columns(2, |cols| {
                    self.render_slot(&mut cols[0], Slot::Source);
                    self.render_slot(&mut cols[1], Slot::Target);
                });
                self.render_comparison(ui);
            });
    }

    fn render_slot(&mut self, ui: &mut egui::Ui, slot: Slot) {
        let (title, prompt) = match slot {
            Slot::Source => (
                self.tr("🚗 Синее авто (исходное)", "🚗 Blue car (source)"),
                self.tr("Загрузить фото синего авто", "Upload a photo of the blue car"),
            ),
            Slot::Target => (
                self.tr("🚗 Красное авто (целевое)", "🚗 Red car (target)"),
                self.tr("Загрузить фото красного авто", "Upload a photo of the red car"),
            ),
        };
        let remove_label = self.tr("✖ Убрать", "✖ Remove");
        ui.label(egui::RichText::new(title).strong().size(16.0));
        ui.add_space(6.0);

        let mut remove = false;
        let mut picked = None;
        let UiApp { page, thumbs, .. } = self;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            let size = egui::vec2(ui.available_width(), SLOT_IMAGE_HEIGHT);
            match page.session().slot(slot) {
                Some(uri) => {
                    thumbs.tile(ui, slot_key(slot), uri, size);
                    remove = ui.button(remove_label).clicked();
                }
                None => {
                    ui.allocate_ui(size, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(SLOT_IMAGE_HEIGHT / 2.0 - 12.0);
                            if ui.button(format!("⬆ {prompt}")).clicked() {
                                picked = pick_image(prompt);
                            }
                        });
                    });
                }
            }
        });

        if remove {
            self.clear_slot(slot);
        }
        if let Some(path) = picked {
            self.load_slot_path(slot, path);
        }
    }

    fn render_comparison(&mut self, ui: &mut egui::Ui) {
        let UiApp {
            page,
            thumbs,
            language,
            ..
        } = self;
        let language = *language;
        let Some(preview) = page.session().comparison() else {
            return;
        };

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(language.pick("Результат", "Result")).strong());
        });
        ui.separator();
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.columns(2, |cols| {
                cols[0].label(language.pick("До (красное авто)", "Before (red car)"));
                let size = egui::vec2(cols[0].available_width(), RESULT_IMAGE_HEIGHT);
                thumbs.tile(&mut cols[0], slot_key(Slot::Target), preview.before, size);

                cols[1].label(
                    egui::RichText::new(language.pick(
                        "✨ После (с крышкой заднего сидения)",
                        "✨ After (with rear seat cover)",
                    ))
                    .strong(),
                );
                let size = egui::vec2(cols[1].available_width(), RESULT_IMAGE_HEIGHT);
                let resp = thumbs.tile(&mut cols[1], slot_key(Slot::Target), preview.after, size);
                let painter = cols[1].painter_at(resp.rect);
                painter.rect_filled(resp.rect, 6.0, egui::Color32::from_black_alpha(128));
                painter.text(
                    resp.rect.center() - egui::vec2(0.0, 10.0),
                    egui::Align2::CENTER_CENTER,
                    language.pick("🪄 AI визуализация", "🪄 AI visualization"),
                    egui::FontId::proportional(16.0),
                    egui::Color32::WHITE,
                );
                painter.text(
                    resp.rect.center() + egui::vec2(0.0, 12.0),
                    egui::Align2::CENTER_CENTER,
                    language.pick("в разработке", "in development"),
                    egui::FontId::proportional(13.0),
                    egui::Color32::from_white_alpha(180),
                );
            });

            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(language.pick("ℹ Информация о крышке", "ℹ About the cover")).strong(),
            );
            ui.label(language.pick(
                "На синем авто установлена крышка заднего сидения. Для установки такой же детали на красное авто рекомендуется обратиться к специалистам для подбора совместимой модели.",
                "The blue car has a rear seat cover fitted. To fit the same part to the red car, consult a specialist to pick a compatible model.",
            ));
        });
    }
}
