use super::history::{CardStyle, render_record_card};
use super::{UiApp, pick_image};
use eframe::egui;

impl UiApp {
    /// Drop zone, picker button and the most recent analyses.
    pub(super) fn render_upload_panel(&mut self, ui: &mut egui::Ui, drag_hover: bool) {
        let stroke_color = if drag_hover {
            ui.visuals().selection.stroke.color
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .inner_margin(egui::Margin::same(32))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let icon_size = if drag_hover { 56.0 } else { 48.0 };
                    ui.label(egui::RichText::new("📷").size(icon_size));
                    ui.heading(self.tr("Загрузите фото детали", "Upload a photo of the part"));
                    ui.label(self.tr(
                        "Перетащите изображение сюда или выберите файл",
                        "Drop an image here or choose a file",
                    ));
                    ui.add_space(12.0);
                    if ui.button(self.tr("⬆ Выбрать файл", "⬆ Choose file")).clicked()
                        && let Some(path) = pick_image(self.tr("Фото детали", "Part photo"))
                    {
                        self.upload_path(path);
                    }
                });
            });

        if self.page.session().history().is_empty() {
            return;
        }
        ui.add_space(16.0);
        ui.heading(self.tr("Последние анализы", "Recent analyses"));
        ui.add_space(8.0);

        let UiApp {
            page,
            thumbs,
            language,
            settings,
            ..
        } = self;
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for record in page.session().recent(settings.recent_count) {
                        render_record_card(ui, thumbs, *language, record, CardStyle::Compact);
                    }
                });
            });
    }
}
