use eframe::egui;
use parts_core::{Level, Notification};
use std::time::{Duration, Instant};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

struct Toast {
    note: Notification,
    shown_at: Instant,
}

#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, note: Notification) {
        self.items.push(Toast {
            note,
            shown_at: Instant::now(),
        });
    }

    /// Draws live toasts in the bottom-right corner. Returns whether any are
    /// still on screen.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        self.items.retain(|t| t.shown_at.elapsed() < TOAST_LIFETIME);
        if self.items.is_empty() {
            return false;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.items {
                    let accent = match toast.note.level {
                        Level::Success => egui::Color32::from_rgb(46, 160, 67),
                        Level::Error => egui::Color32::from_rgb(218, 54, 51),
                    };
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.0, accent))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(egui::RichText::new(&toast.note.title).strong().color(accent));
                            ui.label(&toast.note.description);
                        });
                    ui.add_space(6.0);
                }
            });
        true
    }
}
