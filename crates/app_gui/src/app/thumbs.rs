//! Texture cache for data-URI images (basic LRU).

use eframe::egui;
use parts_core::{RecordId, Slot, decode_data_uri};
use std::collections::{HashMap, VecDeque};

const THUMB_SIZE: u32 = 512;
const MAX_THUMBS: usize = 256;

pub fn record_key(id: &RecordId) -> String {
    format!("record:{id}")
}

pub fn slot_key(slot: Slot) -> &'static str {
    match slot {
        Slot::Source => "slot:source",
        Slot::Target => "slot:target",
    }
}

/// Decoded textures keyed by caller-chosen names. Images that fail to decode
/// are remembered as `None` so they are not retried every frame.
#[derive(Default)]
pub struct ThumbCache {
    textures: HashMap<String, Option<egui::TextureHandle>>,
    keys: VecDeque<String>,
}

impl ThumbCache {
    pub fn forget(&mut self, key: &str) {
        if self.textures.remove(key).is_some() {
            self.keys.retain(|k| k != key);
        }
    }

    fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        key: &str,
        uri: &str,
    ) -> Option<&egui::TextureHandle> {
        if !self.textures.contains_key(key) {
            let tex = load_texture(ctx, key, uri);
            self.textures.insert(key.to_string(), tex);
            self.keys.push_back(key.to_string());
            if self.textures.len() > MAX_THUMBS
                && let Some(old) = self.keys.pop_front()
            {
                self.textures.remove(&old);
            }
        }
        self.textures.get(key).and_then(|t| t.as_ref())
    }

    /// Paints `uri` into a `size` box, cropping to fill it. Undecodable
    /// images get a neutral placeholder tile.
    pub fn tile(&mut self, ui: &mut egui::Ui, key: &str, uri: &str, size: egui::Vec2) -> egui::Response {
        let ctx = ui.ctx().clone();
        let (resp, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = resp.rect;
        match self.get_or_load(&ctx, key, uri) {
            Some(tex) => {
                let uv = cover_uv(tex.size_vec2(), rect.size());
                painter.image(tex.id(), rect, uv, egui::Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 6.0, egui::Color32::from_gray(40));
                painter.rect_stroke(
                    rect,
                    6.0,
                    egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
                    egui::StrokeKind::Inside,
                );
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "📷",
                    egui::FontId::proportional(28.0),
                    egui::Color32::GRAY,
                );
            }
        }
        resp
    }
}

fn load_texture(ctx: &egui::Context, key: &str, uri: &str) -> Option<egui::TextureHandle> {
    let (_, bytes) = decode_data_uri(uri)?;
    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let thumb = img.thumbnail(THUMB_SIZE, THUMB_SIZE).to_rgba8();
            let (w, h) = thumb.dimensions();
            let size = [w as usize, h as usize];
            let pixels = thumb.into_raw();
            let color = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
            Some(ctx.load_texture(format!("thumb:{key}"), color, egui::TextureOptions::LINEAR))
        }
        Err(e) => {
            tracing::warn!("Failed to decode image for {key}: {e}");
            None
        }
    }
}

/// UV rect that crops an image of `image` size to the aspect ratio of `target`
/// around its center.
fn cover_uv(image: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let span = target_aspect / image_aspect;
        let start = (1.0 - span) / 2.0;
        egui::Rect::from_min_max(egui::pos2(start, 0.0), egui::pos2(start + span, 1.0))
    } else {
        let span = image_aspect / target_aspect;
        let start = (1.0 - span) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, start), egui::pos2(1.0, start + span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_cropped_horizontally() {
        let uv = cover_uv(egui::vec2(400.0, 100.0), egui::vec2(200.0, 100.0));
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn tall_image_is_cropped_vertically() {
        let uv = cover_uv(egui::vec2(100.0, 200.0), egui::vec2(100.0, 100.0));
        assert!((uv.min.y - 0.25).abs() < 1e-6);
        assert!((uv.max.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn keys_are_distinct_per_record_and_slot() {
        assert_eq!(record_key(&RecordId::new("42")), "record:42");
        assert_ne!(slot_key(Slot::Source), slot_key(Slot::Target));
    }
}
