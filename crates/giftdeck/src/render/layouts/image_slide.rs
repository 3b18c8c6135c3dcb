use eframe::egui::{self, Color32};

use crate::media::MediaCache;
use crate::render::textures::TextureStore;
use crate::render::{contain_rect, draw_caption, draw_media_placeholder};
use crate::theme::Theme;

/// Single image slide: the photo fitted to the slide area with an
/// optional caption underneath.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &egui::Ui,
    src: &str,
    alt: Option<&str>,
    caption: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    cache: &MediaCache,
    textures: &mut TextureStore,
) {
    let padding = 40.0;
    let caption_reserve = if caption.is_some() { 70.0 } else { 0.0 };
    let image_area = egui::Rect::from_min_max(
        egui::pos2(rect.left() + padding, rect.top() + padding),
        egui::pos2(rect.right() - padding, rect.bottom() - padding - caption_reserve),
    );

    if let Some(texture) = textures.get_or_upload(ui.ctx(), src, cache) {
        let draw_rect = contain_rect(texture.size_vec2(), image_area);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(texture.id(), draw_rect, uv, Color32::WHITE);
    } else {
        let label = alt.unwrap_or(src);
        draw_media_placeholder(ui, label, theme, image_area);
    }

    if let Some(caption) = caption {
        draw_caption(ui, caption, theme, rect, image_area.bottom() + 20.0);
    }
}
