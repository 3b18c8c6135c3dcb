use eframe::egui;

use crate::media::MediaCache;
use crate::render::{draw_caption, draw_media_placeholder};
use crate::theme::Theme;

/// Full-width video slide. Frame decoding is out of scope, so the clip is
/// represented by a large playback tile; the synchronizer has already
/// muted the background track for the slide's window.
pub fn render(
    ui: &egui::Ui,
    src: &str,
    caption: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    cache: &MediaCache,
) {
    let padding = 60.0;
    let caption_reserve = if caption.is_some() { 70.0 } else { 0.0 };
    let video_area = egui::Rect::from_min_max(
        egui::pos2(rect.left() + padding, rect.top() + padding),
        egui::pos2(rect.right() - padding, rect.bottom() - padding - caption_reserve),
    );

    let label = if cache.get(src).is_some() {
        "\u{25B6} video"
    } else {
        "video unavailable"
    };
    draw_media_placeholder(ui, label, theme, video_area);

    if let Some(caption) = caption {
        draw_caption(ui, caption, theme, rect, video_area.bottom() + 20.0);
    }
}
