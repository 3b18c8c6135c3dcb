pub mod layouts;
pub mod textures;

use eframe::egui::{self, FontFamily, FontId, Pos2};

use crate::content::{Slide, SlideKind};
use crate::media::MediaCache;
use crate::theme::{TextStyle, Theme};

use textures::TextureStore;

/// Render a single slide into `rect`. The background has already been
/// painted by the caller so cross-fades between slides work.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    time_in_slide: f64,
    cache: &MediaCache,
    textures: &mut TextureStore,
) {
    match &slide.kind {
        SlideKind::Text { content, class_name } => {
            layouts::text_slide::render(ui, content, class_name.as_deref(), theme, rect);
        }
        SlideKind::Image { src, alt, caption } => {
            layouts::image_slide::render(
                ui,
                src,
                alt.as_deref(),
                caption.as_deref(),
                theme,
                rect,
                cache,
                textures,
            );
        }
        SlideKind::ImageGrid {
            images,
            content,
            content_class_name,
        } => {
            layouts::media_grid::render_images(
                ui,
                images,
                content.as_deref(),
                content_class_name.as_deref(),
                theme,
                rect,
                cache,
                textures,
            );
        }
        SlideKind::VideoGrid {
            videos,
            content,
            content_class_name,
        } => {
            layouts::media_grid::render_videos(
                ui,
                videos,
                content.as_deref(),
                content_class_name.as_deref(),
                theme,
                rect,
                cache,
            );
        }
        SlideKind::VideoWithSound { src, caption, .. } => {
            layouts::video_slide::render(ui, src, caption.as_deref(), theme, rect, cache);
        }
        SlideKind::Hearts { content } => {
            layouts::hearts::render(ui, content.as_deref(), theme, rect, time_in_slide);
        }
    }
}

/// Lay out and paint a styled text block centered horizontally at `y`,
/// returning the height used. Authored content uses `\n` for explicit
/// line breaks.
pub fn draw_styled_text(
    ui: &egui::Ui,
    text: &str,
    style: TextStyle,
    center_x: f32,
    y: f32,
    max_width: f32,
) -> f32 {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    job.halign = egui::Align::Center;
    let size = if style.bold { style.size + 1.5 } else { style.size };
    let format = egui::text::TextFormat {
        font_id: FontId::new(size, FontFamily::Proportional),
        color: style.color,
        italics: style.italic,
        ..Default::default()
    };
    job.append(text, 0.0, format);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(Pos2::new(center_x, y), galley, style.color);
    height
}

/// Scale a texture-sized rect to fit within `available`, preserving the
/// aspect ratio and centering the result.
pub fn contain_rect(tex_size: egui::Vec2, available: egui::Rect) -> egui::Rect {
    let scale = (available.width() / tex_size.x).min(available.height() / tex_size.y);
    let draw = tex_size * scale;
    egui::Rect::from_center_size(available.center(), draw)
}

/// Placeholder for media that failed to load or cannot be decoded. The
/// label keeps the slide legible instead of leaving a hole.
pub fn draw_media_placeholder(ui: &egui::Ui, label: &str, theme: &Theme, rect: egui::Rect) {
    let bg = Theme::with_opacity(theme.foreground, 0.08);
    let fg = Theme::with_opacity(theme.foreground, 0.6);
    ui.painter().rect_filled(rect, 8.0, bg);
    ui.painter().rect_stroke(
        rect,
        8.0,
        egui::Stroke::new(1.0, fg),
        egui::StrokeKind::Outside,
    );
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        FontId::new(theme.caption_size, FontFamily::Proportional),
        fg,
    );
}

/// Caption strip under a media area.
pub fn draw_caption(ui: &egui::Ui, caption: &str, theme: &Theme, rect: egui::Rect, y: f32) -> f32 {
    let style = TextStyle {
        size: theme.caption_size,
        color: theme.caption_color,
        bold: false,
        italic: true,
    };
    draw_styled_text(ui, caption, style, rect.center().x, y, rect.width() * 0.85)
}
