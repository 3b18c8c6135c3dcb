use eframe::egui;

use crate::render::draw_styled_text;
use crate::theme::Theme;

/// Text slide layout: the message centered in the slide area, styled by
/// its class tokens.
pub fn render(
    ui: &egui::Ui,
    content: &str,
    class_name: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
) {
    let style = theme.text_style(class_name);
    let max_width = rect.width() * 0.85;

    // Measure first so the block can be vertically centered.
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    job.append(
        content,
        0.0,
        egui::text::TextFormat {
            font_id: egui::FontId::new(style.size, egui::FontFamily::Proportional),
            color: style.color,
            ..Default::default()
        },
    );
    let height = ui.painter().layout_job(job).rect.height();

    let y = rect.center().y - height / 2.0;
    draw_styled_text(ui, content, style, rect.center().x, y, max_width);
}
