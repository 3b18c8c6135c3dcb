use eframe::egui::{self, Pos2};

use crate::render::draw_styled_text;
use crate::theme::{TextStyle, Theme};

const HEART_COUNT: usize = 24;

/// Hearts finale: drifting hearts behind an optional farewell message.
/// Positions are derived from the time within the slide so the animation
/// is deterministic and needs no per-frame state.
pub fn render(
    ui: &egui::Ui,
    content: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    time_in_slide: f64,
) {
    let color = theme.accent;
    let t = time_in_slide as f32;

    for i in 0..HEART_COUNT {
        // Each heart gets its own phase, column and speed from its index.
        let phase = i as f32 * 0.618;
        let fract = |v: f32| v - v.floor();
        let column = fract(phase * 7.13);
        let speed = 0.06 + fract(phase * 3.7) * 0.08;
        let size = 14.0 + fract(phase * 5.3) * 22.0;

        let progress = fract(t * speed + phase);
        let x = rect.left() + column * rect.width() + (t * 0.5 + phase).sin() * 18.0;
        let y = rect.bottom() - progress * (rect.height() + size * 2.0);

        let fade = (progress * std::f32::consts::PI).sin();
        let alpha = (fade * 200.0) as u8;
        let tint =
            egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha);
        draw_heart(ui, Pos2::new(x, y), size, tint);
    }

    if let Some(text) = content {
        let style = TextStyle {
            size: theme.title_size,
            color: theme.foreground,
            bold: true,
            italic: false,
        };
        draw_styled_text(
            ui,
            text,
            style,
            rect.center().x,
            rect.center().y - theme.title_size / 2.0,
            rect.width() * 0.8,
        );
    }
}

/// Two circles over a rotated square, the classic cheap heart.
fn draw_heart(ui: &egui::Ui, center: Pos2, size: f32, color: egui::Color32) {
    let r = size * 0.3;
    let painter = ui.painter();
    painter.circle_filled(Pos2::new(center.x - r, center.y - r * 0.6), r, color);
    painter.circle_filled(Pos2::new(center.x + r, center.y - r * 0.6), r, color);

    let tip = Pos2::new(center.x, center.y + size * 0.55);
    let left = Pos2::new(center.x - r * 1.95, center.y - r * 0.3);
    let right = Pos2::new(center.x + r * 1.95, center.y - r * 0.3);
    painter.add(egui::Shape::convex_polygon(
        vec![left, right, tip],
        color,
        egui::Stroke::NONE,
    ));
}
