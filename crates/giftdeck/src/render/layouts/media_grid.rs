use eframe::egui::{self, Color32, Pos2};

use crate::content::{GridImage, GridVideo};
use crate::media::MediaCache;
use crate::render::textures::TextureStore;
use crate::render::{contain_rect, draw_media_placeholder, draw_styled_text};
use crate::theme::Theme;

/// Grid slide layouts: multiple photos or clips arranged in a grid with
/// an optional message above.
/// - 2 items: side by side
/// - 3 items: top row of 2, bottom row of 1 centered
/// - 4 items: 2x2 grid
/// - 5+ items: rows of 3, last row centered
#[allow(clippy::too_many_arguments)]
pub fn render_images(
    ui: &egui::Ui,
    images: &[GridImage],
    content: Option<&str>,
    content_class_name: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    cache: &MediaCache,
    textures: &mut TextureStore,
) {
    let (grid_left, grid_top, cells) = grid_frame(ui, content, content_class_name, theme, rect, images.len());

    for (image, cell) in images.iter().zip(&cells) {
        let cell_rect = cell.at(grid_left, grid_top);
        if let Some(texture) = textures.get_or_upload(ui.ctx(), &image.src, cache) {
            let draw_rect = contain_rect(texture.size_vec2(), cell_rect);
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter().image(texture.id(), draw_rect, uv, Color32::WHITE);
        } else {
            let label = image.alt.as_deref().unwrap_or(&image.src);
            draw_media_placeholder(ui, label, theme, cell_rect);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_videos(
    ui: &egui::Ui,
    videos: &[GridVideo],
    content: Option<&str>,
    content_class_name: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    cache: &MediaCache,
) {
    let (grid_left, grid_top, cells) = grid_frame(ui, content, content_class_name, theme, rect, videos.len());

    for (video, cell) in videos.iter().zip(&cells) {
        let cell_rect = cell.at(grid_left, grid_top);
        let label = if cache.get(&video.src).is_some() {
            "\u{25B6} video"
        } else {
            "video unavailable"
        };
        draw_media_placeholder(ui, label, theme, cell_rect);
    }
}

/// Draw the optional heading and compute the grid cells below it.
fn grid_frame(
    ui: &egui::Ui,
    content: Option<&str>,
    content_class_name: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    count: usize,
) -> (f32, f32, Vec<Cell>) {
    let padding = 50.0;
    let gap = 16.0;
    let content_width = rect.width() - padding * 2.0;
    let mut y = rect.top() + padding;

    if let Some(text) = content {
        let style = theme.text_style(content_class_name);
        let h = draw_styled_text(ui, text, style, rect.center().x, y, content_width);
        y += h + 24.0;
    }

    let grid_height = rect.bottom() - y - padding;
    let cells = compute_grid(count, content_width, grid_height, gap);
    (rect.left() + padding, y, cells)
}

struct Cell {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Cell {
    fn at(&self, left: f32, top: f32) -> egui::Rect {
        egui::Rect::from_min_size(
            Pos2::new(left + self.x, top + self.y),
            egui::vec2(self.w, self.h),
        )
    }
}

fn compute_grid(count: usize, width: f32, height: f32, gap: f32) -> Vec<Cell> {
    match count {
        0 => Vec::new(),
        1 => vec![Cell {
            x: 0.0,
            y: 0.0,
            w: width,
            h: height,
        }],
        2 => {
            let cell_w = (width - gap) / 2.0;
            vec![
                Cell {
                    x: 0.0,
                    y: 0.0,
                    w: cell_w,
                    h: height,
                },
                Cell {
                    x: cell_w + gap,
                    y: 0.0,
                    w: cell_w,
                    h: height,
                },
            ]
        }
        3 => {
            // Top row: 2 items, bottom row: 1 centered
            let row_h = (height - gap) / 2.0;
            let top_w = (width - gap) / 2.0;
            let bot_w = width * 0.5;
            let bot_x = (width - bot_w) / 2.0;
            vec![
                Cell {
                    x: 0.0,
                    y: 0.0,
                    w: top_w,
                    h: row_h,
                },
                Cell {
                    x: top_w + gap,
                    y: 0.0,
                    w: top_w,
                    h: row_h,
                },
                Cell {
                    x: bot_x,
                    y: row_h + gap,
                    w: bot_w,
                    h: row_h,
                },
            ]
        }
        4 => {
            let cell_w = (width - gap) / 2.0;
            let cell_h = (height - gap) / 2.0;
            (0..4)
                .map(|i| Cell {
                    x: (i % 2) as f32 * (cell_w + gap),
                    y: (i / 2) as f32 * (cell_h + gap),
                    w: cell_w,
                    h: cell_h,
                })
                .collect()
        }
        _ => {
            // Generic grid: rows of 3, last row centered if short
            let cols = 3;
            let rows = count.div_ceil(cols);
            let cell_w = (width - (cols - 1) as f32 * gap) / cols as f32;
            let cell_h = (height - (rows - 1) as f32 * gap) / rows as f32;

            (0..count)
                .map(|i| {
                    let col = i % cols;
                    let row = i / cols;
                    let items_in_row = if row == rows - 1 {
                        count - row * cols
                    } else {
                        cols
                    };
                    let row_width = items_in_row as f32 * cell_w + (items_in_row - 1) as f32 * gap;
                    let row_offset = (width - row_width) / 2.0;
                    Cell {
                        x: row_offset + col as f32 * (cell_w + gap),
                        y: row as f32 * (cell_h + gap),
                        w: cell_w,
                        h: cell_h,
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_items_split_the_width() {
        let cells = compute_grid(2, 1000.0, 500.0, 20.0);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].w, 490.0);
        assert_eq!(cells[1].x, 510.0);
        assert_eq!(cells[0].h, 500.0);
    }

    #[test]
    fn test_three_items_center_the_last() {
        let cells = compute_grid(3, 1000.0, 500.0, 20.0);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[2].x, 250.0);
        assert!(cells[2].y > cells[0].y);
    }

    #[test]
    fn test_five_items_make_two_rows() {
        let cells = compute_grid(5, 1000.0, 500.0, 20.0);
        assert_eq!(cells.len(), 5);
        // Second row has 2 items and is centered.
        assert_eq!(cells[3].y, cells[4].y);
        assert!(cells[3].x > cells[0].x);
    }
}
