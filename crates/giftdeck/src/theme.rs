use std::sync::OnceLock;

use eframe::egui::Color32;
use regex::Regex;

/// Visual defaults for the slideshow. Slides can override the background
/// per slide; everything else comes from here.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub accent: Color32,
    pub caption_color: Color32,
    pub progress_track: Color32,
    pub title_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Theme {
    pub fn romantic() -> Self {
        Self {
            background: Color32::from_rgb(0xFF, 0xF0, 0xF5),
            foreground: Color32::from_rgb(0x4A, 0x2C, 0x3A),
            accent: Color32::from_rgb(0xEC, 0x48, 0x99),
            caption_color: Color32::from_rgb(0x8A, 0x6B, 0x7A),
            progress_track: Color32::from_rgba_unmultiplied(0, 0, 0, 40),
            title_size: 72.0,
            body_size: 44.0,
            caption_size: 28.0,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Resolve the text style for a slide's class string. Classes are
    /// space-separated utility tokens carried over from authored content
    /// (`text-4xl`, `font-bold`, `italic`, `text-white`). Unknown tokens
    /// are ignored.
    pub fn text_style(&self, class_name: Option<&str>) -> TextStyle {
        let mut style = TextStyle {
            size: self.body_size,
            color: self.foreground,
            bold: false,
            italic: false,
        };
        let Some(classes) = class_name else {
            return style;
        };
        for token in classes.split_whitespace() {
            match token {
                "text-xl" => style.size = 34.0,
                "text-2xl" => style.size = 40.0,
                "text-3xl" => style.size = 52.0,
                "text-4xl" => style.size = 64.0,
                "text-5xl" => style.size = 80.0,
                "text-6xl" => style.size = 96.0,
                "font-bold" | "font-semibold" => style.bold = true,
                "italic" => style.italic = true,
                "text-white" => style.color = Color32::WHITE,
                "text-pink-500" | "text-pink-400" => style.color = self.accent,
                "text-rose-600" => style.color = Color32::from_rgb(0xE1, 0x1D, 0x48),
                _ => {}
            }
        }
        style
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color32,
    pub bold: bool,
    pub italic: bool,
}

/// Parse a CSS color string as authored in slide data: `#rgb`, `#rrggbb`,
/// `rgb(r, g, b)` or `rgba(r, g, b, a)`. Anything else falls back to the
/// theme background.
pub fn parse_css_color(value: &str, fallback: Color32) -> Color32 {
    static RGBA: OnceLock<Regex> = OnceLock::new();
    let rgba = RGBA.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([0-9.]+)\s*)?\)$").unwrap()
    });

    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(fallback);
    }
    if let Some(caps) = rgba.captures(value) {
        let channel = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u16>().ok())
                .map(|v| v.min(255) as u8)
        };
        if let (Some(r), Some(g), Some(b)) = (channel(1), channel(2), channel(3)) {
            let a = caps
                .get(4)
                .and_then(|m| m.as_str().parse::<f32>().ok())
                .map(|a| (a.clamp(0.0, 1.0) * 255.0) as u8)
                .unwrap_or(255);
            return Color32::from_rgba_unmultiplied(r, g, b, a);
        }
    }
    fallback
}

fn parse_hex(hex: &str) -> Option<Color32> {
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color32::from_rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// Linear blend between two colors, for background cross-fades.
pub fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Color32::from_rgba_unmultiplied(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
        mix(from.a(), to.a()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        let fallback = Color32::BLACK;
        assert_eq!(
            parse_css_color("#ff0000", fallback),
            Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(
            parse_css_color("#fdf", fallback),
            Color32::from_rgb(0xFF, 0xDD, 0xFF)
        );
        assert_eq!(parse_css_color("#zz0000", fallback), fallback);
    }

    #[test]
    fn test_parse_rgb_functions() {
        let fallback = Color32::BLACK;
        assert_eq!(
            parse_css_color("rgb(255, 192, 203)", fallback),
            Color32::from_rgb(255, 192, 203)
        );
        assert_eq!(
            parse_css_color("rgba(0, 0, 0, 0.5)", fallback),
            Color32::from_rgba_unmultiplied(0, 0, 0, 127)
        );
    }

    #[test]
    fn test_unparseable_color_falls_back() {
        let fallback = Color32::from_rgb(1, 2, 3);
        assert_eq!(parse_css_color("papayawhip", fallback), fallback);
        assert_eq!(parse_css_color("", fallback), fallback);
    }

    #[test]
    fn test_class_tokens_compose() {
        let theme = Theme::romantic();
        let style = theme.text_style(Some("text-4xl font-bold text-white"));
        assert_eq!(style.size, 64.0);
        assert!(style.bold);
        assert_eq!(style.color, Color32::WHITE);

        let plain = theme.text_style(None);
        assert_eq!(plain.size, theme.body_size);
        assert!(!plain.bold);
    }
}
