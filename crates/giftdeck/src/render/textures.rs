use std::collections::HashMap;

use eframe::egui;

use crate::media::{MediaCache, MediaHandle};

/// GPU-side counterpart of the media cache. Decoded images are uploaded
/// lazily the first time a slide needs them and kept for the lifetime of
/// the presentation.
pub struct TextureStore {
    textures: HashMap<String, egui::TextureHandle>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Fetch the texture for an image source, uploading it from the media
    /// cache on first use. Returns `None` for sources the preloader could
    /// not fetch and for video entries.
    pub fn get_or_upload(
        &mut self,
        ctx: &egui::Context,
        uri: &str,
        cache: &MediaCache,
    ) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.textures.get(uri) {
            return Some(texture.clone());
        }
        let Some(MediaHandle::Image(image)) = cache.get(uri) else {
            return None;
        };
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [image.width as usize, image.height as usize],
            &image.rgba,
        );
        let texture = ctx.load_texture(uri, color_image, egui::TextureOptions::LINEAR);
        self.textures.insert(uri.to_string(), texture.clone());
        Some(texture)
    }
}
