pub mod preloader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

/// A fully decoded RGBA image, ready to upload as a texture.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// A fetched video resource. Frame decoding is out of scope; keeping the
/// bytes resident means the asset is verified reachable and never
/// re-fetched while the presentation is up.
#[derive(Debug)]
pub struct VideoMedia {
    pub source: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum MediaHandle {
    Image(Arc<DecodedImage>),
    Video(Arc<VideoMedia>),
}

/// In-memory store of loaded media, keyed by source URI. Written only by
/// the preloader; rendering reads it and never fetches. Lives for one
/// presentation and is dropped wholesale when the view closes.
#[derive(Debug, Default)]
pub struct MediaCache {
    entries: HashMap<String, MediaHandle>,
}

impl MediaCache {
    pub fn get(&self, uri: &str) -> Option<&MediaHandle> {
        self.entries.get(uri)
    }

    pub fn insert(&mut self, uri: String, handle: MediaHandle) {
        self.entries.insert(uri, handle);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve a content URI to bytes: http(s) sources are fetched, everything
/// else is read from disk relative to the bundle's base directory (absolute
/// authored paths like `/gifts/gift1/a.jpg` are taken relative to the base,
/// matching how web content roots work).
pub fn fetch_bytes(source: &str, base: &Path) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let mut response = ureq::get(source)
            .call()
            .with_context(|| format!("request to {source} failed"))?;
        let bytes = response
            .body_mut()
            .read_to_vec()
            .with_context(|| format!("could not read body of {source}"))?;
        Ok(bytes)
    } else {
        let path = resolve_path(source, base);
        std::fs::read(&path).with_context(|| format!("could not read {}", path.display()))
    }
}

pub fn resolve_path(source: &str, base: &Path) -> PathBuf {
    let trimmed = source.trim_start_matches('/');
    base.join(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_strips_leading_slash() {
        let base = Path::new("/srv/content");
        assert_eq!(
            resolve_path("/gifts/gift1/a.jpg", base),
            PathBuf::from("/srv/content/gifts/gift1/a.jpg")
        );
        assert_eq!(
            resolve_path("gifts/gift1/a.jpg", base),
            PathBuf::from("/srv/content/gifts/gift1/a.jpg")
        );
    }

    #[test]
    fn test_cache_lookup() {
        let mut cache = MediaCache::default();
        assert!(cache.get("a.jpg").is_none());
        cache.insert(
            "a.jpg".to_string(),
            MediaHandle::Image(Arc::new(DecodedImage {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            })),
        );
        assert_eq!(cache.len(), 1);
        assert!(matches!(cache.get("a.jpg"), Some(MediaHandle::Image(_))));
    }
}
