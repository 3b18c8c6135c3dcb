use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use futures::StreamExt;

use super::{DecodedImage, MediaCache, MediaHandle, MediaKind, VideoMedia, fetch_bytes};
use crate::content::{ContentBundle, SlideKind};

/// Cap on simultaneous loads so a large bundle does not saturate the
/// network or disk.
pub const MAX_CONCURRENT_LOADS: usize = 10;

const IMAGE_TIMEOUT: Duration = Duration::from_secs(20);
const VIDEO_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_CAP_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub url: String,
    pub kind: MediaKind,
}

#[derive(Debug)]
pub enum PreloadEvent {
    /// Sent after every resolution, success or failure alike.
    Progress { loaded: usize, total: usize },
    /// All items resolved or failed; the cache holds every success.
    Ready(MediaCache),
    /// Catastrophic failure (runtime construction, channel loss) — never
    /// emitted for individual asset failures.
    Failed(String),
}

/// Every image/video URI referenced by the bundle's slides, deduplicated
/// and in first-reference order. Audio files masquerading as video sources
/// are skipped.
pub fn media_refs(bundle: &ContentBundle) -> Vec<MediaRef> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    let mut add = |url: &str, kind: MediaKind| {
        if !url.is_empty() && seen.insert(url.to_string()) {
            refs.push(MediaRef {
                url: url.to_string(),
                kind,
            });
        }
    };

    for slide in &bundle.slides {
        match &slide.kind {
            SlideKind::Image { src, .. } => add(src, MediaKind::Image),
            SlideKind::ImageGrid { images, .. } => {
                for image in images {
                    add(&image.src, MediaKind::Image);
                }
            }
            SlideKind::VideoGrid { videos, .. } => {
                for video in videos {
                    if !video.src.contains(".mp3") {
                        add(&video.src, MediaKind::Video);
                    }
                }
            }
            SlideKind::VideoWithSound { src, .. } => {
                if !src.contains(".mp3") {
                    add(src, MediaKind::Video);
                }
            }
            SlideKind::Text { .. } | SlideKind::Hearts { .. } => {}
        }
    }
    refs
}

/// Start preloading on a background thread. Progress and the terminal
/// `Ready`/`Failed` event arrive on the returned channel; dropping the
/// receiver abandons the batch.
pub fn spawn(bundle: Arc<ContentBundle>, base: PathBuf) -> mpsc::Receiver<PreloadEvent> {
    let (tx, rx) = mpsc::channel();
    let result = std::thread::Builder::new()
        .name("media-preloader".to_string())
        .spawn(move || {
            if let Err(e) = run(&bundle, &base, &tx) {
                let _ = tx.send(PreloadEvent::Failed(format!("{e:#}")));
            }
        });
    if let Err(e) = result {
        log::error!("could not start preloader thread: {e}");
    }
    rx
}

fn run(bundle: &ContentBundle, base: &Path, tx: &mpsc::Sender<PreloadEvent>) -> Result<()> {
    let refs = media_refs(bundle);
    let total = refs.len();
    log::info!("preloading {total} media items");

    let _ = tx.send(PreloadEvent::Progress { loaded: 0, total });
    if total == 0 {
        let _ = tx.send(PreloadEvent::Ready(MediaCache::default()));
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let cache = runtime.block_on(async {
        let mut cache = MediaCache::default();
        let mut loaded = 0usize;
        let mut results = futures::stream::iter(
            refs.into_iter()
                .map(|item| load_one(item, base.to_path_buf())),
        )
        .buffer_unordered(MAX_CONCURRENT_LOADS);

        while let Some((url, outcome)) = results.next().await {
            loaded += 1;
            match outcome {
                Ok(handle) => {
                    log::debug!("preloaded {url}");
                    cache.insert(url, handle);
                }
                // A single failed asset never aborts the batch.
                Err(e) => log::warn!("failed to preload {url}: {e:#}"),
            }
            let _ = tx.send(PreloadEvent::Progress { loaded, total });
        }
        cache
    });

    log::info!("preload complete: {}/{} items cached", cache.len(), total);
    let _ = tx.send(PreloadEvent::Ready(cache));
    Ok(())
}

async fn load_one(item: MediaRef, base: PathBuf) -> (String, Result<MediaHandle>) {
    let url = item.url.clone();
    let outcome = load_with_retry(item, base).await;
    (url, outcome)
}

async fn load_with_retry(item: MediaRef, base: PathBuf) -> Result<MediaHandle> {
    let limit = match item.kind {
        MediaKind::Image => IMAGE_TIMEOUT,
        MediaKind::Video => VIDEO_TIMEOUT,
    };

    let mut last_err = None;
    for attempt in 0..MAX_ATTEMPTS {
        if attempt > 0 {
            let backoff = Duration::from_millis((1000u64 << (attempt - 1)).min(BACKOFF_CAP_MS));
            log::debug!(
                "retrying {} in {}ms (attempt {})",
                item.url,
                backoff.as_millis(),
                attempt + 1
            );
            tokio::time::sleep(backoff).await;
        }

        let task_item = item.clone();
        let task_base = base.clone();
        let attempt_result = tokio::time::timeout(
            limit,
            tokio::task::spawn_blocking(move || load_blocking(&task_item, &task_base)),
        )
        .await;

        match attempt_result {
            Ok(Ok(Ok(handle))) => return Ok(handle),
            Ok(Ok(Err(e))) => last_err = Some(e),
            Ok(Err(join_err)) => last_err = Some(anyhow!("load task panicked: {join_err}")),
            Err(_) => last_err = Some(anyhow!("timed out after {}s", limit.as_secs())),
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow!("load never attempted")))
}

fn load_blocking(item: &MediaRef, base: &Path) -> Result<MediaHandle> {
    let bytes = fetch_bytes(&item.url, base)?;
    match item.kind {
        MediaKind::Image => {
            let decoded = image::load_from_memory(&bytes)?.to_rgba8();
            let (width, height) = decoded.dimensions();
            Ok(MediaHandle::Image(Arc::new(DecodedImage {
                width,
                height,
                rgba: decoded.into_raw(),
            })))
        }
        MediaKind::Video => Ok(MediaHandle::Video(Arc::new(VideoMedia {
            source: item.url.clone(),
            bytes,
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{GridImage, GridVideo, Slide};
    use std::io::Write;

    fn slide(kind: SlideKind, start: f64) -> Slide {
        Slide {
            start_time: start,
            end_time: None,
            background_color: None,
            kind,
        }
    }

    fn bundle_with(slides: Vec<Slide>) -> ContentBundle {
        ContentBundle {
            title: None,
            gift: None,
            music: "music.mp3".to_string(),
            total_duration: 60.0,
            slides,
        }
    }

    fn media_bundle() -> ContentBundle {
        bundle_with(vec![
            slide(
                SlideKind::Image {
                    src: "a.jpg".to_string(),
                    alt: None,
                    caption: None,
                },
                0.0,
            ),
            slide(
                SlideKind::ImageGrid {
                    images: vec![
                        GridImage {
                            src: "b.jpg".to_string(),
                            alt: None,
                            caption: None,
                        },
                        GridImage {
                            src: "a.jpg".to_string(), // duplicate
                            alt: None,
                            caption: None,
                        },
                    ],
                    content: None,
                    content_class_name: None,
                },
                10.0,
            ),
            slide(
                SlideKind::VideoGrid {
                    videos: vec![
                        GridVideo {
                            src: "c.mp4".to_string(),
                            caption: None,
                        },
                        GridVideo {
                            src: "oops.mp3".to_string(), // audio, skipped
                            caption: None,
                        },
                    ],
                    content: None,
                    content_class_name: None,
                },
                20.0,
            ),
            slide(
                SlideKind::VideoWithSound {
                    src: "d.mp4".to_string(),
                    has_sound: true,
                    caption: None,
                },
                30.0,
            ),
            slide(
                SlideKind::Text {
                    content: "no media".to_string(),
                    class_name: None,
                },
                40.0,
            ),
        ])
    }

    #[test]
    fn test_media_refs_enumeration() {
        let refs = media_refs(&media_bundle());
        let urls: Vec<&str> = refs.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["a.jpg", "b.jpg", "c.mp4", "d.mp4"]);
        assert_eq!(refs[0].kind, MediaKind::Image);
        assert_eq!(refs[2].kind, MediaKind::Video);
    }

    #[test]
    fn test_empty_bundle_is_immediately_ready() {
        let bundle = bundle_with(vec![slide(
            SlideKind::Text {
                content: "only text".to_string(),
                class_name: None,
            },
            0.0,
        )]);
        let rx = spawn(Arc::new(bundle), PathBuf::from("."));

        let mut ready = false;
        for event in rx.iter() {
            match event {
                PreloadEvent::Progress { loaded, total } => {
                    assert_eq!((loaded, total), (0, 0));
                }
                PreloadEvent::Ready(cache) => {
                    assert!(cache.is_empty());
                    ready = true;
                }
                PreloadEvent::Failed(e) => panic!("unexpected failure: {e}"),
            }
        }
        assert!(ready);
    }

    /// Failures count toward progress: a batch of missing assets still
    /// drains to (total, total) and reaches Ready.
    #[test]
    fn test_progress_reaches_total_despite_failures() {
        let dir = tempfile::tempdir().unwrap();
        // One real image, the rest missing.
        let png = image::RgbaImage::new(2, 2);
        let good = dir.path().join("good.png");
        png.save(&good).unwrap();

        let bundle = bundle_with(vec![slide(
            SlideKind::ImageGrid {
                images: vec![
                    GridImage {
                        src: "good.png".to_string(),
                        alt: None,
                        caption: None,
                    },
                    GridImage {
                        src: "missing1.png".to_string(),
                        alt: None,
                        caption: None,
                    },
                    GridImage {
                        src: "missing2.png".to_string(),
                        alt: None,
                        caption: None,
                    },
                ],
                content: None,
                content_class_name: None,
            },
            0.0,
        )]);

        let rx = spawn(Arc::new(bundle), dir.path().to_path_buf());
        let mut last_loaded = 0;
        let mut final_cache = None;
        for event in rx.iter() {
            match event {
                PreloadEvent::Progress { loaded, total } => {
                    assert!(loaded >= last_loaded, "progress went backwards");
                    assert_eq!(total, 3);
                    last_loaded = loaded;
                }
                PreloadEvent::Ready(cache) => final_cache = Some(cache),
                PreloadEvent::Failed(e) => panic!("unexpected failure: {e}"),
            }
        }
        assert_eq!(last_loaded, 3);
        let cache = final_cache.expect("no ready event");
        assert_eq!(cache.len(), 1);
        assert!(cache.get("good.png").is_some());
        assert!(cache.get("missing1.png").is_none());
    }

    #[test]
    fn test_video_bytes_are_cached_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really mp4 but bytes").unwrap();

        let bundle = bundle_with(vec![slide(
            SlideKind::VideoWithSound {
                src: "clip.mp4".to_string(),
                has_sound: true,
                caption: None,
            },
            0.0,
        )]);

        let rx = spawn(Arc::new(bundle), dir.path().to_path_buf());
        let cache = rx
            .iter()
            .find_map(|event| match event {
                PreloadEvent::Ready(cache) => Some(cache),
                _ => None,
            })
            .expect("no ready event");

        match cache.get("clip.mp4") {
            Some(MediaHandle::Video(video)) => {
                assert_eq!(video.bytes, b"not really mp4 but bytes");
            }
            other => panic!("expected video handle, got {other:?}"),
        }
    }
}
