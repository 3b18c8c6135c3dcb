pub mod provider;

use serde::{Deserialize, Serialize};

/// One gift presentation: a background track plus an ordered list of timed
/// slides. Slide order is meaningful: it defines default next/previous and
/// the implicit end-time fallback for slides without an explicit `endTime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Calendar index of this gift, recorded as opened when the
    /// presentation completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift: Option<u32>,

    /// URI of the background audio track (path or http(s) URL).
    pub music: String,

    /// Seconds; reaching this time ends the presentation.
    pub total_duration: f64,

    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Inclusive lower bound of this slide's active window, in seconds.
    pub start_time: f64,

    /// Exclusive upper bound; defaults to the next slide's `startTime`,
    /// or `totalDuration` for the last slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,

    /// Overlay color (CSS `rgba(...)` or hex), cross-faded on transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(flatten)]
    pub kind: SlideKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SlideKind {
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
    },
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    ImageGrid {
        images: Vec<GridImage>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_class_name: Option<String>,
    },
    VideoGrid {
        videos: Vec<GridVideo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_class_name: Option<String>,
    },
    VideoWithSound {
        src: String,
        #[serde(default = "default_true")]
        has_sound: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Hearts {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridVideo {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl SlideKind {
    pub fn name(&self) -> &'static str {
        match self {
            SlideKind::Text { .. } => "text",
            SlideKind::Image { .. } => "image",
            SlideKind::ImageGrid { .. } => "imageGrid",
            SlideKind::VideoGrid { .. } => "videoGrid",
            SlideKind::VideoWithSound { .. } => "videoWithSound",
            SlideKind::Hearts { .. } => "hearts",
        }
    }
}

impl ContentBundle {
    /// Exclusive upper bound of slide `index`'s window: explicit `endTime`,
    /// else the next slide's `startTime`, else `totalDuration`.
    pub fn window_end(&self, index: usize) -> f64 {
        let slide = &self.slides[index];
        slide
            .end_time
            .or_else(|| self.slides.get(index + 1).map(|next| next.start_time))
            .unwrap_or(self.total_duration)
    }

    /// Map a playback time to the active slide: the first slide (in list
    /// order) whose half-open window `[startTime, window_end)` contains `t`.
    /// A gap between windows yields `None`.
    pub fn slide_at(&self, t: f64) -> Option<usize> {
        self.slides
            .iter()
            .enumerate()
            .position(|(i, slide)| slide.start_time <= t && t < self.window_end(i))
    }

    /// Check the bundle for authoring mistakes. Overlapping, zero-length or
    /// out-of-range windows and unsorted slides are errors; gaps between
    /// windows are warnings (the previous slide simply stays active until
    /// the next window begins).
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.total_duration <= 0.0 {
            report
                .errors
                .push(format!("totalDuration must be positive, got {}", self.total_duration));
        }
        if self.slides.is_empty() {
            report.errors.push("bundle has no slides".to_string());
            return report;
        }
        if self.music.trim().is_empty() {
            report.errors.push("music source is empty".to_string());
        }

        for (i, slide) in self.slides.iter().enumerate() {
            let start = slide.start_time;
            let end = self.window_end(i);

            if start < 0.0 {
                report
                    .errors
                    .push(format!("slide {i} ({}) starts before 0s", slide.kind.name()));
            }
            if end <= start {
                report.errors.push(format!(
                    "slide {i} ({}) has a zero or negative window: [{start}, {end})",
                    slide.kind.name()
                ));
            }
            if end > self.total_duration {
                report.errors.push(format!(
                    "slide {i} ({}) ends at {end}s, past totalDuration {}s",
                    slide.kind.name(),
                    self.total_duration
                ));
            }

            if let Some(next) = self.slides.get(i + 1) {
                if next.start_time < start {
                    report
                        .errors
                        .push(format!("slides {i} and {} are not sorted by startTime", i + 1));
                } else if next.start_time < end {
                    report.errors.push(format!(
                        "slide {i} window [{start}, {end}) overlaps slide {} starting at {}s",
                        i + 1,
                        next.start_time
                    ));
                } else if next.start_time > end {
                    report.warnings.push(format!(
                        "gap between slide {i} ending at {end}s and slide {} starting at {}s",
                        i + 1,
                        next.start_time
                    ));
                }
            }
        }

        let last = self.slides.len() - 1;
        if self.window_end(last) < self.total_duration {
            report.warnings.push(format!(
                "last slide ends at {}s but the track runs to {}s",
                self.window_end(last),
                self.total_duration
            ));
        }

        report
    }

    /// Validation as a hard gate: warnings are logged, errors abort.
    pub fn ensure_valid(&self) -> anyhow::Result<()> {
        let report = self.validate();
        for warning in &report.warnings {
            log::warn!("content: {warning}");
        }
        if !report.errors.is_empty() {
            anyhow::bail!("invalid content bundle:\n  {}", report.errors.join("\n  "));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_slide(start: f64, end: Option<f64>) -> Slide {
        Slide {
            start_time: start,
            end_time: end,
            background_color: None,
            kind: SlideKind::Text {
                content: "hi".to_string(),
                class_name: None,
            },
        }
    }

    fn bundle(slides: Vec<Slide>, total: f64) -> ContentBundle {
        ContentBundle {
            title: None,
            gift: None,
            music: "music.mp3".to_string(),
            total_duration: total,
            slides,
        }
    }

    #[test]
    fn test_parse_yaml_bundle() {
        let yaml = r#"
music: "/gifts/gift1/music.mp3"
totalDuration: 180
slides:
  - type: text
    content: "Hello!"
    className: "text-4xl font-bold text-pink-500"
    startTime: 0
    endTime: 5
    backgroundColor: "rgba(0, 0, 0, 0.95)"
  - type: image
    src: "/gifts/gift1/photo1.jpg"
    alt: "First photo"
    caption: "Remember this day?"
    startTime: 5
    endTime: 15
  - type: imageGrid
    images:
      - src: "/gifts/gift1/photo2.jpg"
        caption: "A walk"
      - src: "/gifts/gift1/photo3.jpg"
    startTime: 15
    endTime: 40
  - type: videoWithSound
    src: "/gifts/gift1/video1.mp4"
    startTime: 40
"#;
        let bundle: ContentBundle = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bundle.total_duration, 180.0);
        assert_eq!(bundle.slides.len(), 4);
        assert!(matches!(bundle.slides[0].kind, SlideKind::Text { .. }));
        assert_eq!(bundle.slides[0].end_time, Some(5.0));
        assert_eq!(
            bundle.slides[0].background_color.as_deref(),
            Some("rgba(0, 0, 0, 0.95)")
        );
        match &bundle.slides[2].kind {
            SlideKind::ImageGrid { images, .. } => assert_eq!(images.len(), 2),
            other => panic!("expected imageGrid, got {}", other.name()),
        }
        // hasSound defaults to true when absent
        match &bundle.slides[3].kind {
            SlideKind::VideoWithSound { has_sound, .. } => assert!(has_sound),
            other => panic!("expected videoWithSound, got {}", other.name()),
        }
    }

    #[test]
    fn test_parse_json_bundle() {
        let json = r#"{
            "music": "m.mp3",
            "totalDuration": 10,
            "slides": [
                {"type": "hearts", "startTime": 0}
            ]
        }"#;
        let bundle: ContentBundle = serde_json::from_str(json).unwrap();
        assert!(matches!(bundle.slides[0].kind, SlideKind::Hearts { .. }));
    }

    #[test]
    fn test_window_end_fallbacks() {
        let b = bundle(
            vec![
                text_slide(0.0, Some(4.0)),
                text_slide(4.0, None),
                text_slide(6.0, None),
            ],
            10.0,
        );
        assert_eq!(b.window_end(0), 4.0); // explicit endTime
        assert_eq!(b.window_end(1), 6.0); // next slide's startTime
        assert_eq!(b.window_end(2), 10.0); // totalDuration
    }

    #[test]
    fn test_slide_at_half_open_windows() {
        let b = bundle(vec![text_slide(0.0, None), text_slide(5.0, None)], 10.0);
        assert_eq!(b.slide_at(0.0), Some(0));
        assert_eq!(b.slide_at(4.999), Some(0));
        assert_eq!(b.slide_at(5.0), Some(1));
        assert_eq!(b.slide_at(9.999), Some(1));
        assert_eq!(b.slide_at(10.0), None);
    }

    #[test]
    fn test_slide_at_gap_yields_none() {
        let b = bundle(
            vec![text_slide(0.0, Some(3.0)), text_slide(5.0, None)],
            10.0,
        );
        assert_eq!(b.slide_at(4.0), None);
    }

    #[test]
    fn test_slide_at_overlap_first_match_wins() {
        // Malformed on purpose: windows [0, 6) and [4, 10) overlap.
        let b = bundle(
            vec![text_slide(0.0, Some(6.0)), text_slide(4.0, None)],
            10.0,
        );
        assert_eq!(b.slide_at(5.0), Some(0));
    }

    #[test]
    fn test_validate_accepts_contiguous_bundle() {
        let b = bundle(vec![text_slide(0.0, None), text_slide(5.0, None)], 10.0);
        let report = b.validate();
        assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let b = bundle(
            vec![text_slide(0.0, Some(6.0)), text_slide(4.0, None)],
            10.0,
        );
        let report = b.validate();
        assert!(report.errors.iter().any(|e| e.contains("overlaps")));
    }

    #[test]
    fn test_validate_rejects_zero_length_window() {
        let b = bundle(
            vec![text_slide(0.0, Some(0.0)), text_slide(0.0, None)],
            10.0,
        );
        let report = b.validate();
        assert!(report.errors.iter().any(|e| e.contains("zero or negative")));
    }

    #[test]
    fn test_validate_rejects_unsorted_slides() {
        let b = bundle(
            vec![text_slide(5.0, Some(8.0)), text_slide(0.0, Some(5.0))],
            10.0,
        );
        let report = b.validate();
        assert!(!report.is_ok());
    }

    #[test]
    fn test_validate_warns_on_gap() {
        let b = bundle(
            vec![text_slide(0.0, Some(3.0)), text_slide(5.0, None)],
            10.0,
        );
        let report = b.validate();
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("gap")));
    }

    #[test]
    fn test_validate_rejects_empty_bundle() {
        let b = bundle(vec![], 10.0);
        assert!(!b.validate().is_ok());
    }
}
