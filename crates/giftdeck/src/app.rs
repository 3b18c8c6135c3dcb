use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;

use crate::audio::{AudioTrack, RodioTrack};
use crate::content::ContentBundle;
use crate::media::MediaCache;
use crate::media::preloader::{self, PreloadEvent};
use crate::render;
use crate::render::textures::TextureStore;
use crate::store::UnlockStore;
use crate::sync::{GestureController, Synchronizer, TickEvent};
use crate::theme::{self, Theme};

/// Seconds for the background color to cross-fade after a slide change.
const BACKGROUND_FADE: f32 = 0.6;
const PROGRESS_BAR_HEIGHT: f32 = 6.0;

enum Stage {
    Preloading {
        events: mpsc::Receiver<PreloadEvent>,
        track: Option<Box<dyn AudioTrack>>,
        loaded: usize,
        total: usize,
    },
    Presenting {
        sync: Synchronizer,
        gestures: GestureController,
        cache: MediaCache,
        textures: TextureStore,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Copy)]
enum ControlAction {
    Previous,
    Next,
    Close,
}

struct GiftApp {
    bundle: Arc<ContentBundle>,
    theme: Theme,
    stage: Stage,
    store: UnlockStore,
    /// Background color currently on screen, eased toward the active
    /// slide's color each frame.
    shown_background: egui::Color32,
    /// Control-button rects from the last frame, so pointer input can be
    /// routed before this frame's layout is known.
    control_rects: Vec<(egui::Rect, ControlAction)>,
    opened_recorded: bool,
}

impl GiftApp {
    fn new(bundle: Arc<ContentBundle>, base: PathBuf, volume: f32, store: UnlockStore) -> Self {
        let theme = Theme::romantic();
        let events = preloader::spawn(Arc::clone(&bundle), base.clone());

        let track: Option<Box<dyn AudioTrack>> = match RodioTrack::new(&bundle.music, &base, volume)
        {
            Ok(track) => Some(Box::new(track)),
            Err(e) => {
                log::error!("audio setup failed: {e:#}");
                None
            }
        };

        let total = preloader::media_refs(&bundle).len();
        let stage = if track.is_some() {
            Stage::Preloading {
                events,
                track,
                loaded: 0,
                total,
            }
        } else {
            Stage::Failed {
                message: "No audio output device available".to_string(),
            }
        };

        let shown_background = theme.background;
        Self {
            bundle,
            theme,
            stage,
            store,
            shown_background,
            control_rects: Vec::new(),
            opened_recorded: false,
        }
    }

    /// Drain preloader events; switch to the presentation once the cache
    /// arrives.
    fn advance_preloading(&mut self) {
        let Stage::Preloading {
            events,
            track,
            loaded,
            total,
        } = &mut self.stage
        else {
            return;
        };

        let mut ready: Option<MediaCache> = None;
        let mut failure: Option<String> = None;
        while let Ok(event) = events.try_recv() {
            match event {
                PreloadEvent::Progress {
                    loaded: done,
                    total: expected,
                } => {
                    *loaded = done;
                    *total = expected;
                }
                PreloadEvent::Ready(cache) => ready = Some(cache),
                PreloadEvent::Failed(message) => failure = Some(message),
            }
        }

        if let Some(message) = failure {
            self.stage = Stage::Failed { message };
            return;
        }
        if let Some(cache) = ready {
            let Some(track) = track.take() else {
                self.stage = Stage::Failed {
                    message: "No audio output device available".to_string(),
                };
                return;
            };
            let sync = Synchronizer::new(Arc::clone(&self.bundle), track);
            self.stage = Stage::Presenting {
                sync,
                gestures: GestureController::default(),
                cache,
                textures: TextureStore::new(),
            };
        }
    }

    fn record_opened(&mut self) {
        if self.opened_recorded {
            return;
        }
        self.opened_recorded = true;
        if let Some(gift) = self.bundle.gift {
            if self.store.mark_opened(&gift.to_string()) {
                if let Err(e) = self.store.save() {
                    log::warn!("could not persist unlock state: {e:#}");
                }
            }
        }
    }

    fn ease_background(&mut self, target: egui::Color32, dt: f32) {
        let t = (dt / BACKGROUND_FADE).clamp(0.0, 1.0);
        self.shown_background = theme::lerp_color(self.shown_background, target, t);
    }

    fn draw_loading_screen(&self, ui: &egui::Ui, rect: egui::Rect, loaded: usize, total: usize) {
        let label = self
            .bundle
            .title
            .clone()
            .unwrap_or_else(|| "Preparing your gift\u{2026}".to_string());
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y - 60.0),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::new(36.0, egui::FontFamily::Proportional),
            self.theme.foreground,
        );

        let bar_width = rect.width() * 0.4;
        let bar = egui::Rect::from_center_size(
            egui::pos2(rect.center().x, rect.center().y + 20.0),
            egui::vec2(bar_width, 10.0),
        );
        ui.painter().rect_filled(bar, 5.0, self.theme.progress_track);

        let fraction = if total == 0 {
            1.0
        } else {
            loaded as f32 / total as f32
        };
        let fill = egui::Rect::from_min_size(
            bar.min,
            egui::vec2(bar.width() * fraction.clamp(0.0, 1.0), bar.height()),
        );
        ui.painter().rect_filled(fill, 5.0, self.theme.accent);

        ui.painter().text(
            egui::pos2(rect.center().x, bar.bottom() + 30.0),
            egui::Align2::CENTER_CENTER,
            format!("{loaded} / {total}"),
            egui::FontId::new(20.0, egui::FontFamily::Proportional),
            self.theme.caption_color,
        );
    }

    fn draw_error_screen(&self, ui: &egui::Ui, rect: egui::Rect, message: &str) {
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y - 30.0),
            egui::Align2::CENTER_CENTER,
            "Something went wrong",
            egui::FontId::new(36.0, egui::FontFamily::Proportional),
            self.theme.foreground,
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y + 20.0),
            egui::Align2::CENTER_CENTER,
            message,
            egui::FontId::new(20.0, egui::FontFamily::Proportional),
            self.theme.caption_color,
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y + 70.0),
            egui::Align2::CENTER_CENTER,
            "Check the content source and try again. Press Q to quit.",
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
            self.theme.caption_color,
        );
    }
}

fn draw_slide_progress(
    ui: &egui::Ui,
    rect: egui::Rect,
    theme: &Theme,
    index: usize,
    count: usize,
    percent: f64,
) {
    // One segment per slide along the top edge; past slides full, the
    // active one partially filled.
    let gap = 4.0;
    let total_gap = gap * (count.saturating_sub(1)) as f32;
    let segment_w = (rect.width() - 24.0 - total_gap) / count.max(1) as f32;
    let top = rect.top() + 10.0;

    for i in 0..count {
        let left = rect.left() + 12.0 + i as f32 * (segment_w + gap);
        let segment = egui::Rect::from_min_size(
            egui::pos2(left, top),
            egui::vec2(segment_w, PROGRESS_BAR_HEIGHT),
        );
        ui.painter()
            .rect_filled(segment, 3.0, theme.progress_track);

        let fill_fraction = if i < index {
            1.0
        } else if i == index {
            (percent / 100.0) as f32
        } else {
            0.0
        };
        if fill_fraction > 0.0 {
            let fill = egui::Rect::from_min_size(
                segment.min,
                egui::vec2(segment.width() * fill_fraction, segment.height()),
            );
            ui.painter().rect_filled(fill, 3.0, theme.accent);
        }
    }
}

/// Bottom control bar: previous / close / next. Returns the hit rects for
/// next frame's input routing.
fn draw_controls(
    ui: &egui::Ui,
    rect: egui::Rect,
    theme: &Theme,
) -> Vec<(egui::Rect, ControlAction)> {
    let radius = 24.0;
    let spacing = 90.0;
    let center_y = rect.bottom() - 50.0;
    let buttons = [
        (ControlAction::Previous, "\u{2039}", -spacing),
        (ControlAction::Close, "\u{00D7}", 0.0),
        (ControlAction::Next, "\u{203A}", spacing),
    ];

    buttons
        .into_iter()
        .map(|(action, glyph, offset)| {
            let center = egui::pos2(rect.center().x + offset, center_y);
            ui.painter()
                .circle_filled(center, radius, theme.progress_track);
            ui.painter().text(
                center,
                egui::Align2::CENTER_CENTER,
                glyph,
                egui::FontId::new(28.0, egui::FontFamily::Proportional),
                theme.foreground,
            );
            let hit = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
            (hit, action)
        })
        .collect()
}

impl eframe::App for GiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(0.1);

        self.advance_preloading();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut finished = false;
        let mut startup_failure: Option<String> = None;

        // Quit keys work from any stage.
        if ctx.input(|i| i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape)) {
            viewport_cmds.push(egui::ViewportCommand::Close);
        }

        if let Stage::Presenting {
            sync, gestures, ..
        } = &mut self.stage
        {
            let control_rects = &self.control_rects;
            ctx.input(|i| {
                if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space) {
                    sync.next();
                }
                if i.key_pressed(egui::Key::ArrowLeft) {
                    sync.previous();
                }

                if i.pointer.primary_pressed() {
                    if let Some(pos) = i.pointer.interact_pos() {
                        // Clicks on the control bar are not gestures.
                        let control = control_rects
                            .iter()
                            .find(|(rect, _)| rect.contains(pos))
                            .map(|(_, action)| *action);
                        match control {
                            Some(ControlAction::Previous) => sync.previous(),
                            Some(ControlAction::Next) => sync.next(),
                            Some(ControlAction::Close) => {
                                viewport_cmds.push(egui::ViewportCommand::Close);
                            }
                            None => gestures.pointer_down(pos.x, sync),
                        }
                    }
                }
                if i.pointer.is_decidedly_dragging() {
                    if let Some(pos) = i.pointer.latest_pos() {
                        gestures.pointer_moved(pos.x, sync);
                    }
                }
                if i.pointer.primary_released() {
                    gestures.pointer_up(sync);
                }
            });

            if sync.tick() == TickEvent::Finished {
                finished = true;
            }
            // A track that never started is a dead presentation; show the
            // error screen instead of a silent first slide.
            if let Some(message) = sync.startup_error() {
                startup_failure = Some(message.to_string());
            }
        }

        if let Some(message) = startup_failure {
            self.stage = Stage::Failed { message };
        }

        if finished {
            self.record_opened();
            viewport_cmds.push(egui::ViewportCommand::Close);
        }
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        let background_target = match &self.stage {
            Stage::Presenting { sync, .. } => sync
                .slide()
                .background_color
                .as_deref()
                .map(|c| theme::parse_css_color(c, self.theme.background))
                .unwrap_or(self.theme.background),
            _ => self.theme.background,
        };
        self.ease_background(background_target, dt);
        let shown_background = self.shown_background;
        let theme = self.theme.clone();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(shown_background))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                match &mut self.stage {
                    Stage::Preloading { loaded, total, .. } => {
                        let (loaded, total) = (*loaded, *total);
                        self.draw_loading_screen(ui, rect, loaded, total);
                    }
                    Stage::Presenting {
                        sync,
                        cache,
                        textures,
                        ..
                    } => {
                        render::render_slide(
                            ui,
                            sync.slide(),
                            &theme,
                            rect,
                            sync.time_in_slide(),
                            cache,
                            textures,
                        );
                        draw_slide_progress(
                            ui,
                            rect,
                            &theme,
                            sync.current_slide(),
                            sync.slide_count(),
                            sync.progress_percent(),
                        );
                        self.control_rects = draw_controls(ui, rect, &theme);
                    }
                    Stage::Failed { message } => {
                        let message = message.clone();
                        self.draw_error_screen(ui, rect, &message);
                    }
                }
            });

        // Playback drives the display, not the other way around.
        ctx.request_repaint();
    }
}

pub fn run(
    bundle: ContentBundle,
    base: PathBuf,
    windowed: bool,
    volume: f32,
    store: UnlockStore,
) -> anyhow::Result<()> {
    let bundle = Arc::new(bundle);
    let title = bundle
        .title
        .clone()
        .unwrap_or_else(|| "giftdeck".to_string());

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(GiftApp::new(bundle, base, volume, store)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
