mod gesture;
mod navigator;
#[cfg(test)]
mod tests;

pub use gesture::{GestureController, SWIPE_THRESHOLD};

use std::sync::Arc;

use crate::audio::{AudioTrack, TrackState};
use crate::content::{ContentBundle, Slide, SlideKind};

/// Minimum advance of audio time between slide-mapping passes. Raw
/// position reads arrive every frame; remapping that often is wasted work
/// and can bounce the index around a seek.
const MAP_INTERVAL: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    None,
    /// The presentation ended, by playback crossing `totalDuration` or by
    /// navigating past the last slide; emitted exactly once.
    Finished,
}

/// Owns the background track and converts its continuous playback time
/// into the discrete active-slide index. The single writer of
/// `current_slide`: both time updates and manual navigation funnel through
/// methods on this struct, on one thread, so rapid interaction cannot race
/// the mapping.
pub struct Synchronizer {
    bundle: Arc<ContentBundle>,
    track: Box<dyn AudioTrack>,
    phase: Phase,
    current_slide: usize,
    current_time: f64,
    holding: bool,
    last_mapped: f64,
    /// Set by `finish` and drained by `tick`, so a completion caused by
    /// manual navigation still reaches the caller as a `Finished` event.
    finish_pending: bool,
    play_error: Option<String>,
}

impl Synchronizer {
    /// Assigning the track starts it loading.
    pub fn new(bundle: Arc<ContentBundle>, track: Box<dyn AudioTrack>) -> Self {
        Self {
            bundle,
            track,
            phase: Phase::Loading,
            current_slide: 0,
            current_time: 0.0,
            holding: false,
            last_mapped: 0.0,
            finish_pending: false,
            play_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }

    pub fn is_muted(&self) -> bool {
        self.track.is_muted()
    }

    /// A load or start failure from before playback ever began. Once the
    /// track is playing no error is fatal, so this reports nothing.
    pub fn startup_error(&self) -> Option<&str> {
        match self.phase {
            Phase::Uninitialized | Phase::Loading | Phase::Ready => self.play_error.as_deref(),
            _ => None,
        }
    }

    pub fn slide(&self) -> &Slide {
        &self.bundle.slides[self.current_slide]
    }

    pub fn slide_count(&self) -> usize {
        self.bundle.slides.len()
    }

    /// Seconds of playback elapsed inside the active slide's window.
    pub fn time_in_slide(&self) -> f64 {
        (self.current_time - self.slide().start_time).max(0.0)
    }

    /// Progress through the active slide's window as a percentage, clamped
    /// to [0, 100]. A degenerate window (end at or before start) counts as
    /// fully elapsed rather than dividing by zero.
    pub fn progress_percent(&self) -> f64 {
        let start = self.slide().start_time;
        let end = self.bundle.window_end(self.current_slide);
        if end <= start {
            return 100.0;
        }
        (((self.current_time - start) / (end - start)) * 100.0).clamp(0.0, 100.0)
    }

    /// Drive the state machine one step. Call once per UI frame.
    pub fn tick(&mut self) -> TickEvent {
        match self.phase {
            Phase::Uninitialized | Phase::Loading => {
                match self.track.poll_state() {
                    TrackState::Loading => {}
                    TrackState::Ready => {
                        self.phase = Phase::Ready;
                        self.try_autostart();
                    }
                    TrackState::Failed(message) => {
                        self.play_error = Some(message);
                    }
                }
                TickEvent::None
            }
            Phase::Ready => {
                self.try_autostart();
                TickEvent::None
            }
            Phase::Playing | Phase::Paused => self.update_from_track(),
            Phase::Ended => self.take_finished(),
        }
    }

    /// Playback auto-starts on readiness unless a hold is already active.
    fn try_autostart(&mut self) {
        if self.phase == Phase::Ready && !self.holding {
            self.start_playback();
        }
    }

    fn start_playback(&mut self) {
        match self.track.play() {
            Ok(()) => self.phase = Phase::Playing,
            Err(first) => {
                // Autoplay fallback: one muted retry before surfacing.
                log::warn!("playback start failed: {first:#}; retrying muted");
                self.track.set_muted(true);
                match self.track.play() {
                    Ok(()) => self.phase = Phase::Playing,
                    Err(e) => self.play_error = Some(format!("{e:#}")),
                }
            }
        }
    }

    fn update_from_track(&mut self) -> TickEvent {
        let t = self.track.position();
        self.current_time = t;

        if t >= self.bundle.total_duration {
            self.finish();
            return self.take_finished();
        }

        if t - self.last_mapped >= MAP_INTERVAL {
            self.last_mapped = t;
            if let Some(index) = self.bundle.slide_at(t) {
                if index != self.current_slide {
                    self.transition_to(index);
                }
            }
            // A gap between windows maps to nothing; the index stays put
            // until t enters the next window.
        }
        TickEvent::None
    }

    /// Apply the audio policy for a slide change: entering a sound-enabled
    /// video mutes the track (without pausing); entering anything else, or
    /// leaving a sound-enabled video, force-unmutes and resumes unless a
    /// hold is active.
    fn transition_to(&mut self, index: usize) {
        self.current_slide = index;
        let entering_sound_video = matches!(
            self.bundle.slides[index].kind,
            SlideKind::VideoWithSound { has_sound: true, .. }
        );
        if entering_sound_video {
            self.track.set_muted(true);
        } else {
            self.track.set_muted(false);
            if !self.holding && self.phase == Phase::Paused {
                self.resume();
            }
        }
    }

    fn finish(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        self.phase = Phase::Ended;
        self.track.pause();
        self.finish_pending = true;
    }

    fn take_finished(&mut self) -> TickEvent {
        if self.finish_pending {
            self.finish_pending = false;
            TickEvent::Finished
        } else {
            TickEvent::None
        }
    }

    /// Transient pause without leaving readiness; fully reversible.
    pub fn hold_start(&mut self) {
        self.holding = true;
        if self.phase == Phase::Playing {
            self.track.pause();
            self.phase = Phase::Paused;
        }
    }

    pub fn hold_end(&mut self) {
        self.holding = false;
        match self.phase {
            Phase::Ready => self.start_playback(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    fn resume(&mut self) {
        if self.track.play().is_ok() {
            self.phase = Phase::Playing;
        }
    }
}
