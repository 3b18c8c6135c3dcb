mod gestures;
mod mapping;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, bail};

use super::{GestureController, Phase, Synchronizer, TickEvent};
use crate::audio::{AudioTrack, TrackState};
use crate::content::ContentBundle;

/// Scriptable in-memory track. Tests hold a second handle to the inner
/// state so they can move time forward and observe what the synchronizer
/// did to playback.
struct FakeInner {
    state: TrackState,
    playing: bool,
    muted: bool,
    position: f64,
    seeks: Vec<f64>,
    /// Number of upcoming `play` calls to refuse.
    fail_plays: usize,
}

struct FakeTrack {
    inner: Rc<RefCell<FakeInner>>,
}

/// Build a fake track plus the shared handle to drive it.
fn fake_track() -> (Box<dyn AudioTrack>, Rc<RefCell<FakeInner>>) {
    let inner = Rc::new(RefCell::new(FakeInner {
        state: TrackState::Loading,
        playing: false,
        muted: false,
        position: 0.0,
        seeks: Vec::new(),
        fail_plays: 0,
    }));
    let track = FakeTrack {
        inner: Rc::clone(&inner),
    };
    (Box::new(track), inner)
}

impl AudioTrack for FakeTrack {
    fn poll_state(&mut self) -> TrackState {
        self.inner.borrow().state.clone()
    }

    fn play(&mut self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_plays > 0 {
            inner.fail_plays -= 1;
            bail!("playback refused");
        }
        inner.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.position = seconds;
        inner.seeks.push(seconds);
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner.borrow_mut().muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.inner.borrow().muted
    }

    fn position(&self) -> f64 {
        self.inner.borrow().position
    }
}

/// Two text slides over a 10 second track: windows [0, 5) and [5, 10).
fn two_slide_bundle() -> Arc<ContentBundle> {
    parse_bundle(
        r#"
music: "music.mp3"
totalDuration: 10
slides:
  - type: text
    content: "first"
    startTime: 0
  - type: text
    content: "second"
    startTime: 5
"#,
    )
}

/// Text, sound-enabled video, text: windows [0, 4), [4, 8), [8, 12).
fn video_bundle() -> Arc<ContentBundle> {
    parse_bundle(
        r#"
music: "music.mp3"
totalDuration: 12
slides:
  - type: text
    content: "intro"
    startTime: 0
  - type: videoWithSound
    src: "clip.mp4"
    startTime: 4
  - type: text
    content: "outro"
    startTime: 8
"#,
    )
}

fn parse_bundle(yaml: &str) -> Arc<ContentBundle> {
    Arc::new(serde_yaml::from_str(yaml).unwrap())
}

/// A synchronizer whose track is already loaded and playing.
fn playing_sync(bundle: Arc<ContentBundle>) -> (Synchronizer, Rc<RefCell<FakeInner>>) {
    let (track, inner) = fake_track();
    inner.borrow_mut().state = TrackState::Ready;
    let mut sync = Synchronizer::new(bundle, track);
    sync.tick();
    assert_eq!(sync.phase(), Phase::Playing);
    (sync, inner)
}

/// Advance the track to `t` and tick.
fn tick_at(sync: &mut Synchronizer, inner: &Rc<RefCell<FakeInner>>, t: f64) -> TickEvent {
    inner.borrow_mut().position = t;
    sync.tick()
}
