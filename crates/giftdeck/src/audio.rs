use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::media::fetch_bytes;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackState {
    Loading,
    Ready,
    Failed(String),
}

/// Playback seam for the background track. The synchronizer owns exactly
/// one of these and is the only component allowed to drive it; everything
/// else reads derived state or goes through the synchronizer's navigation
/// methods.
pub trait AudioTrack {
    /// Advance internal loading and report the current state.
    fn poll_state(&mut self) -> TrackState;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    /// Seek to an absolute position in seconds.
    fn seek(&mut self, seconds: f64);
    /// Muting silences the track without pausing it.
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
    /// Current playback position in seconds.
    fn position(&self) -> f64;
}

/// rodio-backed track. The source bytes are fetched and decoded on a
/// background thread; until they arrive the track reports `Loading`.
pub struct RodioTrack {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    pending: Option<mpsc::Receiver<Result<Vec<u8>, String>>>,
    state: TrackState,
    muted: bool,
    volume: f32,
}

impl RodioTrack {
    pub fn new(source: &str, base: &Path, volume: f32) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device available")?;

        let (tx, rx) = mpsc::channel();
        let source = source.to_string();
        let base: PathBuf = base.to_path_buf();
        std::thread::Builder::new()
            .name("track-loader".to_string())
            .spawn(move || {
                let result = fetch_bytes(&source, &base).map_err(|e| format!("{e:#}"));
                let _ = tx.send(result);
            })
            .context("could not start track loader thread")?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            pending: Some(rx),
            state: TrackState::Loading,
            muted: false,
            volume: volume.max(0.0),
        })
    }

    fn finish_loading(&mut self, bytes: Vec<u8>) {
        let decoder = match Decoder::new(Cursor::new(bytes)) {
            Ok(decoder) => decoder,
            Err(e) => {
                self.state = TrackState::Failed(format!("could not decode track: {e}"));
                return;
            }
        };
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(e) => {
                self.state = TrackState::Failed(format!("could not open audio sink: {e}"));
                return;
            }
        };
        sink.append(decoder);
        sink.pause();
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        self.state = TrackState::Ready;
    }
}

impl AudioTrack for RodioTrack {
    fn poll_state(&mut self) -> TrackState {
        if self.state == TrackState::Loading {
            if let Some(rx) = &self.pending {
                match rx.try_recv() {
                    Ok(Ok(bytes)) => {
                        self.pending = None;
                        self.finish_loading(bytes);
                    }
                    Ok(Err(message)) => {
                        self.pending = None;
                        self.state = TrackState::Failed(message);
                    }
                    Err(mpsc::TryRecvError::Empty) => {}
                    Err(mpsc::TryRecvError::Disconnected) => {
                        self.pending = None;
                        self.state = TrackState::Failed("track loader vanished".to_string());
                    }
                }
            }
        }
        self.state.clone()
    }

    fn play(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(sink) = &self.sink {
            let target = Duration::from_secs_f64(seconds.max(0.0));
            if let Err(e) = sink.try_seek(target) {
                log::warn!("seek to {seconds:.1}s failed: {e}");
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(if muted { 0.0 } else { self.volume });
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }
}
