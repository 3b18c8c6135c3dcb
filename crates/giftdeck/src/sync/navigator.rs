use super::{Phase, Synchronizer};

/// Manual navigation. Each jump is expressed as a seek on the track so the
/// audio and the slide index can never disagree: the target slide's start
/// time becomes the new playback position and the regular mapping picks up
/// from there.
impl Synchronizer {
    /// Jump to a slide by index. Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.bundle.slides.len() {
            return;
        }
        if matches!(self.phase, Phase::Uninitialized | Phase::Loading) {
            return;
        }
        let start = self.bundle.slides[index].start_time;
        self.track.seek(start);
        self.track.set_muted(false);
        self.holding = false;
        self.current_slide = index;
        self.current_time = start;
        // Re-anchor the mapping throttle at the seek target, otherwise the
        // next tick could remap against a stale anchor.
        self.last_mapped = start;
        match self.phase {
            Phase::Paused | Phase::Ended => {
                if self.track.play().is_ok() {
                    self.phase = Phase::Playing;
                    // Restarting out of Ended withdraws an undelivered
                    // completion event.
                    self.finish_pending = false;
                }
            }
            _ => {}
        }
    }

    /// Advance to the next slide; past the last one, end the presentation.
    pub fn next(&mut self) {
        let last = self.bundle.slides.len().saturating_sub(1);
        if self.current_slide < last {
            self.go_to(self.current_slide + 1);
        } else {
            self.finish_now();
        }
    }

    /// Step back one slide; clamped at the first.
    pub fn previous(&mut self) {
        if self.current_slide > 0 {
            self.go_to(self.current_slide - 1);
        }
    }

    /// End playback immediately, as if the track ran out. The next `tick`
    /// reports the completion.
    pub fn finish_now(&mut self) {
        self.current_time = self.bundle.total_duration;
        self.finish();
    }
}
