use super::Synchronizer;

/// Horizontal travel, in points, before a drag counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Translates raw pointer input into hold and swipe actions on the
/// synchronizer. Press-and-hold pauses; release resumes; a horizontal drag
/// past the threshold navigates once per gesture, re-arming on the next
/// press.
#[derive(Debug, Default)]
pub struct GestureController {
    swipe: Option<SwipeTracker>,
}

#[derive(Debug)]
struct SwipeTracker {
    origin_x: f32,
    consumed: bool,
}

impl GestureController {
    pub fn pointer_down(&mut self, x: f32, sync: &mut Synchronizer) {
        self.swipe = Some(SwipeTracker {
            origin_x: x,
            consumed: false,
        });
        sync.hold_start();
    }

    pub fn pointer_moved(&mut self, x: f32, sync: &mut Synchronizer) {
        let Some(tracker) = &mut self.swipe else {
            return;
        };
        if tracker.consumed {
            return;
        }
        let delta = x - tracker.origin_x;
        if delta.abs() < SWIPE_THRESHOLD {
            return;
        }
        tracker.consumed = true;
        // Leftward drag advances, rightward goes back; both cancel the
        // hold so playback resumes at the target slide.
        sync.hold_end();
        if delta < 0.0 {
            sync.next();
        } else {
            sync.previous();
        }
    }

    pub fn pointer_up(&mut self, sync: &mut Synchronizer) {
        let Some(tracker) = self.swipe.take() else {
            return;
        };
        if !tracker.consumed {
            sync.hold_end();
        }
    }

    /// Drop any gesture in flight without touching playback, for when the
    /// pointer leaves the slide area mid-drag.
    pub fn cancel(&mut self, sync: &mut Synchronizer) {
        if self.swipe.take().is_some() && sync.is_holding() {
            sync.hold_end();
        }
    }
}
