use super::*;

#[test]
fn test_hold_pauses_and_release_resumes() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    let mut gestures = GestureController::default();

    gestures.pointer_down(100.0, &mut sync);
    assert_eq!(sync.phase(), Phase::Paused);
    assert!(!inner.borrow().playing);

    gestures.pointer_up(&mut sync);
    assert_eq!(sync.phase(), Phase::Playing);
    assert!(inner.borrow().playing);
}

#[test]
fn test_left_swipe_advances_once() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    let mut gestures = GestureController::default();

    gestures.pointer_down(200.0, &mut sync);
    gestures.pointer_moved(149.0, &mut sync);
    assert_eq!(sync.current_slide(), 1);

    // Dragging further in the same gesture must not fire again.
    gestures.pointer_moved(40.0, &mut sync);
    assert_eq!(sync.current_slide(), 1);
    assert_eq!(inner.borrow().seeks, vec![5.0]);

    gestures.pointer_up(&mut sync);
    assert_eq!(sync.phase(), Phase::Playing);
}

#[test]
fn test_right_swipe_goes_back() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    tick_at(&mut sync, &inner, 7.0);
    assert_eq!(sync.current_slide(), 1);

    let mut gestures = GestureController::default();
    gestures.pointer_down(100.0, &mut sync);
    gestures.pointer_moved(151.0, &mut sync);
    assert_eq!(sync.current_slide(), 0);
}

#[test]
fn test_sub_threshold_drag_is_a_hold_not_a_swipe() {
    let (mut sync, _inner) = playing_sync(two_slide_bundle());
    let mut gestures = GestureController::default();

    gestures.pointer_down(100.0, &mut sync);
    gestures.pointer_moved(130.0, &mut sync);
    assert_eq!(sync.current_slide(), 0);
    assert_eq!(sync.phase(), Phase::Paused);

    gestures.pointer_up(&mut sync);
    assert_eq!(sync.phase(), Phase::Playing);
}

#[test]
fn test_threshold_rearms_on_next_press() {
    let (mut sync, inner) = playing_sync(video_bundle());
    let mut gestures = GestureController::default();

    gestures.pointer_down(200.0, &mut sync);
    gestures.pointer_moved(140.0, &mut sync);
    gestures.pointer_up(&mut sync);
    assert_eq!(sync.current_slide(), 1);

    gestures.pointer_down(200.0, &mut sync);
    gestures.pointer_moved(140.0, &mut sync);
    gestures.pointer_up(&mut sync);
    assert_eq!(sync.current_slide(), 2);
    assert_eq!(inner.borrow().seeks, vec![4.0, 8.0]);
}

#[test]
fn test_move_without_press_is_ignored() {
    let (mut sync, _inner) = playing_sync(two_slide_bundle());
    let mut gestures = GestureController::default();
    gestures.pointer_moved(0.0, &mut sync);
    gestures.pointer_moved(500.0, &mut sync);
    assert_eq!(sync.current_slide(), 0);
    assert_eq!(sync.phase(), Phase::Playing);
}

#[test]
fn test_cancel_releases_a_hold_in_flight() {
    let (mut sync, _inner) = playing_sync(two_slide_bundle());
    let mut gestures = GestureController::default();

    gestures.pointer_down(100.0, &mut sync);
    assert_eq!(sync.phase(), Phase::Paused);

    gestures.cancel(&mut sync);
    assert_eq!(sync.phase(), Phase::Playing);
}
