use super::*;

#[test]
fn test_time_maps_to_active_slide_window() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    assert_eq!(sync.current_slide(), 0);

    tick_at(&mut sync, &inner, 3.0);
    assert_eq!(sync.current_slide(), 0);

    tick_at(&mut sync, &inner, 7.0);
    assert_eq!(sync.current_slide(), 1);
    assert!((sync.progress_percent() - 40.0).abs() < 1e-9);
}

#[test]
fn test_window_start_is_inclusive() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    tick_at(&mut sync, &inner, 5.0);
    assert_eq!(sync.current_slide(), 1);
}

#[test]
fn test_tiny_advances_are_throttled() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    tick_at(&mut sync, &inner, 4.99);
    assert_eq!(sync.current_slide(), 0);

    // The window boundary has been crossed but the mapping anchor only
    // moved 0.02s; the index must not change until the throttle elapses.
    tick_at(&mut sync, &inner, 5.01);
    assert_eq!(sync.current_slide(), 0);

    tick_at(&mut sync, &inner, 5.1);
    assert_eq!(sync.current_slide(), 1);
}

#[test]
fn test_gap_between_windows_keeps_current_slide() {
    let bundle = parse_bundle(
        r#"
music: "music.mp3"
totalDuration: 10
slides:
  - type: text
    content: "first"
    startTime: 0
    endTime: 3
  - type: text
    content: "second"
    startTime: 6
"#,
    );
    let (mut sync, inner) = playing_sync(bundle);

    tick_at(&mut sync, &inner, 4.5);
    assert_eq!(sync.current_slide(), 0);

    tick_at(&mut sync, &inner, 6.5);
    assert_eq!(sync.current_slide(), 1);
}

#[test]
fn test_progress_clamps_outside_window() {
    let (mut sync, inner) = playing_sync(two_slide_bundle());
    tick_at(&mut sync, &inner, 0.0);
    assert_eq!(sync.progress_percent(), 0.0);

    // During a gap the time can run past the held slide's window end.
    let bundle = parse_bundle(
        r#"
music: "music.mp3"
totalDuration: 10
slides:
  - type: text
    content: "first"
    startTime: 0
    endTime: 3
  - type: text
    content: "second"
    startTime: 6
"#,
    );
    let (mut sync, inner) = playing_sync(bundle);
    tick_at(&mut sync, &inner, 4.0);
    assert_eq!(sync.current_slide(), 0);
    assert_eq!(sync.progress_percent(), 100.0);
}

#[test]
fn test_degenerate_window_counts_as_elapsed() {
    let bundle = parse_bundle(
        r#"
music: "music.mp3"
totalDuration: 10
slides:
  - type: text
    content: "only"
    startTime: 10
"#,
    );
    let (sync, _inner) = playing_sync(bundle);
    // Window is [10, 10): zero length.
    assert_eq!(sync.progress_percent(), 100.0);
}
