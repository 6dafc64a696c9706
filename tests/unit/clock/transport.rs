use super::*;
use crate::foundation::core::FrameIndex;
use crate::report::model::StepId;

fn transport() -> SimulatedTransport {
    SimulatedTransport::new(Size::new(1080.0, 1920.0))
}

#[test]
fn speed_is_clamped_to_quarter_and_double() {
    let mut t = transport();
    assert_eq!(adjust_speed(&mut t, PLAYBACK_RATE_STEP), 1.25);
    assert_eq!(adjust_speed(&mut t, 5.0), MAX_PLAYBACK_RATE);
    assert_eq!(adjust_speed(&mut t, -5.0), MIN_PLAYBACK_RATE);
    assert_eq!(adjust_speed(&mut t, -PLAYBACK_RATE_STEP), MIN_PLAYBACK_RATE);
    assert_eq!(t.playback_rate(), MIN_PLAYBACK_RATE);
}

#[test]
fn seek_to_step_uses_frame_over_fps() {
    let mut t = transport();
    let step = Step {
        id: StepId(4),
        frame_index: FrameIndex(60),
    };
    seek_to_step(&mut t, &step, Fps::DEFAULT);
    assert_eq!(t.current_time(), 2.0);
}

#[test]
fn advance_scales_by_rate_and_ignores_pause() {
    let mut t = transport();
    t.advance(1.0);
    assert_eq!(t.current_time(), 0.0);

    t.play();
    t.set_playback_rate(0.5);
    t.advance(1.0);
    assert_eq!(t.current_time(), 0.5);
}

#[test]
fn reaching_duration_ends_and_pauses() {
    let mut t = transport().with_duration(1.0);
    t.play();
    t.advance(0.75);
    assert!(!t.is_ended());
    t.advance(0.75);
    assert!(t.is_ended());
    assert!(t.is_paused());
    assert_eq!(t.current_time(), 1.0);

    t.set_current_time(0.25);
    assert!(!t.is_ended());
    assert_eq!(t.current_time(), 0.25);
}

#[test]
fn play_after_end_restarts_from_zero() {
    let mut t = transport().with_duration(0.5);
    t.play();
    t.advance(1.0);
    assert!(t.is_ended());
    t.play();
    assert!(!t.is_ended());
    assert_eq!(t.current_time(), 0.0);
}
