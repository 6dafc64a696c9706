use super::*;
use crate::clock::transport::SimulatedTransport;
use crate::foundation::core::Size;

fn steps() -> Vec<Step> {
    [(3, 45), (1, 12), (2, 30), (4, 60)]
        .into_iter()
        .map(|(id, f)| Step {
            id: StepId(id),
            frame_index: FrameIndex(f),
        })
        .collect()
}

fn clock() -> FrameClock {
    FrameClock::new(Fps::DEFAULT, steps())
}

fn playing() -> SimulatedTransport {
    let mut t = SimulatedTransport::new(Size::new(1080.0, 1920.0));
    t.play();
    t
}

#[test]
fn frame_at_floors() {
    let c = clock();
    assert_eq!(c.frame_at(0.0), FrameIndex(0));
    assert_eq!(c.frame_at(0.5), FrameIndex(15));
    assert_eq!(c.frame_at(1.999), FrameIndex(59));
    assert_eq!(c.frame_at(-1.0), FrameIndex(0));
}

#[test]
fn steps_are_ordered_by_start_frame() {
    let ids: Vec<_> = clock().steps().iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn active_step_is_last_started_step() {
    let c = clock();
    assert_eq!(c.active_step(FrameIndex(11)), None);
    assert_eq!(c.active_step(FrameIndex(12)).map(|s| s.id), Some(StepId(1)));
    assert_eq!(c.active_step(FrameIndex(44)).map(|s| s.id), Some(StepId(2)));
    assert_eq!(c.active_step(FrameIndex(45)).map(|s| s.id), Some(StepId(3)));
    assert_eq!(c.active_step(FrameIndex(999)).map(|s| s.id), Some(StepId(4)));
}

#[test]
fn align_start_moves_to_first_step() {
    let c = FrameClock::new(
        Fps::DEFAULT,
        vec![Step {
            id: StepId(1),
            frame_index: FrameIndex(15),
        }],
    );
    let mut t = playing();
    assert_eq!(c.start_offset_secs(), 0.5);
    c.align_start(&mut t);
    assert_eq!(t.current_time(), 0.5);
}

#[test]
fn stopped_clock_does_not_emit() {
    let mut c = clock();
    let t = playing();
    assert!(!c.is_running());
    assert_eq!(c.tick(&t), None);
}

#[test]
fn tick_emits_only_on_frame_change() {
    let mut c = clock();
    let mut t = playing();
    c.start();

    assert_eq!(
        c.tick(&t),
        Some(ClockEvent::FrameChanged {
            frame: FrameIndex(0),
            step: None,
        })
    );
    assert_eq!(c.tick(&t), None);

    t.advance(0.5);
    assert_eq!(
        c.tick(&t),
        Some(ClockEvent::FrameChanged {
            frame: FrameIndex(15),
            step: Some(StepId(1)),
        })
    );
    assert_eq!(c.last_frame(), Some(FrameIndex(15)));
}

#[test]
fn pause_stops_the_loop() {
    let mut c = clock();
    let mut t = playing();
    c.start();
    c.tick(&t);
    t.pause();
    assert_eq!(c.tick(&t), None);
    assert!(!c.is_running());
}

#[test]
fn seek_always_emits() {
    let mut c = clock();
    let mut t = playing();
    t.set_current_time(1.0);
    assert_eq!(c.seek(&t).frame(), FrameIndex(30));
    assert_eq!(c.seek(&t).frame(), FrameIndex(30));
    assert!(!c.is_running());
}

#[test]
fn end_reports_frame_zero_and_rewind_replays_from_first_step() {
    let mut c = clock();
    let mut t = playing().with_duration(1.0);
    c.start();
    t.advance(2.0);

    let ev = c.tick(&t);
    assert_eq!(ev, Some(ClockEvent::Ended));
    assert_eq!(ev.map(ClockEvent::frame), Some(FrameIndex(0)));
    assert!(!c.is_running());

    c.rewind_and_play(&mut t);
    assert!(c.is_running());
    assert!(!t.is_paused());
    assert_eq!(t.current_time(), 0.4);
    assert_eq!(c.tick(&t).map(ClockEvent::frame), Some(FrameIndex(12)));
}
