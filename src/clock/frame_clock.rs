use crate::{
    clock::transport::PlaybackTransport,
    foundation::core::{FrameIndex, Fps},
    report::model::{Step, StepId},
};

/// Emitted by [`FrameClock`] when the overlay must be recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClockEvent {
    /// Playback moved to a new frame.
    FrameChanged {
        /// Frame now on screen.
        frame: FrameIndex,
        /// Step active at `frame`, if any.
        step: Option<StepId>,
    },
    /// Playback reached the end of the media; the overlay shows frame 0.
    Ended,
}

impl ClockEvent {
    /// Frame the overlay should display for this event.
    pub fn frame(self) -> FrameIndex {
        match self {
            Self::FrameChanged { frame, .. } => frame,
            Self::Ended => FrameIndex(0),
        }
    }
}

/// Converts transport time into frame indices and step lookups.
///
/// The polling loop is explicit: [`FrameClock::start`] arms it, every
/// [`FrameClock::tick`] samples the transport once, and pausing or reaching the end
/// disarms it. Ticks on a stopped clock do nothing.
#[derive(Clone, Debug)]
pub struct FrameClock {
    fps: Fps,
    steps: Vec<Step>,
    running: bool,
    last: Option<FrameIndex>,
}

impl FrameClock {
    /// Build a stopped clock over `steps` (any order).
    pub fn new(fps: Fps, mut steps: Vec<Step>) -> Self {
        steps.sort_by_key(|s| (s.frame_index, s.id));
        Self {
            fps,
            steps,
            running: false,
            last: None,
        }
    }

    /// Frame rate used for conversions.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Steps ordered by starting frame.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// `floor(secs * fps)`.
    pub fn frame_at(&self, secs: f64) -> FrameIndex {
        self.fps.secs_to_frame_floor(secs)
    }

    /// Last step whose starting frame is `<= frame`; `None` before the first step.
    pub fn active_step(&self, frame: FrameIndex) -> Option<&Step> {
        let idx = self.steps.partition_point(|s| s.frame_index <= frame);
        idx.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Playback time of the first step, used as the playback origin.
    pub fn start_offset_secs(&self) -> f64 {
        self.steps
            .first()
            .map(|s| self.fps.frame_to_secs(s.frame_index))
            .unwrap_or(0.0)
    }

    /// Shift the transport forward so playback starts at the first step.
    ///
    /// Called once per report load.
    pub fn align_start(&self, transport: &mut dyn PlaybackTransport) {
        let offset = self.start_offset_secs();
        if offset > 0.0 {
            transport.set_current_time(transport.current_time() + offset);
        }
    }

    /// Arm the polling loop (transport started playing).
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Disarm the polling loop. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the polling loop is armed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frame emitted most recently, if any.
    pub fn last_frame(&self) -> Option<FrameIndex> {
        self.last
    }

    /// Sample the transport once.
    ///
    /// Emits only when the frame index changed since the previous emission. Stops the
    /// loop when the transport is paused or ended; the end of playback is reported as
    /// [`ClockEvent::Ended`].
    pub fn tick(&mut self, transport: &dyn PlaybackTransport) -> Option<ClockEvent> {
        if !self.running {
            return None;
        }
        if transport.is_ended() {
            self.running = false;
            self.last = Some(FrameIndex(0));
            tracing::trace!("playback ended");
            return Some(ClockEvent::Ended);
        }
        if transport.is_paused() {
            self.running = false;
            return None;
        }
        let frame = self.frame_at(transport.current_time());
        if self.last == Some(frame) {
            return None;
        }
        Some(self.emit(frame))
    }

    /// Recompute once after a seek, regardless of the loop state.
    pub fn seek(&mut self, transport: &dyn PlaybackTransport) -> ClockEvent {
        let frame = self.frame_at(transport.current_time());
        self.emit(frame)
    }

    /// Restart from the first step and play again (end-of-playback loop).
    pub fn rewind_and_play(&mut self, transport: &mut dyn PlaybackTransport) {
        transport.set_current_time(self.start_offset_secs());
        transport.play();
        self.last = None;
        self.start();
    }

    fn emit(&mut self, frame: FrameIndex) -> ClockEvent {
        self.last = Some(frame);
        ClockEvent::FrameChanged {
            frame,
            step: self.active_step(frame).map(|s| s.id),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/frame_clock.rs"]
mod tests;
