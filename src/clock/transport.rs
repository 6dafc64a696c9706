use crate::foundation::core::{Fps, Size};
use crate::report::model::Step;

/// Slowest playback rate the speed control allows.
pub const MIN_PLAYBACK_RATE: f64 = 0.25;
/// Fastest playback rate the speed control allows.
pub const MAX_PLAYBACK_RATE: f64 = 2.0;
/// Increment used by the speed buttons.
pub const PLAYBACK_RATE_STEP: f64 = 0.25;

/// Contract for the external video element driving the overlay.
///
/// The overlay only reads time and flags; seeking, rate changes and restarts are the
/// only writes it performs.
pub trait PlaybackTransport {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    /// Jump to `secs`.
    fn set_current_time(&mut self, secs: f64);
    /// `true` while playback is suspended.
    fn is_paused(&self) -> bool;
    /// `true` once playback reached the end of the media.
    fn is_ended(&self) -> bool;
    /// Current playback rate multiplier.
    fn playback_rate(&self) -> f64;
    /// Change the playback rate multiplier.
    fn set_playback_rate(&mut self, rate: f64);
    /// Resume (or restart) playback.
    fn play(&mut self);
    /// Suspend playback.
    fn pause(&mut self);
    /// Native pixel dimensions of the video.
    fn native_dims(&self) -> Size;
}

/// Nudge the playback rate by `delta`, clamped to
/// [`MIN_PLAYBACK_RATE`]..=[`MAX_PLAYBACK_RATE`]. Returns the applied rate.
pub fn adjust_speed(transport: &mut dyn PlaybackTransport, delta: f64) -> f64 {
    let rate = (transport.playback_rate() + delta).clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
    transport.set_playback_rate(rate);
    rate
}

/// Seek to the first frame of `step`.
pub fn seek_to_step(transport: &mut dyn PlaybackTransport, step: &Step, fps: Fps) {
    transport.set_current_time(fps.frame_to_secs(step.frame_index));
}

/// Deterministic in-memory transport for tests and headless runs.
///
/// Time only moves through [`SimulatedTransport::advance`]; there is no wall clock.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedTransport {
    time: f64,
    duration: Option<f64>,
    rate: f64,
    paused: bool,
    ended: bool,
    dims: Size,
}

impl SimulatedTransport {
    /// Create a paused transport at time 0 with an unbounded duration.
    pub fn new(dims: Size) -> Self {
        Self {
            time: 0.0,
            duration: None,
            rate: 1.0,
            paused: true,
            ended: false,
            dims,
        }
    }

    /// Bound playback to `secs`; reaching it sets the ended flag.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs.max(0.0));
        self
    }

    /// Media duration, if bounded.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Advance playback by `secs` of wall time, scaled by the playback rate.
    ///
    /// No-op while paused or ended.
    pub fn advance(&mut self, secs: f64) {
        if self.paused || self.ended || !secs.is_finite() || secs <= 0.0 {
            return;
        }
        self.time += secs * self.rate;
        if let Some(end) = self.duration
            && self.time >= end
        {
            self.time = end;
            self.ended = true;
            self.paused = true;
        }
    }
}

impl PlaybackTransport for SimulatedTransport {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, secs: f64) {
        let mut t = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        if let Some(end) = self.duration {
            t = t.min(end);
        }
        self.time = t;
        self.ended = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }

    fn play(&mut self) {
        if self.ended {
            self.time = 0.0;
            self.ended = false;
        }
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn native_dims(&self) -> Size {
        self.dims
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/transport.rs"]
mod tests;
