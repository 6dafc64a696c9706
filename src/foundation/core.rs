use crate::foundation::error::{OverlayError, OverlayResult};

pub use kurbo::{Point, Size};

/// Zero-based video frame index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame index as a float, for comparisons against fractional frame windows.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Report frame rate in frames per second.
///
/// Reports carry a plain number (`VideoInfo.Fps`), which may be fractional (29.97).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fps(f64);

impl Fps {
    /// Frame rate used when a report does not declare one.
    pub const DEFAULT: Fps = Fps(30.0);

    /// Build a frame rate; must be finite and > 0.
    pub fn new(fps: f64) -> OverlayResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(OverlayError::validation("fps must be finite and > 0"));
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// `floor(secs * fps)`, clamped at frame 0.
    pub fn secs_to_frame_floor(self, secs: f64) -> FrameIndex {
        if !secs.is_finite() {
            return FrameIndex(0);
        }
        FrameIndex((secs * self.0).floor().max(0.0) as u64)
    }

    /// Playback time (seconds) at which `frame` begins.
    pub fn frame_to_secs(self, frame: FrameIndex) -> f64 {
        frame.as_f64() / self.0
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Straight RGB color with channels in `[0, 1]`.
///
/// Opacity is not stored; each draw kind applies its own fixed alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    #[serde(rename = "R", default)]
    pub r: f64,
    /// Green channel.
    #[serde(rename = "G", default)]
    pub g: f64,
    /// Blue channel.
    #[serde(rename = "B", default)]
    pub b: f64,
}

impl Color {
    /// Build a color from `[0, 1]` channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `true` when every channel is a finite number.
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// CSS `rgba(...)` string with channels scaled to `0..=255` and the given alpha.
    pub fn to_css_rgba(self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r * 255.0,
            self.g * 255.0,
            self.b * 255.0,
            alpha
        )
    }
}

/// A point normalized to the source video frame (`0..1` on both axes).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormPoint {
    /// Horizontal position as a fraction of video width.
    #[serde(rename = "X")]
    pub x: f64,
    /// Vertical position as a fraction of video height.
    #[serde(rename = "Y")]
    pub y: f64,
}

impl NormPoint {
    /// Build a normalized point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
