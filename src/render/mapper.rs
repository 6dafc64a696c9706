use crate::{
    foundation::core::{NormPoint, Point, Size},
    foundation::error::{OverlayError, OverlayResult},
};

/// Container width above which overlays render at native video pixel density.
pub const RESPONSIVE_BREAKPOINT_PX: f64 = 540.0;

/// Map a normalized point into the on-screen video container.
///
/// Containers wider than [`RESPONSIVE_BREAKPOINT_PX`] are treated as full native size;
/// narrower ones scale the video down uniformly.
pub fn map_to_scene(point: NormPoint, video: Size, container_width: f64) -> Point {
    map_with_breakpoint(point, video, container_width, RESPONSIVE_BREAKPOINT_PX)
}

fn map_with_breakpoint(
    point: NormPoint,
    video: Size,
    container_width: f64,
    breakpoint: f64,
) -> Point {
    let width = if container_width > breakpoint {
        video.width
    } else {
        container_width
    };
    let scale = width / video.width;
    let rendered_height = video.height * scale;
    Point::new(point.x * width, point.y * rendered_height)
}

/// Video container geometry for one frame.
///
/// Rebuilt whenever the window resizes; mapped points are never cached across frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Native video pixel dimensions.
    pub video: Size,
    /// Current container width in pixels.
    pub container_width: f64,
    /// Responsive breakpoint; see [`RESPONSIVE_BREAKPOINT_PX`].
    pub breakpoint_px: f64,
}

impl Viewport {
    /// Build a viewport with the default breakpoint.
    pub fn new(video: Size, container_width: f64) -> OverlayResult<Self> {
        Self::with_breakpoint(video, container_width, RESPONSIVE_BREAKPOINT_PX)
    }

    /// Build a viewport with an explicit breakpoint.
    pub fn with_breakpoint(
        video: Size,
        container_width: f64,
        breakpoint_px: f64,
    ) -> OverlayResult<Self> {
        if !video.width.is_finite() || !video.height.is_finite() {
            return Err(OverlayError::resolution("video dimensions must be finite"));
        }
        if video.width <= 0.0 || video.height <= 0.0 {
            return Err(OverlayError::resolution("video dimensions must be > 0"));
        }
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(OverlayError::resolution(
                "container width must be finite and > 0",
            ));
        }
        if !breakpoint_px.is_finite() {
            return Err(OverlayError::resolution("breakpoint must be finite"));
        }
        Ok(Self {
            video,
            container_width,
            breakpoint_px,
        })
    }

    /// Map a normalized point to container pixels.
    pub fn map(&self, point: NormPoint) -> Point {
        map_with_breakpoint(point, self.video, self.container_width, self.breakpoint_px)
    }

    /// Effective rendered size of the video inside the container.
    pub fn rendered_size(&self) -> Size {
        let corner = self.map(NormPoint::new(1.0, 1.0));
        Size::new(corner.x, corner.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mapper.rs"]
mod tests;
