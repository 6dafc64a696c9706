//! Swing overlay resolves time-indexed guideline annotations from a golf swing analysis
//! report into draw instructions synchronized with video playback.
//!
//! The public API is session-oriented:
//!
//! - Load and validate a [`Report`]
//! - Create an [`OverlaySession`] for one selected [`Problem`]
//! - Feed it frame indices (directly or via a [`PlaybackTransport`]) and draw the returned
//!   [`DrawDescriptor`]s
//!
//! See [`guide`] for a walkthrough of the resolution rules.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Frame indices, frame rates, colors and the error taxonomy.
pub mod foundation;

/// Guideline catalog built from a report.
pub mod catalog;
pub mod clock;
pub mod guide;
pub mod render;
pub mod report;
pub mod resolve;
/// Session-oriented overlay API.
pub mod session;

pub use crate::foundation::core::{Color, Fps, FrameIndex, NormPoint, Point, Size};
pub use crate::foundation::error::{OverlayError, OverlayResult};

pub use crate::catalog::index::{CatalogRecord, GuidelineCatalog};
pub use crate::clock::frame_clock::{ClockEvent, FrameClock};
pub use crate::clock::transport::{
    PlaybackTransport, SimulatedTransport, adjust_speed, seek_to_step,
};
pub use crate::render::descriptor::{DescribeOpts, DrawDescriptor, DrawKind, describe_guidelines};
pub use crate::render::mapper::{RESPONSIVE_BREAKPOINT_PX, Viewport, map_to_scene};
pub use crate::render::skeleton::describe_skeleton;
pub use crate::report::category::{Category, GatingPolicy};
pub use crate::report::model::{AnnotationInstance, Problem, RenderKind, Report, Step, StepId};
pub use crate::report::problem::{
    SeverityTier, StepOutcome, StepStatus, main_problem, step_statuses,
};
pub use crate::resolve::engine::{GuidelineResolver, ResolveCtx, ResolvedInstance};
pub use crate::resolve::state::{DefaultGuidelineSet, DisplayRecord, ResolutionState};
pub use crate::session::overlay_session::{FrameOutput, OverlayOpts, OverlaySession};
