use std::collections::BTreeSet;

use crate::{
    catalog::index::GuidelineCatalog,
    clock::frame_clock::{ClockEvent, FrameClock},
    clock::transport::PlaybackTransport,
    foundation::core::{FrameIndex, Fps, Size},
    foundation::error::{OverlayError, OverlayResult},
    render::descriptor::{DescribeOpts, DrawDescriptor, describe_guidelines},
    render::mapper::{RESPONSIVE_BREAKPOINT_PX, Viewport},
    render::skeleton::describe_skeleton,
    report::category::Category,
    report::model::{Problem, Report, StepId},
    resolve::engine::{GuidelineResolver, ResolveCtx},
    resolve::state::{DefaultGuidelineSet, ResolutionState},
};

/// Options controlling what an [`OverlaySession`] draws.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayOpts {
    /// Draw problem guidelines.
    pub show_guidelines: bool,
    /// Draw the per-frame skeleton.
    pub show_skeleton: bool,
    /// Container width above which overlays use native video pixels.
    pub breakpoint_px: f64,
    /// Frame rate assumed when the report does not declare one.
    pub default_fps: f64,
    /// Restart from the first step when playback ends.
    pub loop_playback: bool,
}

impl Default for OverlayOpts {
    fn default() -> Self {
        Self {
            show_guidelines: true,
            show_skeleton: true,
            breakpoint_px: RESPONSIVE_BREAKPOINT_PX,
            default_fps: Fps::DEFAULT.as_f64(),
            loop_playback: true,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameOutput {
    /// Frame the descriptors belong to.
    pub frame: FrameIndex,
    /// Step active at `frame`, for step indicators.
    pub current_step: Option<StepId>,
    /// Draw instructions in paint order.
    pub descriptors: Vec<DrawDescriptor>,
}

/// One report plus one selected problem, with the state that evolves as playback advances.
///
/// Nothing carries over between reports or problem selections: [`OverlaySession::reset`]
/// and [`OverlaySession::select_problem`] rebuild the catalog and clear resolution state.
pub struct OverlaySession {
    report: Report,
    problem: Option<Problem>,
    relevant: Option<BTreeSet<Category>>,
    fps: Fps,
    catalog: GuidelineCatalog,
    state: ResolutionState,
    defaults: DefaultGuidelineSet,
    clock: FrameClock,
    opts: OverlayOpts,
}

impl OverlaySession {
    /// Validate `report` and start a session.
    ///
    /// `problem` names an issue by `IssueName`; `None` selects the report's first problem.
    pub fn new(report: Report, problem: Option<&str>, opts: OverlayOpts) -> OverlayResult<Self> {
        let fps = Fps::new(opts.default_fps)?;
        let mut session = Self {
            report: Report::default(),
            problem: None,
            relevant: None,
            fps,
            catalog: GuidelineCatalog::default(),
            state: ResolutionState::new(),
            defaults: DefaultGuidelineSet::idle(),
            clock: FrameClock::new(fps, Vec::new()),
            opts,
        };
        session.reset(report, problem)?;
        Ok(session)
    }

    /// Replace the report and problem selection, discarding all resolution state.
    #[tracing::instrument(skip(self, report))]
    pub fn reset(&mut self, report: Report, problem: Option<&str>) -> OverlayResult<()> {
        report.validate()?;
        let fps = report.fps_or(Fps::new(self.opts.default_fps)?)?;
        let selected = select(&report, problem)?;

        self.catalog = GuidelineCatalog::build(&report);
        self.clock = FrameClock::new(fps, report.analysis.steps.clone());
        self.fps = fps;
        self.set_problem(selected);
        self.report = report;
        self.clear_state();
        tracing::debug!(
            fps = fps.as_f64(),
            problem = self.problem.as_ref().map(|p| p.issue_name.as_str()),
            "session reset"
        );
        Ok(())
    }

    /// Switch to another problem of the same report, discarding resolution state.
    pub fn select_problem(&mut self, problem: Option<&str>) -> OverlayResult<()> {
        let selected = select(&self.report, problem)?;
        self.set_problem(selected);
        self.clear_state();
        Ok(())
    }

    fn set_problem(&mut self, problem: Option<Problem>) {
        self.relevant = problem.as_ref().map(Problem::categories);
        self.problem = problem;
    }

    fn clear_state(&mut self) {
        self.state.clear();
        self.defaults.reset();
    }

    /// Viewport for the current video and container width, honoring the configured breakpoint.
    pub fn viewport(&self, video: Size, container_width: f64) -> OverlayResult<Viewport> {
        Viewport::with_breakpoint(video, container_width, self.opts.breakpoint_px)
    }

    /// Resolve and describe everything visible at `frame`.
    pub fn on_frame(&mut self, frame: FrameIndex, viewport: &Viewport) -> FrameOutput {
        let current_step = self.clock.active_step(frame).map(|s| s.id);
        let mut descriptors = Vec::new();

        if self.opts.show_guidelines {
            let ctx = ResolveCtx::with_relevant(&self.catalog, self.relevant.as_ref(), self.fps);
            if let Some(resolved) =
                GuidelineResolver::resolve(&ctx, frame, &mut self.state, &mut self.defaults)
            {
                descriptors = describe_guidelines(
                    &resolved,
                    &self.catalog,
                    viewport,
                    DescribeOpts {
                        show_skeleton: self.opts.show_skeleton,
                    },
                );
            }
        }
        if self.opts.show_skeleton {
            descriptors.extend(describe_skeleton(&self.report, frame, viewport));
        }

        FrameOutput {
            frame,
            current_step,
            descriptors,
        }
    }

    /// Run one clock tick against `transport`.
    ///
    /// Returns output only when the clock emitted. At the end of playback the overlay
    /// shows frame 0 and, with looping on, playback restarts from the first step.
    pub fn poll(
        &mut self,
        transport: &mut dyn PlaybackTransport,
        viewport: &Viewport,
    ) -> Option<FrameOutput> {
        let event = self.clock.tick(transport)?;
        let out = self.on_frame(event.frame(), viewport);
        if event == ClockEvent::Ended && self.opts.loop_playback {
            self.clock.rewind_and_play(transport);
        }
        Some(out)
    }

    /// Recompute once after the transport was seeked.
    pub fn seeked(
        &mut self,
        transport: &dyn PlaybackTransport,
        viewport: &Viewport,
    ) -> FrameOutput {
        let frame = self.clock.seek(transport).frame();
        self.on_frame(frame, viewport)
    }

    /// Loaded report.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Selected problem, if any.
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    /// Categories the selected problem makes eligible; `None` without a selection.
    pub fn relevant_categories(&self) -> Option<&BTreeSet<Category>> {
        self.relevant.as_ref()
    }

    /// Effective frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Guideline catalog built from the report.
    pub fn catalog(&self) -> &GuidelineCatalog {
        &self.catalog
    }

    /// First-reached frames recorded so far.
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Idle overlays, with revealed records locked in.
    pub fn defaults(&self) -> &DefaultGuidelineSet {
        &self.defaults
    }

    /// Frame clock over the report's steps.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Mutable frame clock, for start/stop wiring.
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Current options.
    pub fn opts(&self) -> &OverlayOpts {
        &self.opts
    }

    /// Toggle the skeleton overlay.
    pub fn set_show_skeleton(&mut self, on: bool) {
        self.opts.show_skeleton = on;
    }

    /// Toggle guideline overlays.
    pub fn set_show_guidelines(&mut self, on: bool) {
        self.opts.show_guidelines = on;
    }
}

fn select(report: &Report, name: Option<&str>) -> OverlayResult<Option<Problem>> {
    match name {
        Some(name) => report
            .problem(name)
            .cloned()
            .map(Some)
            .ok_or_else(|| OverlayError::validation(format!("unknown problem \"{name}\""))),
        None => Ok(report.default_problem().cloned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/overlay_session.rs"]
mod tests;
