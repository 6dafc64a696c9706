use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::{
    catalog::index::{CatalogRecord, GuidelineCatalog},
    foundation::core::{FrameIndex, Fps},
    report::category::{Category, GatingPolicy},
    report::model::{AnnotationInstance, Problem, RenderKind},
    resolve::state::{DefaultGuidelineSet, ResolutionState},
};

/// One annotation instance selected for the current frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedInstance {
    /// Owning category.
    pub category: Category,
    /// Whether the category has been reached (always `true` for always-on categories).
    pub gated: bool,
    /// The instance as recorded (or as seeded, for idle overlays).
    pub instance: AnnotationInstance,
}

impl ResolvedInstance {
    /// Value to display: the recorded value once gated, `0` before.
    pub fn displayed_value(&self) -> f64 {
        match self.instance.kind {
            RenderKind::Degree if !self.gated => 0.0,
            _ => self.instance.value,
        }
    }
}

/// Immutable inputs shared by every frame of a session.
#[derive(Clone, Debug)]
pub struct ResolveCtx<'a> {
    catalog: &'a GuidelineCatalog,
    relevant: Option<Cow<'a, BTreeSet<Category>>>,
    fps: Fps,
}

impl<'a> ResolveCtx<'a> {
    /// Bind a catalog to the selected problem (if any).
    pub fn new(catalog: &'a GuidelineCatalog, problem: Option<&Problem>, fps: Fps) -> Self {
        Self {
            catalog,
            relevant: problem.map(|p| Cow::Owned(p.categories())),
            fps,
        }
    }

    /// Bind a catalog to an already computed set of eligible categories.
    pub fn with_relevant(
        catalog: &'a GuidelineCatalog,
        relevant: Option<&'a BTreeSet<Category>>,
        fps: Fps,
    ) -> Self {
        Self {
            catalog,
            relevant: relevant.map(Cow::Borrowed),
            fps,
        }
    }

    /// Categories the selected problem makes eligible; `None` without a selection.
    pub fn relevant(&self) -> Option<&BTreeSet<Category>> {
        self.relevant.as_deref()
    }

    /// `true` when a Degree instance of `category` is past its display window.
    ///
    /// Angle readouts stay up to one second (`fps` frames) past the category's last
    /// recorded step. Without an end frame they never expire.
    pub fn degree_expired(&self, category: Category, frame: FrameIndex) -> bool {
        self.catalog
            .end_frame(category)
            .is_some_and(|end| frame.as_f64() > end.as_f64() + self.fps.as_f64())
    }
}

/// Per-frame guideline resolution.
pub struct GuidelineResolver;

impl GuidelineResolver {
    /// Compute the instances visible at `frame`.
    ///
    /// Returns `None` when no problem is selected or there is nothing to merge. Writes
    /// first-reached frames into `state` and locks revealed records into `defaults`; both
    /// only move forward, so seeking backward keeps what was already revealed.
    #[tracing::instrument(skip_all, fields(frame = frame.0))]
    pub fn resolve(
        ctx: &ResolveCtx<'_>,
        frame: FrameIndex,
        state: &mut ResolutionState,
        defaults: &mut DefaultGuidelineSet,
    ) -> Option<Vec<ResolvedInstance>> {
        let Some(relevant) = ctx.relevant() else {
            tracing::trace!("no problem selected");
            return None;
        };

        // Newest-authored records first.
        let mut candidates: Vec<&CatalogRecord> = ctx
            .catalog
            .categories()
            .filter(|c| relevant.contains(c))
            .flat_map(|c| ctx.catalog.records_in_step_order(c))
            .collect();
        candidates.reverse();

        let selected = select_candidates(candidates, frame, state);

        for rec in &selected {
            if rec.category.is_sticky() || defaults.get(rec.category).is_some() {
                defaults.lock_in(rec);
            }
        }

        let mut groups: Vec<(Category, &[AnnotationInstance])> = selected
            .iter()
            .map(|r| (r.category, r.instances.as_slice()))
            .collect();
        for rec in defaults.iter() {
            if !selected.iter().any(|s| s.category == rec.category) {
                groups.push((rec.category, rec.instances.as_slice()));
            }
        }

        if groups.is_empty() {
            return None;
        }

        let mut out = Vec::new();
        for (category, instances) in groups {
            let gated = state.is_gated(category);
            for inst in instances {
                if inst.kind == RenderKind::Degree && ctx.degree_expired(category, frame) {
                    tracing::trace!(%category, "degree readout expired");
                    continue;
                }
                out.push(ResolvedInstance {
                    category,
                    gated,
                    instance: inst.clone(),
                });
            }
        }
        Some(out)
    }
}

fn select_candidates<'c>(
    candidates: Vec<&'c CatalogRecord>,
    frame: FrameIndex,
    state: &mut ResolutionState,
) -> Vec<&'c CatalogRecord> {
    let mut selected = Vec::new();
    for rec in candidates {
        match rec.category.policy() {
            GatingPolicy::Sticky => {
                let Some(at) = rec.frame else {
                    continue;
                };
                if at <= frame && state.record_first(rec.category, at) {
                    tracing::trace!(category = %rec.category, gate = at.0, "category revealed");
                    selected.push(rec);
                }
            }
            GatingPolicy::AlwaysOn => {
                if rec.frame.is_some() {
                    selected.push(rec);
                }
            }
        }
    }
    selected
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/engine.rs"]
mod tests;
