use std::collections::{BTreeMap, BTreeSet};

use crate::{
    catalog::index::CatalogRecord,
    foundation::core::{Color, FrameIndex, NormPoint},
    report::category::{Category, GatingPolicy},
    report::model::{AnnotationInstance, FillMode, LineStyle, RenderKind},
};

/// Per-session memory of the first frame each sticky category was reached.
///
/// Slots are write-once: after a category is gated it stays gated until the session is
/// reset, including across backward seeks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionState {
    gates: BTreeMap<Category, FrameIndex>,
}

impl ResolutionState {
    /// Empty state (nothing gated).
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame at which `category` was first satisfied.
    pub fn gate(&self, category: Category) -> Option<FrameIndex> {
        self.gates.get(&category).copied()
    }

    /// Whether instances of `category` show their recorded values.
    ///
    /// Always-on categories count as gated.
    pub fn is_gated(&self, category: Category) -> bool {
        match category.policy() {
            GatingPolicy::AlwaysOn => true,
            GatingPolicy::Sticky => self.gates.contains_key(&category),
        }
    }

    /// Record the first satisfied frame for a sticky category.
    ///
    /// Returns `false` (and leaves state untouched) if the slot was already written or the
    /// category is not sticky.
    pub fn record_first(&mut self, category: Category, frame: FrameIndex) -> bool {
        if !category.is_sticky() || self.gates.contains_key(&category) {
            return false;
        }
        self.gates.insert(category, frame);
        true
    }

    /// Forget every gate.
    pub fn clear(&mut self) {
        self.gates.clear();
    }

    /// Gated categories with their gating frames.
    pub fn iter(&self) -> impl Iterator<Item = (Category, FrameIndex)> + '_ {
        self.gates.iter().map(|(&c, &f)| (c, f))
    }
}

/// The record currently displayed for a category in the default set.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayRecord {
    /// Owning category.
    pub category: Category,
    /// Frame the displayed data belongs to.
    pub frame: Option<FrameIndex>,
    /// Drawable instances.
    pub instances: Vec<AnnotationInstance>,
}

impl DisplayRecord {
    fn from_catalog(record: &CatalogRecord) -> Self {
        Self {
            category: record.category,
            frame: record.frame,
            instances: record.instances.clone(),
        }
    }
}

/// Idle overlays shown before real data supersedes them, keyed by category.
///
/// Entries are replaced via [`DefaultGuidelineSet::lock_in`] once a sticky category is
/// revealed, and the replacement is kept for every later frame of the session. Sticky
/// categories without an idle entry are appended on first reveal so they persist the
/// same way. [`DefaultGuidelineSet::reset`] restores the seed entries.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultGuidelineSet {
    seed: Vec<DisplayRecord>,
    order: Vec<Category>,
    entries: BTreeMap<Category, DisplayRecord>,
    locked: BTreeSet<Category>,
}

impl DefaultGuidelineSet {
    /// Build a set from seed records; a repeated category keeps its first record.
    pub fn new(seed: Vec<DisplayRecord>) -> Self {
        let mut deduped: Vec<DisplayRecord> = Vec::with_capacity(seed.len());
        for rec in seed {
            if deduped.iter().any(|r| r.category == rec.category) {
                continue;
            }
            deduped.push(rec);
        }
        let mut set = Self {
            seed: deduped,
            order: Vec::new(),
            entries: BTreeMap::new(),
            locked: BTreeSet::new(),
        };
        set.reset();
        set
    }

    /// Built-in home-position overlays: the head circle and three zero-degree readouts.
    pub fn idle() -> Self {
        let white = Color::new(1.0, 1.0, 1.0);
        let head = AnnotationInstance {
            kind: RenderKind::Circle,
            points: vec![NormPoint::new(0.52591, 0.41469)],
            value: 22.85,
            fill_color: white,
            fill_type: FillMode::Filled,
            line_color: white,
            line_type: LineStyle::Dashed,
        };
        let degree = |x: f64, y: f64| AnnotationInstance {
            kind: RenderKind::Degree,
            points: vec![NormPoint::new(x, y)],
            value: 0.0,
            fill_color: Color::default(),
            fill_type: FillMode::None,
            line_color: Color::default(),
            line_type: LineStyle::Solid,
        };
        let idle = |category: Category, inst: AnnotationInstance| DisplayRecord {
            category,
            frame: Some(FrameIndex(0)),
            instances: vec![inst],
        };

        Self::new(vec![
            idle(Category::HeadPosition, head),
            idle(Category::RotateShoulder, degree(0.53846, 0.48411)),
            idle(Category::SpineDegree, degree(0.18048, 0.58328)),
            idle(Category::RotateHip, degree(0.37641, 0.59568)),
        ])
    }

    /// Restore the seed entries and drop every lock-in.
    pub fn reset(&mut self) {
        self.order = self.seed.iter().map(|r| r.category).collect();
        self.entries = self.seed.iter().map(|r| (r.category, r.clone())).collect();
        self.locked.clear();
    }

    /// Replace (or append) the displayed record for `record.category`.
    pub fn lock_in(&mut self, record: &CatalogRecord) {
        if !self.entries.contains_key(&record.category) {
            self.order.push(record.category);
        }
        self.entries
            .insert(record.category, DisplayRecord::from_catalog(record));
        self.locked.insert(record.category);
    }

    /// Displayed record for `category`.
    pub fn get(&self, category: Category) -> Option<&DisplayRecord> {
        self.entries.get(&category)
    }

    /// Whether `category` has been replaced by revealed data.
    pub fn is_locked(&self, category: Category) -> bool {
        self.locked.contains(&category)
    }

    /// Displayed records in set order (seed order, then categories appended on reveal).
    pub fn iter(&self) -> impl Iterator<Item = &DisplayRecord> + '_ {
        self.order.iter().filter_map(|c| self.entries.get(c))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for DefaultGuidelineSet {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/state.rs"]
mod tests;
