use std::collections::BTreeMap;

use crate::{
    foundation::core::{FrameIndex, NormPoint},
    report::category::Category,
    report::model::{AnnotationInstance, Report, StepId},
};

/// A guideline record with its step reference resolved to a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CatalogRecord {
    /// Owning category.
    pub category: Category,
    /// Step the record was authored for.
    pub step_id: Option<StepId>,
    /// Frame the step begins at; `None` when the step reference matches no step.
    pub frame: Option<FrameIndex>,
    /// Drawable instances.
    pub instances: Vec<AnnotationInstance>,
}

/// Read-only index over a report's guideline groups.
///
/// Built once per report load. Records keep their authored order within a category
/// (one record per analyzed step).
#[derive(Clone, Debug, Default)]
pub struct GuidelineCatalog {
    records: BTreeMap<Category, Vec<CatalogRecord>>,
    end_frames: BTreeMap<Category, FrameIndex>,
    anchors: BTreeMap<Category, NormPoint>,
}

impl GuidelineCatalog {
    /// Index `report`'s guideline groups against its step table.
    #[tracing::instrument(skip_all)]
    pub fn build(report: &Report) -> Self {
        let step_frames: BTreeMap<StepId, FrameIndex> = report
            .analysis
            .steps
            .iter()
            .map(|s| (s.id, s.frame_index))
            .collect();

        let mut records: BTreeMap<Category, Vec<CatalogRecord>> = BTreeMap::new();
        for (name, group) in &report.coordinates.guidelines {
            let Some(category) = Category::from_name(name) else {
                tracing::debug!(category = %name, "skipping unknown guideline category");
                continue;
            };

            let entry = records.entry(category).or_default();
            for record in group {
                let frame = record.step_id.and_then(|id| step_frames.get(&id).copied());
                if frame.is_none() {
                    tracing::debug!(
                        %category,
                        step = ?record.step_id.map(|s| s.0),
                        "guideline record references no known step"
                    );
                }
                entry.push(CatalogRecord {
                    category,
                    step_id: record.step_id,
                    frame,
                    instances: record.instances.clone(),
                });
            }
        }

        let mut end_frames = BTreeMap::new();
        let mut anchors = BTreeMap::new();
        for (&category, recs) in &records {
            if let Some(end) = recs.last().and_then(|r| r.frame) {
                end_frames.insert(category, end);
            }
            let anchor = recs
                .first()
                .and_then(|r| r.instances.first())
                .and_then(|i| i.points.first())
                .copied();
            if let Some(anchor) = anchor {
                anchors.insert(category, anchor);
            }
        }

        Self {
            records,
            end_frames,
            anchors,
        }
    }

    /// Records for `category` in authored step order; empty when the report has none.
    pub fn records_in_step_order(&self, category: Category) -> &[CatalogRecord] {
        self.records
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Frame of the category's last recorded step, if that step resolved.
    pub fn end_frame(&self, category: Category) -> Option<FrameIndex> {
        self.end_frames.get(&category).copied()
    }

    /// First point of the category's first record; labels and idle circles are drawn here.
    pub fn anchor(&self, category: Category) -> Option<NormPoint> {
        self.anchors.get(&category).copied()
    }

    /// Categories present in the report, in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.records.keys().copied()
    }

    /// `true` when the report carried no known guideline group.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/index.rs"]
mod tests;
