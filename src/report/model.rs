use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{
    foundation::core::{Color, FrameIndex, Fps, NormPoint},
    foundation::error::{OverlayError, OverlayResult},
    report::category::Category,
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// A motion-analysis report document.
///
/// Reports are pure data produced upstream (pose estimation, angle derivation); the
/// overlay engine only reads them. Optional sections default to empty so a report
/// with no guidelines still loads and simply renders nothing.
pub struct Report {
    /// Source video metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_info: VideoInfo,
    /// Steps and detected problems.
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: Analysis,
    /// Guideline and skeleton annotation data.
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
    /// Capture context (club, camera direction, handedness).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Source video metadata.
pub struct VideoInfo {
    /// Frame rate the report's frame indices are expressed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Step table and problem list.
pub struct Analysis {
    /// Discrete motion phases, ordered by id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
    /// Detected problems.
    #[serde(default, deserialize_with = "null_as_default")]
    pub problems: Vec<Problem>,
}

/// Step identifier as used by the report (`1` is the setup step).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StepId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// A motion phase anchored to the video frame where it begins.
pub struct Step {
    /// Step identifier.
    pub id: StepId,
    /// First frame of the step in the source video.
    pub frame_index: FrameIndex,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// A detected issue and the guideline categories that explain it.
pub struct Problem {
    /// Upstream problem identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<u64>,
    /// Problem name; used to select a problem.
    pub issue_name: String,
    /// Severity tier (0 means informational).
    #[serde(default)]
    pub severity: u32,
    /// Detection score.
    #[serde(default)]
    pub score: f64,
    /// Step at which the problem was detected.
    pub step_id: StepId,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Human-readable step name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    /// Names of the guideline groups relevant to this problem.
    #[serde(default, deserialize_with = "null_as_default")]
    pub guidelines: Vec<String>,
}

impl Problem {
    /// Known categories referenced by this problem, deduplicated.
    ///
    /// Unknown names are logged and skipped.
    pub fn categories(&self) -> BTreeSet<Category> {
        let mut out = BTreeSet::new();
        for name in &self.guidelines {
            match Category::from_name(name) {
                Some(c) => {
                    out.insert(c);
                }
                None => tracing::debug!(
                    problem = %self.issue_name,
                    category = %name,
                    "skipping unknown guideline category"
                ),
            }
        }
        out
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Annotation payloads of the report.
pub struct Coordinates {
    /// Guideline groups keyed by category name. A `null` group loads as empty.
    #[serde(default, deserialize_with = "guideline_groups")]
    pub guidelines: BTreeMap<String, Vec<GuidelineRecord>>,
    /// Per-frame skeleton overlays.
    #[serde(default, deserialize_with = "null_as_default")]
    pub skeleton: Vec<SkeletonFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Annotation instances recorded for one category at one step.
pub struct GuidelineRecord {
    /// Step the record belongs to; resolved to a frame via the step table.
    #[serde(rename = "StepId", default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<StepId>,
    /// Drawable instances.
    #[serde(rename = "Guideline", default, deserialize_with = "null_as_default")]
    pub instances: Vec<AnnotationInstance>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Skeleton instances shown on exactly one frame.
pub struct SkeletonFrame {
    /// Frame the skeleton belongs to.
    #[serde(rename = "FrameIndex")]
    pub frame_index: FrameIndex,
    /// Drawable instances.
    #[serde(rename = "Guideline", default, deserialize_with = "null_as_default")]
    pub instances: Vec<AnnotationInstance>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// One drawable annotation unit.
pub struct AnnotationInstance {
    /// Primitive kind (`RenderType` code in the report).
    #[serde(rename = "RenderType")]
    pub kind: RenderKind,
    /// Normalized points; meaning depends on `kind`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: Vec<NormPoint>,
    /// Circle radius in pixels, or angle in degrees.
    #[serde(default)]
    pub value: f64,
    /// Fill color, used when `fill_type` is [`FillMode::Filled`].
    #[serde(default)]
    pub fill_color: Color,
    /// Fill mode.
    #[serde(default)]
    pub fill_type: FillMode,
    /// Stroke color.
    #[serde(default)]
    pub line_color: Color,
    /// Stroke style.
    #[serde(default)]
    pub line_type: LineStyle,
}

/// Drawable primitive kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RenderKind {
    /// Polyline through all points.
    Line,
    /// Circle at the first point with radius `value`.
    Circle,
    /// Angle readout of `value` degrees.
    Degree,
    /// Independent dots.
    Point,
}

impl TryFrom<u8> for RenderKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RenderKind::Line),
            1 => Ok(RenderKind::Circle),
            2 => Ok(RenderKind::Degree),
            3 => Ok(RenderKind::Point),
            other => Err(format!("unknown RenderType code {other}")),
        }
    }
}

impl From<RenderKind> for u8 {
    fn from(kind: RenderKind) -> Self {
        match kind {
            RenderKind::Line => 0,
            RenderKind::Circle => 1,
            RenderKind::Degree => 2,
            RenderKind::Point => 3,
        }
    }
}

/// Stroke style (`LineType` code: 0 is solid, anything else dashed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum LineStyle {
    /// Solid stroke with round caps.
    #[default]
    Solid,
    /// Dashed stroke with butt caps.
    Dashed,
}

impl From<u8> for LineStyle {
    fn from(code: u8) -> Self {
        if code == 0 {
            LineStyle::Solid
        } else {
            LineStyle::Dashed
        }
    }
}

impl From<LineStyle> for u8 {
    fn from(style: LineStyle) -> Self {
        match style {
            LineStyle::Solid => 0,
            LineStyle::Dashed => 1,
        }
    }
}

/// Fill mode (`FillType` code: 1 is filled, anything else unfilled).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum FillMode {
    /// No fill.
    #[default]
    None,
    /// Filled with `fill_color`.
    Filled,
}

impl From<u8> for FillMode {
    fn from(code: u8) -> Self {
        if code == 1 {
            FillMode::Filled
        } else {
            FillMode::None
        }
    }
}

impl From<FillMode> for u8 {
    fn from(mode: FillMode) -> Self {
        match mode {
            FillMode::None => 0,
            FillMode::Filled => 1,
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Capture context block.
pub struct Context {
    /// Swing capture record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<SwingRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Club, camera direction and handedness of the analyzed swing.
pub struct SwingRecord {
    /// Club used.
    pub club: Club,
    /// Camera angle.
    pub direction: Direction,
    /// Dominant hand.
    pub hand: Hand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Club used for the swing.
pub enum Club {
    /// Driver.
    Driver,
    /// Iron.
    Iron,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Camera placement relative to the player.
pub enum Direction {
    /// Down-the-line (side) view.
    Side,
    /// Face-on view.
    Front,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Player handedness.
pub enum Hand {
    /// Right-handed.
    Right,
    /// Left-handed.
    Left,
}

impl Report {
    /// Decode a report from a JSON string.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        serde_json::from_str(s).map_err(|e| OverlayError::serde(format!("decode report JSON: {e}")))
    }

    /// Decode a report from a JSON reader.
    pub fn from_reader(r: impl Read) -> OverlayResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| OverlayError::serde(format!("decode report JSON: {e}")))
    }

    /// Open and decode a report JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OverlayError::validation(format!("open report JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate report invariants the resolver relies on.
    pub fn validate(&self) -> OverlayResult<()> {
        if let Some(fps) = self.video_info.fps {
            Fps::new(fps)?;
        }

        let mut seen = BTreeSet::new();
        for step in &self.analysis.steps {
            if !seen.insert(step.id) {
                return Err(OverlayError::validation(format!(
                    "duplicate step id {}",
                    step.id.0
                )));
            }
        }

        let mut by_id: Vec<&Step> = self.analysis.steps.iter().collect();
        by_id.sort_by_key(|s| s.id);
        for pair in by_id.windows(2) {
            if pair[1].frame_index < pair[0].frame_index {
                return Err(OverlayError::validation(format!(
                    "step {} starts at frame {} before step {} at frame {}",
                    pair[1].id.0, pair[1].frame_index.0, pair[0].id.0, pair[0].frame_index.0
                )));
            }
        }

        for (name, records) in &self.coordinates.guidelines {
            for record in records {
                for inst in &record.instances {
                    validate_instance(inst, name)?;
                }
            }
        }
        for frame in &self.coordinates.skeleton {
            for inst in &frame.instances {
                validate_instance(inst, "skeleton")?;
            }
        }

        Ok(())
    }

    /// Declared frame rate, or `fallback` when the report does not declare one.
    pub fn fps_or(&self, fallback: Fps) -> OverlayResult<Fps> {
        match self.video_info.fps {
            Some(fps) => Fps::new(fps),
            None => Ok(fallback),
        }
    }

    /// Look up a step by id.
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.analysis.steps.iter().find(|s| s.id == id)
    }

    /// Look up a problem by its `IssueName`.
    pub fn problem(&self, issue_name: &str) -> Option<&Problem> {
        self.analysis
            .problems
            .iter()
            .find(|p| p.issue_name == issue_name)
    }

    /// Problem selected when a report is loaded without an explicit choice.
    pub fn default_problem(&self) -> Option<&Problem> {
        self.analysis.problems.first()
    }

    /// Swing capture record, when the report carries one.
    pub fn swing_record(&self) -> Option<&SwingRecord> {
        self.context.as_ref().and_then(|c| c.record.as_ref())
    }
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(<Option<T> as serde::Deserialize>::deserialize(d)?.unwrap_or_default())
}

fn guideline_groups<'de, D>(d: D) -> Result<BTreeMap<String, Vec<GuidelineRecord>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let groups: Option<BTreeMap<String, Option<Vec<GuidelineRecord>>>> =
        serde::Deserialize::deserialize(d)?;
    Ok(groups
        .unwrap_or_default()
        .into_iter()
        .map(|(name, records)| (name, records.unwrap_or_default()))
        .collect())
}

fn validate_instance(inst: &AnnotationInstance, owner: &str) -> OverlayResult<()> {
    if !inst.value.is_finite() {
        return Err(OverlayError::validation(format!(
            "{owner} instance value must be finite"
        )));
    }
    if !inst.fill_color.is_finite() || !inst.line_color.is_finite() {
        return Err(OverlayError::validation(format!(
            "{owner} instance colors must be finite"
        )));
    }
    if inst.points.iter().any(|p| !p.is_finite()) {
        return Err(OverlayError::validation(format!(
            "{owner} instance points must be finite"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/report/model.rs"]
mod tests;
