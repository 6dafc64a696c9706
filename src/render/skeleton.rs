use crate::{
    foundation::core::{FrameIndex, Point},
    render::descriptor::{
        DrawDescriptor, DrawKind, GUIDE_STROKE_WIDTH, Label, degree_text, dots, fill_color,
        label_at, polyline, radius_or_default, stroke_color,
    },
    render::mapper::Viewport,
    report::model::{RenderKind, Report},
};

const SKELETON_STROKE_WIDTH: f64 = 5.0;
const LABEL_LIFT_PX: f64 = 10.0;

/// Draw descriptors for the skeleton recorded at exactly `frame`.
///
/// Skeleton overlays are not persisted: frames without a record draw nothing.
pub fn describe_skeleton(
    report: &Report,
    frame: FrameIndex,
    viewport: &Viewport,
) -> Vec<DrawDescriptor> {
    let Some(rec) = report
        .coordinates
        .skeleton
        .iter()
        .find(|s| s.frame_index == frame)
    else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for inst in &rec.instances {
        match inst.kind {
            RenderKind::Line => {
                out.push(polyline(inst, None, viewport, SKELETON_STROKE_WIDTH, None));
            }
            RenderKind::Circle => {
                let Some(&center) = inst.points.first() else {
                    continue;
                };
                out.push(DrawDescriptor {
                    kind: DrawKind::Circle,
                    category: None,
                    points: vec![viewport.map(center)],
                    radius: Some(radius_or_default(inst.value)),
                    stroke: Some(stroke_color(inst)),
                    stroke_width: GUIDE_STROKE_WIDTH,
                    cap: None,
                    dash: None,
                    fill: fill_color(inst),
                    label: None,
                    shadow: None,
                });
            }
            RenderKind::Degree => {
                let Some(&at) = inst.points.first() else {
                    continue;
                };
                let p = viewport.map(at);
                let label = Label {
                    text: degree_text(inst.value),
                    font_px: 18.0,
                    bold: true,
                    color: "lime".to_string(),
                };
                out.push(label_at(None, Point::new(p.x, p.y - LABEL_LIFT_PX), label, 4.0));
            }
            RenderKind::Point => out.extend(dots(inst, None, viewport)),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/skeleton.rs"]
mod tests;
