use crate::{
    catalog::index::GuidelineCatalog,
    foundation::core::Point,
    render::mapper::Viewport,
    report::category::Category,
    report::model::{AnnotationInstance, FillMode, LineStyle, RenderKind},
    resolve::engine::ResolvedInstance,
};

/// Alpha applied to every stroke color.
pub const STROKE_ALPHA: f64 = 0.8;
/// Alpha applied to every fill color.
pub const FILL_ALPHA: f64 = 0.5;
/// Stroke width of guideline lines and circles.
pub const GUIDE_STROKE_WIDTH: f64 = 3.0;
/// Dash pattern of dashed strokes.
pub const DASH: [f64; 2] = [10.0, 5.0];
/// Dash pattern of address body-shape outlines.
pub const ADDRESS_DASH: [f64; 2] = [10.0, 4.0];
/// Radius used when a circle records no radius.
pub const DEFAULT_RADIUS: f64 = 8.0;
/// Stroke of the idle reference circle.
pub const IDLE_CIRCLE_STROKE: &str = "rgba(0, 188.7, 255, 1)";

const DOT_RADIUS: f64 = 6.0;
const DOT_STROKE_WIDTH: f64 = 2.0;
const DOT_FILL: &str = "orange";

/// Primitive a renderer should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawKind {
    /// Open polyline through `points`.
    Polyline,
    /// Circle centered on `points[0]`.
    Circle,
    /// Text label anchored at `points[0]`.
    Label,
    /// Single dot at `points[0]`.
    Dot,
}

/// Stroke end caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Rounded caps (solid strokes).
    Round,
    /// Flat caps (dashed strokes).
    Butt,
}

/// Drop shadow.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Shadow {
    /// CSS color.
    pub color: String,
    /// Blur radius in pixels.
    pub blur: f64,
}

/// Text payload of a [`DrawKind::Label`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Label {
    /// Text to draw.
    pub text: String,
    /// Font size in pixels.
    pub font_px: f64,
    /// Bold weight.
    pub bold: bool,
    /// CSS text color.
    pub color: String,
}

/// Renderer-agnostic draw instruction in container pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawDescriptor {
    /// Primitive kind.
    pub kind: DrawKind,
    /// Owning guideline category; `None` for skeleton primitives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Geometry in container pixels.
    pub points: Vec<Point>,
    /// Circle or dot radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// CSS stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Stroke caps (polylines only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<LineCap>,
    /// Dash pattern; `None` for solid strokes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
    /// CSS fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Text payload (labels only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Drop shadow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl DrawDescriptor {
    fn new(kind: DrawKind, category: Option<Category>, points: Vec<Point>) -> Self {
        Self {
            kind,
            category,
            points,
            radius: None,
            stroke: None,
            stroke_width: 0.0,
            cap: None,
            dash: None,
            fill: None,
            label: None,
            shadow: None,
        }
    }
}

/// Display-toggle state that influences guideline drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DescribeOpts {
    /// The per-frame skeleton overlay is visible.
    pub show_skeleton: bool,
}

/// Turn resolved guideline instances into draw descriptors, in resolution order.
pub fn describe_guidelines(
    resolved: &[ResolvedInstance],
    catalog: &GuidelineCatalog,
    viewport: &Viewport,
    opts: DescribeOpts,
) -> Vec<DrawDescriptor> {
    let mut out = Vec::with_capacity(resolved.len());
    for r in resolved {
        let category = r.category;
        let inst = &r.instance;
        match inst.kind {
            RenderKind::Line => {
                if category == Category::Spine && opts.show_skeleton {
                    continue;
                }
                let dash = (category == Category::AddressBodyShape).then_some(ADDRESS_DASH);
                out.push(polyline(
                    inst,
                    Some(category),
                    viewport,
                    GUIDE_STROKE_WIDTH,
                    dash,
                ));
            }
            RenderKind::Circle => {
                let radius = radius_or_default(inst.value);
                if r.gated
                    && !opts.show_skeleton
                    && let Some(&center) = inst.points.first()
                {
                    let mut d = DrawDescriptor::new(
                        DrawKind::Circle,
                        Some(category),
                        vec![viewport.map(center)],
                    );
                    d.radius = Some(radius);
                    d.stroke = Some(stroke_color(inst));
                    d.stroke_width = GUIDE_STROKE_WIDTH;
                    d.fill = fill_color(inst);
                    out.push(d);
                }
                if let Some(anchor) = anchor_point(r, catalog, viewport) {
                    let mut d = DrawDescriptor::new(DrawKind::Circle, Some(category), vec![anchor]);
                    d.radius = Some(radius);
                    d.stroke = Some(IDLE_CIRCLE_STROKE.to_string());
                    d.stroke_width = GUIDE_STROKE_WIDTH;
                    d.dash = Some(DASH.to_vec());
                    out.push(d);
                }
            }
            RenderKind::Degree => {
                let Some(anchor) = anchor_point(r, catalog, viewport) else {
                    continue;
                };
                let label = Label {
                    text: degree_text(r.displayed_value()),
                    font_px: 30.0,
                    bold: true,
                    color: "white".to_string(),
                };
                out.push(label_at(Some(category), anchor, label, 6.0));
            }
            RenderKind::Point => out.extend(dots(inst, Some(category), viewport)),
        }
    }
    out
}

/// `"{value}°"` with no trailing zeros.
pub fn degree_text(value: f64) -> String {
    format!("{value}°")
}

fn anchor_point(
    r: &ResolvedInstance,
    catalog: &GuidelineCatalog,
    viewport: &Viewport,
) -> Option<Point> {
    catalog
        .anchor(r.category)
        .or_else(|| r.instance.points.first().copied())
        .map(|p| viewport.map(p))
}

pub(crate) fn radius_or_default(value: f64) -> f64 {
    if value == 0.0 { DEFAULT_RADIUS } else { value }
}

pub(crate) fn stroke_color(inst: &AnnotationInstance) -> String {
    inst.line_color.to_css_rgba(STROKE_ALPHA)
}

pub(crate) fn fill_color(inst: &AnnotationInstance) -> Option<String> {
    match inst.fill_type {
        FillMode::Filled => Some(inst.fill_color.to_css_rgba(FILL_ALPHA)),
        FillMode::None => None,
    }
}

pub(crate) fn polyline(
    inst: &AnnotationInstance,
    category: Option<Category>,
    viewport: &Viewport,
    stroke_width: f64,
    dash_override: Option<[f64; 2]>,
) -> DrawDescriptor {
    let points = inst.points.iter().map(|&p| viewport.map(p)).collect();
    let mut d = DrawDescriptor::new(DrawKind::Polyline, category, points);
    d.stroke = Some(stroke_color(inst));
    d.stroke_width = stroke_width;
    let dash = dash_override.or(match inst.line_type {
        LineStyle::Solid => None,
        LineStyle::Dashed => Some(DASH),
    });
    d.cap = Some(if dash.is_some() {
        LineCap::Butt
    } else {
        LineCap::Round
    });
    d.dash = dash.map(|p| p.to_vec());
    d
}

pub(crate) fn dots(
    inst: &AnnotationInstance,
    category: Option<Category>,
    viewport: &Viewport,
) -> Vec<DrawDescriptor> {
    inst.points
        .iter()
        .map(|&p| {
            let mut d = DrawDescriptor::new(DrawKind::Dot, category, vec![viewport.map(p)]);
            d.radius = Some(DOT_RADIUS);
            d.stroke = Some(stroke_color(inst));
            d.stroke_width = DOT_STROKE_WIDTH;
            d.fill = Some(DOT_FILL.to_string());
            d.shadow = Some(Shadow {
                color: "black".to_string(),
                blur: 8.0,
            });
            d
        })
        .collect()
}

pub(crate) fn label_at(
    category: Option<Category>,
    at: Point,
    label: Label,
    shadow_blur: f64,
) -> DrawDescriptor {
    let mut d = DrawDescriptor::new(DrawKind::Label, category, vec![at]);
    d.label = Some(label);
    d.shadow = Some(Shadow {
        color: "black".to_string(),
        blur: shadow_blur,
    });
    d
}

#[cfg(test)]
#[path = "../../tests/unit/render/descriptor.rs"]
mod tests;
