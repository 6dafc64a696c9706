use std::fmt;

/// Known guideline categories.
///
/// Reports key their guideline groups by name; names outside this set are skipped
/// when the catalog is built.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Category {
    /// Head position circle.
    HeadPosition,
    /// Low-back (hip) tilt angle.
    RotateHip,
    /// Shoulder tilt angle.
    RotateShoulder,
    /// Spine tilt angle.
    SpineDegree,
    /// Spine line.
    Spine,
    /// Stance lines (spelled `Stane` in reports).
    #[serde(alias = "Stane")]
    Stance,
    /// V-zone reference lines.
    VZone,
    /// Body outline at address.
    AddressBodyShape,
    /// Vertical hip reference line.
    HipVertical,
}

/// How a category's visibility is gated by playback position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatingPolicy {
    /// Revealed at the first frame its step is reached, then kept for the session.
    Sticky,
    /// Shown whenever its step reference resolves, regardless of playback position.
    AlwaysOn,
}

impl Category {
    /// Every known category.
    pub const ALL: [Category; 9] = [
        Category::HeadPosition,
        Category::RotateHip,
        Category::RotateShoulder,
        Category::SpineDegree,
        Category::Spine,
        Category::Stance,
        Category::VZone,
        Category::AddressBodyShape,
        Category::HipVertical,
    ];

    /// Parse a report group name. Accepts the report's `Stane` spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        let c = match name {
            "HeadPosition" => Category::HeadPosition,
            "RotateHip" => Category::RotateHip,
            "RotateShoulder" => Category::RotateShoulder,
            "SpineDegree" => Category::SpineDegree,
            "Spine" => Category::Spine,
            "Stane" | "Stance" => Category::Stance,
            "VZone" => Category::VZone,
            "AddressBodyShape" => Category::AddressBodyShape,
            "HipVertical" => Category::HipVertical,
            _ => return None,
        };
        Some(c)
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Category::HeadPosition => "HeadPosition",
            Category::RotateHip => "RotateHip",
            Category::RotateShoulder => "RotateShoulder",
            Category::SpineDegree => "SpineDegree",
            Category::Spine => "Spine",
            Category::Stance => "Stance",
            Category::VZone => "VZone",
            Category::AddressBodyShape => "AddressBodyShape",
            Category::HipVertical => "HipVertical",
        }
    }

    /// Gating policy applied by the resolver.
    pub fn policy(self) -> GatingPolicy {
        match self {
            Category::HeadPosition
            | Category::RotateHip
            | Category::RotateShoulder
            | Category::SpineDegree
            | Category::Spine
            | Category::Stance => GatingPolicy::Sticky,
            Category::VZone | Category::AddressBodyShape | Category::HipVertical => {
                GatingPolicy::AlwaysOn
            }
        }
    }

    /// Shorthand for `policy() == GatingPolicy::Sticky`.
    pub fn is_sticky(self) -> bool {
        self.policy() == GatingPolicy::Sticky
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/report/category.rs"]
mod tests;
