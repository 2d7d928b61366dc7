// File: crates/graph-core/src/mode.rs
// Summary: Plot modes and the static mode -> expression slot table.

use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};

use crate::result::RenderKind;

/// One of the four supported graph families.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// `z = f(x, y)` rendered as a surface.
    #[default]
    Explicit,
    /// `F(x, y) = 0` rendered as the zero contour of a scalar field.
    Implicit,
    /// `x(t), y(t), z(t)` rendered as a 3D line.
    Parametric,
    /// `r(theta)` lifted to `(r cos θ, r sin θ, θ)` and rendered as a 3D line.
    Polar,
}

/// Template for one user-editable expression field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SlotTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub default: &'static str,
}

const EXPLICIT_SLOTS: &[SlotTemplate] = &[SlotTemplate {
    id: "zExpr",
    label: "z = f(x, y)",
    default: "sin(x) * cos(y)",
}];

const IMPLICIT_SLOTS: &[SlotTemplate] = &[SlotTemplate {
    id: "FExpr",
    label: "F(x, y) = 0",
    default: "x^2 + y^2 - 9",
}];

const PARAMETRIC_SLOTS: &[SlotTemplate] = &[
    SlotTemplate { id: "xExpr", label: "x(t) =", default: "cos(t)" },
    SlotTemplate { id: "yExpr", label: "y(t) =", default: "sin(t)" },
    SlotTemplate { id: "zExpr", label: "z(t) =", default: "t / 10" },
];

const POLAR_SLOTS: &[SlotTemplate] = &[SlotTemplate {
    id: "rExpr",
    label: "r(theta) =",
    default: "2 + sin(3 * theta)",
}];

impl PlotMode {
    pub const ALL: [PlotMode; 4] = [
        PlotMode::Explicit,
        PlotMode::Implicit,
        PlotMode::Parametric,
        PlotMode::Polar,
    ];

    /// Ordered slot templates this mode reads from.
    pub fn slots(self) -> &'static [SlotTemplate] {
        match self {
            PlotMode::Explicit => EXPLICIT_SLOTS,
            PlotMode::Implicit => IMPLICIT_SLOTS,
            PlotMode::Parametric => PARAMETRIC_SLOTS,
            PlotMode::Polar => POLAR_SLOTS,
        }
    }

    pub fn slot(self, id: &str) -> Option<&'static SlotTemplate> {
        self.slots().iter().find(|s| s.id == id)
    }

    /// Variable names bound while sampling this mode.
    pub fn variables(self) -> &'static [&'static str] {
        match self {
            PlotMode::Explicit | PlotMode::Implicit => &["x", "y"],
            PlotMode::Parametric => &["t"],
            PlotMode::Polar => &["theta"],
        }
    }

    /// Names from `names` this mode does not bind; expressions reading them fault at every point.
    pub fn unbound_variables(self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|n| !self.variables().contains(&n.as_str()))
            .cloned()
            .collect()
    }

    pub fn render_kind(self) -> RenderKind {
        match self {
            PlotMode::Explicit => RenderKind::Surface,
            PlotMode::Implicit => RenderKind::Contour,
            PlotMode::Parametric | PlotMode::Polar => RenderKind::Line3d,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}
