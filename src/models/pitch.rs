//! Pitch dimensions and the drawable geometry derived from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pitch validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PitchError {
    #[error("Invalid pitch spec: {field} {reason}")]
    InvalidSpec { field: &'static str, reason: String },
}

impl PitchError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PitchError::InvalidSpec {
            field,
            reason: reason.into(),
        }
    }
}

/// Real-world pitch measurements, in pitch units (meters).
///
/// Every field has a serde default, so a partial TOML table or query string
/// still yields a complete spec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchSpec {
    /// Length of the pitch, goal line to goal line
    pub width: f64,

    /// Width of the pitch, touchline to touchline
    pub height: f64,

    pub penalty_box_height: f64,
    pub penalty_box_width: f64,

    /// Distance from the goal line to the penalty spot
    pub penalty_x: f64,

    pub goal_box_height: f64,
    pub goal_box_width: f64,

    /// Depth of the goal behind the goal line
    pub goal_width: f64,

    /// Goal mouth opening
    pub goal_height: f64,

    pub central_radius: f64,

    /// How far the penalty arc's control point sits beyond the penalty box
    pub penalty_arc_depth: f64,

    /// How far the penalty arc's control point sits above the centre line of play
    pub penalty_arc_lift: f64,
}

impl Default for PitchSpec {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 80.0,
            penalty_box_height: 44.0,
            penalty_box_width: 18.0,
            penalty_x: 12.0,
            goal_box_height: 20.0,
            goal_box_width: 6.0,
            goal_width: 2.4,
            goal_height: 8.0,
            central_radius: 10.0,
            penalty_arc_depth: 6.0,
            penalty_arc_lift: 2.0,
        }
    }
}

impl PitchSpec {
    /// Centre of the pitch.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Check the dimensional invariants the geometry builder relies on.
    pub fn validate(&self) -> Result<(), PitchError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("penalty_box_height", self.penalty_box_height),
            ("penalty_box_width", self.penalty_box_width),
            ("penalty_x", self.penalty_x),
            ("goal_box_height", self.goal_box_height),
            ("goal_box_width", self.goal_box_width),
            ("goal_width", self.goal_width),
            ("goal_height", self.goal_height),
            ("central_radius", self.central_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PitchError::invalid(
                    field,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }

        for (field, value) in [
            ("penalty_arc_depth", self.penalty_arc_depth),
            ("penalty_arc_lift", self.penalty_arc_lift),
        ] {
            if !value.is_finite() {
                return Err(PitchError::invalid(field, "must be finite"));
            }
        }

        if self.penalty_box_height > self.height {
            return Err(PitchError::invalid(
                "penalty_box_height",
                format!("must not exceed height {}", self.height),
            ));
        }
        if self.penalty_box_width > self.width {
            return Err(PitchError::invalid(
                "penalty_box_width",
                format!("must not exceed width {}", self.width),
            ));
        }
        if self.penalty_x >= self.width / 2.0 {
            return Err(PitchError::invalid(
                "penalty_x",
                format!("must be less than half the width ({})", self.width / 2.0),
            ));
        }
        if self.goal_box_width >= self.penalty_box_width {
            return Err(PitchError::invalid(
                "goal_box_width",
                format!(
                    "must be less than penalty_box_width {}",
                    self.penalty_box_width
                ),
            ));
        }
        if self.goal_box_height >= self.penalty_box_height {
            return Err(PitchError::invalid(
                "goal_box_height",
                format!(
                    "must be less than penalty_box_height {}",
                    self.penalty_box_height
                ),
            ));
        }
        if self.central_radius >= self.height / 2.0 {
            return Err(PitchError::invalid(
                "central_radius",
                format!("must be less than half the height ({})", self.height / 2.0),
            ));
        }

        Ok(())
    }
}

/// Which end of the pitch a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// The pitch marking an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "name", content = "side", rename_all = "snake_case")]
pub enum Feature {
    Outline,
    CenterLine,
    CenterCircle,
    PenaltyBox(Side),
    GoalBox(Side),
    PenaltySpot(Side),
    CenterSpot,
    Goal(Side),
    PenaltyArc(Side),
}

/// Z-order hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Drawn between the background and the data traces
    Between,
    /// Drawn on top of everything else
    Above,
}

/// A point in pitch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rectangle { x0: f64, y0: f64, x1: f64, y1: f64 },
    Line { x0: f64, y0: f64, x1: f64, y1: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    /// Quadratic curve from `start` to `end` bent towards `control`.
    Arc {
        start: Point2,
        control: Point2,
        end: Point2,
    },
    Point { x: f64, y: f64, label: String },
}

impl Primitive {
    /// Rectangle from two opposite corners, normalised so x0 <= x1 and y0 <= y1.
    pub fn rect(a: (f64, f64), b: (f64, f64)) -> Self {
        Primitive::Rectangle {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    /// SVG path data for arcs, e.g. `M 18 50 Q 24 38, 18 30`.
    pub fn svg_path(&self) -> Option<String> {
        match self {
            Primitive::Arc {
                start,
                control,
                end,
            } => Some(format!(
                "M {} {} Q {} {}, {} {}",
                start.x, start.y, control.x, control.y, end.x, end.y
            )),
            _ => None,
        }
    }
}

/// One marking of the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchElement {
    pub feature: Feature,
    pub layer: Layer,
    pub primitive: Primitive,
}

/// Complete pitch drawing, in insertion (draw) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchGeometry {
    pub width: f64,
    pub height: f64,

    /// y grows downward; renderers flip the axis
    pub y_axis_reversed: bool,

    pub elements: Vec<PitchElement>,
}

impl PitchGeometry {
    /// First element drawing the given feature.
    pub fn find(&self, feature: Feature) -> Option<&PitchElement> {
        self.elements.iter().find(|e| e.feature == feature)
    }

    /// Primitive of the first element drawing the given feature.
    pub fn primitive(&self, feature: Feature) -> Option<&Primitive> {
        self.find(feature).map(|e| &e.primitive)
    }
}
