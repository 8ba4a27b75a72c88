//! Pitch geometry generation.
//!
//! Turns a [`PitchSpec`] into the ordered list of shapes a renderer needs to
//! draw a scaled pitch. Coordinates are in pitch units with the origin at the
//! top-left corner and y growing downward.

use crate::models::{
    Feature, Layer, PitchElement, PitchError, PitchGeometry, PitchSpec, Point2, Primitive, Side,
};

/// Label of the two penalty spot markers.
pub const PENALTY_POINT_LABEL: &str = "Penalty Point";

/// Label of the centre spot marker.
pub const CENTER_POINT_LABEL: &str = "Center Point";

/// Builds pitch geometry from a spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchGeometryBuilder {
    spec: PitchSpec,
}

impl PitchGeometryBuilder {
    pub fn new(spec: PitchSpec) -> Self {
        Self { spec }
    }

    /// Validate the spec, then build.
    pub fn build_validated(&self) -> Result<PitchGeometry, PitchError> {
        self.spec.validate()?;
        Ok(self.build())
    }

    /// Build without validation. Specs breaking the dimensional invariants
    /// produce geometry that does not look like a pitch.
    pub fn build(&self) -> PitchGeometry {
        let s = &self.spec;
        let (cx, cy) = s.center();
        let mut elements = Vec::with_capacity(15);
        let mut push = |feature, layer, primitive| {
            elements.push(PitchElement {
                feature,
                layer,
                primitive,
            })
        };

        push(
            Feature::Outline,
            Layer::Between,
            Primitive::rect((0.0, 0.0), (s.width, s.height)),
        );
        push(
            Feature::CenterLine,
            Layer::Between,
            Primitive::Line {
                x0: cx,
                y0: 0.0,
                x1: cx,
                y1: s.height,
            },
        );
        push(
            Feature::CenterCircle,
            Layer::Between,
            Primitive::Circle {
                cx,
                cy,
                r: s.central_radius,
            },
        );

        for side in [Side::Left, Side::Right] {
            push(
                Feature::PenaltyBox(side),
                Layer::Between,
                goal_line_box(s, side, s.penalty_box_width, s.penalty_box_height),
            );
        }
        for side in [Side::Left, Side::Right] {
            push(
                Feature::GoalBox(side),
                Layer::Between,
                goal_line_box(s, side, s.goal_box_width, s.goal_box_height),
            );
        }

        for side in [Side::Left, Side::Right] {
            push(
                Feature::PenaltySpot(side),
                Layer::Above,
                Primitive::Point {
                    x: from_goal_line(s, side, s.penalty_x),
                    y: cy,
                    label: PENALTY_POINT_LABEL.to_string(),
                },
            );
        }
        push(
            Feature::CenterSpot,
            Layer::Above,
            Primitive::Point {
                x: cx,
                y: cy,
                label: CENTER_POINT_LABEL.to_string(),
            },
        );

        // Goals sit behind the goal line, outside the outline.
        for side in [Side::Left, Side::Right] {
            push(
                Feature::Goal(side),
                Layer::Above,
                goal_line_box(s, side, -s.goal_width, s.goal_height),
            );
        }

        for side in [Side::Left, Side::Right] {
            push(Feature::PenaltyArc(side), Layer::Between, penalty_arc(s, side));
        }

        PitchGeometry {
            width: s.width,
            height: s.height,
            y_axis_reversed: true,
            elements,
        }
    }
}

/// Build geometry for a spec without validating it.
pub fn build(spec: &PitchSpec) -> PitchGeometry {
    PitchGeometryBuilder::new(*spec).build()
}

/// Validate a spec and build its geometry.
pub fn build_validated(spec: &PitchSpec) -> Result<PitchGeometry, PitchError> {
    PitchGeometryBuilder::new(*spec).build_validated()
}

/// x coordinate `depth` units into the pitch from the given goal line.
fn from_goal_line(spec: &PitchSpec, side: Side, depth: f64) -> f64 {
    match side {
        Side::Left => depth,
        Side::Right => spec.width - depth,
    }
}

/// Rectangle anchored on a goal line, vertically centred, reaching `depth`
/// into the pitch (negative depth reaches outside it).
fn goal_line_box(spec: &PitchSpec, side: Side, depth: f64, span: f64) -> Primitive {
    let (_, cy) = spec.center();
    let goal_line = from_goal_line(spec, side, 0.0);
    Primitive::rect(
        (goal_line, cy - span / 2.0),
        (from_goal_line(spec, side, depth), cy + span / 2.0),
    )
}

fn penalty_arc(spec: &PitchSpec, side: Side) -> Primitive {
    let (_, cy) = spec.center();
    let edge = from_goal_line(spec, side, spec.penalty_box_width);
    let bulge = from_goal_line(spec, side, spec.penalty_box_width + spec.penalty_arc_depth);
    Primitive::Arc {
        start: Point2::new(edge, cy + spec.central_radius),
        control: Point2::new(bulge, cy - spec.penalty_arc_lift),
        end: Point2::new(edge, cy - spec.central_radius),
    }
}
