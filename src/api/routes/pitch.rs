use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{PitchGeometry, PitchSpec};
use crate::pitch::PitchGeometryBuilder;

/// Per-request overrides of the configured pitch dimensions.
#[derive(Debug, Default, Deserialize)]
pub struct PitchParams {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub penalty_box_height: Option<f64>,
    pub penalty_box_width: Option<f64>,
    pub penalty_x: Option<f64>,
    pub goal_box_height: Option<f64>,
    pub goal_box_width: Option<f64>,
    pub goal_width: Option<f64>,
    pub goal_height: Option<f64>,
    pub central_radius: Option<f64>,
    pub penalty_arc_depth: Option<f64>,
    pub penalty_arc_lift: Option<f64>,
}

impl PitchParams {
    pub fn apply(&self, base: PitchSpec) -> PitchSpec {
        PitchSpec {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            penalty_box_height: self.penalty_box_height.unwrap_or(base.penalty_box_height),
            penalty_box_width: self.penalty_box_width.unwrap_or(base.penalty_box_width),
            penalty_x: self.penalty_x.unwrap_or(base.penalty_x),
            goal_box_height: self.goal_box_height.unwrap_or(base.goal_box_height),
            goal_box_width: self.goal_box_width.unwrap_or(base.goal_box_width),
            goal_width: self.goal_width.unwrap_or(base.goal_width),
            goal_height: self.goal_height.unwrap_or(base.goal_height),
            central_radius: self.central_radius.unwrap_or(base.central_radius),
            penalty_arc_depth: self.penalty_arc_depth.unwrap_or(base.penalty_arc_depth),
            penalty_arc_lift: self.penalty_arc_lift.unwrap_or(base.penalty_arc_lift),
        }
    }
}

pub async fn pitch_geometry(
    State(state): State<AppState>,
    Query(params): Query<PitchParams>,
) -> Result<Json<PitchGeometry>, ApiError> {
    let spec = params.apply(state.config.pitch);
    let geometry = PitchGeometryBuilder::new(spec).build_validated()?;
    Ok(Json(geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{get_json, setup_test_state};
    use axum::http::StatusCode;

    #[test]
    fn test_params_apply() {
        let params = PitchParams {
            width: Some(105.0),
            central_radius: Some(9.15),
            ..Default::default()
        };
        let spec = params.apply(PitchSpec::default());

        assert_eq!(spec.width, 105.0);
        assert_eq!(spec.central_radius, 9.15);
        assert_eq!(spec.height, 80.0);
        assert_eq!(spec.penalty_x, 12.0);
    }

    #[tokio::test]
    async fn test_default_pitch() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = get_json(setup_test_state(tmp.path()), "/api/pitch").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["width"], 120.0);
        assert_eq!(json["height"], 80.0);
        assert_eq!(json["y_axis_reversed"], true);

        let circle = &json["elements"][2];
        assert_eq!(circle["feature"]["name"], "center_circle");
        assert_eq!(circle["primitive"]["type"], "circle");
        assert_eq!(circle["primitive"]["cx"], 60.0);
        assert_eq!(circle["primitive"]["cy"], 40.0);
        assert_eq!(circle["primitive"]["r"], 10.0);
    }

    #[tokio::test]
    async fn test_pitch_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = get_json(
            setup_test_state(tmp.path()),
            "/api/pitch?width=100&central_radius=8",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["width"], 100.0);
        assert_eq!(json["elements"][2]["primitive"]["cx"], 50.0);
        assert_eq!(json["elements"][2]["primitive"]["r"], 8.0);
    }

    #[tokio::test]
    async fn test_invalid_pitch() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = get_json(
            setup_test_state(tmp.path()),
            "/api/pitch?goal_box_height=60",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }
}
