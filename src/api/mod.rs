//! REST API endpoints.
//!
//! Axum-based HTTP API serving pitch geometry, player rankings
//! and match details to the dashboard front end.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::calculate::RankingError;
use crate::models::PitchError;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::PathNotFound(_) => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RankingError> for ApiError {
    fn from(e: RankingError) -> Self {
        match e {
            RankingError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            RankingError::AmbiguousSelection { .. } => ApiError::Conflict(e.to_string()),
            RankingError::IncompleteData { .. } | RankingError::EmptyPopulation => {
                ApiError::Unprocessable(e.to_string())
            }
            RankingError::UnknownStat(_) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<PitchError> for ApiError {
    fn from(e: PitchError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin '{}', allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the application router.
///
/// Team logos are served under `/logos`; when a static directory is
/// configured it answers every path no API route claims.
pub fn build_router(state: AppState) -> Router {
    let logos = ServeDir::new(state.storage.logos_path());
    let static_dir = state.config.server.static_dir.clone();

    let router = Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/pitch", get(routes::pitch::pitch_geometry))
        .route("/api/players/stats", get(routes::players::stats_overview))
        .route("/api/players/teams/:team", get(routes::players::team_players))
        .route("/api/players/scatter", get(routes::players::scatter))
        .route("/api/players/compare", get(routes::players::compare))
        .route("/api/matches", get(routes::matches::list_matches))
        .route("/api/matches/:id", get(routes::matches::match_detail))
        .nest_service(routes::matches::LOGO_ROUTE, logos)
        .layer(cors_layer(&state.config.server.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_mapping() {
        let err: ApiError = StorageError::PathNotFound("data/matches.json".into()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(err.to_string().contains("File not found"));

        let err: ApiError = StorageError::Empty("x.json".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_ranking_error_mapping() {
        let not_found = RankingError::NotFound {
            team: "X".to_string(),
            player: "Z".to_string(),
        };
        assert!(matches!(ApiError::from(not_found), ApiError::NotFound(_)));

        let ambiguous = RankingError::AmbiguousSelection {
            team: "X".to_string(),
            player: "A".to_string(),
            count: 2,
        };
        assert!(matches!(ApiError::from(ambiguous), ApiError::Conflict(_)));

        let incomplete = RankingError::IncompleteData {
            stat: "shots".to_string(),
            player: "A".to_string(),
        };
        assert!(matches!(
            ApiError::from(incomplete),
            ApiError::Unprocessable(_)
        ));

        let unknown = RankingError::UnknownStat("speed".to_string());
        assert!(matches!(ApiError::from(unknown), ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let resp = ApiError::Conflict("two rows".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "CONFLICT");
        assert_eq!(json["error"]["message"], "Conflict: two rows");
    }
}
