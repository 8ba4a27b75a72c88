use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    players_for_team, rank_for_entity, rankable_stats, scatter_series, teams, Selector,
};
use crate::models::{ComparisonSeries, ScatterSeries};
use crate::storage::read_players;

#[derive(Debug, Serialize)]
pub struct StatsOverview {
    pub stats: Vec<String>,
    pub teams: Vec<String>,
    pub player_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TeamPlayersResponse {
    pub team: String,
    pub players: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScatterParams {
    pub x: Option<String>,
    pub y: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub team: String,
    pub player: String,
}

/// Rankable stats and teams, for populating the selectors.
pub async fn stats_overview(
    State(state): State<AppState>,
) -> Result<Json<StatsOverview>, ApiError> {
    let population = read_players(&state.storage)?;

    Ok(Json(StatsOverview {
        stats: rankable_stats(&population),
        teams: teams(&population),
        player_count: population.len(),
    }))
}

pub async fn team_players(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> Result<Json<TeamPlayersResponse>, ApiError> {
    let population = read_players(&state.storage)?;
    let players = players_for_team(&population, &team);
    if players.is_empty() {
        return Err(ApiError::NotFound(format!("Unknown team: {}", team)));
    }

    Ok(Json(TeamPlayersResponse { team, players }))
}

pub async fn scatter(
    State(state): State<AppState>,
    Query(params): Query<ScatterParams>,
) -> Result<Json<ScatterSeries>, ApiError> {
    let population = read_players(&state.storage)?;
    let series = scatter_series(&population, params.x.as_deref(), params.y.as_deref())?;
    debug!(
        "Scatter {} vs {}: {} points",
        series.x_stat,
        series.y_stat,
        series.points.len()
    );
    Ok(Json(series))
}

/// Rank one player on every stat against the whole population.
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ComparisonSeries>, ApiError> {
    let population = read_players(&state.storage)?;
    let selector = Selector::new(params.team, params.player);
    let ranking = rank_for_entity(&population, &selector, &state.directions())?;
    Ok(Json(ranking.series()))
}
