use std::path::Path as FsPath;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Lineups, MatchSummary, MetadataRow, TeamRef};
use crate::storage::{find_team_logo, read_match_detail, read_matches, StorageError};

/// Route prefix team logos are served under.
pub const LOGO_ROUTE: &str = "/logos";

#[derive(Debug, Serialize)]
pub struct MatchListItem {
    pub id: u64,
    pub label: String,
    pub date_time: Option<String>,
    pub kickoff: Option<DateTime<Utc>>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
}

impl From<MatchSummary> for MatchListItem {
    fn from(m: MatchSummary) -> Self {
        Self {
            id: m.id,
            label: m.label(),
            kickoff: m.kickoff(),
            date_time: m.date_time,
            home_team: m.home_team,
            away_team: m.away_team,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchListItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MatchDetailResponse {
    pub id: u64,
    pub scoreline: String,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
    pub metadata: Vec<MetadataRow>,
    pub lineups: Lineups,
}

pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let matches: Vec<MatchListItem> = read_matches(&state.storage)?
        .into_iter()
        .map(MatchListItem::from)
        .collect();

    Ok(Json(MatchListResponse {
        total: matches.len(),
        matches,
    }))
}

pub async fn match_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MatchDetailResponse>, ApiError> {
    let detail = read_match_detail(&state.storage, id).map_err(|e| match e {
        StorageError::PathNotFound(_) => ApiError::NotFound(format!("match {}", id)),
        other => other.into(),
    })?;

    let logo_dir = state.storage.logos_path();
    let logo = |team: &TeamRef| team_logo_url(&logo_dir, team);

    Ok(Json(MatchDetailResponse {
        id,
        scoreline: detail.scoreline(),
        home_logo: logo(&detail.home_team),
        away_logo: logo(&detail.away_team),
        metadata: detail.metadata_table(),
        lineups: detail.lineups(),
        home_team: detail.home_team,
        away_team: detail.away_team,
    }))
}

/// Logo URL for a team, looked up by short name first and then full name.
fn team_logo_url(logo_dir: &FsPath, team: &TeamRef) -> Option<String> {
    [team.short_name.as_deref(), team.name.as_deref()]
        .into_iter()
        .flatten()
        .find_map(|name| logo_url(logo_dir, name))
}

fn logo_url(logo_dir: &FsPath, team_name: &str) -> Option<String> {
    let path = find_team_logo(logo_dir, team_name)?;
    let file = path.file_name()?.to_str()?;
    Some(format!("{}/{}", LOGO_ROUTE, file))
}
