//! Filesystem dataset access.
//!
//! Reads the static datasets the dashboard presents:
//! - Player aggregate CSV tables
//! - The season match list (JSON array)
//! - Per-match detail files (JSON Lines)
//! - Team logo assets

mod jsonl;
mod logos;
mod players;

pub use jsonl::*;
pub use logos::*;
pub use players::*;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::{MatchDetail, MatchSummary};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Empty file: {0}")]
    Empty(PathBuf),
}

/// Configuration for dataset paths. Relative paths resolve against `data_dir`.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub players_csv: PathBuf,
    pub matches_file: PathBuf,
    pub matches_dir: PathBuf,
    pub logos_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            players_csv: PathBuf::from(
                "aggregates/aus1league_physicalaggregates_20242025_midfielders.csv",
            ),
            matches_file: PathBuf::from("matches.json"),
            matches_dir: PathBuf::from("matches"),
            logos_dir: PathBuf::from("aleague_logos"),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }

    pub fn players_csv_path(&self) -> PathBuf {
        self.resolve(&self.players_csv)
    }

    pub fn matches_path(&self) -> PathBuf {
        self.resolve(&self.matches_file)
    }

    /// `matches/{id}/{id}_match.json`
    pub fn match_detail_path(&self, match_id: u64) -> PathBuf {
        self.resolve(&self.matches_dir)
            .join(match_id.to_string())
            .join(format!("{}_match.json", match_id))
    }

    pub fn logos_path(&self) -> PathBuf {
        self.resolve(&self.logos_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read the season's match list.
pub fn read_matches(config: &StorageConfig) -> Result<Vec<MatchSummary>, StorageError> {
    let path = config.matches_path();
    if !path.exists() {
        return Err(StorageError::PathNotFound(path));
    }
    let contents = std::fs::read_to_string(&path)?;
    let matches: Vec<MatchSummary> = serde_json::from_str(&contents)?;
    debug!("Read {} matches from {:?}", matches.len(), path);
    Ok(matches)
}

/// Read the detail record of one match (the first line of its JSONL file).
pub fn read_match_detail(
    config: &StorageConfig,
    match_id: u64,
) -> Result<MatchDetail, StorageError> {
    let path = config.match_detail_path(match_id);
    let reader = JsonlReader::<MatchDetail>::new(path.clone());
    if !reader.exists() {
        return Err(StorageError::PathNotFound(path));
    }
    reader.read_first()?.ok_or(StorageError::Empty(path))
}
