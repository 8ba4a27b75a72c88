//! Team logo lookup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Find the logo whose file name contains the team name, ignoring case.
///
/// Candidates are checked in file-name order so the result is stable.
/// Returns `None` when the directory is missing or nothing matches.
pub fn find_team_logo(logo_dir: &Path, team_name: &str) -> Option<PathBuf> {
    let needle = team_name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(logo_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    let found = candidates.into_iter().find(|path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_lowercase().contains(&needle))
    });
    if found.is_none() {
        debug!("No logo for team '{}' in {:?}", team_name, logo_dir);
    }
    found
}
