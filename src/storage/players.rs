//! Player aggregate CSV loading.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::models::{Cell, PlayerStatRow, Population, PLAYER_NAME_COLUMN, TEAM_NAME_COLUMN};

/// Load a population from a CSV file with a header row.
pub fn read_population(path: &Path) -> Result<Population, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path)?;
    let population = parse_population(file, path)?;
    info!(
        "Loaded {} players with {} columns from {:?}",
        population.len(),
        population.columns.len(),
        path
    );
    Ok(population)
}

/// Load the configured player aggregate table.
pub fn read_players(config: &StorageConfig) -> Result<Population, StorageError> {
    read_population(&config.players_csv_path())
}

/// Parse CSV content into a population. `source` is only used in errors.
pub fn parse_population<R: Read>(input: R, source: &Path) -> Result<Population, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for required in [PLAYER_NAME_COLUMN, TEAM_NAME_COLUMN] {
        if !columns.iter().any(|c| c == required) {
            return Err(StorageError::MissingColumn {
                column: required.to_string(),
                path: source.to_path_buf(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = match column.as_str() {
                    // Names stay text even when they look numeric
                    PLAYER_NAME_COLUMN | TEAM_NAME_COLUMN => {
                        Cell::Text(record.get(i).unwrap_or("").to_string())
                    }
                    _ => record.get(i).map(Cell::parse).unwrap_or(Cell::Missing),
                };
                (column.clone(), cell)
            })
            .collect();
        rows.push(PlayerStatRow::from_cells(cells));
    }

    debug!("Parsed {} rows from {:?}", rows.len(), source);
    Ok(Population::new(columns, rows))
}
