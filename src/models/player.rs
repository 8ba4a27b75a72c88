//! Player aggregate tables.

use serde::Serialize;

/// Column holding the player's display name.
pub const PLAYER_NAME_COLUMN: &str = "player_name";

/// Column holding the player's team name.
pub const TEAM_NAME_COLUMN: &str = "team_name";

/// Column holding the stable numeric player id.
pub const PLAYER_ID_COLUMN: &str = "player_id";

/// Field values read as missing, matching the NA markers common CSV exporters write.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell of an aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Interpret a raw CSV field. Empty fields and NA markers are missing.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || MISSING_MARKERS.contains(&raw) {
            return Cell::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_))
    }
}

/// One player's row in an aggregate table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatRow {
    pub player_name: String,
    pub team_name: String,
    pub player_id: Option<i64>,
    cells: Vec<(String, Cell)>,
}

impl PlayerStatRow {
    pub fn new(player_name: impl Into<String>, team_name: impl Into<String>) -> Self {
        let player_name = player_name.into();
        let team_name = team_name.into();
        Self {
            cells: vec![
                (PLAYER_NAME_COLUMN.to_string(), Cell::Text(player_name.clone())),
                (TEAM_NAME_COLUMN.to_string(), Cell::Text(team_name.clone())),
            ],
            player_name,
            team_name,
            player_id: None,
        }
    }

    /// Build a row from (column, cell) pairs, pulling the identity columns out.
    pub fn from_cells(cells: Vec<(String, Cell)>) -> Self {
        let text = |column: &str| {
            cells
                .iter()
                .find(|(c, _)| c == column)
                .map(|(_, cell)| match cell {
                    Cell::Text(s) => s.clone(),
                    Cell::Number(v) => v.to_string(),
                    Cell::Missing => String::new(),
                })
                .unwrap_or_default()
        };
        let player_name = text(PLAYER_NAME_COLUMN);
        let team_name = text(TEAM_NAME_COLUMN);
        let player_id = cells
            .iter()
            .find(|(c, _)| c == PLAYER_ID_COLUMN)
            .and_then(|(_, cell)| cell.as_number())
            .map(|v| v as i64);

        Self {
            player_name,
            team_name,
            player_id,
            cells,
        }
    }

    /// Builder method to set or replace a numeric stat.
    pub fn with_stat(self, column: &str, value: f64) -> Self {
        self.with_cell(column, Cell::Number(value))
    }

    /// Builder method to set or replace any cell.
    pub fn with_cell(mut self, column: &str, cell: Cell) -> Self {
        if column == PLAYER_ID_COLUMN {
            self.player_id = cell.as_number().map(|v| v as i64);
        }
        match self.cells.iter_mut().find(|(c, _)| c == column) {
            Some(slot) => slot.1 = cell,
            None => self.cells.push((column.to_string(), cell)),
        }
        self
    }

    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, cell)| cell)
    }

    /// Numeric value of a column, if present and numeric.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.cell(column).and_then(Cell::as_number)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(c, cell)| (c.as_str(), cell))
    }

    /// Whether this row is the (team, player) the caller asked for.
    pub fn matches(&self, team: &str, player: &str) -> bool {
        self.team_name == team && self.player_name == player
    }
}

/// An ordered table of player rows sharing one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    pub columns: Vec<String>,
    pub rows: Vec<PlayerStatRow>,
}

impl Population {
    pub fn new(columns: Vec<String>, rows: Vec<PlayerStatRow>) -> Self {
        Self { columns, rows }
    }

    /// Build a population whose columns are taken in first-seen order from the rows.
    pub fn from_rows(rows: Vec<PlayerStatRow>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for (column, _) in row.cells() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Identity of a player, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub player_name: String,
    pub team_name: String,
    pub player_id: Option<i64>,
}

impl From<&PlayerStatRow> for PlayerSummary {
    fn from(row: &PlayerStatRow) -> Self {
        Self {
            player_name: row.player_name.clone(),
            team_name: row.team_name.clone(),
            player_id: row.player_id,
        }
    }
}
