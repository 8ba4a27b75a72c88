//! Player statistics calculation engine.
//!
//! Computes derived views over a player aggregate table:
//! - The rankable stat columns (shared by the scatter plot and the comparison chart)
//! - Competition ranks for every player on every stat
//! - Best/worst/neutral classification for one selected player
//! - Scatter series for two chosen stats
//! - Team and player selectors

use std::cmp::Ordering;

use thiserror::Error;

use crate::models::{
    Cell, Classification, EntityRanking, PlayerStatRow, PlayerSummary, Population, RankedStat,
    ScatterPoint, ScatterSeries, StatDirection, StatDirections,
};

/// Columns that are numeric but identify rows rather than measure them.
pub const EXCLUDED_COLUMNS: &[&str] = &["team_id", "player_id"];

/// Ranking errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error("Population is empty")]
    EmptyPopulation,

    #[error("No player named '{player}' in team '{team}'")]
    NotFound { team: String, player: String },

    #[error("{count} rows match player '{player}' in team '{team}'")]
    AmbiguousSelection {
        team: String,
        player: String,
        count: usize,
    },

    #[error("Stat '{stat}' is missing for player '{player}'")]
    IncompleteData { stat: String, player: String },

    #[error("Unknown stat: {0}")]
    UnknownStat(String),
}

/// Which player to rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub team: String,
    pub player: String,
}

impl Selector {
    pub fn new(team: impl Into<String>, player: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            player: player.into(),
        }
    }
}

/// Numeric, non-identifier columns in table order.
///
/// A column qualifies when no row holds text in it and at least one row
/// holds a number.
pub fn rankable_stats(population: &Population) -> Vec<String> {
    population
        .columns
        .iter()
        .filter(|column| !EXCLUDED_COLUMNS.contains(&column.as_str()))
        .filter(|column| {
            let cells = || population.rows.iter().filter_map(|r| r.cell(column));
            !cells().any(Cell::is_text) && cells().any(|c| c.as_number().is_some())
        })
        .cloned()
        .collect()
}

/// Competition ranks ("1224" ranking) for a list of values.
///
/// Each value's rank is one more than the number of values strictly better
/// than it, so ties share the lowest rank of the tie.
pub fn competition_ranks(values: &[f64], direction: StatDirection) -> Vec<u32> {
    let better = |a: f64, b: f64| -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match direction {
            StatDirection::HigherIsBetter => ord.reverse(),
            StatDirection::LowerIsBetter => ord,
        }
    };

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| better(values[a], values[b]));

    let mut ranks = vec![0u32; values.len()];
    for (pos, &idx) in order.iter().enumerate() {
        ranks[idx] = match pos {
            0 => 1,
            _ if values[order[pos - 1]] == values[idx] => ranks[order[pos - 1]],
            _ => pos as u32 + 1,
        };
    }
    ranks
}

/// Ranks of one stat across the whole population.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRanks {
    pub stat: String,
    pub direction: StatDirection,
    pub values: Vec<f64>,
    pub ranks: Vec<u32>,
    pub best_rank: u32,
    pub worst_rank: u32,
}

impl StatRanks {
    /// Ranked value of the row at `index`.
    pub fn ranked(&self, index: usize) -> Option<RankedStat> {
        let rank = *self.ranks.get(index)?;
        Some(RankedStat {
            value: self.values[index],
            rank,
            classification: Classification::from_rank(rank, self.best_rank, self.worst_rank),
        })
    }
}

/// Rank table for every rankable stat, rows in population order.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRanks {
    pub stats: Vec<StatRanks>,
}

/// Rank every row on every rankable stat.
pub fn rank_population(
    population: &Population,
    directions: &StatDirections,
) -> Result<PopulationRanks, RankingError> {
    if population.is_empty() {
        return Err(RankingError::EmptyPopulation);
    }

    let stats = rankable_stats(population)
        .into_iter()
        .map(|stat| -> Result<StatRanks, RankingError> {
            let values = stat_values(population, &stat)?;
            let direction = directions.direction(&stat);
            let ranks = competition_ranks(&values, direction);
            let best_rank = ranks.iter().copied().min().unwrap_or(1);
            let worst_rank = ranks.iter().copied().max().unwrap_or(1);
            Ok(StatRanks {
                stat,
                direction,
                values,
                ranks,
                best_rank,
                worst_rank,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PopulationRanks { stats })
}

fn stat_values(population: &Population, stat: &str) -> Result<Vec<f64>, RankingError> {
    population
        .rows
        .iter()
        .map(|row| {
            row.value(stat).ok_or_else(|| RankingError::IncompleteData {
                stat: stat.to_string(),
                player: row.player_name.clone(),
            })
        })
        .collect()
}

/// Find the single row matching a selector.
pub fn select_row<'a>(
    population: &'a Population,
    selector: &Selector,
) -> Result<(usize, &'a PlayerStatRow), RankingError> {
    let mut matches = population
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.matches(&selector.team, &selector.player));

    let first = matches.next().ok_or_else(|| RankingError::NotFound {
        team: selector.team.clone(),
        player: selector.player.clone(),
    })?;

    let extra = matches.count();
    if extra > 0 {
        return Err(RankingError::AmbiguousSelection {
            team: selector.team.clone(),
            player: selector.player.clone(),
            count: extra + 1,
        });
    }

    Ok(first)
}

/// Rank the selected player on every stat against the whole population.
pub fn rank_for_entity(
    population: &Population,
    selector: &Selector,
    directions: &StatDirections,
) -> Result<EntityRanking, RankingError> {
    if population.is_empty() {
        return Err(RankingError::EmptyPopulation);
    }
    let (index, row) = select_row(population, selector)?;
    let table = rank_population(population, directions)?;

    let stats = table
        .stats
        .iter()
        .filter_map(|s| s.ranked(index).map(|ranked| (s.stat.clone(), ranked)))
        .collect();

    Ok(EntityRanking {
        player: PlayerSummary::from(row),
        stats,
    })
}

/// Scatter series of `y_stat` against `x_stat`, one point per player.
///
/// Rows missing either value are left out. With no axes given, the first
/// and second rankable stats are used.
pub fn scatter_series(
    population: &Population,
    x_stat: Option<&str>,
    y_stat: Option<&str>,
) -> Result<ScatterSeries, RankingError> {
    let stats = rankable_stats(population);
    let pick = |requested: Option<&str>, default_index: usize| -> Result<String, RankingError> {
        match requested {
            Some(stat) if stats.iter().any(|s| s == stat) => Ok(stat.to_string()),
            Some(stat) => Err(RankingError::UnknownStat(stat.to_string())),
            None => stats
                .get(default_index)
                .or_else(|| stats.first())
                .cloned()
                .ok_or_else(|| RankingError::UnknownStat("<none>".to_string())),
        }
    };
    let x_stat = pick(x_stat, 0)?;
    let y_stat = pick(y_stat, 1)?;

    let points = population
        .rows
        .iter()
        .filter_map(|row| {
            Some(ScatterPoint {
                player_name: row.player_name.clone(),
                team_name: row.team_name.clone(),
                x: row.value(&x_stat)?,
                y: row.value(&y_stat)?,
            })
        })
        .collect();

    Ok(ScatterSeries {
        title: format!("{} vs {} by Team", x_stat, y_stat),
        x_stat,
        y_stat,
        points,
    })
}

/// Distinct team names in first-appearance order.
pub fn teams(population: &Population) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for row in &population.rows {
        if !out.contains(&row.team_name) {
            out.push(row.team_name.clone());
        }
    }
    out
}

/// Distinct player names of one team in first-appearance order.
pub fn players_for_team(population: &Population, team: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for row in population.rows.iter().filter(|r| r.team_name == team) {
        if !out.contains(&row.player_name) {
            out.push(row.player_name.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn shots_population() -> Population {
        Population::from_rows(vec![
            PlayerStatRow::new("A", "X").with_stat("shots", 10.0),
            PlayerStatRow::new("B", "X").with_stat("shots", 5.0),
            PlayerStatRow::new("C", "Y").with_stat("shots", 10.0),
        ])
    }

    fn midfield_population() -> Population {
        Population::from_rows(vec![
            PlayerStatRow::new("A", "X")
                .with_stat("player_id", 1.0)
                .with_stat("team_id", 10.0)
                .with_stat("distance", 11.2)
                .with_stat("sprints", 30.0)
                .with_stat("fouls", 2.0),
            PlayerStatRow::new("B", "X")
                .with_stat("player_id", 2.0)
                .with_stat("team_id", 10.0)
                .with_stat("distance", 10.1)
                .with_stat("sprints", 42.0)
                .with_stat("fouls", 4.0),
            PlayerStatRow::new("C", "Y")
                .with_stat("player_id", 3.0)
                .with_stat("team_id", 20.0)
                .with_stat("distance", 12.0)
                .with_stat("sprints", 35.0)
                .with_stat("fouls", 1.0),
            PlayerStatRow::new("D", "Y")
                .with_stat("player_id", 4.0)
                .with_stat("team_id", 20.0)
                .with_stat("distance", 10.9)
                .with_stat("sprints", 35.0)
                .with_stat("fouls", 3.0),
        ])
    }

    #[test]
    fn test_competition_ranks_descending() {
        assert_eq!(
            competition_ranks(&[10.0, 5.0, 10.0], StatDirection::HigherIsBetter),
            vec![1, 3, 1]
        );
        assert_eq!(
            competition_ranks(&[3.0, 1.0, 2.0, 2.0], StatDirection::HigherIsBetter),
            vec![1, 4, 2, 2]
        );
    }

    #[test]
    fn test_competition_ranks_ascending() {
        assert_eq!(
            competition_ranks(&[3.0, 1.0, 2.0, 2.0], StatDirection::LowerIsBetter),
            vec![4, 1, 2, 2]
        );
    }

    #[test]
    fn test_competition_ranks_edge_cases() {
        assert!(competition_ranks(&[], StatDirection::HigherIsBetter).is_empty());
        assert_eq!(
            competition_ranks(&[7.0, 7.0, 7.0], StatDirection::HigherIsBetter),
            vec![1, 1, 1]
        );
    }

    #[test]
    fn test_shots_scenario() {
        let population = shots_population();
        let directions = StatDirections::new();

        let a = rank_for_entity(&population, &Selector::new("X", "A"), &directions).unwrap();
        let b = rank_for_entity(&population, &Selector::new("X", "B"), &directions).unwrap();
        let c = rank_for_entity(&population, &Selector::new("Y", "C"), &directions).unwrap();

        assert_eq!(a.get("shots").unwrap().rank, 1);
        assert_eq!(c.get("shots").unwrap().rank, 1);
        assert_eq!(b.get("shots").unwrap().rank, 3);
        assert_eq!(a.get("shots").unwrap().classification, Classification::Best);
        assert_eq!(c.get("shots").unwrap().classification, Classification::Best);
        assert_eq!(b.get("shots").unwrap().classification, Classification::Worst);
    }

    #[test]
    fn test_rankable_stats_excludes_ids_and_text() {
        let population = midfield_population();
        assert_eq!(
            rankable_stats(&population),
            vec!["distance", "sprints", "fouls"]
        );
    }

    #[test]
    fn test_rankable_stats_mixed_column_is_not_rankable() {
        let population = Population::from_rows(vec![
            PlayerStatRow::new("A", "X").with_stat("shots", 1.0),
            PlayerStatRow::new("B", "X").with_cell("shots", Cell::Text("n/a".to_string())),
        ]);
        assert!(rankable_stats(&population).is_empty());
    }

    #[test]
    fn test_rankable_stats_keeps_column_with_missing_values() {
        let population = Population::from_rows(vec![
            PlayerStatRow::new("A", "X").with_stat("shots", 1.0),
            PlayerStatRow::new("B", "X").with_cell("shots", Cell::Missing),
        ]);
        assert_eq!(rankable_stats(&population), vec!["shots"]);
    }

    #[test]
    fn test_rank_for_entity_series_in_column_order() {
        let population = midfield_population();
        let ranking =
            rank_for_entity(&population, &Selector::new("X", "B"), &StatDirections::new())
                .unwrap();

        let series = ranking.series();
        let stats: Vec<&str> = series.bars.iter().map(|b| b.stat.as_str()).collect();
        assert_eq!(stats, vec!["distance", "sprints", "fouls"]);

        // distance 10.1 is lowest, sprints 42 highest, fouls 4 highest
        let colors: Vec<&str> = series.bars.iter().map(|b| b.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "green", "green"]);
        assert_eq!(series.player.player_id, Some(2));
    }

    #[test]
    fn test_lower_is_better_direction() {
        let population = midfield_population();
        let directions = StatDirections::lower_is_better(["fouls"]);

        let b = rank_for_entity(&population, &Selector::new("X", "B"), &directions).unwrap();
        let fouls = b.get("fouls").unwrap();
        assert_eq!(fouls.rank, 4);
        assert_eq!(fouls.classification, Classification::Worst);

        let c = rank_for_entity(&population, &Selector::new("Y", "C"), &directions).unwrap();
        assert_eq!(c.get("fouls").unwrap().classification, Classification::Best);
    }

    #[test]
    fn test_neutral_classification_and_ties() {
        let population = midfield_population();
        let d = rank_for_entity(&population, &Selector::new("Y", "D"), &StatDirections::new())
            .unwrap();

        let sprints = d.get("sprints").unwrap();
        assert_eq!(sprints.rank, 2);
        assert_eq!(sprints.classification, Classification::Neutral);

        let c = rank_for_entity(&population, &Selector::new("Y", "C"), &StatDirections::new())
            .unwrap();
        assert_eq!(c.get("sprints").unwrap().rank, 2);
    }

    #[test]
    fn test_all_tied_is_best() {
        let population = Population::from_rows(vec![
            PlayerStatRow::new("A", "X").with_stat("goals", 0.0),
            PlayerStatRow::new("B", "Y").with_stat("goals", 0.0),
        ]);
        let b = rank_for_entity(&population, &Selector::new("Y", "B"), &StatDirections::new())
            .unwrap();
        assert_eq!(b.get("goals").unwrap().classification, Classification::Best);
    }

    #[test]
    fn test_not_found() {
        let population = shots_population();
        let err = rank_for_entity(&population, &Selector::new("Y", "A"), &StatDirections::new())
            .unwrap_err();
        assert_eq!(
            err,
            RankingError::NotFound {
                team: "Y".to_string(),
                player: "A".to_string()
            }
        );
    }

    #[test]
    fn test_ambiguous_selection() {
        let mut population = shots_population();
        population
            .rows
            .push(PlayerStatRow::new("A", "X").with_stat("shots", 3.0));

        let err = rank_for_entity(&population, &Selector::new("X", "A"), &StatDirections::new())
            .unwrap_err();
        assert!(matches!(
            err,
            RankingError::AmbiguousSelection { count: 2, .. }
        ));
    }

    #[test]
    fn test_incomplete_data() {
        let population = Population::from_rows(vec![
            PlayerStatRow::new("A", "X").with_stat("shots", 1.0),
            PlayerStatRow::new("B", "X").with_cell("shots", Cell::Missing),
        ]);
        let err = rank_for_entity(&population, &Selector::new("X", "A"), &StatDirections::new())
            .unwrap_err();
        assert_eq!(
            err,
            RankingError::IncompleteData {
                stat: "shots".to_string(),
                player: "B".to_string()
            }
        );
    }

    #[test]
    fn test_empty_population() {
        let err = rank_population(&Population::default(), &StatDirections::new()).unwrap_err();
        assert_eq!(err, RankingError::EmptyPopulation);
    }

    #[test]
    fn test_rank_for_entity_idempotent() {
        let population = midfield_population();
        let selector = Selector::new("Y", "C");
        let directions = StatDirections::lower_is_better(["fouls"]);

        let first = rank_for_entity(&population, &selector, &directions).unwrap();
        let second = rank_for_entity(&population, &selector, &directions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scatter_series_defaults_and_title() {
        let population = midfield_population();
        let series = scatter_series(&population, None, None).unwrap();

        assert_eq!(series.x_stat, "distance");
        assert_eq!(series.y_stat, "sprints");
        assert_eq!(series.title, "distance vs sprints by Team");
        assert_eq!(series.points.len(), 4);
        assert_eq!(series.points[2].team_name, "Y");
        assert_eq!(series.points[2].x, 12.0);
    }

    #[test]
    fn test_scatter_series_skips_missing_and_rejects_unknown() {
        let population = Population::from_rows(vec![
            PlayerStatRow::new("A", "X")
                .with_stat("shots", 1.0)
                .with_stat("goals", 1.0),
            PlayerStatRow::new("B", "X")
                .with_stat("shots", 2.0)
                .with_cell("goals", Cell::Missing),
        ]);

        let series = scatter_series(&population, Some("shots"), Some("goals")).unwrap();
        assert_eq!(series.points.len(), 1);

        let err = scatter_series(&population, Some("team_id"), None).unwrap_err();
        assert_eq!(err, RankingError::UnknownStat("team_id".to_string()));
    }

    #[test]
    fn test_teams_and_players() {
        let population = midfield_population();
        assert_eq!(teams(&population), vec!["X", "Y"]);
        assert_eq!(players_for_team(&population, "Y"), vec!["C", "D"]);
        assert!(players_for_team(&population, "Z").is_empty());
    }

    fn population_strategy() -> impl Strategy<Value = Population> {
        prop::collection::vec((0u8..6, 0u8..6, 0u8..6), 1..12).prop_map(|rows| {
            Population::from_rows(
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (a, b, c))| {
                        PlayerStatRow::new(format!("P{}", i), "T")
                            .with_stat("a", a as f64)
                            .with_stat("b", b as f64)
                            .with_stat("c", c as f64)
                    })
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_rank_is_one_plus_strictly_better(
            values in prop::collection::vec(-50i32..50, 0..30),
            lower in any::<bool>(),
        ) {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            let direction = if lower {
                StatDirection::LowerIsBetter
            } else {
                StatDirection::HigherIsBetter
            };
            let ranks = competition_ranks(&values, direction);

            for (i, v) in values.iter().enumerate() {
                let better = values
                    .iter()
                    .filter(|w| match direction {
                        StatDirection::HigherIsBetter => *w > v,
                        StatDirection::LowerIsBetter => *w < v,
                    })
                    .count() as u32;
                prop_assert_eq!(ranks[i], better + 1);
                for (j, w) in values.iter().enumerate() {
                    if w == v {
                        prop_assert_eq!(ranks[i], ranks[j]);
                    }
                }
            }
        }

        #[test]
        fn prop_every_stat_has_best_and_worst(population in population_strategy()) {
            let table = rank_population(&population, &StatDirections::new()).unwrap();
            prop_assert_eq!(table.stats.len(), 3);

            for stat in &table.stats {
                let classes: Vec<Classification> = (0..population.len())
                    .map(|i| stat.ranked(i).unwrap().classification)
                    .collect();
                prop_assert!(classes.contains(&Classification::Best));

                let all_tied = stat.best_rank == stat.worst_rank;
                prop_assert!(all_tied || classes.contains(&Classification::Worst));
                if all_tied {
                    prop_assert!(classes.iter().all(|c| *c == Classification::Best));
                }
            }
        }
    }
}
