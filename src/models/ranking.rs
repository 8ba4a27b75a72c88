//! Ranking and chart series models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PlayerSummary;

/// Which way a stat is ordered when ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatDirection {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

/// Per-stat ranking direction. Stats without an entry are higher-is-better.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatDirections {
    overrides: HashMap<String, StatDirection>,
}

impl StatDirections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every named stat as lower-is-better.
    pub fn lower_is_better<I, S>(stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let overrides = stats
            .into_iter()
            .map(|s| (s.into(), StatDirection::LowerIsBetter))
            .collect();
        Self { overrides }
    }

    /// Builder method to set one stat's direction.
    pub fn with(mut self, stat: impl Into<String>, direction: StatDirection) -> Self {
        self.overrides.insert(stat.into(), direction);
        self
    }

    pub fn direction(&self, stat: &str) -> StatDirection {
        self.overrides.get(stat).copied().unwrap_or_default()
    }
}

/// Where a value sits relative to the rest of the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Best,
    Worst,
    Neutral,
}

impl Classification {
    /// Classify a rank against the best and worst ranks of the population.
    /// Best wins when the two coincide.
    pub fn from_rank(rank: u32, best_rank: u32, worst_rank: u32) -> Self {
        if rank == best_rank {
            Classification::Best
        } else if rank == worst_rank {
            Classification::Worst
        } else {
            Classification::Neutral
        }
    }

    /// Bar colour used by the comparison chart.
    pub fn color(&self) -> &'static str {
        match self {
            Classification::Best => "green",
            Classification::Worst => "red",
            Classification::Neutral => "orange",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Best => write!(f, "best"),
            Classification::Worst => write!(f, "worst"),
            Classification::Neutral => write!(f, "neutral"),
        }
    }
}

/// A player's standing on a single stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedStat {
    pub value: f64,

    /// 1 is best; tied values share the lowest rank of the tie
    pub rank: u32,

    pub classification: Classification,
}

/// Rankings for one selected player, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRanking {
    pub player: PlayerSummary,
    pub stats: Vec<(String, RankedStat)>,
}

impl EntityRanking {
    pub fn get(&self, stat: &str) -> Option<&RankedStat> {
        self.stats.iter().find(|(s, _)| s == stat).map(|(_, r)| r)
    }

    /// Chart-ready series for the comparison bar chart.
    pub fn series(&self) -> ComparisonSeries {
        let bars = self
            .stats
            .iter()
            .map(|(stat, ranked)| ComparisonBar {
                stat: stat.clone(),
                value: ranked.value,
                rank: ranked.rank,
                classification: ranked.classification,
                color: ranked.classification.color().to_string(),
                text: format!("Rank: {}", ranked.rank),
            })
            .collect();

        ComparisonSeries {
            title: format!(
                "{} ({}) Stats Comparison",
                self.player.player_name, self.player.team_name
            ),
            player: self.player.clone(),
            bars,
        }
    }
}

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonBar {
    pub stat: String,
    pub value: f64,
    pub rank: u32,
    pub classification: Classification,
    pub color: String,
    pub text: String,
}

/// The comparison chart for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub title: String,
    pub player: PlayerSummary,
    pub bars: Vec<ComparisonBar>,
}

/// One marker on the stat-vs-stat scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub player_name: String,
    pub team_name: String,
    pub x: f64,
    pub y: f64,
}

/// Scatter plot of two stats, coloured by team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub title: String,
    pub x_stat: String,
    pub y_stat: String,
    pub points: Vec<ScatterPoint>,
}
