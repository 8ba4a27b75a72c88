//! Match listing and match detail models.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Jersey colour used when a kit has none.
pub const DEFAULT_KIT_COLOR: &str = "#cccccc";

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A team as referenced from a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRef {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
}

impl TeamRef {
    /// Short name, falling back to the full name.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

/// One entry of the season's match list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: u64,

    #[serde(default)]
    pub date_time: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub home_team: TeamRef,

    #[serde(default, deserialize_with = "null_as_default")]
    pub away_team: TeamRef,
}

impl MatchSummary {
    /// Selector label, e.g. `"SYD vs MCY (2024-10-18 19:35:00)"`.
    pub fn label(&self) -> String {
        format!(
            "{} vs {} ({})",
            self.home_team.display_name(),
            self.away_team.display_name(),
            self.date_time.as_deref().unwrap_or("")
        )
    }

    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        self.date_time.as_deref().and_then(parse_kickoff)
    }
}

/// Parse a match timestamp, either RFC 3339 or `YYYY-MM-DD HH:MM:SS` (taken as UTC).
pub fn parse_kickoff(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stadium {
    pub name: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionEdition {
    pub name: Option<String>,
    pub season: Option<Named>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kit {
    pub jersey_color: Option<String>,
}

impl Kit {
    fn color(kit: Option<&Kit>) -> String {
        kit.and_then(|k| k.jersey_color.as_deref())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_KIT_COLOR)
            .to_string()
    }
}

/// A player listed on a match sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPlayer {
    pub team_id: Option<u64>,
    pub number: Option<u32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Full record of a single match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchDetail {
    pub id: Option<u64>,
    pub date_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub home_team: TeamRef,
    #[serde(deserialize_with = "null_as_default")]
    pub away_team: TeamRef,
    pub home_team_score: Option<u32>,
    pub away_team_score: Option<u32>,
    pub stadium: Option<Stadium>,
    pub competition_edition: Option<CompetitionEdition>,
    pub competition_round: Option<Named>,
    pub home_team_kit: Option<Kit>,
    pub away_team_kit: Option<Kit>,
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<MatchPlayer>,
}

/// A field/value row of the match metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub field: String,
    pub value: String,
}

/// One line of a team sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupEntry {
    pub number: Option<u32>,
    pub name: String,
    pub kit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lineups {
    pub home: Vec<LineupEntry>,
    pub away: Vec<LineupEntry>,
}

fn opt_string<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl MatchDetail {
    /// Scoreline, e.g. `"2 - 1"`. Unknown scores render as `-`.
    pub fn scoreline(&self) -> String {
        let score = |s: Option<u32>| s.map_or_else(|| "-".to_string(), |v| v.to_string());
        format!(
            "{} - {}",
            score(self.home_team_score),
            score(self.away_team_score)
        )
    }

    /// Key facts about the match, in display order.
    pub fn metadata_table(&self) -> Vec<MetadataRow> {
        let stadium = self.stadium.as_ref();
        let edition = self.competition_edition.as_ref();
        let rows = [
            ("Match ID", opt_string(self.id)),
            ("Date & Time", opt_string(self.date_time.as_deref())),
            ("Home Team", opt_string(self.home_team.name.as_deref())),
            ("Away Team", opt_string(self.away_team.name.as_deref())),
            ("Home Score", opt_string(self.home_team_score)),
            ("Away Score", opt_string(self.away_team_score)),
            (
                "Stadium",
                opt_string(stadium.and_then(|s| s.name.as_deref())),
            ),
            (
                "Stadium City",
                opt_string(stadium.and_then(|s| s.city.as_deref())),
            ),
            (
                "Stadium Capacity",
                opt_string(stadium.and_then(|s| s.capacity)),
            ),
            (
                "Competition",
                opt_string(edition.and_then(|e| e.name.as_deref())),
            ),
            (
                "Round",
                opt_string(
                    self.competition_round
                        .as_ref()
                        .and_then(|r| r.name.as_deref()),
                ),
            ),
            (
                "Season",
                opt_string(
                    edition
                        .and_then(|e| e.season.as_ref())
                        .and_then(|s| s.name.as_deref()),
                ),
            ),
        ];

        rows.into_iter()
            .map(|(field, value)| MetadataRow {
                field: field.to_string(),
                value,
            })
            .collect()
    }

    /// Split the match sheet into home and away lists, each with its kit colour.
    pub fn lineups(&self) -> Lineups {
        let home_kit = Kit::color(self.home_team_kit.as_ref());
        let away_kit = Kit::color(self.away_team_kit.as_ref());
        let home_id = self.home_team.id;

        let mut lineups = Lineups::default();
        for p in &self.players {
            let is_home = home_id.is_some() && p.team_id == home_id;
            let entry = LineupEntry {
                number: p.number,
                name: p.last_name.clone().unwrap_or_default(),
                kit: if is_home {
                    home_kit.clone()
                } else {
                    away_kit.clone()
                },
            };
            if is_home {
                lineups.home.push(entry);
            } else {
                lineups.away.push(entry);
            }
        }
        lineups
    }
}
