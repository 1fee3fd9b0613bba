/// Shared types used across the application
///
/// These mirror the JSON shapes served by the team stats API. Field names
/// that the API spells in upper case (`FG`, `FGA`, ...) are renamed to
/// snake case on the Rust side.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Team member as listed on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub jersey_number: Option<i64>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Payload for creating a player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPlayer {
    pub name: String,
    pub jersey_number: Option<i64>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub date: String,
    pub opponent: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Away,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Away => write!(f, "Away"),
        }
    }
}

/// Payload for scheduling a game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGame {
    pub date: String,
    pub opponent: String,
    pub location: Location,
}

/// Counting statistics the API reports
///
/// The order here is the column order used by every stat table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Minutes,
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    Fouls,
    FieldGoals,
    FieldGoalAttempts,
    ThreePointers,
    ThreePointAttempts,
    FreeThrows,
    FreeThrowAttempts,
    PlusMinus,
}

impl Stat {
    pub const ALL: [Stat; 15] = [
        Stat::Minutes,
        Stat::Points,
        Stat::Rebounds,
        Stat::Assists,
        Stat::Steals,
        Stat::Blocks,
        Stat::Turnovers,
        Stat::Fouls,
        Stat::FieldGoals,
        Stat::FieldGoalAttempts,
        Stat::ThreePointers,
        Stat::ThreePointAttempts,
        Stat::FreeThrows,
        Stat::FreeThrowAttempts,
        Stat::PlusMinus,
    ];

    /// Column header label
    pub fn label(self) -> &'static str {
        match self {
            Self::Minutes => "MIN",
            Self::Points => "PTS",
            Self::Rebounds => "REB",
            Self::Assists => "AST",
            Self::Steals => "STL",
            Self::Blocks => "BLK",
            Self::Turnovers => "TOV",
            Self::Fouls => "FLS",
            Self::FieldGoals => "FG",
            Self::FieldGoalAttempts => "FGA",
            Self::ThreePointers => "FG3",
            Self::ThreePointAttempts => "FGA3",
            Self::FreeThrows => "FT",
            Self::FreeThrowAttempts => "FTA",
            Self::PlusMinus => "PM",
        }
    }

    /// Long name used for leaderboard titles
    pub fn title(self) -> &'static str {
        match self {
            Self::Minutes => "Minutes",
            Self::Points => "Points",
            Self::Rebounds => "Rebounds",
            Self::Assists => "Assists",
            Self::Steals => "Steals",
            Self::Blocks => "Blocks",
            Self::Turnovers => "Turnovers",
            Self::Fouls => "Fouls",
            other => other.label(),
        }
    }

    /// Key used by the API for this stat (also the leaderboard category)
    pub fn api_key(self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Points => "points",
            Self::Rebounds => "rebounds",
            Self::Assists => "assists",
            Self::Steals => "steals",
            Self::Blocks => "blocks",
            Self::Turnovers => "turnovers",
            Self::Fouls => "fouls",
            Self::FieldGoals => "FG",
            Self::FieldGoalAttempts => "FGA",
            Self::ThreePointers => "FG3",
            Self::ThreePointAttempts => "FGA3",
            Self::FreeThrows => "FT",
            Self::FreeThrowAttempts => "FTA",
            Self::PlusMinus => "PM",
        }
    }
}

/// Uniform read access to counting stats, whatever the row shape
pub trait StatSource {
    fn stat(&self, stat: Stat) -> f64;
}

/// Summed or averaged counting stats
///
/// Used for player totals/averages, team totals/averages and split rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatTotals {
    pub minutes: f64,
    pub points: f64,
    pub rebounds: f64,
    #[serde(rename = "OREB", alias = "oreb")]
    pub offensive_rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub fouls: f64,
    #[serde(rename = "FG", alias = "fg")]
    pub fg: f64,
    #[serde(rename = "FGA", alias = "fga")]
    pub fga: f64,
    #[serde(rename = "FG3", alias = "fg3")]
    pub fg3: f64,
    #[serde(rename = "FGA3", alias = "fga3")]
    pub fga3: f64,
    #[serde(rename = "FT", alias = "ft")]
    pub ft: f64,
    #[serde(rename = "FTA", alias = "fta")]
    pub fta: f64,
    #[serde(rename = "PM", alias = "pm")]
    pub pm: f64,
}

impl StatSource for StatTotals {
    fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Minutes => self.minutes,
            Stat::Points => self.points,
            Stat::Rebounds => self.rebounds,
            Stat::Assists => self.assists,
            Stat::Steals => self.steals,
            Stat::Blocks => self.blocks,
            Stat::Turnovers => self.turnovers,
            Stat::Fouls => self.fouls,
            Stat::FieldGoals => self.fg,
            Stat::FieldGoalAttempts => self.fga,
            Stat::ThreePointers => self.fg3,
            Stat::ThreePointAttempts => self.fga3,
            Stat::FreeThrows => self.ft,
            Stat::FreeThrowAttempts => self.fta,
            Stat::PlusMinus => self.pm,
        }
    }
}

impl StatTotals {
    /// Add one stat line's counting stats to the running totals
    pub fn accumulate(&mut self, line: &StatLine) {
        self.minutes += line.minutes;
        self.points += line.points as f64;
        self.rebounds += line.rebounds as f64;
        self.assists += line.assists as f64;
        self.steals += line.steals as f64;
        self.blocks += line.blocks as f64;
        self.turnovers += line.turnovers as f64;
        self.fouls += line.fouls as f64;
        self.fg += line.fg as f64;
        self.fga += line.fga as f64;
        self.fg3 += line.fg3 as f64;
        self.fga3 += line.fga3 as f64;
        self.ft += line.ft as f64;
        self.fta += line.fta as f64;
        self.pm += line.pm as f64;
    }
}

/// One player's stats for one game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub player_id: i64,
    pub game_id: i64,
    pub minutes: f64,
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
    pub turnovers: i64,
    pub fouls: i64,
    #[serde(rename = "FG", alias = "fg")]
    pub fg: i64,
    #[serde(rename = "FGA", alias = "fga")]
    pub fga: i64,
    #[serde(rename = "FG3", alias = "fg3")]
    pub fg3: i64,
    #[serde(rename = "FGA3", alias = "fga3")]
    pub fga3: i64,
    #[serde(rename = "FT", alias = "ft")]
    pub ft: i64,
    #[serde(rename = "FTA", alias = "fta")]
    pub fta: i64,
    #[serde(rename = "PM", alias = "pm")]
    pub pm: i64,
    pub starter: i64,
}

impl StatLine {
    pub fn is_starter(&self) -> bool {
        self.starter == 1
    }
}

impl StatSource for StatLine {
    fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Minutes => self.minutes,
            Stat::Points => self.points as f64,
            Stat::Rebounds => self.rebounds as f64,
            Stat::Assists => self.assists as f64,
            Stat::Steals => self.steals as f64,
            Stat::Blocks => self.blocks as f64,
            Stat::Turnovers => self.turnovers as f64,
            Stat::Fouls => self.fouls as f64,
            Stat::FieldGoals => self.fg as f64,
            Stat::FieldGoalAttempts => self.fga as f64,
            Stat::ThreePointers => self.fg3 as f64,
            Stat::ThreePointAttempts => self.fga3 as f64,
            Stat::FreeThrows => self.ft as f64,
            Stat::FreeThrowAttempts => self.fta as f64,
            Stat::PlusMinus => self.pm as f64,
        }
    }
}

/// Row of a split table (e.g. "Home", "Away", or an opponent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRow {
    pub label: String,
    #[serde(flatten)]
    pub stats: StatTotals,
}

impl StatSource for SplitRow {
    fn stat(&self, stat: Stat) -> f64 {
        self.stats.stat(stat)
    }
}

/// Splits partitioned by location and by opponent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Splits {
    pub location: Vec<SplitRow>,
    pub opponents: Vec<SplitRow>,
}

/// One game in a player's game log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogEntry {
    pub game_id: i64,
    pub date: String,
    pub opponent: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(flatten)]
    pub stats: StatTotals,
}

impl StatSource for GameLogEntry {
    fn stat(&self, stat: Stat) -> f64 {
        self.stats.stat(stat)
    }
}

/// Per-player season totals and per-game averages
///
/// The API sends these flat, with `total_` and `avg_` prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAnalytics {
    pub player_id: i64,
    pub name: String,
    pub jersey_number: Option<i64>,
    pub position: Option<String>,
    pub games_played: i64,
    pub totals: StatTotals,
    pub averages: StatTotals,
}

#[derive(Deserialize)]
struct PlayerAnalyticsHeader {
    player_id: i64,
    name: String,
    #[serde(default)]
    jersey_number: Option<i64>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    gp: i64,
}

/// Collect `prefix`-ed keys into a map without the prefix
fn strip_prefixed(
    map: &serde_json::Map<String, serde_json::Value>,
    prefix: &str,
) -> serde_json::Map<String, serde_json::Value> {
    map.iter()
        .filter_map(|(key, value)| {
            let stripped = key.strip_prefix(prefix)?;
            // Aggregates of empty sets come back as null
            (!value.is_null()).then(|| (stripped.to_string(), value.clone()))
        })
        .collect()
}

impl<'de> Deserialize<'de> for PlayerAnalytics {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let header: PlayerAnalyticsHeader =
            serde_json::from_value(serde_json::Value::Object(map.clone())).map_err(D::Error::custom)?;
        let totals: StatTotals =
            serde_json::from_value(serde_json::Value::Object(strip_prefixed(&map, "total_")))
                .map_err(D::Error::custom)?;
        let averages: StatTotals =
            serde_json::from_value(serde_json::Value::Object(strip_prefixed(&map, "avg_")))
                .map_err(D::Error::custom)?;

        Ok(PlayerAnalytics {
            player_id: header.player_id,
            name: header.name,
            jersey_number: header.jersey_number,
            position: header.position,
            games_played: header.gp,
            totals,
            averages,
        })
    }
}

/// Season totals view
impl StatSource for PlayerAnalytics {
    fn stat(&self, stat: Stat) -> f64 {
        self.totals.stat(stat)
    }
}

/// One entry on a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRow {
    pub player_id: i64,
    pub name: String,
    #[serde(default)]
    pub jersey_number: Option<i64>,
    pub value: f64,
}

/// Top-N players per stat category, keyed by the API category name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaders(pub HashMap<String, Vec<LeaderRow>>);

impl Leaders {
    /// Leaderboards in stat column order, skipping categories the API omitted
    pub fn boards(&self) -> Vec<(Stat, &[LeaderRow])> {
        Stat::ALL
            .iter()
            .filter_map(|stat| {
                self.0
                    .get(stat.api_key())
                    .map(|rows| (*stat, rows.as_slice()))
            })
            .collect()
    }
}

/// Response of the token endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// Payload for creating a user account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Response of the "who am I" endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Me {
    pub username: String,
    pub role: Role,
}

/// Everything shown on a single player's page
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReport {
    pub player: Player,
    pub game_log: Vec<GameLogEntry>,
    pub totals: StatTotals,
    pub averages: StatTotals,
    pub splits_totals: Splits,
    pub splits_averages: Splits,
}

/// Everything shown on the analytics page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsReport {
    pub players: Vec<PlayerAnalytics>,
    pub leaders: Leaders,
    pub team_totals: StatTotals,
    pub team_averages: StatTotals,
    pub splits_totals: Splits,
    pub splits_averages: Splits,
}

/// A game together with its stat lines and the roster they refer to
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScore {
    pub game: Game,
    pub players: Vec<Player>,
    pub stat_lines: Vec<StatLine>,
}

impl BoxScore {
    /// Team totals summed over all stat lines
    pub fn team_totals(&self) -> StatTotals {
        let mut totals = StatTotals::default();
        for line in &self.stat_lines {
            totals.accumulate(line);
        }
        totals
    }
}
