//! Column tables for every view
//!
//! All tables share one key type, [`ColumnKey`], so a `--sort pts` on the
//! command line means the same thing on every page.

use crate::formatting::{format_minutes, format_stat, percentage, percentage_sort_value, player_label};
use crate::sort::SortValue;
use crate::table::{Alignment, ColumnDef, SortableTable};
use crate::types::{
    BoxScore, Game, GameLogEntry, Player, PlayerAnalytics, SplitRow, Stat, StatSource, StatTotals,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Made/attempted pair behind a percentage column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotKind {
    Field,
    Three,
    Free,
}

impl ShotKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Field => "FG%",
            Self::Three => "3P%",
            Self::Free => "FT%",
        }
    }

    fn made_attempted(self, stats: &StatTotals) -> (f64, f64) {
        match self {
            Self::Field => (stats.stat(Stat::FieldGoals), stats.stat(Stat::FieldGoalAttempts)),
            Self::Three => (stats.stat(Stat::ThreePointers), stats.stat(Stat::ThreePointAttempts)),
            Self::Free => (stats.stat(Stat::FreeThrows), stats.stat(Stat::FreeThrowAttempts)),
        }
    }
}

/// Identifies a column across all tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Name,
    Jersey,
    Position,
    Date,
    Opponent,
    Location,
    Split,
    GamesPlayed,
    Starter,
    Stat(Stat),
    Percentage(ShotKind),
    PerGame(Stat),
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown column '{0}' (try name, date, pts, reb, fg%, min, ...)")]
pub struct UnknownColumn(pub String);

impl FromStr for ColumnKey {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let column = match key.as_str() {
            "name" | "player" => Self::Name,
            "jersey" | "#" | "no" | "number" => Self::Jersey,
            "pos" | "position" => Self::Position,
            "date" => Self::Date,
            "opp" | "opponent" => Self::Opponent,
            "loc" | "location" => Self::Location,
            "split" => Self::Split,
            "gp" => Self::GamesPlayed,
            "starter" | "gs" => Self::Starter,
            "fg%" => Self::Percentage(ShotKind::Field),
            "3p%" | "fg3%" => Self::Percentage(ShotKind::Three),
            "ft%" => Self::Percentage(ShotKind::Free),
            "+/-" => Self::Stat(Stat::PlusMinus),
            other => {
                if let Some(base) = other.strip_suffix("/g") {
                    return match stat_by_label(base) {
                        Some(stat) => Ok(Self::PerGame(stat)),
                        None => Err(UnknownColumn(s.to_string())),
                    };
                }
                match stat_by_label(other) {
                    Some(stat) => Self::Stat(stat),
                    None => return Err(UnknownColumn(s.to_string())),
                }
            }
        };
        Ok(column)
    }
}

fn stat_by_label(label: &str) -> Option<Stat> {
    Stat::ALL
        .iter()
        .copied()
        .find(|stat| stat.label().eq_ignore_ascii_case(label))
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Jersey => write!(f, "jersey"),
            Self::Position => write!(f, "pos"),
            Self::Date => write!(f, "date"),
            Self::Opponent => write!(f, "opp"),
            Self::Location => write!(f, "loc"),
            Self::Split => write!(f, "split"),
            Self::GamesPlayed => write!(f, "gp"),
            Self::Starter => write!(f, "starter"),
            Self::Stat(stat) => write!(f, "{}", stat.label().to_lowercase()),
            Self::Percentage(kind) => write!(f, "{}", kind.label().to_lowercase()),
            Self::PerGame(stat) => write!(f, "{}/g", stat.label().to_lowercase()),
        }
    }
}

/// Whether stat columns show season totals or per-game averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatMode {
    #[default]
    Totals,
    Averages,
}

impl StatMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Totals => Self::Averages,
            Self::Averages => Self::Totals,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Totals => "Totals",
            Self::Averages => "Averages",
        }
    }
}

/// Box score line with the player resolved
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScoreRow {
    pub label: String,
    pub starter: bool,
    pub stats: StatTotals,
}

/// Starters, bench and the team totals row of a box score
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScoreRows {
    pub starters: Vec<BoxScoreRow>,
    pub bench: Vec<BoxScoreRow>,
    pub totals: BoxScoreRow,
}

pub fn box_score_rows(box_score: &BoxScore) -> BoxScoreRows {
    let mut starters = Vec::new();
    let mut bench = Vec::new();

    for line in &box_score.stat_lines {
        let label = match box_score.players.iter().find(|p| p.id == line.player_id) {
            Some(player) => player_label(&player.name, player.jersey_number, None),
            None => format!("Player {}", line.player_id),
        };
        let mut stats = StatTotals::default();
        stats.accumulate(line);
        let row = BoxScoreRow { label, starter: line.is_starter(), stats };
        if row.starter {
            starters.push(row);
        } else {
            bench.push(row);
        }
    }

    BoxScoreRows {
        starters,
        bench,
        totals: BoxScoreRow {
            label: "Team".to_string(),
            starter: false,
            stats: box_score.team_totals(),
        },
    }
}

fn optional_text(value: Option<&str>) -> SortValue {
    SortValue::from(value.unwrap_or(""))
}

fn stat_column<T, F>(stat: Stat, source: F) -> ColumnDef<T, ColumnKey>
where
    T: 'static,
    F: Fn(&T) -> StatTotals + Copy + Send + Sync + 'static,
{
    let width = if stat == Stat::Minutes { 6 } else { 4 };
    ColumnDef::new(
        ColumnKey::Stat(stat),
        stat.label(),
        width,
        Alignment::Right,
        move |row: &T| SortValue::Number(source(row).stat(stat)),
        move |row: &T| {
            let value = source(row).stat(stat);
            if stat == Stat::Minutes {
                format_minutes(value)
            } else {
                format_stat(value)
            }
        },
    )
}

fn percentage_column<T, F>(kind: ShotKind, source: F) -> ColumnDef<T, ColumnKey>
where
    T: 'static,
    F: Fn(&T) -> StatTotals + Copy + Send + Sync + 'static,
{
    ColumnDef::new(
        ColumnKey::Percentage(kind),
        kind.label(),
        6,
        Alignment::Right,
        move |row: &T| {
            let (made, attempted) = kind.made_attempted(&source(row));
            SortValue::Number(percentage_sort_value(made, attempted))
        },
        move |row: &T| {
            let (made, attempted) = kind.made_attempted(&source(row));
            percentage(made, attempted)
        },
    )
}

/// MIN through PM, with each percentage after its attempts column
pub fn stat_columns<T, F>(source: F) -> Vec<ColumnDef<T, ColumnKey>>
where
    T: 'static,
    F: Fn(&T) -> StatTotals + Copy + Send + Sync + 'static,
{
    let mut columns = Vec::new();
    for stat in Stat::ALL {
        columns.push(stat_column(stat, source));
        let shot = match stat {
            Stat::FieldGoalAttempts => Some(ShotKind::Field),
            Stat::ThreePointAttempts => Some(ShotKind::Three),
            Stat::FreeThrowAttempts => Some(ShotKind::Free),
            _ => None,
        };
        if let Some(kind) = shot {
            columns.push(percentage_column(kind, source));
        }
    }
    columns
}

pub fn roster_columns() -> Vec<ColumnDef<Player, ColumnKey>> {
    vec![
        ColumnDef::new(
            ColumnKey::Name,
            "Name",
            20,
            Alignment::Left,
            |p: &Player| SortValue::from(p.name.as_str()),
            |p: &Player| p.name.clone(),
        ),
        ColumnDef::new(
            ColumnKey::Jersey,
            "Jersey #",
            8,
            Alignment::Right,
            |p: &Player| SortValue::Number(p.jersey_number.map_or(-1.0, |n| n as f64)),
            |p: &Player| p.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
        ),
        ColumnDef::new(
            ColumnKey::Position,
            "Position",
            8,
            Alignment::Left,
            |p: &Player| optional_text(p.position.as_deref()),
            |p: &Player| p.position.clone().unwrap_or_default(),
        ),
    ]
}

pub fn games_columns() -> Vec<ColumnDef<Game, ColumnKey>> {
    vec![
        ColumnDef::new(
            ColumnKey::Date,
            "Date",
            10,
            Alignment::Left,
            |g: &Game| SortValue::from(g.date.as_str()),
            |g: &Game| g.date.clone(),
        ),
        ColumnDef::new(
            ColumnKey::Opponent,
            "Opponent",
            20,
            Alignment::Left,
            |g: &Game| SortValue::from(g.opponent.as_str()),
            |g: &Game| g.opponent.clone(),
        ),
        ColumnDef::new(
            ColumnKey::Location,
            "Location",
            8,
            Alignment::Left,
            |g: &Game| optional_text(g.location.as_deref()),
            |g: &Game| g.location.clone().unwrap_or_default(),
        ),
    ]
}

pub fn game_log_columns() -> Vec<ColumnDef<GameLogEntry, ColumnKey>> {
    let mut columns = vec![
        ColumnDef::new(
            ColumnKey::Date,
            "Date",
            10,
            Alignment::Left,
            |e: &GameLogEntry| SortValue::from(e.date.as_str()),
            |e: &GameLogEntry| e.date.clone(),
        ),
        ColumnDef::new(
            ColumnKey::Opponent,
            "Opp",
            16,
            Alignment::Left,
            |e: &GameLogEntry| SortValue::from(e.opponent.as_str()),
            |e: &GameLogEntry| e.opponent.clone(),
        ),
        ColumnDef::new(
            ColumnKey::Location,
            "Loc",
            4,
            Alignment::Left,
            |e: &GameLogEntry| optional_text(e.location.as_deref()),
            |e: &GameLogEntry| e.location.clone().unwrap_or_default(),
        ),
    ];
    columns.extend(stat_columns(|e: &GameLogEntry| e.stats));
    columns
}

pub fn split_columns() -> Vec<ColumnDef<SplitRow, ColumnKey>> {
    let mut columns = vec![ColumnDef::new(
        ColumnKey::Split,
        "Split",
        16,
        Alignment::Left,
        |r: &SplitRow| SortValue::from(r.label.as_str()),
        |r: &SplitRow| r.label.clone(),
    )];
    columns.extend(stat_columns(|r: &SplitRow| r.stats));
    columns
}

fn per_game_column(stat: Stat) -> ColumnDef<PlayerAnalytics, ColumnKey> {
    ColumnDef::new(
        ColumnKey::PerGame(stat),
        format!("{}/G", stat.label()),
        6,
        Alignment::Right,
        move |p: &PlayerAnalytics| SortValue::Number(p.averages.stat(stat)),
        move |p: &PlayerAnalytics| format!("{:.1}", p.averages.stat(stat)),
    )
}

/// Player leaderboard table; stat columns follow `mode`
pub fn analytics_columns(mode: StatMode) -> Vec<ColumnDef<PlayerAnalytics, ColumnKey>> {
    let mut columns = vec![
        ColumnDef::new(
            ColumnKey::Name,
            "Player",
            22,
            Alignment::Left,
            |p: &PlayerAnalytics| SortValue::from(p.name.as_str()),
            |p: &PlayerAnalytics| player_label(&p.name, p.jersey_number, p.position.as_deref()),
        ),
        ColumnDef::new(
            ColumnKey::GamesPlayed,
            "GP",
            3,
            Alignment::Right,
            |p: &PlayerAnalytics| SortValue::from(p.games_played),
            |p: &PlayerAnalytics| p.games_played.to_string(),
        ),
    ];
    match mode {
        StatMode::Totals => columns.extend(stat_columns(|p: &PlayerAnalytics| p.totals)),
        StatMode::Averages => columns.extend(stat_columns(|p: &PlayerAnalytics| p.averages)),
    }
    for stat in [Stat::Points, Stat::Rebounds, Stat::Assists] {
        columns.push(per_game_column(stat));
    }
    columns
}

pub fn box_score_columns() -> Vec<ColumnDef<BoxScoreRow, ColumnKey>> {
    let mut columns = vec![
        ColumnDef::new(
            ColumnKey::Name,
            "Player",
            20,
            Alignment::Left,
            |r: &BoxScoreRow| SortValue::from(r.label.as_str()),
            |r: &BoxScoreRow| r.label.clone(),
        ),
        ColumnDef::new(
            ColumnKey::Starter,
            "Starter",
            7,
            Alignment::Center,
            |r: &BoxScoreRow| SortValue::from(i64::from(r.starter)),
            |r: &BoxScoreRow| if r.starter { "*".to_string() } else { String::new() },
        ),
    ];
    columns.extend(stat_columns(|r: &BoxScoreRow| r.stats));
    columns
}

pub type RosterTable = SortableTable<Player, ColumnKey>;
pub type GamesTable = SortableTable<Game, ColumnKey>;
pub type GameLogTable = SortableTable<GameLogEntry, ColumnKey>;
pub type SplitsTable = SortableTable<SplitRow, ColumnKey>;
pub type AnalyticsTable = SortableTable<PlayerAnalytics, ColumnKey>;
pub type BoxScoreTable = SortableTable<BoxScoreRow, ColumnKey>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatLine;

    #[test]
    fn test_parse_column_keys() {
        assert_eq!("pts".parse(), Ok(ColumnKey::Stat(Stat::Points)));
        assert_eq!("PTS".parse(), Ok(ColumnKey::Stat(Stat::Points)));
        assert_eq!("min".parse(), Ok(ColumnKey::Stat(Stat::Minutes)));
        assert_eq!("fga3".parse(), Ok(ColumnKey::Stat(Stat::ThreePointAttempts)));
        assert_eq!("fg%".parse(), Ok(ColumnKey::Percentage(ShotKind::Field)));
        assert_eq!("3p%".parse(), Ok(ColumnKey::Percentage(ShotKind::Three)));
        assert_eq!("pts/g".parse(), Ok(ColumnKey::PerGame(Stat::Points)));
        assert_eq!("name".parse(), Ok(ColumnKey::Name));
        assert_eq!("gp".parse(), Ok(ColumnKey::GamesPlayed));
        assert_eq!("+/-".parse(), Ok(ColumnKey::Stat(Stat::PlusMinus)));
    }

    #[test]
    fn test_parse_unknown_column() {
        assert_eq!(
            "xyz".parse::<ColumnKey>(),
            Err(UnknownColumn("xyz".to_string()))
        );
        assert!("xyz/g".parse::<ColumnKey>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let keys = [
            ColumnKey::Jersey,
            ColumnKey::Stat(Stat::FreeThrowAttempts),
            ColumnKey::Percentage(ShotKind::Free),
            ColumnKey::PerGame(Stat::Assists),
        ];
        for key in keys {
            assert_eq!(key.to_string().parse(), Ok(key));
        }
    }

    #[test]
    fn test_stat_columns_order() {
        let columns = stat_columns(|r: &SplitRow| r.stats);
        let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                "MIN", "PTS", "REB", "AST", "STL", "BLK", "TOV", "FLS", "FG", "FGA", "FG%", "FG3",
                "FGA3", "3P%", "FT", "FTA", "FT%", "PM"
            ]
        );
    }

    #[test]
    fn test_percentage_column_blank_without_attempts() {
        let mut table = SortableTable::new(split_columns());
        let rows = vec![
            SplitRow {
                label: "Home".into(),
                stats: StatTotals { fg: 4.0, fga: 8.0, ..Default::default() },
            },
            SplitRow { label: "Away".into(), stats: StatTotals::default() },
            SplitRow {
                label: "Neutral".into(),
                stats: StatTotals { fg: 0.0, fga: 5.0, ..Default::default() },
            },
        ];
        let fg_pct = table
            .column_index(ColumnKey::Percentage(ShotKind::Field))
            .unwrap();
        let cells = table.formatted_rows(&rows);
        assert_eq!(cells[0][fg_pct], "50.0%");
        assert_eq!(cells[1][fg_pct], "");
        assert_eq!(cells[2][fg_pct], "0.0%");

        table.toggle(ColumnKey::Percentage(ShotKind::Field));
        table.toggle(ColumnKey::Percentage(ShotKind::Field));
        let order: Vec<_> = table.sorted_rows(&rows).iter().map(|r| r.label.clone()).collect();
        assert_eq!(order, vec!["Away", "Neutral", "Home"]);
    }

    #[test]
    fn test_minutes_column_renders_clock() {
        let table = SortableTable::new(split_columns());
        let rows = vec![SplitRow {
            label: "Home".into(),
            stats: StatTotals { minutes: 9.5, ..Default::default() },
        }];
        let min = table.column_index(ColumnKey::Stat(Stat::Minutes)).unwrap();
        assert_eq!(table.formatted_rows(&rows)[0][min], "9:30");
    }

    #[test]
    fn test_minutes_sort_uses_raw_value() {
        let mut table = SortableTable::new(split_columns());
        let rows = vec![
            SplitRow {
                label: "Short".into(),
                stats: StatTotals { minutes: 9.98, ..Default::default() },
            },
            SplitRow {
                label: "Long".into(),
                stats: StatTotals { minutes: 10.02, ..Default::default() },
            },
        ];
        let min = ColumnKey::Stat(Stat::Minutes);

        table.toggle(min);
        let order: Vec<_> = table.sorted_rows(&rows).iter().map(|r| r.label.clone()).collect();
        assert_eq!(order, vec!["Long", "Short"]);

        table.toggle(min);
        let order: Vec<_> = table.sorted_rows(&rows).iter().map(|r| r.label.clone()).collect();
        assert_eq!(order, vec!["Short", "Long"]);
    }

    #[test]
    fn test_roster_sorts_missing_jersey_last_when_descending() {
        let mut table = SortableTable::new(roster_columns());
        let players = vec![
            Player { id: 1, name: "Ada".into(), jersey_number: None, position: None },
            Player { id: 2, name: "Bo".into(), jersey_number: Some(4), position: Some("F".into()) },
        ];
        table.toggle(ColumnKey::Jersey);
        let names: Vec<_> = table.sorted_rows(&players).iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Bo", "Ada"]);
        assert_eq!(table.cells(&players[0]), vec!["Ada", "", ""]);
    }

    #[test]
    fn test_analytics_mode_switches_source() {
        let row = PlayerAnalytics {
            player_id: 1,
            name: "Ada".into(),
            jersey_number: Some(23),
            position: Some("G".into()),
            games_played: 2,
            totals: StatTotals { points: 40.0, ..Default::default() },
            averages: StatTotals { points: 20.0, ..Default::default() },
        };
        let totals = SortableTable::new(analytics_columns(StatMode::Totals));
        let averages = SortableTable::new(analytics_columns(StatMode::Averages));
        let pts = totals.column_index(ColumnKey::Stat(Stat::Points)).unwrap();
        let per_game = totals.column_index(ColumnKey::PerGame(Stat::Points)).unwrap();

        assert_eq!(totals.cells(&row)[0], "#23 Ada (G)");
        assert_eq!(totals.cells(&row)[pts], "40");
        assert_eq!(averages.cells(&row)[pts], "20");
        assert_eq!(totals.cells(&row)[per_game], "20.0");
    }

    #[test]
    fn test_box_score_rows_split_starters_and_bench() {
        let box_score = BoxScore {
            game: Game { id: 1, date: "2025-01-10".into(), opponent: "Rivals".into(), location: None },
            players: vec![
                Player { id: 1, name: "Ada".into(), jersey_number: Some(23), position: None },
                Player { id: 2, name: "Bo".into(), jersey_number: None, position: None },
            ],
            stat_lines: vec![
                StatLine { player_id: 2, game_id: 1, points: 6, starter: 0, ..Default::default() },
                StatLine { player_id: 1, game_id: 1, points: 14, starter: 1, ..Default::default() },
                StatLine { player_id: 9, game_id: 1, points: 1, starter: 0, ..Default::default() },
            ],
        };
        let rows = box_score_rows(&box_score);
        assert_eq!(rows.starters.len(), 1);
        assert_eq!(rows.starters[0].label, "#23 Ada");
        assert_eq!(rows.bench.len(), 2);
        assert_eq!(rows.bench[1].label, "Player 9");
        assert_eq!(rows.totals.stats.points, 21.0);

        let table = SortableTable::new(box_score_columns());
        assert_eq!(table.cells(&rows.starters[0])[1], "*");
    }

    #[test]
    fn test_stat_mode_toggle() {
        assert_eq!(StatMode::Totals.toggle(), StatMode::Averages);
        assert_eq!(StatMode::Averages.toggle(), StatMode::Totals);
    }
}
