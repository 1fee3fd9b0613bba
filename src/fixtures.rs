/// Mock fixture data for testing and development
///
/// A small, deterministic season: six players, five games and a stat line
/// for most player/game pairs. Everything the API derives (totals,
/// averages, splits, leaders) is computed from these lines by the
/// aggregation helpers below, so mock pages stay consistent with each other.
use crate::types::{
    Game, GameLogEntry, LeaderRow, Leaders, Player, PlayerAnalytics, SplitRow, Splits, Stat,
    StatLine, StatSource, StatTotals,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub fn create_mock_players() -> Vec<Player> {
    let roster = [
        (1, "Ada Brooks", Some(23), Some("G")),
        (2, "Bo Carter", Some(4), Some("F")),
        (3, "Cy Dunn", Some(11), Some("C")),
        (4, "Dee Ellis", Some(7), Some("G")),
        (5, "Eli Fox", None, Some("F")),
        (6, "Flo Grant", Some(30), None),
    ];
    roster
        .into_iter()
        .map(|(id, name, jersey, position)| Player {
            id,
            name: name.to_string(),
            jersey_number: jersey,
            position: position.map(str::to_string),
        })
        .collect()
}

pub fn create_mock_games() -> Vec<Game> {
    let schedule = [
        (1, "2025-01-10", "Rivals", "Home"),
        (2, "2025-01-17", "Hawks", "Away"),
        (3, "2025-01-24", "Rivals", "Away"),
        (4, "2025-01-31", "Comets", "Home"),
        (5, "2025-02-07", "Hawks", "Home"),
    ];
    schedule
        .into_iter()
        .map(|(id, date, opponent, location)| Game {
            id,
            date: date.to_string(),
            opponent: opponent.to_string(),
            location: Some(location.to_string()),
        })
        .collect()
}

/// (player, game, minutes, [pts, reb, ast, stl, blk, tov, fls, fg, fga, fg3, fga3, ft, fta, pm], starter)
type LineRow = (i64, i64, f64, [i64; 14], i64);

const LINES: &[LineRow] = &[
    (1, 1, 32.5, [21, 4, 6, 2, 0, 3, 2, 8, 16, 3, 7, 2, 2, 9], 1),
    (2, 1, 30.0, [14, 9, 2, 1, 1, 1, 3, 6, 11, 0, 1, 2, 4, 5], 1),
    (3, 1, 28.25, [12, 11, 1, 0, 3, 2, 4, 5, 9, 0, 0, 2, 3, 7], 1),
    (4, 1, 18.0, [6, 2, 4, 1, 0, 1, 1, 2, 6, 2, 5, 0, 0, -2], 0),
    (5, 1, 9.75, [2, 3, 0, 0, 0, 0, 2, 1, 3, 0, 1, 0, 0, -4], 0),
    (1, 2, 35.0, [27, 5, 7, 3, 0, 2, 1, 10, 19, 4, 9, 3, 4, -3], 1),
    (2, 2, 31.5, [9, 7, 3, 0, 0, 2, 4, 4, 12, 1, 3, 0, 0, -6], 1),
    (3, 2, 25.0, [8, 9, 0, 1, 2, 1, 5, 4, 8, 0, 0, 0, 2, -8], 1),
    (4, 2, 22.25, [11, 3, 5, 2, 0, 2, 2, 4, 9, 3, 6, 0, 0, 1], 0),
    (6, 2, 6.0, [0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, -2], 0),
    (1, 3, 30.0, [18, 3, 8, 1, 1, 4, 3, 7, 15, 2, 6, 2, 3, 5], 1),
    (2, 3, 29.0, [16, 8, 1, 2, 0, 1, 2, 7, 13, 1, 2, 1, 2, 6], 1),
    (3, 3, 27.5, [10, 12, 2, 0, 4, 3, 3, 4, 7, 0, 0, 2, 4, 4], 0),
    (4, 3, 24.0, [9, 4, 6, 3, 0, 1, 1, 3, 8, 1, 4, 2, 2, 3], 1),
    (5, 3, 12.0, [4, 2, 1, 0, 1, 0, 2, 2, 4, 0, 0, 0, 0, -1], 0),
    (6, 3, 4.5, [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0], 0),
    (1, 4, 33.0, [24, 6, 5, 2, 0, 2, 2, 9, 17, 2, 5, 4, 5, 11], 1),
    (2, 4, 28.0, [12, 10, 2, 1, 2, 0, 3, 5, 10, 0, 0, 2, 2, 8], 1),
    (3, 4, 26.0, [14, 9, 1, 1, 2, 2, 4, 6, 10, 0, 0, 2, 2, 6], 1),
    (4, 4, 20.0, [5, 2, 7, 2, 0, 1, 1, 2, 7, 1, 4, 0, 0, 2], 0),
    (5, 4, 14.0, [6, 4, 1, 0, 0, 1, 2, 3, 5, 0, 0, 0, 1, -2], 0),
];

pub fn create_mock_stat_lines() -> Vec<StatLine> {
    LINES
        .iter()
        .enumerate()
        .map(|(index, &(player_id, game_id, minutes, s, starter))| StatLine {
            id: Some(index as i64 + 1),
            player_id,
            game_id,
            minutes,
            points: s[0],
            rebounds: s[1],
            assists: s[2],
            steals: s[3],
            blocks: s[4],
            turnovers: s[5],
            fouls: s[6],
            fg: s[7],
            fga: s[8],
            fg3: s[9],
            fga3: s[10],
            ft: s[11],
            fta: s[12],
            pm: s[13],
            starter,
        })
        .collect()
}

/// Sum a set of stat lines
pub fn sum_lines<'a>(lines: impl IntoIterator<Item = &'a StatLine>) -> StatTotals {
    let mut totals = StatTotals::default();
    for line in lines {
        totals.accumulate(line);
    }
    totals
}

/// Divide every stat by `games`; zero games gives all zeros
pub fn per_game(totals: &StatTotals, games: usize) -> StatTotals {
    if games == 0 {
        return StatTotals::default();
    }
    let n = games as f64;
    let round1 = |v: f64| (v / n * 10.0).round() / 10.0;
    StatTotals {
        minutes: (totals.minutes / n * 100.0).round() / 100.0,
        points: round1(totals.points),
        rebounds: round1(totals.rebounds),
        offensive_rebounds: round1(totals.offensive_rebounds),
        assists: round1(totals.assists),
        steals: round1(totals.steals),
        blocks: round1(totals.blocks),
        turnovers: round1(totals.turnovers),
        fouls: round1(totals.fouls),
        fg: round1(totals.fg),
        fga: round1(totals.fga),
        fg3: round1(totals.fg3),
        fga3: round1(totals.fga3),
        ft: round1(totals.ft),
        fta: round1(totals.fta),
        pm: round1(totals.pm),
    }
}

fn distinct_games<'a>(lines: impl IntoIterator<Item = &'a StatLine>) -> usize {
    lines.into_iter().map(|l| l.game_id).collect::<BTreeSet<_>>().len()
}

pub fn player_game_log(games: &[Game], lines: &[StatLine], player_id: i64) -> Vec<GameLogEntry> {
    let mut log: Vec<GameLogEntry> = lines
        .iter()
        .filter(|l| l.player_id == player_id)
        .filter_map(|line| {
            let game = games.iter().find(|g| g.id == line.game_id)?;
            Some(GameLogEntry {
                game_id: game.id,
                date: game.date.clone(),
                opponent: game.opponent.clone(),
                location: game.location.clone(),
                stats: sum_lines([line]),
            })
        })
        .collect();
    log.sort_by(|a, b| a.date.cmp(&b.date));
    log
}

/// Players on the floor; every one of them is credited the same plus-minus
const PLAYERS_ON_COURT: f64 = 5.0;

/// Team view of summed lines: plus-minus is counted once per team, not per player
fn team_share(mut totals: StatTotals) -> StatTotals {
    totals.pm /= PLAYERS_ON_COURT;
    totals
}

/// Location and opponent splits over one player's `lines`
///
/// Home and Away are always present; opponents appear once they have a line.
pub fn splits(games: &[Game], lines: &[StatLine], averages: bool) -> Splits {
    split_rows(games, lines, averages, false)
}

/// Location and opponent splits for the whole team
pub fn team_splits(games: &[Game], lines: &[StatLine], averages: bool) -> Splits {
    split_rows(games, lines, averages, true)
}

fn split_rows(games: &[Game], lines: &[StatLine], averages: bool, team: bool) -> Splits {
    let game_of = |line: &StatLine| games.iter().find(|g| g.id == line.game_id);

    let aggregate = |selected: Vec<&StatLine>| {
        let totals = sum_lines(selected.iter().copied());
        let totals = if team { team_share(totals) } else { totals };
        if averages {
            per_game(&totals, distinct_games(selected.iter().copied()))
        } else {
            round_pm(totals)
        }
    };

    let location = ["Home", "Away"]
        .into_iter()
        .map(|label| {
            let selected: Vec<&StatLine> = lines
                .iter()
                .filter(|l| game_of(*l).and_then(|g| g.location.as_deref()) == Some(label))
                .collect();
            SplitRow { label: label.to_string(), stats: aggregate(selected) }
        })
        .collect();

    let mut by_opponent: BTreeMap<String, Vec<&StatLine>> = BTreeMap::new();
    for line in lines {
        if let Some(game) = game_of(line) {
            by_opponent.entry(game.opponent.clone()).or_default().push(line);
        }
    }
    let opponents = by_opponent
        .into_iter()
        .map(|(label, selected)| SplitRow { label, stats: aggregate(selected) })
        .collect();

    Splits { location, opponents }
}

pub fn analytics_players(players: &[Player], lines: &[StatLine]) -> Vec<PlayerAnalytics> {
    players
        .iter()
        .map(|player| {
            let own: Vec<&StatLine> = lines.iter().filter(|l| l.player_id == player.id).collect();
            let totals = sum_lines(own.iter().copied());
            let games_played = distinct_games(own.iter().copied());
            PlayerAnalytics {
                player_id: player.id,
                name: player.name.clone(),
                jersey_number: player.jersey_number,
                position: player.position.clone(),
                games_played: games_played as i64,
                totals,
                averages: per_game(&totals, games_played),
            }
        })
        .collect()
}

/// Top `limit` players per category by season total
pub fn leaders(players: &[Player], lines: &[StatLine], limit: u32) -> Leaders {
    let rows = analytics_players(players, lines);
    let mut boards = HashMap::new();
    for stat in Stat::ALL {
        let mut board: Vec<LeaderRow> = rows
            .iter()
            .filter(|row| row.games_played > 0)
            .map(|row| LeaderRow {
                player_id: row.player_id,
                name: row.name.clone(),
                jersey_number: row.jersey_number,
                value: row.stat(stat),
            })
            .collect();
        board.sort_by(|a, b| b.value.total_cmp(&a.value));
        board.truncate(limit as usize);
        boards.insert(stat.api_key().to_string(), board);
    }
    Leaders(boards)
}

fn round_pm(mut totals: StatTotals) -> StatTotals {
    totals.pm = (totals.pm * 100.0).round() / 100.0;
    totals
}

/// Per-game averages over the games `lines` cover
pub fn line_averages(lines: &[StatLine]) -> StatTotals {
    per_game(&sum_lines(lines), distinct_games(lines))
}

pub fn team_totals(lines: &[StatLine]) -> StatTotals {
    round_pm(team_share(sum_lines(lines)))
}

pub fn team_averages(lines: &[StatLine]) -> StatTotals {
    per_game(&team_share(sum_lines(lines)), distinct_games(lines))
}
