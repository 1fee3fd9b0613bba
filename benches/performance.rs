use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hoops::columns::{analytics_columns, ColumnKey, StatMode};
use hoops::config::DisplayConfig;
use hoops::sort::SortState;
use hoops::table::SortableTable;
use hoops::tui::action::Action;
use hoops::tui::reducer::reduce;
use hoops::tui::state::AppState;
use hoops::types::{AnalyticsReport, PlayerAnalytics, Stat, StatLine, StatSource, StatTotals};
use std::sync::Arc;

/// Create a league-sized set of player analytics rows
fn create_sample_players(count: i64) -> Vec<PlayerAnalytics> {
    (0..count)
        .map(|i| {
            let games = 10 + i % 7;
            let mut totals = StatTotals::default();
            for game in 0..games {
                let fga = 6 + (i * 3 + game) % 14;
                let fg = fga / 2;
                let fg3 = fg / 3;
                let fta = (i + game) % 6;
                let ft = fta * 2 / 3;
                totals.accumulate(&StatLine {
                    player_id: i,
                    game_id: game,
                    minutes: 12.0 + ((i * 7 + game) % 25) as f64 + 0.5,
                    points: 2 * fg + fg3 + ft,
                    rebounds: (i + 2 * game) % 12,
                    assists: (3 * i + game) % 9,
                    steals: game % 3,
                    blocks: i % 4,
                    turnovers: (i + game) % 5,
                    fouls: (2 * i + game) % 6,
                    fg,
                    fga,
                    fg3,
                    fga3: fg3 + 2,
                    ft,
                    fta,
                    pm: (i * 5 + game) % 21 - 10,
                    ..Default::default()
                });
            }
            let mut averages = totals;
            for stat in Stat::ALL {
                let value = totals.stat(stat) / games as f64;
                set_stat(&mut averages, stat, value);
            }
            PlayerAnalytics {
                player_id: i,
                name: format!("Player {:03}", count - i),
                jersey_number: (i % 5 != 0).then_some(i % 100),
                position: Some(["G", "F", "C"][(i % 3) as usize].to_string()),
                games_played: games,
                totals,
                averages,
            }
        })
        .collect()
}

fn set_stat(totals: &mut StatTotals, stat: Stat, value: f64) {
    let field = match stat {
        Stat::Minutes => &mut totals.minutes,
        Stat::Points => &mut totals.points,
        Stat::Rebounds => &mut totals.rebounds,
        Stat::Assists => &mut totals.assists,
        Stat::Steals => &mut totals.steals,
        Stat::Blocks => &mut totals.blocks,
        Stat::Turnovers => &mut totals.turnovers,
        Stat::Fouls => &mut totals.fouls,
        Stat::FieldGoals => &mut totals.fg,
        Stat::FieldGoalAttempts => &mut totals.fga,
        Stat::ThreePointers => &mut totals.fg3,
        Stat::ThreePointAttempts => &mut totals.fga3,
        Stat::FreeThrows => &mut totals.ft,
        Stat::FreeThrowAttempts => &mut totals.fta,
        Stat::PlusMinus => &mut totals.pm,
    };
    *field = value;
}

fn sorted_table(key: &str, ascending: bool) -> SortableTable<PlayerAnalytics, ColumnKey> {
    let key: ColumnKey = key.parse().expect("valid column");
    let mut sort = SortState::new();
    sort.toggle(key);
    if ascending {
        sort.toggle(key);
    }
    SortableTable::new(analytics_columns(StatMode::Totals)).with_sort(sort)
}

/// Benchmark sorting the analytics table by different column kinds
fn bench_sorting(c: &mut Criterion) {
    let players = create_sample_players(500);

    let mut group = c.benchmark_group("sorting");

    group.bench_function("unsorted_identity", |b| {
        let table = SortableTable::new(analytics_columns(StatMode::Totals));
        b.iter(|| black_box(table.sorted_rows(black_box(&players)).len()))
    });

    group.bench_function("points_descending", |b| {
        let table = sorted_table("pts", false);
        b.iter(|| black_box(table.sorted_rows(black_box(&players)).len()))
    });

    group.bench_function("field_goal_pct_descending", |b| {
        let table = sorted_table("fg%", false);
        b.iter(|| black_box(table.sorted_rows(black_box(&players)).len()))
    });

    group.bench_function("name_ascending", |b| {
        let table = sorted_table("name", true);
        b.iter(|| black_box(table.sorted_rows(black_box(&players)).len()))
    });

    group.finish();
}

/// Benchmark text rendering of a sorted table
fn bench_render(c: &mut Criterion) {
    let players = create_sample_players(500);
    let display = DisplayConfig::default();

    let mut group = c.benchmark_group("render");

    group.bench_function("analytics_table", |b| {
        let table = sorted_table("min", false);
        b.iter(|| black_box(table.render(black_box(&players), &display)))
    });

    group.finish();
}

/// Benchmark reducer dispatch
fn bench_reducer_dispatch(c: &mut Criterion) {
    let mut state = AppState::default();
    state.data.analytics = Arc::new(Some(AnalyticsReport {
        players: create_sample_players(500),
        ..Default::default()
    }));

    let mut group = c.benchmark_group("reducer");

    group.bench_function("toggle_sort", |b| {
        b.iter(|| {
            let (new_state, _) = reduce(black_box(state.clone()), Action::ToggleSort);
            black_box(new_state)
        })
    });

    group.bench_function("row_down", |b| {
        b.iter(|| {
            let (new_state, _) = reduce(black_box(state.clone()), Action::RowDown);
            black_box(new_state)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_sorting, bench_render, bench_reducer_dispatch);
criterion_main!(benches);
