use crate::columns::{game_log_columns, split_columns, ColumnKey};
use crate::commands::side_table;
use crate::config::{Config, DisplayConfig};
use crate::data_provider::{load_player_report, StatsProvider};
use crate::formatting::{format_header, player_label};
use crate::sort::SortState;
use crate::types::{PlayerReport, SplitRow, Splits, StatTotals};
use anyhow::{bail, Context, Result};

/// Two-row table comparing totals and per-game averages
pub(crate) fn summary_rows(totals: &StatTotals, averages: &StatTotals) -> Vec<SplitRow> {
    vec![
        SplitRow { label: "Totals".to_string(), stats: *totals },
        SplitRow { label: "Averages".to_string(), stats: *averages },
    ]
}

/// Location and opponent split tables under one heading
pub(crate) fn format_splits(
    title: &str,
    splits: &Splits,
    sort: SortState<ColumnKey>,
    display: &DisplayConfig,
) -> String {
    let table = side_table(split_columns(), sort);
    let mut output = format_header(title, false, display);
    output.push_str(&table.render(&splits.location, display));
    if !splits.opponents.is_empty() {
        output.push('\n');
        output.push_str(&table.render(&splits.opponents, display));
    }
    output
}

pub fn format_player_report(
    report: &PlayerReport,
    sort: SortState<ColumnKey>,
    display: &DisplayConfig,
) -> Result<String> {
    let log_table = side_table(game_log_columns(), sort);
    let split_table = side_table(split_columns(), sort);
    if let Some(key) = sort.active_key() {
        if log_table.column_index(key).is_none() && split_table.column_index(key).is_none() {
            bail!("Column '{}' is not shown on the player page", key);
        }
    }

    let player = &report.player;
    let title = player_label(&player.name, player.jersey_number, player.position.as_deref());
    let mut output = format_header(&title, true, display);
    output.push('\n');

    output.push_str(&format_header("Game Log", false, display));
    if report.game_log.is_empty() {
        output.push_str("No games played.\n");
    } else {
        output.push_str(&log_table.render(&report.game_log, display));
    }
    output.push('\n');

    // Summary keeps Totals above Averages regardless of sort
    let summary = side_table(split_columns(), SortState::new());
    output.push_str(&format_header("Season", false, display));
    output.push_str(&summary.render(&summary_rows(&report.totals, &report.averages), display));
    output.push('\n');

    output.push_str(&format_splits("Splits (Totals)", &report.splits_totals, sort, display));
    output.push('\n');
    output.push_str(&format_splits("Splits (Averages)", &report.splits_averages, sort, display));
    Ok(output)
}

pub async fn run(
    client: &dyn StatsProvider,
    player_id: i64,
    sort: SortState<ColumnKey>,
    config: &Config,
) -> Result<()> {
    let report = load_player_report(client, player_id)
        .await
        .with_context(|| format!("Failed to fetch player {}", player_id))?;
    print!("{}", format_player_report(&report, sort, &config.display)?);
    Ok(())
}
