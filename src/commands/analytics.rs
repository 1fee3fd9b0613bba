use crate::columns::{analytics_columns, split_columns, ColumnKey, StatMode};
use crate::commands::player::{format_splits, summary_rows};
use crate::commands::{main_table, side_table};
use crate::config::{Config, DisplayConfig};
use crate::data_provider::{load_analytics, StatsProvider};
use crate::formatting::{format_header, format_minutes, format_stat, player_label};
use crate::sort::SortState;
use crate::types::{AnalyticsReport, Leaders, Stat};
use anyhow::{Context, Result};

/// One line per leaderboard: "Points Leaders: #23 Ada 90, #4 Bo 51"
pub fn format_leaders(leaders: &Leaders, display: &DisplayConfig) -> String {
    let mut output = format_header("Leaders", false, display);
    let boards = leaders.boards();
    if boards.is_empty() {
        output.push_str("No leaders yet.\n");
        return output;
    }

    let title_width = boards
        .iter()
        .map(|(stat, _)| stat.title().len())
        .max()
        .unwrap_or(0)
        + " Leaders:".len();

    for (stat, rows) in boards {
        let entries: Vec<String> = rows
            .iter()
            .map(|row| {
                let value = if stat == Stat::Minutes {
                    format_minutes(row.value)
                } else {
                    format_stat(row.value)
                };
                format!("{} {}", player_label(&row.name, row.jersey_number, None), value)
            })
            .collect();
        let title = format!("{} Leaders:", stat.title());
        let entries = if entries.is_empty() {
            "-".to_string()
        } else {
            entries.join(", ")
        };
        output.push_str(&format!("{:<width$} {}\n", title, entries, width = title_width));
    }
    output
}

pub fn format_analytics(
    report: &AnalyticsReport,
    mode: StatMode,
    sort: SortState<ColumnKey>,
    display: &DisplayConfig,
) -> Result<String> {
    let players = main_table(analytics_columns(mode), sort)?;
    let mut output = format_header("Team Analytics", true, display);
    output.push('\n');

    output.push_str(&format_leaders(&report.leaders, display));
    output.push('\n');

    let summary = side_table(split_columns(), SortState::new());
    output.push_str(&format_header("Team", false, display));
    output.push_str(&summary.render(
        &summary_rows(&report.team_totals, &report.team_averages),
        display,
    ));
    output.push('\n');

    let splits = match mode {
        StatMode::Totals => &report.splits_totals,
        StatMode::Averages => &report.splits_averages,
    };
    output.push_str(&format_splits(
        &format!("Team Splits ({})", mode.label()),
        splits,
        sort,
        display,
    ));
    output.push('\n');

    output.push_str(&format_header(&format!("Players ({})", mode.label()), false, display));
    output.push_str(&players.render(&report.players, display));
    Ok(output)
}

pub async fn run(
    client: &dyn StatsProvider,
    limit: Option<u32>,
    averages: bool,
    sort: SortState<ColumnKey>,
    config: &Config,
) -> Result<()> {
    let limit = limit.unwrap_or(config.leaders_limit);
    let report = load_analytics(client, limit)
        .await
        .context("Failed to fetch analytics")?;
    let mode = if averages { StatMode::Averages } else { StatMode::Totals };
    print!("{}", format_analytics(&report, mode, sort, &config.display)?);
    Ok(())
}
