use crate::columns::{box_score_columns, box_score_rows, ColumnKey};
use crate::commands::main_table;
use crate::config::{Config, DisplayConfig};
use crate::data_provider::{load_box_score, StatsProvider};
use crate::formatting::format_header;
use crate::sort::SortState;
use crate::types::BoxScore;
use anyhow::{Context, Result};

/// Box score: starters, then bench, then the team totals row
///
/// Sorting applies within the starters and within the bench; the totals
/// row always stays last.
pub fn format_box_score(
    box_score: &BoxScore,
    sort: SortState<ColumnKey>,
    display: &DisplayConfig,
) -> Result<String> {
    let table = main_table(box_score_columns(), sort)?;
    let game = &box_score.game;

    let title = match &game.location {
        Some(location) => format!("{} vs {} ({})", game.date, game.opponent, location),
        None => format!("{} vs {}", game.date, game.opponent),
    };
    let mut output = format_header(&title, true, display);

    if box_score.stat_lines.is_empty() {
        output.push_str("No stats recorded for this game.\n");
        return Ok(output);
    }

    let rows = box_score_rows(box_score);
    let separator = table.separator_line(display);

    output.push_str(&table.header_line());
    output.push('\n');
    output.push_str(&separator);
    output.push('\n');
    for group in [&rows.starters, &rows.bench] {
        if group.is_empty() {
            continue;
        }
        for cells in table.formatted_rows(group) {
            output.push_str(&table.format_line(&cells));
            output.push('\n');
        }
        output.push_str(&separator);
        output.push('\n');
    }
    output.push_str(&table.format_line(&table.cells(&rows.totals)));
    output.push('\n');
    Ok(output)
}

pub async fn run(
    client: &dyn StatsProvider,
    game_id: i64,
    sort: SortState<ColumnKey>,
    config: &Config,
) -> Result<()> {
    let box_score = load_box_score(client, game_id)
        .await
        .with_context(|| format!("Failed to fetch box score for game {}", game_id))?;
    print!("{}", format_box_score(&box_score, sort, &config.display)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sort_from_args;
    use crate::fixtures::{create_mock_games, create_mock_players, create_mock_stat_lines};
    use crate::types::Stat;

    fn box_score(game_id: i64) -> BoxScore {
        BoxScore {
            game: create_mock_games().into_iter().find(|g| g.id == game_id).unwrap(),
            players: create_mock_players(),
            stat_lines: create_mock_stat_lines()
                .into_iter()
                .filter(|l| l.game_id == game_id)
                .collect(),
        }
    }

    #[test]
    fn test_box_score_layout() {
        let display = DisplayConfig::from_use_unicode(false);
        let output = format_box_score(&box_score(1), SortState::new(), &display).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "2025-01-10 vs Rivals (Home)");
        assert!(lines[2].starts_with("Player"));
        // 3 starters, separator, 2 bench, separator, totals
        assert!(lines[4].starts_with("#23 Ada Brooks"));
        assert!(lines[7].starts_with("---"));
        assert!(lines[8].starts_with("#7 Dee Ellis"));
        assert!(lines[9].starts_with("Eli Fox"));
        assert!(lines[10].starts_with("---"));
        assert!(lines[11].starts_with("Team"));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_box_score_sort_within_groups() {
        let display = DisplayConfig::from_use_unicode(false);
        let sort = sort_from_args(Some(ColumnKey::Stat(Stat::Points)), true);
        let output = format_box_score(&box_score(1), sort, &display).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[2].contains("PTS▲"));
        assert!(lines[4].starts_with("#11 Cy Dunn"));
        assert!(lines[6].starts_with("#23 Ada Brooks"));
        assert!(lines[8].starts_with("Eli Fox"));
        assert!(lines[11].starts_with("Team"));
    }

    #[test]
    fn test_box_score_without_lines() {
        let display = DisplayConfig::default();
        let output = format_box_score(&box_score(5), SortState::new(), &display).unwrap();
        assert!(output.contains("No stats recorded"));
    }
}
