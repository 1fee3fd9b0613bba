use crate::columns::{roster_columns, ColumnKey};
use crate::commands::{main_table, require_admin};
use crate::config::{Config, DisplayConfig};
use crate::data_provider::StatsProvider;
use crate::formatting::format_header;
use crate::session::Session;
use crate::sort::SortState;
use crate::types::{NewPlayer, Player};
use anyhow::{bail, Context, Result};

pub fn format_players(
    players: &[Player],
    sort: SortState<ColumnKey>,
    display: &DisplayConfig,
) -> Result<String> {
    let table = main_table(roster_columns(), sort)?;
    let mut output = format_header("Roster", true, display);
    if players.is_empty() {
        output.push_str("No players yet.\n");
        return Ok(output);
    }
    output.push_str(&table.render(players, display));
    Ok(output)
}

pub async fn run(client: &dyn StatsProvider, sort: SortState<ColumnKey>, config: &Config) -> Result<()> {
    let players = client.players().await.context("Failed to fetch players")?;
    print!("{}", format_players(&players, sort, &config.display)?);
    Ok(())
}

pub async fn add(client: &dyn StatsProvider, session: &Session, player: NewPlayer) -> Result<()> {
    require_admin(session)?;
    if player.name.trim().is_empty() {
        bail!("Player name cannot be empty");
    }
    let player = NewPlayer {
        name: player.name.trim().to_string(),
        position: player.position.filter(|p| !p.trim().is_empty()),
        ..player
    };
    let id = client
        .create_player(&player)
        .await
        .context("Failed to create player")?;
    tracing::info!("Created player {} ({})", id, player.name);
    println!("Created player {} ({})", id, player.name);
    Ok(())
}

pub async fn remove(client: &dyn StatsProvider, session: &Session, player_id: i64) -> Result<()> {
    require_admin(session)?;
    client
        .delete_player(player_id)
        .await
        .with_context(|| format!("Failed to delete player {}", player_id))?;
    println!("Deleted player {}", player_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sort_from_args;
    use crate::fixtures::create_mock_players;

    #[test]
    fn test_format_players_in_source_order() {
        let display = DisplayConfig::from_use_unicode(false);
        let output = format_players(&create_mock_players(), SortState::new(), &display).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Roster");
        assert!(lines[2].starts_with("Name"));
        assert!(lines[4].starts_with("Ada Brooks"));
        assert!(lines[9].starts_with("Flo Grant"));
    }

    #[test]
    fn test_format_players_sorted_by_jersey() {
        let display = DisplayConfig::from_use_unicode(false);
        let sort = sort_from_args(Some(ColumnKey::Jersey), false);
        let output = format_players(&create_mock_players(), sort, &display).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[2].contains("Jersey #▼"));
        assert!(lines[4].starts_with("Flo Grant"));
        assert!(lines[9].starts_with("Eli Fox"));
    }

    #[test]
    fn test_format_players_empty() {
        let display = DisplayConfig::default();
        let output = format_players(&[], SortState::new(), &display).unwrap();
        assert!(output.contains("No players yet."));
    }
}
