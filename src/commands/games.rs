use crate::columns::{games_columns, ColumnKey};
use crate::commands::{main_table, parse_game_date, require_admin};
use crate::config::{Config, DisplayConfig};
use crate::data_provider::StatsProvider;
use crate::formatting::format_header;
use crate::session::Session;
use crate::sort::SortState;
use crate::types::{Game, Location, NewGame};
use anyhow::{bail, Context, Result};

pub fn format_games(games: &[Game], sort: SortState<ColumnKey>, display: &DisplayConfig) -> Result<String> {
    let table = main_table(games_columns(), sort)?;
    let mut output = format_header("Games", true, display);
    if games.is_empty() {
        output.push_str("No games scheduled.\n");
        return Ok(output);
    }
    output.push_str(&table.render(games, display));
    Ok(output)
}

pub async fn run(client: &dyn StatsProvider, sort: SortState<ColumnKey>, config: &Config) -> Result<()> {
    let games = client.games().await.context("Failed to fetch games")?;
    print!("{}", format_games(&games, sort, &config.display)?);
    Ok(())
}

pub async fn add(
    client: &dyn StatsProvider,
    session: &Session,
    date: &str,
    opponent: &str,
    away: bool,
) -> Result<()> {
    require_admin(session)?;
    let date = parse_game_date(date)?;
    let opponent = opponent.trim();
    if opponent.is_empty() {
        bail!("Opponent cannot be empty");
    }
    let game = NewGame {
        date,
        opponent: opponent.to_string(),
        location: if away { Location::Away } else { Location::Home },
    };
    let id = client.create_game(&game).await.context("Failed to create game")?;
    println!("Created game {}: {} vs {} ({})", id, game.date, game.opponent, game.location);
    Ok(())
}

pub async fn remove(client: &dyn StatsProvider, session: &Session, game_id: i64) -> Result<()> {
    require_admin(session)?;
    client
        .delete_game(game_id)
        .await
        .with_context(|| format!("Failed to delete game {}", game_id))?;
    println!("Deleted game {}", game_id);
    Ok(())
}
