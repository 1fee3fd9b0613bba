use crate::commands::require_admin;
use crate::data_provider::StatsProvider;
use crate::formatting::{format_minutes, parse_minutes};
use crate::session::Session;
use crate::types::StatLine;
use anyhow::{bail, Context, Result};

/// Values entered for one player's game
///
/// Anything left unset is recorded as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatEntry {
    pub minutes: Option<String>,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub fg: u32,
    pub fga: u32,
    pub fg3: u32,
    pub fga3: u32,
    pub ft: u32,
    pub fta: u32,
    pub plus_minus: i64,
    pub starter: bool,
}

impl StatEntry {
    /// Validate the entry and turn it into the line sent to the API
    pub fn to_stat_line(&self, game_id: i64, player_id: i64) -> Result<StatLine> {
        let minutes = match &self.minutes {
            Some(value) => parse_minutes(value)?,
            None => 0.0,
        };

        let shots = [
            ("FG", self.fg, "FGA", self.fga),
            ("FG3", self.fg3, "FGA3", self.fga3),
            ("FT", self.ft, "FTA", self.fta),
        ];
        for (made_label, made, attempted_label, attempted) in shots {
            if made > attempted {
                bail!(
                    "{} ({}) cannot exceed {} ({})",
                    made_label,
                    made,
                    attempted_label,
                    attempted
                );
            }
        }
        if self.fg3 > self.fg {
            bail!("FG3 ({}) cannot exceed FG ({})", self.fg3, self.fg);
        }

        Ok(StatLine {
            id: None,
            player_id,
            game_id,
            minutes,
            points: i64::from(self.points),
            rebounds: i64::from(self.rebounds),
            assists: i64::from(self.assists),
            steals: i64::from(self.steals),
            blocks: i64::from(self.blocks),
            turnovers: i64::from(self.turnovers),
            fouls: i64::from(self.fouls),
            fg: i64::from(self.fg),
            fga: i64::from(self.fga),
            fg3: i64::from(self.fg3),
            fga3: i64::from(self.fga3),
            ft: i64::from(self.ft),
            fta: i64::from(self.fta),
            pm: self.plus_minus,
            starter: i64::from(self.starter),
        })
    }
}

/// Create or replace the stat line for a player in a game
pub async fn set(
    client: &dyn StatsProvider,
    session: &Session,
    game_id: i64,
    player_id: i64,
    entry: &StatEntry,
) -> Result<()> {
    require_admin(session)?;
    let line = entry.to_stat_line(game_id, player_id)?;
    client
        .upsert_stat_line(&line)
        .await
        .with_context(|| format!("Failed to save stats for player {} in game {}", player_id, game_id))?;
    tracing::info!("Saved stat line for player {} in game {}", player_id, game_id);
    println!(
        "Saved player {} in game {}: {} MIN, {} PTS",
        player_id,
        game_id,
        format_minutes(line.minutes),
        line.points
    );
    Ok(())
}

pub async fn remove(
    client: &dyn StatsProvider,
    session: &Session,
    game_id: i64,
    player_id: i64,
) -> Result<()> {
    require_admin(session)?;
    client
        .delete_stat_line(player_id, game_id)
        .await
        .with_context(|| format!("Failed to delete stats for player {} in game {}", player_id, game_id))?;
    println!("Deleted stats for player {} in game {}", player_id, game_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_to_stat_line() {
        let entry = StatEntry {
            minutes: Some("31:30".into()),
            points: 18,
            fg: 7,
            fga: 15,
            fg3: 2,
            fga3: 5,
            ft: 2,
            fta: 2,
            plus_minus: -4,
            starter: true,
            ..Default::default()
        };
        let line = entry.to_stat_line(3, 8).unwrap();
        assert_eq!(line.game_id, 3);
        assert_eq!(line.player_id, 8);
        assert_eq!(line.minutes, 31.5);
        assert_eq!(line.points, 18);
        assert_eq!(line.pm, -4);
        assert_eq!(line.starter, 1);
        assert_eq!(line.id, None);
    }

    #[test]
    fn test_entry_defaults_to_zero() {
        let line = StatEntry::default().to_stat_line(1, 1).unwrap();
        assert_eq!(line.minutes, 0.0);
        assert_eq!(line.points, 0);
        assert_eq!(line.starter, 0);
    }

    #[test]
    fn test_entry_rejects_bad_minutes() {
        let entry = StatEntry { minutes: Some("ten".into()), ..Default::default() };
        assert!(entry.to_stat_line(1, 1).is_err());
    }

    #[test]
    fn test_entry_rejects_made_over_attempted() {
        let entry = StatEntry { ft: 3, fta: 2, ..Default::default() };
        let err = entry.to_stat_line(1, 1).unwrap_err();
        assert_eq!(err.to_string(), "FT (3) cannot exceed FTA (2)");

        let entry = StatEntry { fg: 1, fga: 4, fg3: 2, fga3: 3, ..Default::default() };
        assert!(entry.to_stat_line(1, 1).is_err());
    }
}
