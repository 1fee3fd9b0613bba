/// Trait for providing team stats, abstracting over the real API client and mock implementations
use crate::client::{ApiClient, ApiError};
use crate::types::{
    AnalyticsReport, BoxScore, Game, GameLogEntry, Leaders, Me, NewGame, NewPlayer, NewUser,
    Player, PlayerAnalytics, PlayerReport, Splits, StatLine, StatTotals, TokenResponse,
};
use async_trait::async_trait;

/// Trait for stats data providers, implemented by both ApiClient and MockClient
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError>;

    /// Use `token` for subsequent requests
    async fn set_token(&self, token: Option<String>);

    /// Identity and role behind the current token
    async fn me(&self) -> Result<Me, ApiError>;

    /// Create a user account (admin only), returning its id
    async fn create_user(&self, user: &NewUser) -> Result<i64, ApiError>;

    async fn players(&self) -> Result<Vec<Player>, ApiError>;
    async fn player(&self, player_id: i64) -> Result<Player, ApiError>;
    async fn create_player(&self, player: &NewPlayer) -> Result<i64, ApiError>;
    async fn delete_player(&self, player_id: i64) -> Result<(), ApiError>;

    async fn player_game_log(&self, player_id: i64) -> Result<Vec<GameLogEntry>, ApiError>;
    async fn player_totals(&self, player_id: i64) -> Result<StatTotals, ApiError>;
    async fn player_averages(&self, player_id: i64) -> Result<StatTotals, ApiError>;
    async fn player_splits_totals(&self, player_id: i64) -> Result<Splits, ApiError>;
    async fn player_splits_averages(&self, player_id: i64) -> Result<Splits, ApiError>;

    async fn games(&self) -> Result<Vec<Game>, ApiError>;
    async fn game(&self, game_id: i64) -> Result<Game, ApiError>;
    async fn create_game(&self, game: &NewGame) -> Result<i64, ApiError>;
    async fn delete_game(&self, game_id: i64) -> Result<(), ApiError>;

    async fn stat_lines_for_game(&self, game_id: i64) -> Result<Vec<StatLine>, ApiError>;

    /// Create or replace the line for (player, game)
    async fn upsert_stat_line(&self, line: &StatLine) -> Result<(), ApiError>;
    async fn delete_stat_line(&self, player_id: i64, game_id: i64) -> Result<(), ApiError>;

    async fn analytics_players(&self) -> Result<Vec<PlayerAnalytics>, ApiError>;
    async fn leaders(&self, limit: u32) -> Result<Leaders, ApiError>;
    async fn team_totals(&self) -> Result<StatTotals, ApiError>;
    async fn team_averages(&self) -> Result<StatTotals, ApiError>;
    async fn team_splits_totals(&self) -> Result<Splits, ApiError>;
    async fn team_splits_averages(&self) -> Result<Splits, ApiError>;
}

/// Implement the trait for the HTTP client
#[async_trait]
impl StatsProvider for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        ApiClient::login(self, username, password).await
    }

    async fn set_token(&self, token: Option<String>) {
        ApiClient::set_token(self, token).await
    }

    async fn me(&self) -> Result<Me, ApiError> {
        ApiClient::me(self).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64, ApiError> {
        ApiClient::create_user(self, user).await
    }

    async fn players(&self) -> Result<Vec<Player>, ApiError> {
        ApiClient::players(self).await
    }

    async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
        ApiClient::player(self, player_id).await
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<i64, ApiError> {
        ApiClient::create_player(self, player).await
    }

    async fn delete_player(&self, player_id: i64) -> Result<(), ApiError> {
        ApiClient::delete_player(self, player_id).await
    }

    async fn player_game_log(&self, player_id: i64) -> Result<Vec<GameLogEntry>, ApiError> {
        ApiClient::player_game_log(self, player_id).await
    }

    async fn player_totals(&self, player_id: i64) -> Result<StatTotals, ApiError> {
        ApiClient::player_totals(self, player_id).await
    }

    async fn player_averages(&self, player_id: i64) -> Result<StatTotals, ApiError> {
        ApiClient::player_averages(self, player_id).await
    }

    async fn player_splits_totals(&self, player_id: i64) -> Result<Splits, ApiError> {
        ApiClient::player_splits_totals(self, player_id).await
    }

    async fn player_splits_averages(&self, player_id: i64) -> Result<Splits, ApiError> {
        ApiClient::player_splits_averages(self, player_id).await
    }

    async fn games(&self) -> Result<Vec<Game>, ApiError> {
        ApiClient::games(self).await
    }

    async fn game(&self, game_id: i64) -> Result<Game, ApiError> {
        ApiClient::game(self, game_id).await
    }

    async fn create_game(&self, game: &NewGame) -> Result<i64, ApiError> {
        ApiClient::create_game(self, game).await
    }

    async fn delete_game(&self, game_id: i64) -> Result<(), ApiError> {
        ApiClient::delete_game(self, game_id).await
    }

    async fn stat_lines_for_game(&self, game_id: i64) -> Result<Vec<StatLine>, ApiError> {
        ApiClient::stat_lines_for_game(self, game_id).await
    }

    async fn upsert_stat_line(&self, line: &StatLine) -> Result<(), ApiError> {
        ApiClient::upsert_stat_line(self, line).await
    }

    async fn delete_stat_line(&self, player_id: i64, game_id: i64) -> Result<(), ApiError> {
        ApiClient::delete_stat_line(self, player_id, game_id).await
    }

    async fn analytics_players(&self) -> Result<Vec<PlayerAnalytics>, ApiError> {
        ApiClient::analytics_players(self).await
    }

    async fn leaders(&self, limit: u32) -> Result<Leaders, ApiError> {
        ApiClient::leaders(self, limit).await
    }

    async fn team_totals(&self) -> Result<StatTotals, ApiError> {
        ApiClient::team_totals(self).await
    }

    async fn team_averages(&self) -> Result<StatTotals, ApiError> {
        ApiClient::team_averages(self).await
    }

    async fn team_splits_totals(&self) -> Result<Splits, ApiError> {
        ApiClient::team_splits_totals(self).await
    }

    async fn team_splits_averages(&self) -> Result<Splits, ApiError> {
        ApiClient::team_splits_averages(self).await
    }
}

/// Fetch everything shown on a player's page in parallel
pub async fn load_player_report(
    provider: &dyn StatsProvider,
    player_id: i64,
) -> Result<PlayerReport, ApiError> {
    let (player, game_log, totals, averages, splits_totals, splits_averages) = tokio::try_join!(
        provider.player(player_id),
        provider.player_game_log(player_id),
        provider.player_totals(player_id),
        provider.player_averages(player_id),
        provider.player_splits_totals(player_id),
        provider.player_splits_averages(player_id),
    )?;
    Ok(PlayerReport {
        player,
        game_log,
        totals,
        averages,
        splits_totals,
        splits_averages,
    })
}

/// Fetch everything shown on the analytics page in parallel
pub async fn load_analytics(
    provider: &dyn StatsProvider,
    leaders_limit: u32,
) -> Result<AnalyticsReport, ApiError> {
    let (players, leaders, team_totals, team_averages, splits_totals, splits_averages) = tokio::try_join!(
        provider.analytics_players(),
        provider.leaders(leaders_limit),
        provider.team_totals(),
        provider.team_averages(),
        provider.team_splits_totals(),
        provider.team_splits_averages(),
    )?;
    Ok(AnalyticsReport {
        players,
        leaders,
        team_totals,
        team_averages,
        splits_totals,
        splits_averages,
    })
}

/// Fetch a game with its stat lines and the roster they refer to
pub async fn load_box_score(provider: &dyn StatsProvider, game_id: i64) -> Result<BoxScore, ApiError> {
    let (game, players, stat_lines) = tokio::try_join!(
        provider.game(game_id),
        provider.players(),
        provider.stat_lines_for_game(game_id),
    )?;
    Ok(BoxScore {
        game,
        players,
        stat_lines,
    })
}
