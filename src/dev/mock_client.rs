/// Mock stats API client for development and testing
use crate::client::ApiError;
use crate::data_provider::StatsProvider;
use crate::fixtures;
use crate::types::{
    Game, GameLogEntry, Leaders, Me, NewGame, NewPlayer, NewUser, Player, PlayerAnalytics, Role,
    Splits, StatLine, StatTotals, TokenResponse,
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

/// Password every mock account accepts
pub const MOCK_PASSWORD: &str = "password";

const TOKEN_PREFIX: &str = "mock-token-";

#[derive(Debug, Clone)]
struct MockUser {
    id: i64,
    username: String,
    password: String,
    role: Role,
}

#[derive(Debug, Clone)]
struct MockData {
    users: Vec<MockUser>,
    players: Vec<Player>,
    games: Vec<Game>,
    stat_lines: Vec<StatLine>,
}

impl MockData {
    fn user(&self, username: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Registered users keep their role; anyone else is a viewer
    fn role_for(&self, username: &str) -> Role {
        self.user(username).map(|u| u.role).unwrap_or(Role::Viewer)
    }

    fn next_user_id(&self) -> i64 {
        self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1
    }

    fn next_player_id(&self) -> i64 {
        self.players.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn next_game_id(&self) -> i64 {
        self.games.iter().map(|g| g.id).max().unwrap_or(0) + 1
    }

    fn next_line_id(&self) -> i64 {
        self.stat_lines.iter().filter_map(|l| l.id).max().unwrap_or(0) + 1
    }
}

/// In-memory client that serves fixture data instead of making real API calls
///
/// Unregistered usernames log in as viewers with [`MOCK_PASSWORD`]. The
/// seeded "admin" account (same password) and accounts created through
/// `create_user` use their own password and role. Reads are always allowed,
/// mutations need an admin token. The client starts logged in as admin.
#[derive(Debug)]
pub struct MockClient {
    data: RwLock<MockData>,
    token: RwLock<Option<String>>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    pub fn new() -> Self {
        info!("Creating MockClient for development mode");
        Self {
            data: RwLock::new(MockData {
                users: vec![MockUser {
                    id: 1,
                    username: "admin".to_string(),
                    password: MOCK_PASSWORD.to_string(),
                    role: Role::Admin,
                }],
                players: fixtures::create_mock_players(),
                games: fixtures::create_mock_games(),
                stat_lines: fixtures::create_mock_stat_lines(),
            }),
            token: RwLock::new(Some(format!("{}admin", TOKEN_PREFIX))),
        }
    }

    /// Client with no session
    pub fn logged_out() -> Self {
        Self {
            token: RwLock::new(None),
            ..Self::new()
        }
    }

    async fn current_user(&self) -> Result<String, ApiError> {
        self.token
            .read()
            .await
            .as_deref()
            .and_then(|t| t.strip_prefix(TOKEN_PREFIX))
            .map(str::to_string)
            .ok_or(ApiError::Unauthorized)
    }

    async fn require_admin(&self) -> Result<(), ApiError> {
        let username = self.current_user().await?;
        if self.data.read().await.role_for(&username) == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[async_trait]
impl StatsProvider for MockClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        info!("MockClient: login for {}", username);
        let expected = match self.data.read().await.user(username) {
            Some(user) => user.password.clone(),
            None => MOCK_PASSWORD.to_string(),
        };
        if username.is_empty() || password != expected {
            return Err(ApiError::Unauthorized);
        }
        Ok(TokenResponse {
            access_token: format!("{}{}", TOKEN_PREFIX, username),
            token_type: "bearer".to_string(),
        })
    }

    async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn me(&self) -> Result<Me, ApiError> {
        let username = self.current_user().await?;
        Ok(Me {
            role: self.data.read().await.role_for(&username),
            username,
        })
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64, ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        if data.user(&user.username).is_some() {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }
        let id = data.next_user_id();
        data.users.push(MockUser {
            id,
            username: user.username.clone(),
            password: user.password.clone(),
            role: user.role,
        });
        info!("MockClient: Created user {} ({})", user.username, user.role);
        Ok(id)
    }

    async fn players(&self) -> Result<Vec<Player>, ApiError> {
        info!("MockClient: Returning mock players");
        let mut players = self.data.read().await.players.clone();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
        self.data
            .read()
            .await
            .players
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<i64, ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        let id = data.next_player_id();
        data.players.push(Player {
            id,
            name: player.name.clone(),
            jersey_number: player.jersey_number,
            position: player.position.clone(),
        });
        info!("MockClient: Created player {}", id);
        Ok(id)
    }

    async fn delete_player(&self, player_id: i64) -> Result<(), ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        let before = data.players.len();
        data.players.retain(|p| p.id != player_id);
        if data.players.len() == before {
            return Err(ApiError::NotFound("Player not found".to_string()));
        }
        data.stat_lines.retain(|l| l.player_id != player_id);
        Ok(())
    }

    async fn player_game_log(&self, player_id: i64) -> Result<Vec<GameLogEntry>, ApiError> {
        let data = self.data.read().await;
        Ok(fixtures::player_game_log(&data.games, &data.stat_lines, player_id))
    }

    async fn player_totals(&self, player_id: i64) -> Result<StatTotals, ApiError> {
        let data = self.data.read().await;
        Ok(fixtures::sum_lines(
            data.stat_lines.iter().filter(|l| l.player_id == player_id),
        ))
    }

    async fn player_averages(&self, player_id: i64) -> Result<StatTotals, ApiError> {
        let data = self.data.read().await;
        let own: Vec<StatLine> = data
            .stat_lines
            .iter()
            .filter(|l| l.player_id == player_id)
            .cloned()
            .collect();
        Ok(fixtures::line_averages(&own))
    }

    async fn player_splits_totals(&self, player_id: i64) -> Result<Splits, ApiError> {
        let data = self.data.read().await;
        let own: Vec<StatLine> = data
            .stat_lines
            .iter()
            .filter(|l| l.player_id == player_id)
            .cloned()
            .collect();
        Ok(fixtures::splits(&data.games, &own, false))
    }

    async fn player_splits_averages(&self, player_id: i64) -> Result<Splits, ApiError> {
        let data = self.data.read().await;
        let own: Vec<StatLine> = data
            .stat_lines
            .iter()
            .filter(|l| l.player_id == player_id)
            .cloned()
            .collect();
        Ok(fixtures::splits(&data.games, &own, true))
    }

    async fn games(&self) -> Result<Vec<Game>, ApiError> {
        info!("MockClient: Returning mock games");
        let mut games = self.data.read().await.games.clone();
        games.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(games)
    }

    async fn game(&self, game_id: i64) -> Result<Game, ApiError> {
        self.data
            .read()
            .await
            .games
            .iter()
            .find(|g| g.id == game_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))
    }

    async fn create_game(&self, game: &NewGame) -> Result<i64, ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        if data
            .games
            .iter()
            .any(|g| g.date == game.date && g.opponent == game.opponent)
        {
            return Err(ApiError::Conflict("Game already exists".to_string()));
        }
        let id = data.next_game_id();
        data.games.push(Game {
            id,
            date: game.date.clone(),
            opponent: game.opponent.clone(),
            location: Some(game.location.to_string()),
        });
        info!("MockClient: Created game {}", id);
        Ok(id)
    }

    async fn delete_game(&self, game_id: i64) -> Result<(), ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        let before = data.games.len();
        data.games.retain(|g| g.id != game_id);
        if data.games.len() == before {
            return Err(ApiError::NotFound("Game not found".to_string()));
        }
        data.stat_lines.retain(|l| l.game_id != game_id);
        Ok(())
    }

    async fn stat_lines_for_game(&self, game_id: i64) -> Result<Vec<StatLine>, ApiError> {
        Ok(self
            .data
            .read()
            .await
            .stat_lines
            .iter()
            .filter(|l| l.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn upsert_stat_line(&self, line: &StatLine) -> Result<(), ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        let existing = data
            .stat_lines
            .iter()
            .position(|l| l.player_id == line.player_id && l.game_id == line.game_id);
        match existing {
            Some(index) => {
                let id = data.stat_lines[index].id;
                data.stat_lines[index] = StatLine { id, ..line.clone() };
            }
            None => {
                let id = Some(data.next_line_id());
                data.stat_lines.push(StatLine { id, ..line.clone() });
            }
        }
        Ok(())
    }

    async fn delete_stat_line(&self, player_id: i64, game_id: i64) -> Result<(), ApiError> {
        self.require_admin().await?;
        let mut data = self.data.write().await;
        let before = data.stat_lines.len();
        data.stat_lines
            .retain(|l| !(l.player_id == player_id && l.game_id == game_id));
        if data.stat_lines.len() == before {
            return Err(ApiError::NotFound("Stat line not found".to_string()));
        }
        Ok(())
    }

    async fn analytics_players(&self) -> Result<Vec<PlayerAnalytics>, ApiError> {
        let data = self.data.read().await;
        Ok(fixtures::analytics_players(&data.players, &data.stat_lines))
    }

    async fn leaders(&self, limit: u32) -> Result<Leaders, ApiError> {
        let data = self.data.read().await;
        Ok(fixtures::leaders(&data.players, &data.stat_lines, limit))
    }

    async fn team_totals(&self) -> Result<StatTotals, ApiError> {
        Ok(fixtures::team_totals(&self.data.read().await.stat_lines))
    }

    async fn team_averages(&self) -> Result<StatTotals, ApiError> {
        Ok(fixtures::team_averages(&self.data.read().await.stat_lines))
    }

    async fn team_splits_totals(&self) -> Result<Splits, ApiError> {
        let data = self.data.read().await;
        Ok(fixtures::team_splits(&data.games, &data.stat_lines, false))
    }

    async fn team_splits_averages(&self) -> Result<Splits, ApiError> {
        let data = self.data.read().await;
        Ok(fixtures::team_splits(&data.games, &data.stat_lines, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::{load_analytics, load_box_score, load_player_report};
    use crate::types::Location;

    #[tokio::test]
    async fn test_login_and_me() {
        let client = MockClient::logged_out();
        assert!(matches!(client.me().await, Err(ApiError::Unauthorized)));

        let token = client.login("coach", MOCK_PASSWORD).await.unwrap();
        client.set_token(Some(token.access_token)).await;
        let me = client.me().await.unwrap();
        assert_eq!(me.username, "coach");
        assert_eq!(me.role, Role::Viewer);
    }

    #[tokio::test]
    async fn test_created_user_logs_in_with_own_password_and_role() {
        let client = MockClient::new();
        let user = NewUser {
            username: "scorer".into(),
            password: "s3cret".into(),
            role: Role::Admin,
        };
        assert_eq!(client.create_user(&user).await.unwrap(), 2);
        assert!(matches!(
            client.create_user(&user).await,
            Err(ApiError::Conflict(detail)) if detail == "Username already exists"
        ));

        assert!(client.login("scorer", MOCK_PASSWORD).await.is_err());
        let token = client.login("scorer", "s3cret").await.unwrap();
        client.set_token(Some(token.access_token)).await;
        assert_eq!(client.me().await.unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let client = MockClient::logged_out();
        assert!(matches!(
            client.login("admin", "nope").await,
            Err(ApiError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_viewer_cannot_mutate() {
        let client = MockClient::new();
        client.set_token(Some("mock-token-fan".into())).await;
        let result = client
            .create_player(&NewPlayer { name: "New".into(), jersey_number: None, position: None })
            .await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[tokio::test]
    async fn test_create_and_delete_player() {
        let client = MockClient::new();
        let id = client
            .create_player(&NewPlayer {
                name: "Gus Hale".into(),
                jersey_number: Some(9),
                position: Some("C".into()),
            })
            .await
            .unwrap();
        assert_eq!(id, 7);
        assert_eq!(client.player(id).await.unwrap().name, "Gus Hale");

        client.delete_player(1).await.unwrap();
        assert!(matches!(client.player(1).await, Err(ApiError::NotFound(_))));
        // Stat lines go with the player
        assert_eq!(client.player_game_log(1).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_game_conflicts() {
        let client = MockClient::new();
        let game = NewGame { date: "2025-01-10".into(), opponent: "Rivals".into(), location: Location::Home };
        assert!(matches!(client.create_game(&game).await, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_line() {
        let client = MockClient::new();
        let line = StatLine { player_id: 1, game_id: 1, points: 40, starter: 1, ..Default::default() };
        client.upsert_stat_line(&line).await.unwrap();

        let lines = client.stat_lines_for_game(1).await.unwrap();
        let ada: Vec<_> = lines.iter().filter(|l| l.player_id == 1).collect();
        assert_eq!(ada.len(), 1);
        assert_eq!(ada[0].points, 40);
        assert_eq!(ada[0].id, Some(1));
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_line() {
        let client = MockClient::new();
        let line = StatLine { player_id: 6, game_id: 5, points: 3, ..Default::default() };
        client.upsert_stat_line(&line).await.unwrap();
        assert_eq!(client.stat_lines_for_game(5).await.unwrap().len(), 1);

        client.delete_stat_line(6, 5).await.unwrap();
        assert!(matches!(
            client.delete_stat_line(6, 5).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_loaders_compose_pages() {
        let client = MockClient::new();

        let report = load_player_report(&client, 1).await.unwrap();
        assert_eq!(report.player.name, "Ada Brooks");
        assert_eq!(report.game_log.len(), 4);
        assert_eq!(report.totals.points, 90.0);
        assert_eq!(report.averages.points, 22.5);

        let analytics = load_analytics(&client, 2).await.unwrap();
        assert_eq!(analytics.players.len(), 6);
        assert_eq!(analytics.leaders.0["points"].len(), 2);
        assert_eq!(analytics.splits_totals.location.len(), 2);

        let box_score = load_box_score(&client, 1).await.unwrap();
        assert_eq!(box_score.game.opponent, "Rivals");
        assert_eq!(box_score.stat_lines.len(), 5);
    }

    #[tokio::test]
    async fn test_missing_player_report_fails() {
        let client = MockClient::new();
        assert!(matches!(
            load_player_report(&client, 99).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
