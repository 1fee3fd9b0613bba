//! HTTP client for the team stats API

use crate::session::SessionStore;
use crate::types::{
    Game, GameLogEntry, Leaders, Me, NewGame, NewPlayer, NewUser, Player, PlayerAnalytics, Splits,
    StatLine, StatTotals, TokenResponse,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not logged in or session expired; run `hoops login`")]
    Unauthorized,
    #[error("admin permission required")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success status and its body to an error
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let detail = error_detail(&body);
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            StatusCode::CONFLICT => ApiError::Conflict(detail),
            status => ApiError::Status {
                status: status.as_u16(),
                body: detail,
            },
        }
    }
}

/// Pull the `detail` message out of an error body, if there is one
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct Detail {
        detail: serde_json::Value,
    }

    match serde_json::from_str::<Detail>(body) {
        Ok(Detail { detail: serde_json::Value::String(message) }) => message,
        Ok(Detail { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Deserialize)]
struct CreatedPlayer {
    player_id: i64,
}

#[derive(Deserialize)]
struct CreatedUser {
    user_id: i64,
}

#[derive(Deserialize)]
struct CreatedGame {
    game_id: i64,
}

/// Responses whose content we don't need (`{"deleted": true}`, `{"ok": true}`)
#[derive(Deserialize)]
struct Ignored {}

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// API client with bearer token authentication
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    store: Option<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        info!("Creating API client with base URL: {}", base_url);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            store: None,
        })
    }

    /// Use `token` for authenticated requests
    pub fn with_token(self, token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
            ..self
        }
    }

    /// Clear this store whenever the server rejects the token
    pub fn with_session_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn forget_session(&self) {
        self.set_token(None).await;
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!("Failed to clear session after 401: {:#}", e);
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).await.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Request rejected with 401, clearing session");
            self.forget_session().await;
        }
        Err(ApiError::from_status(status, body))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.execute(self.client.get(&url)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);
        self.execute(self.client.post(&url).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("PUT {}", url);
        self.execute(self.client.put(&url).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        self.execute(self.client.delete(&url)).await
    }

    // Endpoints

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = self.url("/auth/token");
        debug!("POST {} (user {})", url, username);
        let request = self
            .client
            .post(&url)
            .form(&LoginForm { username, password });
        self.execute(request).await
    }

    pub async fn me(&self) -> Result<Me, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<i64, ApiError> {
        let created: CreatedUser = self.post("/auth/users", user).await?;
        Ok(created.user_id)
    }

    pub async fn players(&self) -> Result<Vec<Player>, ApiError> {
        self.get("/players/").await
    }

    pub async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
        self.get(&format!("/players/{}", player_id)).await
    }

    pub async fn create_player(&self, player: &NewPlayer) -> Result<i64, ApiError> {
        let created: CreatedPlayer = self.post("/players/", player).await?;
        Ok(created.player_id)
    }

    pub async fn delete_player(&self, player_id: i64) -> Result<(), ApiError> {
        let _: Ignored = self.delete(&format!("/players/{}", player_id)).await?;
        Ok(())
    }

    pub async fn player_game_log(&self, player_id: i64) -> Result<Vec<GameLogEntry>, ApiError> {
        self.get(&format!("/players/{}/game-log", player_id)).await
    }

    pub async fn player_totals(&self, player_id: i64) -> Result<StatTotals, ApiError> {
        self.get(&format!("/players/{}/totals", player_id)).await
    }

    pub async fn player_averages(&self, player_id: i64) -> Result<StatTotals, ApiError> {
        self.get(&format!("/players/{}/averages", player_id)).await
    }

    pub async fn player_splits_totals(&self, player_id: i64) -> Result<Splits, ApiError> {
        self.get(&format!("/players/{}/splits/totals", player_id)).await
    }

    pub async fn player_splits_averages(&self, player_id: i64) -> Result<Splits, ApiError> {
        self.get(&format!("/players/{}/splits/averages", player_id)).await
    }

    pub async fn games(&self) -> Result<Vec<Game>, ApiError> {
        self.get("/games/").await
    }

    pub async fn game(&self, game_id: i64) -> Result<Game, ApiError> {
        self.get(&format!("/games/{}", game_id)).await
    }

    pub async fn create_game(&self, game: &NewGame) -> Result<i64, ApiError> {
        let created: CreatedGame = self.post("/games/", game).await?;
        Ok(created.game_id)
    }

    pub async fn delete_game(&self, game_id: i64) -> Result<(), ApiError> {
        let _: Ignored = self.delete(&format!("/games/{}", game_id)).await?;
        Ok(())
    }

    pub async fn stat_lines_for_game(&self, game_id: i64) -> Result<Vec<StatLine>, ApiError> {
        self.get(&format!("/stat-lines/by-game/{}", game_id)).await
    }

    pub async fn upsert_stat_line(&self, line: &StatLine) -> Result<(), ApiError> {
        let _: Ignored = self.put("/stat-lines/upsert", line).await?;
        Ok(())
    }

    pub async fn delete_stat_line(&self, player_id: i64, game_id: i64) -> Result<(), ApiError> {
        let path = format!("/stat-lines/by-player/{}/by-game/{}", player_id, game_id);
        let _: Ignored = self.delete(&path).await?;
        Ok(())
    }

    pub async fn analytics_players(&self) -> Result<Vec<PlayerAnalytics>, ApiError> {
        self.get("/analytics/players").await
    }

    pub async fn leaders(&self, limit: u32) -> Result<Leaders, ApiError> {
        self.get(&format!("/analytics/leaders?limit={}", limit)).await
    }

    pub async fn team_totals(&self) -> Result<StatTotals, ApiError> {
        self.get("/analytics/team/totals").await
    }

    pub async fn team_averages(&self) -> Result<StatTotals, ApiError> {
        self.get("/analytics/team/averages").await
    }

    pub async fn team_splits_totals(&self) -> Result<Splits, ApiError> {
        self.get("/analytics/team/splits/totals").await
    }

    pub async fn team_splits_averages(&self) -> Result<Splits, ApiError> {
        self.get("/analytics/team/splits/averages").await
    }
}
