use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::action::Action;
use super::state::AppState;
use crate::data_provider::{load_analytics, StatsProvider};

/// Side effect returned by the reducer
pub enum Effect {
    None,
    Action(Action),
    Batch(Vec<Effect>),
    Async(Pin<Box<dyn Future<Output = Action> + Send>>),
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Effect::None"),
            Self::Action(action) => f.debug_tuple("Effect::Action").field(action).finish(),
            Self::Batch(effects) => f.debug_tuple("Effect::Batch").field(effects).finish(),
            Self::Async(_) => write!(f, "Effect::Async(<future>)"),
        }
    }
}

/// Effect handler for data fetching operations
///
/// Each method returns an Effect that will dispatch the appropriate
/// *Loaded action when complete.
pub struct DataEffects {
    client: Arc<dyn StatsProvider>,
}

impl DataEffects {
    pub fn new(client: Arc<dyn StatsProvider>) -> Self {
        Self { client }
    }

    /// Handle a refresh request - reloads every tab's data
    pub fn handle_refresh(&self, state: &AppState) -> Effect {
        Effect::Batch(vec![
            self.fetch_players(),
            self.fetch_games(),
            self.fetch_analytics(state.system.config.leaders_limit),
        ])
    }

    pub fn fetch_players(&self) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = client.players().await;
            Action::PlayersLoaded(result.map_err(|e| e.to_string()))
        }))
    }

    pub fn fetch_games(&self) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = client.games().await;
            Action::GamesLoaded(result.map_err(|e| e.to_string()))
        }))
    }

    /// Fetch the analytics page (player table, leaders, team totals and splits)
    pub fn fetch_analytics(&self, leaders_limit: u32) -> Effect {
        let client = self.client.clone();
        Effect::Async(Box::pin(async move {
            let result = load_analytics(client.as_ref(), leaders_limit).await;
            Action::AnalyticsLoaded(result.map(Box::new).map_err(|e| e.to_string()))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::MockClient;

    fn create_effects() -> DataEffects {
        DataEffects::new(Arc::new(MockClient::new()))
    }

    #[test]
    fn test_handle_refresh_returns_batch_effect() {
        let effect = create_effects().handle_refresh(&AppState::default());
        match effect {
            Effect::Batch(effects) => {
                assert_eq!(effects.len(), 3);
                assert!(effects.iter().all(|e| matches!(e, Effect::Async(_))));
            }
            other => panic!("Expected Batch effect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_players_loads_roster() {
        let Effect::Async(future) = create_effects().fetch_players() else {
            panic!("Expected Async effect");
        };
        match future.await {
            Action::PlayersLoaded(Ok(players)) => assert_eq!(players.len(), 6),
            other => panic!("Unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_analytics_loads_report() {
        let Effect::Async(future) = create_effects().fetch_analytics(3) else {
            panic!("Expected Async effect");
        };
        match future.await {
            Action::AnalyticsLoaded(Ok(report)) => {
                assert_eq!(report.players.len(), 6);
                assert!(!report.leaders.0.is_empty());
            }
            other => panic!("Unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_games_without_session() {
        let effects = DataEffects::new(Arc::new(MockClient::logged_out()));
        let Effect::Async(future) = effects.fetch_games() else {
            panic!("Expected Async effect");
        };
        match future.await {
            Action::GamesLoaded(Ok(games)) => assert_eq!(games.len(), 5),
            other => panic!("Unexpected action {:?}", other),
        }
    }
}
