use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::{AppState, LoadingKey};
use crate::tui::types::Tab;
use crate::types::{AnalyticsReport, Game, Player};

/// Handle refresh requests and the results of data fetches
///
/// Loaded data replaces what was there; sort state and cursors are kept.
pub fn reduce_data_loading(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::RefreshData => Ok(handle_refresh_data(state)),
        Action::PlayersLoaded(result) => Ok(handle_players_loaded(state, result.clone())),
        Action::GamesLoaded(result) => Ok(handle_games_loaded(state, result.clone())),
        Action::AnalyticsLoaded(result) => Ok(handle_analytics_loaded(state, result.clone())),
        _ => Err(state),
    }
}

fn handle_refresh_data(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.data.loading.insert(LoadingKey::Players);
    new_state.data.loading.insert(LoadingKey::Games);
    new_state.data.loading.insert(LoadingKey::Analytics);
    new_state.system.clear_status_message();
    (new_state, Effect::None)
}

fn handle_players_loaded(state: AppState, result: Result<Vec<Player>, String>) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.data.loading.remove(&LoadingKey::Players);
    match result {
        Ok(players) => {
            debug!("DATA: Loaded {} players", players.len());
            new_state.data.players = Arc::new(Some(players));
            loaded(&mut new_state, &[Tab::Players]);
        }
        Err(e) => failed(&mut new_state, "players", e),
    }
    (new_state, Effect::None)
}

fn handle_games_loaded(state: AppState, result: Result<Vec<Game>, String>) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.data.loading.remove(&LoadingKey::Games);
    match result {
        Ok(games) => {
            debug!("DATA: Loaded {} games", games.len());
            new_state.data.games = Arc::new(Some(games));
            loaded(&mut new_state, &[Tab::Games]);
        }
        Err(e) => failed(&mut new_state, "games", e),
    }
    (new_state, Effect::None)
}

fn handle_analytics_loaded(
    state: AppState,
    result: Result<Box<AnalyticsReport>, String>,
) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.data.loading.remove(&LoadingKey::Analytics);
    match result {
        Ok(report) => {
            debug!("DATA: Loaded analytics for {} players", report.players.len());
            new_state.data.analytics = Arc::new(Some(*report));
            loaded(&mut new_state, &[Tab::Analytics, Tab::Team]);
        }
        Err(e) => failed(&mut new_state, "analytics", e),
    }
    (new_state, Effect::None)
}

/// Clamp row cursors to the new data and stamp the refresh time
fn loaded(state: &mut AppState, tabs: &[Tab]) {
    for tab in tabs {
        let count = state.row_count(*tab);
        let table = state.ui.table_mut(*tab);
        table.selected_row = table.selected_row.min(count.saturating_sub(1));
    }
    state.system.last_refresh = Some(Local::now());
}

fn failed(state: &mut AppState, what: &str, error: String) {
    warn!("DATA: Failed to load {}: {}", what, error);
    state
        .system
        .set_status_error_message(format!("Failed to load {}: {}", what, error));
}
