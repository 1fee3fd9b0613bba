use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::columns::{analytics_columns, games_columns, roster_columns, split_columns, ColumnKey, StatMode};
use crate::config::Config;
use crate::session::Session;
use crate::sort::SortState;
use crate::types::{AnalyticsReport, Game, Player, SplitRow};

use super::types::Tab;

/// Root application state - single source of truth
///
/// All state changes happen through the reducer.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub navigation: NavigationState,

    /// Application data (from API)
    pub data: DataState,

    /// UI state per tab
    pub ui: UiState,

    pub system: SystemState,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub current_tab: Tab,
}

#[derive(Debug, Clone, Default)]
pub struct DataState {
    // API data - wrapped in Arc to avoid deep clones on every reducer call
    pub players: Arc<Option<Vec<Player>>>,
    pub games: Arc<Option<Vec<Game>>>,
    pub analytics: Arc<Option<AnalyticsReport>>,

    pub loading: HashSet<LoadingKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadingKey {
    Players,
    Games,
    Analytics,
}

/// Cursor and sort state of one table
///
/// Survives refreshes: only the rows are replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TableUiState {
    pub sort: SortState<ColumnKey>,
    pub selected_column: usize,
    pub selected_row: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub players: TableUiState,
    pub games: TableUiState,
    pub analytics: TableUiState,
    pub team: TableUiState,
    pub stat_mode: StatMode,
}

impl UiState {
    pub fn table(&self, tab: Tab) -> &TableUiState {
        match tab {
            Tab::Players => &self.players,
            Tab::Games => &self.games,
            Tab::Analytics => &self.analytics,
            Tab::Team => &self.team,
        }
    }

    pub fn table_mut(&mut self, tab: Tab) -> &mut TableUiState {
        match tab {
            Tab::Players => &mut self.players,
            Tab::Games => &mut self.games,
            Tab::Analytics => &mut self.analytics,
            Tab::Team => &mut self.team,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemState {
    pub config: Config,
    pub session: Session,
    pub last_refresh: Option<DateTime<Local>>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl SystemState {
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    pub fn set_status_error_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }
}

/// Sortable rows of the Team tab: location splits followed by opponents
pub fn team_split_rows(report: &AnalyticsReport, mode: StatMode) -> Vec<SplitRow> {
    let splits = match mode {
        StatMode::Totals => &report.splits_totals,
        StatMode::Averages => &report.splits_averages,
    };
    splits.location.iter().chain(&splits.opponents).cloned().collect()
}

/// Column keys of the table shown on `tab`, in display order
pub fn column_keys(tab: Tab, mode: StatMode) -> Vec<ColumnKey> {
    match tab {
        Tab::Players => roster_columns().iter().map(|c| c.key).collect(),
        Tab::Games => games_columns().iter().map(|c| c.key).collect(),
        Tab::Analytics => analytics_columns(mode).iter().map(|c| c.key).collect(),
        Tab::Team => split_columns().iter().map(|c| c.key).collect(),
    }
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        let mut state = Self::default();
        state.system.config = config;
        state.system.session = session;
        state
    }

    /// Number of rows currently loaded for the table on `tab`
    pub fn row_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Players => self.data.players.as_ref().as_ref().map_or(0, Vec::len),
            Tab::Games => self.data.games.as_ref().as_ref().map_or(0, Vec::len),
            Tab::Analytics => self
                .data
                .analytics
                .as_ref()
                .as_ref()
                .map_or(0, |report| report.players.len()),
            Tab::Team => self
                .data
                .analytics
                .as_ref()
                .as_ref()
                .map_or(0, |report| team_split_rows(report, self.ui.stat_mode).len()),
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.data.loading.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_column_keys_start_with_label_column() {
        assert_eq!(column_keys(Tab::Players, StatMode::Totals)[0], ColumnKey::Name);
        assert_eq!(column_keys(Tab::Games, StatMode::Totals)[0], ColumnKey::Date);
        assert_eq!(column_keys(Tab::Analytics, StatMode::Averages)[0], ColumnKey::Name);
        assert_eq!(column_keys(Tab::Team, StatMode::Totals)[0], ColumnKey::Split);
    }

    #[test]
    fn test_row_count_without_data() {
        let state = AppState::default();
        for tab in Tab::ALL {
            assert_eq!(state.row_count(tab), 0);
        }
    }

    #[test]
    fn test_team_split_rows_follow_mode() {
        let games = fixtures::create_mock_games();
        let lines = fixtures::create_mock_stat_lines();
        let report = AnalyticsReport {
            splits_totals: fixtures::team_splits(&games, &lines, false),
            splits_averages: fixtures::team_splits(&games, &lines, true),
            ..Default::default()
        };
        let totals = team_split_rows(&report, StatMode::Totals);
        let averages = team_split_rows(&report, StatMode::Averages);
        assert_eq!(totals.len(), averages.len());
        assert_eq!(totals[0].label, "Home");
        assert_eq!(totals[1].label, "Away");
        assert!(totals[0].stats.points > averages[0].stats.points);
    }
}
