use tracing::debug;

use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::{column_keys, AppState};

/// Handle header cursor, row selection and sort actions on the current tab
pub fn reduce_table(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::ColumnLeft => Ok(move_column(state, -1)),
        Action::ColumnRight => Ok(move_column(state, 1)),
        Action::RowUp => Ok(move_row(state, -1)),
        Action::RowDown => Ok(move_row(state, 1)),
        Action::ToggleSort => Ok(toggle_sort(state)),
        Action::ToggleStatMode => Ok(toggle_stat_mode(state)),
        _ => Err(state),
    }
}

fn move_column(state: AppState, delta: isize) -> (AppState, Effect) {
    let mut new_state = state;
    let tab = new_state.navigation.current_tab;
    let count = column_keys(tab, new_state.ui.stat_mode).len();
    let table = new_state.ui.table_mut(tab);
    table.selected_column = step(table.selected_column, delta, count);
    (new_state, Effect::None)
}

fn move_row(state: AppState, delta: isize) -> (AppState, Effect) {
    let mut new_state = state;
    let tab = new_state.navigation.current_tab;
    let count = new_state.row_count(tab);
    let table = new_state.ui.table_mut(tab);
    table.selected_row = step(table.selected_row, delta, count);
    (new_state, Effect::None)
}

fn toggle_sort(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    let tab = new_state.navigation.current_tab;
    let keys = column_keys(tab, new_state.ui.stat_mode);
    let table = new_state.ui.table_mut(tab);
    if let Some(key) = keys.get(table.selected_column) {
        table.sort.toggle(*key);
        debug!(
            "SORT: {:?} tab now {:?} {:?}",
            tab,
            table.sort.active_key(),
            table.sort.direction()
        );
    }
    (new_state, Effect::None)
}

fn toggle_stat_mode(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    if !new_state.navigation.current_tab.has_stat_mode() {
        return (new_state, Effect::None);
    }
    new_state.ui.stat_mode = new_state.ui.stat_mode.toggle();
    new_state
        .system
        .set_status_message(format!("Showing {}", new_state.ui.stat_mode.label().to_lowercase()));
    (new_state, Effect::None)
}

/// Move `index` by `delta`, staying within `0..count`
fn step(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{ColumnKey, StatMode};
    use crate::fixtures;
    use crate::sort::SortDirection;
    use crate::tui::types::Tab;
    use std::sync::Arc;

    fn reduce(state: AppState, action: Action) -> AppState {
        reduce_table(state, &action).unwrap().0
    }

    fn state_with_players() -> AppState {
        let mut state = AppState::default();
        state.data.players = Arc::new(Some(fixtures::create_mock_players()));
        state
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, 1, 5), 3);
        assert_eq!(step(3, 1, 0), 0);
    }

    #[test]
    fn test_column_cursor_stays_in_table() {
        let mut state = AppState::default();
        for _ in 0..50 {
            state = reduce(state, Action::ColumnRight);
        }
        let last = column_keys(Tab::Players, StatMode::Totals).len() - 1;
        assert_eq!(state.ui.players.selected_column, last);
    }

    #[test]
    fn test_row_selection_bounded_by_data() {
        let mut state = state_with_players();
        for _ in 0..10 {
            state = reduce(state, Action::RowDown);
        }
        assert_eq!(state.ui.players.selected_row, 5);
        state = reduce(state, Action::RowUp);
        assert_eq!(state.ui.players.selected_row, 4);
    }

    #[test]
    fn test_toggle_sort_cycles_focused_column() {
        let mut state = state_with_players();
        state = reduce(state, Action::ToggleSort);
        assert_eq!(state.ui.players.sort.active_key(), Some(ColumnKey::Name));
        assert_eq!(state.ui.players.sort.direction(), Some(SortDirection::Descending));

        state = reduce(state, Action::ToggleSort);
        assert_eq!(state.ui.players.sort.direction(), Some(SortDirection::Ascending));

        state = reduce(state, Action::ToggleSort);
        assert!(!state.ui.players.sort.is_sorted());
    }

    #[test]
    fn test_tables_keep_independent_sort() {
        let mut state = state_with_players();
        state = reduce(state, Action::ToggleSort);
        state.navigation.current_tab = Tab::Games;
        state = reduce(state, Action::ColumnRight);
        state = reduce(state, Action::ToggleSort);

        assert_eq!(state.ui.players.sort.active_key(), Some(ColumnKey::Name));
        assert_eq!(state.ui.games.sort.active_key(), Some(ColumnKey::Opponent));
        assert_eq!(state.ui.players.selected_column, 0);
    }

    #[test]
    fn test_stat_mode_only_on_stat_tabs() {
        let state = reduce(AppState::default(), Action::ToggleStatMode);
        assert_eq!(state.ui.stat_mode, StatMode::Totals);

        let mut state = AppState::default();
        state.navigation.current_tab = Tab::Analytics;
        let state = reduce(state, Action::ToggleStatMode);
        assert_eq!(state.ui.stat_mode, StatMode::Averages);
        assert_eq!(state.system.status_message.as_deref(), Some("Showing averages"));
    }
}
