/// Keyboard event to action mapping
///
/// Converts crossterm KeyEvents into Actions.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use super::action::Action;
use super::state::AppState;
use super::types::Tab;

/// Handle global keys that work on every tab
fn handle_global_keys(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RefreshData),
        _ => None,
    }
}

/// Handle direct tab switching via number keys (1-4) and Tab/Shift-Tab
fn handle_tab_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Char('1') => Some(Action::NavigateTab(Tab::Players)),
        KeyCode::Char('2') => Some(Action::NavigateTab(Tab::Games)),
        KeyCode::Char('3') => Some(Action::NavigateTab(Tab::Analytics)),
        KeyCode::Char('4') => Some(Action::NavigateTab(Tab::Team)),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PreviousTab),
        _ => None,
    }
}

/// Handle header cursor, row selection and sorting
fn handle_table_keys(key_code: KeyCode, state: &AppState) -> Option<Action> {
    match key_code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::ColumnLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::ColumnRight),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::RowUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::RowDown),
        KeyCode::Enter | KeyCode::Char('s') => Some(Action::ToggleSort),
        KeyCode::Char('a') if state.navigation.current_tab.has_stat_mode() => {
            Some(Action::ToggleStatMode)
        }
        _ => None,
    }
}

/// Convert a key press into an action for the current state
pub fn key_to_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    trace!("KEY: {:?} on {:?}", key.code, state.navigation.current_tab);

    handle_global_keys(key)
        .or_else(|| handle_tab_keys(key.code))
        .or_else(|| handle_table_keys(key.code, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_on(tab: Tab) -> AppState {
        let mut state = AppState::default();
        state.navigation.current_tab = tab;
        state
    }

    #[test]
    fn test_quit_keys() {
        let state = AppState::default();
        assert_eq!(key_to_action(key(KeyCode::Char('q')), &state), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c, &state), Some(Action::Quit));
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let state = AppState::default();
        assert_eq!(
            key_to_action(key(KeyCode::Char('3')), &state),
            Some(Action::NavigateTab(Tab::Analytics))
        );
        assert_eq!(key_to_action(key(KeyCode::Tab), &state), Some(Action::NextTab));
        assert_eq!(key_to_action(key(KeyCode::BackTab), &state), Some(Action::PreviousTab));
    }

    #[test]
    fn test_enter_and_s_toggle_sort() {
        let state = AppState::default();
        assert_eq!(key_to_action(key(KeyCode::Enter), &state), Some(Action::ToggleSort));
        assert_eq!(key_to_action(key(KeyCode::Char('s')), &state), Some(Action::ToggleSort));
    }

    #[test]
    fn test_arrows_move_cursor() {
        let state = AppState::default();
        assert_eq!(key_to_action(key(KeyCode::Left), &state), Some(Action::ColumnLeft));
        assert_eq!(key_to_action(key(KeyCode::Right), &state), Some(Action::ColumnRight));
        assert_eq!(key_to_action(key(KeyCode::Up), &state), Some(Action::RowUp));
        assert_eq!(key_to_action(key(KeyCode::Down), &state), Some(Action::RowDown));
    }

    #[test]
    fn test_stat_mode_key_depends_on_tab() {
        assert_eq!(key_to_action(key(KeyCode::Char('a')), &state_on(Tab::Players)), None);
        assert_eq!(
            key_to_action(key(KeyCode::Char('a')), &state_on(Tab::Team)),
            Some(Action::ToggleStatMode)
        );
    }

    #[test]
    fn test_refresh_key() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('r')), &AppState::default()),
            Some(Action::RefreshData)
        );
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(key_to_action(key(KeyCode::Char('z')), &AppState::default()), None);
    }
}
