use tracing::trace;

use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::AppState;
use crate::tui::types::Tab;

/// Handle all navigation-related actions
pub fn reduce_navigation(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::NavigateTab(tab) => Ok(navigate_to_tab(state, *tab)),
        Action::NextTab => {
            let tab = state.navigation.current_tab.next();
            Ok(navigate_to_tab(state, tab))
        }
        Action::PreviousTab => {
            let tab = state.navigation.current_tab.previous();
            Ok(navigate_to_tab(state, tab))
        }
        _ => Err(state),
    }
}

fn navigate_to_tab(state: AppState, tab: Tab) -> (AppState, Effect) {
    trace!("Navigating to tab: {:?}", tab);
    let mut new_state = state;
    new_state.navigation.current_tab = tab;
    (new_state, Effect::None)
}
