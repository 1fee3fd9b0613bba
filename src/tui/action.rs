use crate::types::{AnalyticsReport, Game, Player};

use super::types::Tab;

/// Global actions - like Redux actions
///
/// All state changes in the application happen through actions.
/// Actions are dispatched from:
/// - User input (key events)
/// - Effects (async data loading)
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation actions
    NavigateTab(Tab),
    NextTab,
    PreviousTab,

    // Table actions on the current tab
    ColumnLeft,
    ColumnRight,
    RowUp,
    RowDown,
    /// Activate the focused header (desc, asc, off)
    ToggleSort,
    /// Switch Analytics/Team between totals and averages
    ToggleStatMode,

    // Data actions
    RefreshData,

    // Data loaded (from effects)
    PlayersLoaded(Result<Vec<Player>, String>),
    GamesLoaded(Result<Vec<Game>, String>),
    AnalyticsLoaded(Result<Box<AnalyticsReport>, String>),

    // System actions
    Quit,
    SetStatusMessage { message: String, is_error: bool },
}
