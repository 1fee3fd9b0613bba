/// Core type definitions used across the TUI

/// Tab enum for main navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Players,
    Games,
    Analytics,
    Team,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Players, Tab::Games, Tab::Analytics, Tab::Team];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Players => "Players",
            Tab::Games => "Games",
            Tab::Analytics => "Analytics",
            Tab::Team => "Team",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tab, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the totals/averages switch applies to this tab
    pub fn has_stat_mode(self) -> bool {
        matches!(self, Tab::Analytics | Tab::Team)
    }
}
