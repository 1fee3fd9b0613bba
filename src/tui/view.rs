//! Draws the application state into a ratatui frame
//!
//! Layout: tab bar (2 lines), the current tab's content, status bar (2 lines).

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use chrono::{DateTime, Local};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

use super::state::{team_split_rows, AppState, TableUiState};
use super::types::Tab;
use crate::columns::{analytics_columns, games_columns, roster_columns, split_columns, ColumnKey};
use crate::commands::player::summary_rows;
use crate::config::{DisplayConfig, ThemeConfig, DEFAULT_TIME_FORMAT};
use crate::sort::SortState;
use crate::table::{pad, SortableTable};

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .split(f.area());

    render_tab_bar(f, chunks[0], state);
    render_content(f, chunks[1], state);
    render_status_bar(f, chunks[2], state);
}

fn render_tab_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let config = &state.system.config;
    let separator = format!(" {} ", config.display.box_chars.vertical);

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(separator.clone()));
        }
        let label = format!("{} {}", i + 1, tab.label());
        let style = if *tab == state.navigation.current_tab {
            Style::default()
                .fg(config.theme.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(label, style));
    }

    let rule = config.display.box_chars.horizontal.repeat(area.width as usize);
    f.render_widget(Paragraph::new(vec![Line::from(spans), Line::raw(rule)]), area);
}

fn render_content(f: &mut Frame, area: Rect, state: &AppState) {
    let height = area.height as usize;
    let lines = match state.navigation.current_tab {
        Tab::Players => match state.data.players.as_ref() {
            Some(players) => {
                let table = SortableTable::new(roster_columns()).with_sort(state.ui.players.sort);
                table_lines(&table, players, &state.ui.players, height, state)
            }
            None => placeholder(state),
        },
        Tab::Games => match state.data.games.as_ref() {
            Some(games) => {
                let table = SortableTable::new(games_columns()).with_sort(state.ui.games.sort);
                table_lines(&table, games, &state.ui.games, height, state)
            }
            None => placeholder(state),
        },
        Tab::Analytics => match state.data.analytics.as_ref() {
            Some(report) => {
                let mode = state.ui.stat_mode;
                let mut lines = vec![title_line(&format!("Players ({})", mode.label()), state)];
                let table = SortableTable::new(analytics_columns(mode)).with_sort(state.ui.analytics.sort);
                lines.extend(table_lines(
                    &table,
                    &report.players,
                    &state.ui.analytics,
                    height.saturating_sub(1),
                    state,
                ));
                lines
            }
            None => placeholder(state),
        },
        Tab::Team => match state.data.analytics.as_ref() {
            Some(report) => {
                let mode = state.ui.stat_mode;
                let display = &state.system.config.display;

                // Season summary keeps Totals above Averages
                let summary = SortableTable::new(split_columns()).with_sort(SortState::new());
                let mut lines = vec![title_line("Team", state)];
                lines.extend(
                    summary
                        .render(&summary_rows(&report.team_totals, &report.team_averages), display)
                        .lines()
                        .map(|l| Line::raw(l.to_string())),
                );
                lines.push(Line::raw(""));
                lines.push(title_line(&format!("Team Splits ({})", mode.label()), state));

                let used = lines.len();
                let table = SortableTable::new(split_columns()).with_sort(state.ui.team.sort);
                lines.extend(table_lines(
                    &table,
                    &team_split_rows(report, mode),
                    &state.ui.team,
                    height.saturating_sub(used),
                    state,
                ));
                lines
            }
            None => placeholder(state),
        },
    };

    f.render_widget(Paragraph::new(lines), area);
}

fn placeholder(state: &AppState) -> Vec<Line<'static>> {
    let text = if state.is_loading() { "Loading..." } else { "No data." };
    vec![Line::raw(format!(" {}", text))]
}

fn title_line(text: &str, state: &AppState) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(state.system.config.theme.header_fg)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Header with the column cursor, a rule, and the visible window of rows
///
/// The window scrolls so the selected row stays on screen.
fn table_lines<T: Clone>(
    table: &SortableTable<T, ColumnKey>,
    rows: &[T],
    ui: &TableUiState,
    height: usize,
    state: &AppState,
) -> Vec<Line<'static>> {
    let theme: &ThemeConfig = &state.system.config.theme;
    let display: &DisplayConfig = &state.system.config.display;

    let mut header = Vec::new();
    for (i, (label, column)) in table.header_labels().iter().zip(table.columns()).enumerate() {
        if i > 0 {
            header.push(Span::raw(" "));
        }
        let style = if i == ui.selected_column {
            Style::default()
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.header_fg)
        };
        header.push(Span::styled(pad(label, column.display_width(), column.align), style));
    }

    let mut lines = vec![Line::from(header), Line::raw(table.separator_line(display))];
    if rows.is_empty() {
        lines.push(Line::raw("No data."));
        return lines;
    }

    let visible = height.saturating_sub(lines.len()).max(1);
    let offset = (ui.selected_row + 1).saturating_sub(visible);
    for (i, cells) in table.formatted_rows(rows).iter().enumerate().skip(offset).take(visible) {
        let text = table.format_line(cells);
        if i == ui.selected_row {
            lines.push(Line::styled(
                text,
                Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD),
            ));
        } else {
            lines.push(Line::raw(text));
        }
    }
    lines
}

/// Format a refresh timestamp, falling back to the default pattern when chrono rejects `pattern`
fn format_time(time: &DateTime<Local>, pattern: &str) -> String {
    let mut text = String::new();
    if write!(text, "{}", time.format(pattern)).is_err() {
        return time.format(DEFAULT_TIME_FORMAT).to_string();
    }
    text
}

fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let system = &state.system;
    let box_chars = &system.config.display.box_chars;

    let right_text = if state.is_loading() {
        "Loading...".to_string()
    } else {
        match system.last_refresh {
            Some(time) => format!("Updated {}", format_time(&time, &system.config.time_format)),
            None => String::new(),
        }
    };

    let mut spans = vec![Span::raw(format!(" {}", system.session.describe()))];
    let mut left_width = system.session.describe().width() + 1;
    if let Some(message) = &system.status_message {
        let text = if system.status_is_error {
            format!("ERROR: {}", message)
        } else {
            message.clone()
        };
        left_width += text.width() + 3;
        spans.push(Span::raw(format!(" {} ", box_chars.vertical)));
        let style = if system.status_is_error {
            Style::default().fg(system.config.theme.error_fg)
        } else {
            Style::default()
        };
        spans.push(Span::styled(text, style));
    }

    let right_width = right_text.width() + 1;
    let padding = (area.width as usize).saturating_sub(left_width + right_width);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::raw(format!("{} ", right_text)));

    let rule = box_chars.horizontal.repeat(area.width as usize);
    f.render_widget(Paragraph::new(vec![Line::raw(rule), Line::from(spans)]), area);
}
