pub mod analytics;
pub mod auth;
pub mod boxscore;
pub mod games;
pub mod player;
pub mod players;
pub mod stats;
pub mod users;

use crate::columns::ColumnKey;
use crate::session::Session;
use crate::sort::SortState;
use crate::table::{ColumnDef, SortableTable};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Validate a YYYY-MM-DD date and return it in canonical form
pub fn parse_game_date(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date))?;
    Ok(parsed.format("%Y-%m-%d").to_string())
}

/// Sort state for `--sort KEY [--asc]`
///
/// Naming a column activates its header once (descending); `--asc`
/// activates it a second time, exactly like clicking a header twice.
pub fn sort_from_args(key: Option<ColumnKey>, ascending: bool) -> SortState<ColumnKey> {
    let mut sort = SortState::new();
    if let Some(key) = key {
        sort.toggle(key);
        if ascending {
            sort.toggle(key);
        }
    }
    sort
}

/// Build a table for the main listing of a command
///
/// Fails when the requested sort column is not part of this table.
pub fn main_table<T: Clone>(
    columns: Vec<ColumnDef<T, ColumnKey>>,
    sort: SortState<ColumnKey>,
) -> Result<SortableTable<T, ColumnKey>> {
    let table = SortableTable::new(columns);
    if let Some(key) = sort.active_key() {
        if table.column_index(key).is_none() {
            bail!("Column '{}' is not shown in this table", key);
        }
    }
    Ok(table.with_sort(sort))
}

/// Build a secondary table, sorting it only if it has the requested column
pub fn side_table<T: Clone>(
    columns: Vec<ColumnDef<T, ColumnKey>>,
    sort: SortState<ColumnKey>,
) -> SortableTable<T, ColumnKey> {
    let table = SortableTable::new(columns);
    match sort.active_key() {
        Some(key) if table.column_index(key).is_some() => table.with_sort(sort),
        _ => table,
    }
}

/// Refuse admin-only operations before calling the API
///
/// The server still checks permissions; this just gives a clearer message.
pub fn require_admin(session: &Session) -> Result<()> {
    if !session.is_logged_in() {
        bail!("Not logged in. Run `hoops login <username>` first");
    }
    if !session.is_admin() {
        bail!("Admin permission required (logged in as {})", session.describe());
    }
    Ok(())
}
