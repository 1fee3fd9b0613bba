//! Column definitions and sortable tables
//!
//! A table is a list of [`ColumnDef`]s plus one [`SortState`]. The same
//! table drives both the plain-text CLI output and the TUI widgets: the
//! CLI calls [`SortableTable::render`], the TUI asks for header labels and
//! formatted cells and draws them itself.

use crate::config::DisplayConfig;
use crate::sort::{SortState, SortValue};
use std::borrow::Cow;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Text alignment for table cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Column definition for a table
///
/// # Type Parameters
/// - `T`: The row data type
/// - `K`: The column key, used to identify the column in a [`SortState`]
pub struct ColumnDef<T, K> {
    pub key: K,

    /// Column header text
    pub header: String,

    /// Minimum column width in characters
    pub width: usize,

    pub align: Alignment,

    /// Value the column sorts by
    pub sort_fn: Box<dyn Fn(&T) -> SortValue + Send + Sync>,

    /// Text shown in the cell
    pub cell_fn: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T, K> ColumnDef<T, K> {
    pub fn new<S, C>(
        key: K,
        header: impl Into<String>,
        width: usize,
        align: Alignment,
        sort_fn: S,
        cell_fn: C,
    ) -> Self
    where
        S: Fn(&T) -> SortValue + Send + Sync + 'static,
        C: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            key,
            header: header.into(),
            width,
            align,
            sort_fn: Box::new(sort_fn),
            cell_fn: Box::new(cell_fn),
        }
    }

    /// Rendered width: wide enough for the header plus a sort marker
    pub fn display_width(&self) -> usize {
        self.width.max(self.header.width() + 1)
    }
}

impl<T, K: fmt::Debug> fmt::Debug for ColumnDef<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sort_fn", &"<function>")
            .field("cell_fn", &"<function>")
            .finish()
    }
}

/// Pad `text` to `width` display columns
pub fn pad(text: &str, width: usize, align: Alignment) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    let fill = width - used;
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(fill)),
        Alignment::Right => format!("{}{}", " ".repeat(fill), text),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

/// Columns plus the sort state that orders them
pub struct SortableTable<T, K> {
    columns: Vec<ColumnDef<T, K>>,
    sort: SortState<K>,
}

impl<T, K: fmt::Debug> fmt::Debug for SortableTable<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableTable")
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .finish()
    }
}

impl<T: Clone, K: Copy + PartialEq> SortableTable<T, K> {
    pub fn new(columns: Vec<ColumnDef<T, K>>) -> Self {
        Self {
            columns,
            sort: SortState::new(),
        }
    }

    /// Start from an existing sort state (e.g. one kept across a refresh)
    pub fn with_sort(mut self, sort: SortState<K>) -> Self {
        self.sort = sort;
        self
    }

    pub fn columns(&self) -> &[ColumnDef<T, K>] {
        &self.columns
    }

    pub fn sort(&self) -> &SortState<K> {
        &self.sort
    }

    pub fn column_index(&self, key: K) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Activate the header for `key`; unknown keys are ignored
    pub fn toggle(&mut self, key: K) -> bool {
        if self.column_index(key).is_none() {
            return false;
        }
        self.sort.toggle(key);
        true
    }

    /// Activate the header at `index`
    pub fn toggle_index(&mut self, index: usize) -> bool {
        match self.columns.get(index) {
            Some(column) => {
                self.sort.toggle(column.key);
                true
            }
            None => false,
        }
    }

    /// Header text with the sort marker appended to the active column
    pub fn header_labels(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| format!("{}{}", c.header, self.sort.indicator(c.key)))
            .collect()
    }

    pub fn widths(&self) -> Vec<usize> {
        self.columns.iter().map(ColumnDef::display_width).collect()
    }

    /// Rows in display order; borrows `rows` when no sort is active
    pub fn sorted_rows<'a>(&self, rows: &'a [T]) -> Cow<'a, [T]> {
        self.sort.sorted(rows, |row, key| match self.column_index(key) {
            Some(index) => (self.columns[index].sort_fn)(row),
            None => SortValue::Number(0.0),
        })
    }

    pub fn cells(&self, row: &T) -> Vec<String> {
        self.columns.iter().map(|c| (c.cell_fn)(row)).collect()
    }

    /// Formatted cells for every row, in display order
    pub fn formatted_rows(&self, rows: &[T]) -> Vec<Vec<String>> {
        self.sorted_rows(rows).iter().map(|row| self.cells(row)).collect()
    }

    /// Join already formatted cells into one padded line
    pub fn format_line(&self, cells: &[String]) -> String {
        self.columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| pad(cell, column.display_width(), column.align))
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    pub fn header_line(&self) -> String {
        self.format_line(&self.header_labels())
    }

    pub fn separator_line(&self, display: &DisplayConfig) -> String {
        let total: usize = self.widths().iter().sum::<usize>() + self.columns.len().saturating_sub(1);
        display.box_chars.horizontal.repeat(total)
    }

    /// Header, separator and one line per row
    pub fn render(&self, rows: &[T], display: &DisplayConfig) -> String {
        let mut output = String::new();
        output.push_str(&self.header_line());
        output.push('\n');
        output.push_str(&self.separator_line(display));
        output.push('\n');
        for cells in self.formatted_rows(rows) {
            output.push_str(&self.format_line(&cells));
            output.push('\n');
        }
        output
    }
}
