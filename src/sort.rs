/// Tri-state column sorting shared by every stats table
///
/// Each table owns one `SortState<K>`, where `K` is that table's column key
/// enum. Activating a column header cycles the state:
///
/// - inactive column → descending (most/best first)
/// - descending → ascending
/// - ascending → unsorted (source order)
///
/// Sorting never touches the source rows. When the state is unsorted the
/// original slice is handed back as-is.
use std::borrow::Cow;
use std::cmp::Ordering;

/// Marker shown next to a header sorted ascending
pub const ASCENDING_MARKER: &str = "▲";

/// Marker shown next to a header sorted descending
pub const DESCENDING_MARKER: &str = "▼";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header marker for this direction
    pub fn marker(self) -> &'static str {
        match self {
            Self::Ascending => ASCENDING_MARKER,
            Self::Descending => DESCENDING_MARKER,
        }
    }
}

/// Value a column exposes for ordering
///
/// Numbers compare numerically, text compares case-insensitively.
/// A column is expected to produce a single kind; if it mixes kinds,
/// numbers order before text so the result stays deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => compare_text(a, b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Case-insensitive ordering, falling back to the raw text so that
/// "a" and "A" still have a fixed relative order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort state for one table instance
///
/// The active key and direction are stored together, so a direction can
/// never exist without a key and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    active: Option<(K, SortDirection)>,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy + PartialEq> SortState<K> {
    /// Unsorted state (rows shown in source order)
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cycle for `key` as if its header was activated
    pub fn toggle(&mut self, key: K) {
        self.active = match self.active {
            Some((active, SortDirection::Descending)) if active == key => {
                Some((key, SortDirection::Ascending))
            }
            Some((active, SortDirection::Ascending)) if active == key => None,
            _ => Some((key, SortDirection::Descending)),
        };
    }

    /// Drop any active sort and return to source order
    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active_key(&self) -> Option<K> {
        self.active.map(|(key, _)| key)
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.map(|(_, direction)| direction)
    }

    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }

    /// Header marker for `key`: "▲", "▼" or "" when `key` is not active
    pub fn indicator(&self, key: K) -> &'static str {
        match self.active {
            Some((active, direction)) if active == key => direction.marker(),
            _ => "",
        }
    }

    /// Rows in the order the table should show them
    ///
    /// `value` maps a row and column key to the value used for ordering.
    /// Unsorted state borrows `rows` untouched; otherwise a sorted copy is
    /// returned. The sort is stable, so rows with equal values keep their
    /// source order in both directions.
    pub fn sorted<'a, T, F>(&self, rows: &'a [T], value: F) -> Cow<'a, [T]>
    where
        T: Clone,
        F: Fn(&T, K) -> SortValue,
    {
        let Some((key, direction)) = self.active else {
            return Cow::Borrowed(rows);
        };

        let mut keyed: Vec<(SortValue, &T)> = rows.iter().map(|row| (value(row, key), row)).collect();
        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        Cow::Owned(keyed.into_iter().map(|(_, row)| row.clone()).collect())
    }
}
