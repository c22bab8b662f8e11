//! Balanced tiling of N panel entries into at most M columns.

use crate::model::EntryId;

/// Shape of a tiling: how many columns, how tall the tallest column is, and
/// how many columns carry that full height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
    /// Number of columns holding `rows` entries; the rest hold `rows - 1`.
    /// Zero when every column is full.
    pub tail: usize,
}

impl GridShape {
    pub const EMPTY: GridShape = GridShape {
        columns: 0,
        rows: 0,
        tail: 0,
    };

    /// Compute the tiling for `entry_count` entries. `max_columns` of zero is
    /// treated as one.
    pub fn compute(entry_count: usize, max_columns: usize) -> Self {
        let max_columns = max_columns.max(1);
        if entry_count == 0 {
            return Self::EMPTY;
        }
        if entry_count < max_columns {
            return Self {
                columns: entry_count,
                rows: 1,
                tail: entry_count,
            };
        }
        Self {
            columns: max_columns,
            rows: entry_count.div_ceil(max_columns),
            tail: entry_count % max_columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0
    }

    /// Column of the `index`-th entry.
    ///
    /// Entries fill columns top to bottom. Once the `tail` full-height columns
    /// are used up, the remaining entries are spread over `rows - 1` high
    /// columns.
    pub fn column_of(&self, index: usize) -> usize {
        let col = index / self.rows;
        // rows == 1 implies either tail == columns (single row) or tail == 0,
        // so the division below never sees a zero divisor.
        if self.tail != 0 && col >= self.tail && self.rows > 1 {
            (index - self.tail) / (self.rows - 1)
        } else {
            col
        }
    }
}

/// Concrete assignment of entry ids to columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridLayout {
    pub shape: Option<GridShape>,
    pub columns: Vec<Vec<EntryId>>,
}

impl GridLayout {
    /// Lay out `ids` in report order.
    pub fn build<'a>(ids: impl ExactSizeIterator<Item = &'a EntryId>, max_columns: usize) -> Self {
        let shape = GridShape::compute(ids.len(), max_columns);
        if shape.is_empty() {
            return Self::default();
        }
        let mut columns = vec![Vec::with_capacity(shape.rows); shape.columns];
        for (i, id) in ids.enumerate() {
            columns[shape.column_of(i)].push(id.clone());
        }
        Self {
            shape: Some(shape),
            columns,
        }
    }

    pub fn column_heights(&self) -> Vec<usize> {
        self.columns.iter().map(Vec::len).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of `id` as `(column, row)`.
    pub fn position_of(&self, id: &str) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(c, col)| {
            col.iter().position(|x| x == id).map(|r| (c, r))
        })
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
