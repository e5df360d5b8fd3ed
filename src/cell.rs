//! Cells of the sample space.
//!
//! A cell is a subset of the declared simple events. With `n` simple events
//! there are exactly `2^n` cells, enumerated in binary counting order: bit
//! `i` of a cell's mask is set iff simple event `i` belongs to the cell, and
//! the mask doubles as the cell's index in every per-cell vector.
//!
//! The count is exponential in `n`. Nothing here limits `n` beyond what the
//! `u64` mask can represent, so callers are expected to keep it small
//! (around 20 events is already a million cells).

use std::fmt;

/// A subset of simple events, stored as a bitmask over event indices.
///
/// # Invariants
///
/// - Only the low [`Cell::MAX_EVENTS`] bits may be set.
/// - `Cell::index()` equals the position of the cell in [`enumerate_cells`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell(u64);

impl Cell {
    /// Largest number of simple events a cell mask can hold.
    pub const MAX_EVENTS: usize = 63;

    /// The empty cell.
    pub const EMPTY: Cell = Cell(0);

    pub fn new(mask: u64) -> Self {
        assert!(
            mask >> Self::MAX_EVENTS == 0,
            "Cell mask should fit in {} bits",
            Self::MAX_EVENTS
        );
        Cell(mask)
    }

    /// Cell containing exactly the given event indices.
    pub fn from_events(events: impl IntoIterator<Item = usize>) -> Self {
        Cell::new(events.into_iter().fold(0, |mask, i| mask | (1u64 << i)))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of simple events in this cell.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, event: usize) -> bool {
        event < Self::MAX_EVENTS && (self.0 >> event) & 1 == 1
    }

    pub fn is_subset_of(self, other: Cell) -> bool {
        self.0 & !other.0 == 0
    }

    /// Indices of the simple events in this cell, ascending.
    pub fn events(self) -> impl Iterator<Item = usize> {
        (0..Self::MAX_EVENTS).filter(move |&i| self.contains(i))
    }

    /// Every cell whose event set is a subset of this one, itself and the
    /// empty cell included, in decreasing mask order.
    pub fn subsets(self) -> impl Iterator<Item = Cell> {
        let mask = self.0;
        let mut next = Some(mask);
        std::iter::from_fn(move || {
            let current = next?;
            next = if current == 0 { None } else { Some((current - 1) & mask) };
            Some(Cell(current))
        })
    }

    /// Renders the cell with event labels, e.g. `{A, C}`.
    pub fn to_label_string<S: AsRef<str>>(self, labels: &[S]) -> String {
        let names: Vec<&str> = self
            .events()
            .filter_map(|i| labels.get(i).map(|s| s.as_ref()))
            .collect();
        format!("{{{}}}", names.join(", "))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:b}", self.0)
    }
}

/// Enumerates all `2^n` cells over `n` simple events in binary counting order.
///
/// # Panics
///
/// Panics if `n > Cell::MAX_EVENTS`.
pub fn enumerate_cells(n: usize) -> Vec<Cell> {
    assert!(
        n <= Cell::MAX_EVENTS,
        "At most {} simple events are supported",
        Cell::MAX_EVENTS
    );
    (0..1u64 << n).map(Cell).collect()
}
