//! The algebraic basis of one solve: labels, cells and event indicators.

use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::bitset::BitSet;
use crate::cell::{enumerate_cells, Cell};
use crate::error::{Error, Result};

/// For each simple event, in declaration order, the 0/1 vector of cells
/// that contain it.
pub fn map_events_to_cells(num_events: usize, cells: &[Cell]) -> Vec<BitSet> {
    (0..num_events)
        .map(|event| BitSet::from_bools(cells.iter().map(|cell| cell.contains(event))))
        .collect()
}

/// Splits a driver-style event list such as `"A,B,C,D"` or `"A, B C"` on runs
/// of commas and spaces.
pub fn split_event_list(text: &str) -> Vec<String> {
    static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[, ]+").expect("separator pattern is valid"));
    SEPARATOR
        .split(text.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sample space spanned by a list of simple events.
///
/// Holds the declared labels (order is significant), all `2^n` cells and,
/// for every label, its indicator over cells. Built once per solve.
#[derive(Debug, Clone)]
pub struct SampleSpace {
    events: Vec<String>,
    cells: Vec<Cell>,
    indicators: Vec<BitSet>,
}

impl SampleSpace {
    /// Builds the sample space for the given simple events.
    ///
    /// Fails if the list is empty, has an empty or repeated label, or is
    /// longer than [`Cell::MAX_EVENTS`].
    pub fn new<S: AsRef<str>>(events: &[S]) -> Result<Self> {
        if events.is_empty() {
            return Err(Error::EmptyEventList);
        }
        if events.len() > Cell::MAX_EVENTS {
            return Err(Error::TooManyEvents {
                count: events.len(),
                max: Cell::MAX_EVENTS,
            });
        }

        let mut seen = HashSet::new();
        for label in events.iter().map(|e| e.as_ref()) {
            if label.is_empty() {
                return Err(Error::EmptyEventLabel);
            }
            if !seen.insert(label) {
                return Err(Error::DuplicateEvent(label.to_string()));
            }
        }

        let events: Vec<String> = events.iter().map(|e| e.as_ref().to_string()).collect();
        let cells = enumerate_cells(events.len());
        let indicators = map_events_to_cells(events.len(), &cells);
        debug!("sample space over {:?}: {} cells", events, cells.len());

        Ok(Self {
            events,
            cells,
            indicators,
        })
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Declaration index of `label`.
    pub fn event_index(&self, label: &str) -> Option<usize> {
        self.events.iter().position(|e| e == label)
    }

    /// Indicator of the cells containing `label`.
    pub fn indicator(&self, label: &str) -> Result<&BitSet> {
        self.event_index(label)
            .map(|i| &self.indicators[i])
            .ok_or_else(|| Error::UnknownEvent(label.to_string()))
    }
}
