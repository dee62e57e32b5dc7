// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grid export parsing.
//!
//! Turns the calendar export into raw assignment candidates. The export is
//! produced by other tools and has no schema, so nothing here fails: records
//! the CSV reader cannot decode, date cells that do not parse and labels
//! outside the slot vocabulary are ignored.

use crate::layout::{GridLayout, parse_grid_date};
use crate::names::{is_skippable_name, strip_suffix};
use chrono::NaiveDate;
use csv::StringRecord;
use duty_roster_domain::Interval;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// One non-empty grid cell, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCandidate {
    /// Source row, 1-based.
    pub row: usize,
    /// Person name with any unit suffix stripped.
    pub person: String,
    /// Post label as written in the cell.
    pub post: String,
    /// Slot covered by the cell.
    pub interval: Interval,
}

fn read_records(text: &str) -> Vec<StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .enumerate()
        .map(|(idx, result)| {
            result.unwrap_or_else(|e| {
                // keep positions aligned with the layout's row indexes
                trace!(row = idx + 1, error = %e, "Ignoring unreadable grid record");
                StringRecord::new()
            })
        })
        .collect()
}

/// Maps every column of a dated block to the block's date.
fn date_columns(records: &[StringRecord], layout: &GridLayout) -> HashMap<usize, NaiveDate> {
    let mut dates: HashMap<usize, NaiveDate> = HashMap::new();
    let Some(record) = records.get(layout.date_row) else {
        return dates;
    };

    for (column, cell) in record.iter().enumerate() {
        if column == layout.name_column {
            continue;
        }
        let Some(date) = parse_grid_date(cell) else {
            if !cell.trim().is_empty() {
                trace!(column, cell, "Ignoring date cell");
            }
            continue;
        };
        let Some(block_start) = column.checked_sub(layout.date_offset) else {
            trace!(column, "Date cell has no room for its block");
            continue;
        };

        for block_column in block_start..block_start + layout.block_stride {
            if block_column != layout.name_column {
                dates.insert(block_column, date);
            }
        }
    }

    dates
}

/// Maps every labelled, dated column to the interval it covers.
fn slot_columns(
    records: &[StringRecord],
    layout: &GridLayout,
    dates: &HashMap<usize, NaiveDate>,
) -> BTreeMap<usize, Interval> {
    let mut slots: BTreeMap<usize, Interval> = BTreeMap::new();
    let Some(record) = records.get(layout.label_row) else {
        return slots;
    };

    for (column, cell) in record.iter().enumerate() {
        let Some(date) = dates.get(&column) else {
            continue;
        };
        match layout
            .find_slot(cell)
            .and_then(|slot| slot.interval_on(*date))
        {
            Some(interval) => {
                slots.insert(column, interval);
            }
            None => trace!(column, cell, "Ignoring unknown time-slot label"),
        }
    }

    slots
}

/// Parses a grid export into raw candidates.
///
/// # Arguments
///
/// * `text` - The exported grid, comma separated
/// * `layout` - Where dates, labels and persons live in the grid
///
/// # Returns
///
/// One candidate per non-empty cell under a dated, labelled column, in row
/// then column order. Candidates are not merged.
#[must_use]
pub fn parse_grid(text: &str, layout: &GridLayout) -> Vec<RawCandidate> {
    let records: Vec<StringRecord> = read_records(text);
    let dates: HashMap<usize, NaiveDate> = date_columns(&records, layout);
    let slots: BTreeMap<usize, Interval> = slot_columns(&records, layout, &dates);

    if slots.is_empty() {
        debug!(records = records.len(), "Grid has no dated time-slot columns");
        return Vec::new();
    }

    let mut candidates: Vec<RawCandidate> = Vec::new();
    for (idx, record) in records.iter().enumerate().skip(layout.first_person_row) {
        let row: usize = idx + 1;
        let Some(raw_name) = record.get(layout.name_column) else {
            continue;
        };
        if is_skippable_name(raw_name, layout) {
            if !raw_name.trim().is_empty() {
                debug!(row, name = raw_name, "Skipping non-person row");
            }
            continue;
        }
        let person: &str = strip_suffix(raw_name);

        for (column, interval) in &slots {
            let Some(cell) = record.get(*column) else {
                continue;
            };
            if layout.is_empty_token(cell) {
                continue;
            }
            candidates.push(RawCandidate {
                row,
                person: person.to_string(),
                post: cell.trim().to_string(),
                interval: *interval,
            });
        }
    }

    debug!(
        records = records.len(),
        columns = slots.len(),
        candidates = candidates.len(),
        "Parsed grid"
    );
    candidates
}
