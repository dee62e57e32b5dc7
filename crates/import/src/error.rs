// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Import error types.
//!
//! Nothing in the import pipeline fails for data-quality reasons. These
//! errors cover a store that refuses a write and a grid layout that cannot
//! describe any grid.

use thiserror::Error;

/// Failure reported by an `AssignmentWriter`.
///
/// A write error abandons only the item being written; the import carries on
/// with the next candidate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The store refused the assignment.
    #[error("Assignment rejected: {reason}")]
    Rejected { reason: String },

    /// The store could not be reached.
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Grid layout configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The block stride is zero.
    #[error("Grid block stride must be greater than zero")]
    ZeroStride,

    /// The date column does not fall inside its block.
    #[error("Date offset {offset} must be smaller than the block stride {stride}")]
    DateOffsetOutsideBlock { offset: usize, stride: usize },

    /// A time slot names an hour outside 0-23.
    #[error("Time slot '{label}' has hour {hour}, expected 0-23")]
    SlotHourOutOfRange { label: String, hour: u32 },

    /// A same-day time slot does not end after it starts.
    #[error("Time slot '{label}' must end after it starts unless marked overnight")]
    InvertedSlot { label: String },

    /// Two time slots normalise to the same label.
    #[error("Time slot label '{label}' is defined more than once")]
    DuplicateSlotLabel { label: String },

    /// The person rows start above the label row.
    #[error("First person row {first_person_row} must come after the label row {label_row}")]
    PersonRowsOverlapHeader {
        first_person_row: usize,
        label_row: usize,
    },
}
