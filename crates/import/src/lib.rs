// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk reconciliation of calendar grid exports into assignments.
//!
//! The pipeline is parse, resolve, merge, overlap check, write. Only the
//! write touches the outside world, through the caller's
//! `AssignmentWriter`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod grid;
mod layout;
mod merge;
mod names;
mod orchestrator;
mod resolver;

#[cfg(test)]
mod tests;

pub use error::{LayoutError, WriteError};
pub use grid::{RawCandidate, parse_grid};
pub use layout::{GridLayout, TimeSlotDef, normalize_slot_label, parse_grid_date};
pub use merge::{ResolvedCandidate, merge_candidates};
pub use names::{is_skippable_name, normalize_name, strip_suffix};
pub use orchestrator::{
    AssignmentWriter, CancellationFlag, ImportItemError, ImportOptions, ImportPhase,
    ImportProgress, ImportReport, WriteFn, import_from_grid, write_fn,
};
pub use resolver::{
    ExactMatch, LeadingSegmentMatch, MatchRule, NameIndex, Resolver, SubstringMatch, TokenMatch,
};
