// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and scheduling integrity rules for the duty roster.
//!
//! Everything in this crate is pure and synchronous: callers pass in a
//! `RosterSnapshot` (or plain slices) and get data back. Nothing here
//! performs I/O or holds state between calls.

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

mod alert;
mod conflict;
mod error;
mod fairness;
mod policy;
mod qualification;
mod rest;
mod snapshot;
mod suggestion;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use alert::{Alert, AlertCode, Severity};
pub use conflict::{ConflictIndex, find_conflicts, has_conflict};
pub use error::DomainError;
pub use fairness::{
    FairnessLedger, fairness_score, is_night_shift, is_weekend_shift, score_assignment,
    score_interval,
};
pub use policy::{HourWindow, OverlapScope, SchedulingPolicy, WeekPoint, WeeklyWindow};
pub use qualification::{check_team_coverage, missing_certificates, team_for_slot};
pub use rest::{
    RestSeverity, RestSide, RestViolation, classify_rest, critical_threshold_minutes,
    evaluate_rest, rest_alerts,
};
pub use snapshot::{RosterSnapshot, SnapshotData};
pub use suggestion::{Suggestion, suggest};
pub use types::{
    Assignment, AssignmentId, AssignmentStatus, Certificate, CertificateId, DutyStatus,
    Interval, NewAssignment, Person, PersonId, Post, PostId, minutes_to_hours,
};
pub use validation::{
    ValidationResult, validate_assignment, validate_assignment_in, validate_team,
};
