// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double-booking detection.
//!
//! ## Invariants
//!
//! - Overlap is closed-open: `a.start < b.end && a.end > b.start`
//! - Touching intervals (`a.end == b.start`) never conflict
//! - Cancelled assignments never conflict
//! - An excluded assignment (the one being edited) never conflicts

use crate::types::{Assignment, AssignmentId, Interval, PersonId};
use std::collections::HashMap;

fn blocks(
    assignment: &Assignment,
    person_id: PersonId,
    interval: &Interval,
    exclude: Option<AssignmentId>,
) -> bool {
    assignment.person_id == person_id
        && assignment.is_effective()
        && exclude != Some(assignment.id)
        && assignment.interval.overlaps(interval)
}

/// Returns every assignment of `person_id` that overlaps `interval`.
///
/// # Arguments
///
/// * `person_id` - The person being checked
/// * `interval` - The candidate interval
/// * `assignments` - Existing assignments (any person; others are ignored)
/// * `exclude` - An assignment to ignore, for edits
#[must_use]
pub fn find_conflicts<'a, I>(
    person_id: PersonId,
    interval: &Interval,
    assignments: I,
    exclude: Option<AssignmentId>,
) -> Vec<&'a Assignment>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    assignments
        .into_iter()
        .filter(|a| blocks(a, person_id, interval, exclude))
        .collect()
}

/// Whether any assignment of `person_id` overlaps `interval`.
#[must_use]
pub fn has_conflict<'a, I>(
    person_id: PersonId,
    interval: &Interval,
    assignments: I,
    exclude: Option<AssignmentId>,
) -> bool
where
    I: IntoIterator<Item = &'a Assignment>,
{
    assignments
        .into_iter()
        .any(|a| blocks(a, person_id, interval, exclude))
}

/// Assignments grouped by person for repeated overlap queries.
#[derive(Debug, Default)]
pub struct ConflictIndex<'a> {
    by_person: HashMap<PersonId, Vec<&'a Assignment>>,
}

impl<'a> ConflictIndex<'a> {
    /// Indexes the effective (non-cancelled) assignments.
    #[must_use]
    pub fn new<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let mut by_person: HashMap<PersonId, Vec<&'a Assignment>> = HashMap::new();
        for assignment in assignments.into_iter().filter(|a| a.is_effective()) {
            by_person
                .entry(assignment.person_id)
                .or_default()
                .push(assignment);
        }
        Self { by_person }
    }

    /// Effective assignments of one person.
    #[must_use]
    pub fn assignments_for(&self, person_id: PersonId) -> &[&'a Assignment] {
        self.by_person
            .get(&person_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether any assignment of `person_id` overlaps `interval`.
    #[must_use]
    pub fn has_conflict(
        &self,
        person_id: PersonId,
        interval: &Interval,
        exclude: Option<AssignmentId>,
    ) -> bool {
        has_conflict(
            person_id,
            interval,
            self.assignments_for(person_id).iter().copied(),
            exclude,
        )
    }
}
