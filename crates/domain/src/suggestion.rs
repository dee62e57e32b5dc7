// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate ranking for an open slot.
//!
//! Ordering, by priority:
//!
//! 1. available before unavailable
//! 2. no conflict before conflict
//! 3. no rest violation before violation
//! 4. lower fairness score first
//! 5. name, case-insensitive, as the stable tie-break
//!
//! Persons with a hard conflict stay in the list so the caller can show them
//! as busy, but are marked not selectable.

use crate::conflict::ConflictIndex;
use crate::fairness::fairness_score;
use crate::policy::SchedulingPolicy;
use crate::rest::evaluate_rest;
use crate::snapshot::RosterSnapshot;
use crate::types::{Interval, Person, PostId};
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<'a> {
    /// The candidate.
    pub person: &'a Person,
    /// Status allows duty and the person is not on leave.
    pub is_available: bool,
    /// An overlapping assignment already exists.
    pub has_conflict: bool,
    /// Rest before or after the slot would be too short.
    pub rest_violation: bool,
    /// The person's fairness score.
    pub fairness_score: f64,
    /// Whether the caller may select this person.
    pub selectable: bool,
}

fn rank(a: &Suggestion<'_>, b: &Suggestion<'_>) -> Ordering {
    b.is_available
        .cmp(&a.is_available)
        .then(a.has_conflict.cmp(&b.has_conflict))
        .then(a.rest_violation.cmp(&b.rest_violation))
        .then(a.fairness_score.total_cmp(&b.fairness_score))
        .then_with(|| {
            a.person
                .name
                .to_lowercase()
                .cmp(&b.person.name.to_lowercase())
        })
        .then(a.person.id.cmp(&b.person.id))
}

/// Ranks every person in the snapshot for a slot.
///
/// # Arguments
///
/// * `snapshot` - Persons and existing assignments
/// * `post_id` - When set, fairness only counts history at this post
/// * `interval` - The slot being filled
/// * `limit` - Maximum number of suggestions returned
/// * `policy` - Rest and fairness rules
#[must_use]
pub fn suggest<'a>(
    snapshot: &'a RosterSnapshot,
    post_id: Option<PostId>,
    interval: &Interval,
    limit: usize,
    policy: &SchedulingPolicy,
) -> Vec<Suggestion<'a>> {
    let index: ConflictIndex<'_> = ConflictIndex::new(snapshot.assignments());

    let mut suggestions: Vec<Suggestion<'a>> = snapshot
        .persons()
        .iter()
        .map(|person| {
            let own = index.assignments_for(person.id);
            let has_conflict: bool = index.has_conflict(person.id, interval, None);
            let rest_violation: bool =
                !evaluate_rest(person.id, interval, own.iter().copied(), None, policy).is_empty();
            Suggestion {
                person,
                is_available: person.is_available_for(interval),
                has_conflict,
                rest_violation,
                fairness_score: fairness_score(snapshot, person.id, post_id, policy),
                selectable: !has_conflict,
            }
        })
        .collect();

    suggestions.sort_by(rank);
    suggestions.truncate(limit);
    suggestions
}
