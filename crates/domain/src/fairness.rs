// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fairness weighting.
//!
//! An assignment's weight is
//! `intensity × max(1, whole hours) × night? × weekend?`:
//!
//! - the night multiplier applies when the start hour or the end hour falls
//!   inside the night window (touching it is enough, full coverage is not
//!   required)
//! - the weekend multiplier applies when the start instant falls inside the
//!   weekly weekend window
//!
//! A person's fairness score is a fold over their history. Scores are
//! computed, not stored; `FairnessLedger` is a cache that can always be
//! rebuilt from the history.

use crate::policy::SchedulingPolicy;
use crate::snapshot::RosterSnapshot;
use crate::types::{Assignment, Interval, PersonId, Post, PostId};
use chrono::Timelike;
use num_traits::ToPrimitive;
use std::collections::HashMap;

/// Whether the interval touches the night window at its start or end hour.
#[must_use]
pub fn is_night_shift(interval: &Interval, policy: &SchedulingPolicy) -> bool {
    policy.night_window.contains_hour(interval.start().hour())
        || policy.night_window.contains_hour(interval.end().hour())
}

/// Whether the interval starts inside the weekend window.
#[must_use]
pub fn is_weekend_shift(interval: &Interval, policy: &SchedulingPolicy) -> bool {
    policy.weekend_window.contains(interval.start())
}

/// Weight of an interval worked at a post of the given intensity.
#[must_use]
pub fn score_interval(interval: &Interval, intensity: f64, policy: &SchedulingPolicy) -> f64 {
    let whole_hours: i64 = interval.duration().num_hours().max(1);
    let mut weight: f64 = intensity * whole_hours.to_f64().unwrap_or(1.0);

    if is_night_shift(interval, policy) {
        weight *= policy.night_multiplier;
    }
    if is_weekend_shift(interval, policy) {
        weight *= policy.weekend_multiplier;
    }

    weight
}

/// Weight of a single assignment.
///
/// The result is a ranking signal only; it is never persisted by the engine.
#[must_use]
pub fn score_assignment(assignment: &Assignment, post: &Post, policy: &SchedulingPolicy) -> f64 {
    score_interval(&assignment.interval, post.intensity, policy)
}

/// Sum of the weights of a person's effective assignments.
///
/// With `post_filter` set only assignments at that post count. Assignments
/// at posts missing from the snapshot are skipped.
#[must_use]
pub fn fairness_score(
    snapshot: &RosterSnapshot,
    person_id: PersonId,
    post_filter: Option<PostId>,
    policy: &SchedulingPolicy,
) -> f64 {
    snapshot
        .assignments_for(person_id)
        .filter(|a| a.is_effective())
        .filter(|a| post_filter.is_none_or(|post_id| a.post_id == post_id))
        .filter_map(|a| snapshot.post(a.post_id).map(|post| (a, post)))
        .map(|(a, post)| score_assignment(a, post, policy))
        .sum()
}

/// Cached per-person fairness totals.
///
/// The ledger is a materialized view over assignment history. Incremental
/// updates keep it current between rebuilds; `rebuild` is the source of
/// truth whenever the two could have drifted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FairnessLedger {
    totals: HashMap<PersonId, f64>,
}

impl FairnessLedger {
    /// Recomputes every total from the snapshot.
    #[must_use]
    pub fn rebuild(snapshot: &RosterSnapshot, policy: &SchedulingPolicy) -> Self {
        let mut ledger: Self = Self::default();
        for assignment in snapshot.assignments() {
            if let Some(post) = snapshot.post(assignment.post_id) {
                ledger.record_created(assignment, post, policy);
            }
        }
        ledger
    }

    /// Adds the weight of a newly created assignment.
    pub fn record_created(
        &mut self,
        assignment: &Assignment,
        post: &Post,
        policy: &SchedulingPolicy,
    ) {
        if !assignment.is_effective() {
            return;
        }
        *self.totals.entry(assignment.person_id).or_default() +=
            score_assignment(assignment, post, policy);
    }

    /// Subtracts the weight of a removed assignment.
    pub fn record_removed(
        &mut self,
        assignment: &Assignment,
        post: &Post,
        policy: &SchedulingPolicy,
    ) {
        if !assignment.is_effective() {
            return;
        }
        *self.totals.entry(assignment.person_id).or_default() -=
            score_assignment(assignment, post, policy);
    }

    /// Current total for a person; zero when they have no history.
    #[must_use]
    pub fn score(&self, person_id: PersonId) -> f64 {
        self.totals.get(&person_id).copied().unwrap_or_default()
    }
}
