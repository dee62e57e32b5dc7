// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconstructs continuous duties from adjacent grid slots.
//!
//! Merging runs on resolved candidates, so cells spelled differently but
//! naming the same person and post still join into one duty.

use crate::grid::RawCandidate;
use duty_roster_domain::{Interval, Person, Post};

/// A grid candidate whose person and post resolved against the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCandidate<'s> {
    /// The parsed cell. After merging, the first cell of its run with the
    /// interval widened to cover the whole run.
    pub source: RawCandidate,
    /// The resolved person.
    pub person: &'s Person,
    /// The resolved post.
    pub post: &'s Post,
}

impl ResolvedCandidate<'_> {
    /// Slot covered by the candidate.
    #[must_use]
    pub const fn interval(&self) -> &Interval {
        &self.source.interval
    }

    fn same_duty(&self, other: &Self) -> bool {
        self.person.id == other.person.id && self.post.id == other.post.id
    }
}

/// Sorts candidates by person, post and start, and coalesces runs where one
/// candidate ends exactly when the next one for the same person and post
/// starts.
///
/// The merged candidate keeps the row and texts of the first candidate of
/// its run. Merging an already merged list returns it unchanged.
#[must_use]
pub fn merge_candidates(
    mut candidates: Vec<ResolvedCandidate<'_>>,
) -> Vec<ResolvedCandidate<'_>> {
    candidates.sort_by_key(|c| {
        (
            c.person.id,
            c.post.id,
            c.interval().start(),
            c.interval().end(),
        )
    });

    let mut merged: Vec<ResolvedCandidate<'_>> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if let Some(last) = merged.last_mut()
            && last.same_duty(&candidate)
            && last.interval().end() == candidate.interval().start()
            && let Some(extended) = last.interval().extended_to(candidate.interval().end())
        {
            last.source.interval = extended;
            continue;
        }
        merged.push(candidate);
    }

    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use duty_roster_domain::{PersonId, PostId};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    struct Registry {
        dana: Person,
        omer: Person,
        gate: Post,
        tower: Post,
    }

    impl Registry {
        fn new() -> Self {
            Self {
                dana: Person::new(PersonId::new(1), "Dana"),
                omer: Person::new(PersonId::new(2), "Omer"),
                gate: Post::new(PostId::new(10), "Gate"),
                tower: Post::new(PostId::new(11), "Tower"),
            }
        }
    }

    fn candidate<'s>(
        row: usize,
        person: &'s Person,
        post: &'s Post,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ResolvedCandidate<'s> {
        ResolvedCandidate {
            source: RawCandidate {
                row,
                person: person.name.clone(),
                post: post.name.clone(),
                interval: Interval::new(start, end).unwrap(),
            },
            person,
            post,
        }
    }

    #[test]
    fn test_adjacent_slots_merge() {
        let r = Registry::new();
        let merged = merge_candidates(vec![
            candidate(4, &r.dana, &r.gate, at(5, 10), at(5, 14)),
            candidate(4, &r.dana, &r.gate, at(5, 6), at(5, 10)),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].interval().start(), at(5, 6));
        assert_eq!(merged[0].interval().end(), at(5, 14));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let r = Registry::new();
        let once = merge_candidates(vec![
            candidate(4, &r.dana, &r.gate, at(5, 6), at(5, 10)),
            candidate(4, &r.dana, &r.gate, at(5, 10), at(5, 14)),
            candidate(4, &r.dana, &r.gate, at(5, 18), at(5, 22)),
            candidate(5, &r.omer, &r.gate, at(5, 22), at(6, 2)),
            candidate(5, &r.omer, &r.gate, at(6, 2), at(6, 6)),
        ]);
        let twice = merge_candidates(once.clone());

        assert_eq!(once.len(), 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_gaps_posts_and_persons_keep_runs_apart() {
        let r = Registry::new();
        let merged = merge_candidates(vec![
            candidate(4, &r.dana, &r.gate, at(5, 6), at(5, 10)),
            candidate(4, &r.dana, &r.tower, at(5, 10), at(5, 14)),
            candidate(5, &r.omer, &r.gate, at(5, 10), at(5, 14)),
            candidate(4, &r.dana, &r.gate, at(5, 14), at(5, 18)),
        ]);
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn test_different_spellings_of_one_post_merge() {
        let r = Registry::new();
        let mut relief = candidate(4, &r.dana, &r.gate, at(5, 10), at(5, 14));
        relief.source.post = String::from("Gate.relief.");

        let merged = merge_candidates(vec![
            candidate(4, &r.dana, &r.gate, at(5, 6), at(5, 10)),
            relief,
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source.post, "Gate");
        assert_eq!(merged[0].interval().end(), at(5, 14));
    }

    #[test]
    fn test_overlapping_candidates_are_not_merged() {
        let r = Registry::new();
        let merged = merge_candidates(vec![
            candidate(4, &r.dana, &r.gate, at(5, 6), at(5, 10)),
            candidate(7, &r.dana, &r.gate, at(5, 8), at(5, 12)),
        ]);
        assert_eq!(merged.len(), 2);
    }
}
