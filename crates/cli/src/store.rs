// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory assignment store.
//!
//! Stands in for the persistence collaborator: it hands out ids, keeps
//! every assignment in memory and can be written back out as a snapshot.

use duty_roster_domain::{Assignment, AssignmentId, NewAssignment, RosterSnapshot, SnapshotData};
use duty_roster_import::{AssignmentWriter, WriteError};
use std::future::{Future, ready};

/// Assignments loaded from a snapshot plus those created since.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    assignments: Vec<Assignment>,
    loaded: usize,
    next_id: i64,
}

impl InMemoryStore {
    /// Seeds the store with the snapshot's assignments. New ids continue
    /// after the highest existing one.
    #[must_use]
    pub fn from_snapshot(snapshot: &RosterSnapshot) -> Self {
        let assignments: Vec<Assignment> = snapshot.assignments().to_vec();
        let next_id: i64 = assignments
            .iter()
            .map(|a| a.id.value())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        Self {
            loaded: assignments.len(),
            assignments,
            next_id,
        }
    }

    /// Assignments created since the store was seeded.
    #[must_use]
    pub fn created(&self) -> &[Assignment] {
        &self.assignments[self.loaded..]
    }

    /// Every assignment in the store.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The snapshot's registries with this store's assignments.
    #[must_use]
    pub fn to_snapshot_data(&self, snapshot: &RosterSnapshot) -> SnapshotData {
        SnapshotData {
            certificates: snapshot.certificates().to_vec(),
            persons: snapshot.persons().to_vec(),
            posts: snapshot.posts().to_vec(),
            assignments: self.assignments.clone(),
        }
    }

    fn insert(&mut self, draft: NewAssignment) -> Result<Assignment, WriteError> {
        let duplicate: bool = self.assignments.iter().any(|a| {
            a.is_effective()
                && a.person_id == draft.person_id
                && a.post_id == draft.post_id
                && a.interval == draft.interval
        });
        if duplicate {
            return Err(WriteError::Rejected {
                reason: format!(
                    "person {} already holds post {} during {}",
                    draft.person_id, draft.post_id, draft.interval
                ),
            });
        }

        let id: AssignmentId = AssignmentId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| WriteError::Unavailable {
                reason: String::from("assignment ids exhausted"),
            })?;

        let assignment: Assignment = draft.into_assignment(id);
        self.assignments.push(assignment.clone());
        Ok(assignment)
    }
}

impl AssignmentWriter for InMemoryStore {
    fn create(
        &mut self,
        draft: NewAssignment,
    ) -> impl Future<Output = Result<Assignment, WriteError>> + Send {
        ready(self.insert(draft))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use duty_roster_domain::{Interval, Person, PersonId, Post, PostId};

    fn interval(start_hour: u32, end_hour: u32) -> Interval {
        let day = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        Interval::new(
            day.and_hms_opt(start_hour, 0, 0).unwrap(),
            day.and_hms_opt(end_hour, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn snapshot() -> RosterSnapshot {
        RosterSnapshot::new(
            vec![Person::new(PersonId::new(1), "Dana Levi")],
            vec![Post::new(PostId::new(10), "Gate")],
            vec![],
            vec![Assignment::new(
                AssignmentId::new(41),
                PersonId::new(1),
                PostId::new(10),
                interval(6, 10),
            )],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_ids_continue_after_snapshot() {
        let snapshot = snapshot();
        let mut store = InMemoryStore::from_snapshot(&snapshot);

        let created = store
            .create(NewAssignment::new(PersonId::new(1), PostId::new(10), interval(10, 14)))
            .await
            .unwrap();

        assert_eq!(created.id, AssignmentId::new(42));
        assert_eq!(store.created(), &[created]);
        assert_eq!(store.assignments().len(), 2);
        assert_eq!(store.to_snapshot_data(&snapshot).assignments.len(), 2);
    }

    #[tokio::test]
    async fn test_exact_duplicates_are_rejected() {
        let mut store = InMemoryStore::from_snapshot(&snapshot());

        let result = store
            .create(NewAssignment::new(PersonId::new(1), PostId::new(10), interval(6, 10)))
            .await;

        assert!(matches!(result, Err(WriteError::Rejected { .. })));
        assert!(store.created().is_empty());
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let seeded = InMemoryStore::from_snapshot(
            &RosterSnapshot::new(vec![], vec![], vec![], vec![]).unwrap(),
        );
        assert_eq!(seeded.next_id, 1);
        assert!(seeded.created().is_empty());
    }
}
