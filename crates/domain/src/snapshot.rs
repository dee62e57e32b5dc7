// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only roster snapshot.
//!
//! The caller loads persons, posts, certificates and assignments from its
//! store and hands them to the engine as one `RosterSnapshot`. The snapshot
//! indexes them once; the engine never reloads or mutates it.

use crate::error::DomainError;
use crate::types::{Assignment, Certificate, Person, PersonId, Post, PostId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialized form of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotData {
    /// Certificate reference data.
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    /// Person registry.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// Post registry.
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Existing assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// An indexed, read-only view of the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData", into = "SnapshotData")]
pub struct RosterSnapshot {
    data: SnapshotData,
    person_index: HashMap<PersonId, usize>,
    post_index: HashMap<PostId, usize>,
    assignments_by_person: HashMap<PersonId, Vec<usize>>,
}

impl TryFrom<SnapshotData> for RosterSnapshot {
    type Error = DomainError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        Self::from_data(data)
    }
}

impl From<RosterSnapshot> for SnapshotData {
    fn from(snapshot: RosterSnapshot) -> Self {
        snapshot.data
    }
}

impl RosterSnapshot {
    /// Builds a snapshot from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if two persons or two posts share an id.
    pub fn new(
        persons: Vec<Person>,
        posts: Vec<Post>,
        certificates: Vec<Certificate>,
        assignments: Vec<Assignment>,
    ) -> Result<Self, DomainError> {
        Self::from_data(SnapshotData {
            certificates,
            persons,
            posts,
            assignments,
        })
    }

    /// Builds a snapshot from its serialized form.
    ///
    /// # Errors
    ///
    /// Returns an error if two persons or two posts share an id.
    pub fn from_data(data: SnapshotData) -> Result<Self, DomainError> {
        let mut person_index: HashMap<PersonId, usize> = HashMap::new();
        for (idx, person) in data.persons.iter().enumerate() {
            if person_index.insert(person.id, idx).is_some() {
                return Err(DomainError::DuplicatePerson(person.id));
            }
        }

        let mut post_index: HashMap<PostId, usize> = HashMap::new();
        for (idx, post) in data.posts.iter().enumerate() {
            if post_index.insert(post.id, idx).is_some() {
                return Err(DomainError::DuplicatePost(post.id));
            }
        }

        let mut assignments_by_person: HashMap<PersonId, Vec<usize>> = HashMap::new();
        for (idx, assignment) in data.assignments.iter().enumerate() {
            assignments_by_person
                .entry(assignment.person_id)
                .or_default()
                .push(idx);
        }

        Ok(Self {
            data,
            person_index,
            post_index,
            assignments_by_person,
        })
    }

    /// All persons, in registry order.
    #[must_use]
    pub fn persons(&self) -> &[Person] {
        &self.data.persons
    }

    /// All posts, in registry order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.data.posts
    }

    /// Certificate reference data.
    #[must_use]
    pub fn certificates(&self) -> &[Certificate] {
        &self.data.certificates
    }

    /// Every assignment, cancelled ones included.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.data.assignments
    }

    /// Looks up a person.
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.person_index.get(&id).map(|&idx| &self.data.persons[idx])
    }

    /// Looks up a person, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersonNotFound` if the id is unknown.
    pub fn require_person(&self, id: PersonId) -> Result<&Person, DomainError> {
        self.person(id).ok_or(DomainError::PersonNotFound(id))
    }

    /// Looks up a post.
    #[must_use]
    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.post_index.get(&id).map(|&idx| &self.data.posts[idx])
    }

    /// Looks up a post, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PostNotFound` if the id is unknown.
    pub fn require_post(&self, id: PostId) -> Result<&Post, DomainError> {
        self.post(id).ok_or(DomainError::PostNotFound(id))
    }

    /// Assignments of one person, cancelled ones included.
    pub fn assignments_for(&self, person_id: PersonId) -> impl Iterator<Item = &Assignment> {
        self.assignments_by_person
            .get(&person_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.data.assignments[idx])
    }

    /// Assignments at one post, cancelled ones included.
    pub fn assignments_at(&self, post_id: PostId) -> impl Iterator<Item = &Assignment> {
        self.data
            .assignments
            .iter()
            .filter(move |a| a.post_id == post_id)
    }
}
