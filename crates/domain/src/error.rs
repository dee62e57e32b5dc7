// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{PersonId, PostId};
use chrono::NaiveDateTime;

/// Errors that can occur while building or querying roster data.
///
/// Data-quality problems found during validation are reported as alerts,
/// never as errors. These variants cover malformed input to the engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An interval does not satisfy `start < end`.
    InvalidInterval {
        /// The requested start instant.
        start: NaiveDateTime,
        /// The requested end instant.
        end: NaiveDateTime,
    },
    /// A person id was not present in the snapshot.
    PersonNotFound(PersonId),
    /// A post id was not present in the snapshot.
    PostNotFound(PostId),
    /// Two persons in a snapshot share an id.
    DuplicatePerson(PersonId),
    /// Two posts in a snapshot share an id.
    DuplicatePost(PostId),
    /// An assignment status string was not recognised.
    InvalidAssignmentStatus(String),
    /// A scheduling policy value is out of range.
    InvalidPolicy {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInterval { start, end } => {
                write!(
                    f,
                    "Invalid interval: start {start} must be before end {end}"
                )
            }
            Self::PersonNotFound(id) => write!(f, "Person {id} not found"),
            Self::PostNotFound(id) => write!(f, "Post {id} not found"),
            Self::DuplicatePerson(id) => write!(f, "Person {id} appears more than once"),
            Self::DuplicatePost(id) => write!(f, "Post {id} appears more than once"),
            Self::InvalidAssignmentStatus(value) => {
                write!(f, "Invalid assignment status: '{value}'")
            }
            Self::InvalidPolicy { field, reason } => {
                write!(f, "Invalid scheduling policy ({field}): {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
