// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{Duration, NaiveDateTime};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a canonical numeric identifier assigned by the store.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the numeric identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

canonical_id!(
    /// Identifier of a person who can be put on duty.
    PersonId
);
canonical_id!(
    /// Identifier of a duty post.
    PostId
);
canonical_id!(
    /// Identifier of a certificate (qualification).
    CertificateId
);
canonical_id!(
    /// Identifier of a persisted assignment.
    AssignmentId
);

/// Converts a minute count into fractional hours.
#[must_use]
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes.to_f64().unwrap_or_default() / 60.0
}

/// A half-open span of wall-clock time, `[start, end)`.
///
/// An `Interval` can only exist with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalFields")]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct IntervalFields {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<IntervalFields> for Interval {
    type Error = DomainError;

    fn try_from(fields: IntervalFields) -> Result<Self, Self::Error> {
        Self::new(fields.start, fields.end)
    }
}

impl Interval {
    /// Creates a new interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInterval` unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the length of the interval.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the length of the interval in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Closed-open overlap test. Touching intervals do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns a copy extended so that it ends at `end`.
    ///
    /// Returns `None` if `end` does not lie after the current start.
    #[must_use]
    pub fn extended_to(&self, end: NaiveDateTime) -> Option<Self> {
        Self::new(self.start, end).ok()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// A qualification a person can hold and a post can require.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Certificate {
    /// The certificate id.
    pub id: CertificateId,
    /// Display name.
    pub name: String,
}

impl Certificate {
    /// Creates a new `Certificate`.
    #[must_use]
    pub fn new(id: CertificateId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// A named duty status such as "Present" or "Sick".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DutyStatus {
    /// Status name.
    pub name: String,
    /// Display color.
    #[serde(default)]
    pub color: String,
    /// Whether a person holding this status may be put on duty.
    pub is_available: bool,
}

impl DutyStatus {
    /// Creates a new `DutyStatus`.
    #[must_use]
    pub fn new(name: &str, color: &str, is_available: bool) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            is_available,
        }
    }
}

/// An individual who can be assigned to duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The person id.
    pub id: PersonId,
    /// Full display name.
    pub name: String,
    /// Certificates held.
    #[serde(default)]
    pub certificates: BTreeSet<CertificateId>,
    /// Current duty status. `None` is treated as available.
    #[serde(default)]
    pub status: Option<DutyStatus>,
    /// Leave window, if the person is on leave.
    #[serde(default)]
    pub leave: Option<Interval>,
}

impl Person {
    /// Creates a person with no certificates, status or leave.
    #[must_use]
    pub fn new(id: PersonId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            certificates: BTreeSet::new(),
            status: None,
            leave: None,
        }
    }

    /// Sets the held certificates.
    #[must_use]
    pub fn with_certificates<I>(mut self, certificates: I) -> Self
    where
        I: IntoIterator<Item = CertificateId>,
    {
        self.certificates = certificates.into_iter().collect();
        self
    }

    /// Sets the duty status.
    #[must_use]
    pub fn with_status(mut self, status: DutyStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the leave window.
    #[must_use]
    pub const fn with_leave(mut self, leave: Interval) -> Self {
        self.leave = Some(leave);
        self
    }

    /// Whether the current status allows duty.
    #[must_use]
    pub fn has_available_status(&self) -> bool {
        self.status.as_ref().is_none_or(|s| s.is_available)
    }

    /// Whether the leave window overlaps `interval`.
    #[must_use]
    pub fn is_on_leave_during(&self, interval: &Interval) -> bool {
        self.leave.as_ref().is_some_and(|l| l.overlaps(interval))
    }

    /// Whether the person can be put on duty during `interval`.
    #[must_use]
    pub fn is_available_for(&self, interval: &Interval) -> bool {
        self.has_available_status() && !self.is_on_leave_during(interval)
    }
}

const fn default_headcount() -> u32 {
    1
}

const fn default_intensity() -> f64 {
    Post::DEFAULT_INTENSITY
}

/// A duty location or task requiring coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// The post id.
    pub id: PostId,
    /// Display name, also the text matched during grid import.
    pub name: String,
    /// Number of persons the post needs per slot.
    #[serde(default = "default_headcount")]
    pub required_headcount: u32,
    /// Certificates the team on a slot must collectively hold.
    #[serde(default)]
    pub required_certificates: BTreeSet<CertificateId>,
    /// How demanding the post is; scales the fairness weight.
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

impl Post {
    /// Intensity of a post that does not declare one.
    pub const DEFAULT_INTENSITY: f64 = 1.0;

    /// Creates a post needing one person, no certificates, default intensity.
    #[must_use]
    pub fn new(id: PostId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            required_headcount: default_headcount(),
            required_certificates: BTreeSet::new(),
            intensity: Self::DEFAULT_INTENSITY,
        }
    }

    /// Sets the required headcount.
    #[must_use]
    pub const fn with_headcount(mut self, headcount: u32) -> Self {
        self.required_headcount = headcount;
        self
    }

    /// Sets the required certificates.
    #[must_use]
    pub fn with_required_certificates<I>(mut self, certificates: I) -> Self
    where
        I: IntoIterator<Item = CertificateId>,
    {
        self.required_certificates = certificates.into_iter().collect();
        self
    }

    /// Sets the intensity factor.
    #[must_use]
    pub const fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }
}

/// Lifecycle of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Planned, not yet started.
    #[default]
    Scheduled,
    /// Currently running.
    Active,
    /// Finished.
    Completed,
    /// Withdrawn. Cancelled assignments never conflict and never score.
    Cancelled,
}

impl AssignmentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an assignment in this state still occupies its person.
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidAssignmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person bound to a post for an interval.
///
/// Assignments are never edited in place; a replacement is a delete followed
/// by a create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// The assignment id.
    pub id: AssignmentId,
    /// The assigned person.
    pub person_id: PersonId,
    /// The post being covered.
    pub post_id: PostId,
    /// When the duty runs.
    pub interval: Interval,
    /// Lifecycle state.
    #[serde(default)]
    pub status: AssignmentStatus,
}

impl Assignment {
    /// Creates a scheduled assignment.
    #[must_use]
    pub const fn new(
        id: AssignmentId,
        person_id: PersonId,
        post_id: PostId,
        interval: Interval,
    ) -> Self {
        Self {
            id,
            person_id,
            post_id,
            interval,
            status: AssignmentStatus::Scheduled,
        }
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub const fn with_status(mut self, status: AssignmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this assignment still occupies its person.
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        self.status.is_effective()
    }
}

/// An assignment that has not been written to the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewAssignment {
    /// The person to assign.
    pub person_id: PersonId,
    /// The post to cover.
    pub post_id: PostId,
    /// When the duty runs.
    pub interval: Interval,
}

impl NewAssignment {
    /// Creates a new draft.
    #[must_use]
    pub const fn new(person_id: PersonId, post_id: PostId, interval: Interval) -> Self {
        Self {
            person_id,
            post_id,
            interval,
        }
    }

    /// Binds the draft to the id the store assigned.
    #[must_use]
    pub const fn into_assignment(self, id: AssignmentId) -> Assignment {
        Assignment::new(id, self.person_id, self.post_id, self.interval)
    }
}
