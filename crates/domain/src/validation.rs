// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-assignment validation.
//!
//! Runs before every proposed assignment is written. Only an overlap (and,
//! when the policy asks for it, critical rest) is blocking; everything else
//! is surfaced as a warning for the caller to decide on.

use crate::alert::{Alert, AlertCode, Severity};
use crate::conflict::find_conflicts;
use crate::error::DomainError;
use crate::policy::SchedulingPolicy;
use crate::qualification::{check_team_coverage, team_for_slot};
use crate::rest::{evaluate_rest, rest_alerts};
use crate::snapshot::RosterSnapshot;
use crate::types::{Assignment, AssignmentId, Interval, Person, PersonId, Post, PostId};
use serde::{Deserialize, Serialize};

/// Outcome of validating a proposed assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False if any alert has `Severity::Error`.
    pub is_valid: bool,
    /// Every finding, blocking or not.
    pub alerts: Vec<Alert>,
}

impl ValidationResult {
    /// Builds a result, deriving `is_valid` from the alerts.
    #[must_use]
    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            is_valid: !alerts.iter().any(Alert::is_blocking),
            alerts,
        }
    }

    /// Alerts with the given code.
    pub fn alerts_with(&self, code: AlertCode) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.code == code)
    }
}

fn availability_alerts(person: &Person, interval: &Interval) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = Vec::new();

    if let Some(status) = person.status.as_ref().filter(|s| !s.is_available) {
        alerts.push(Alert::new(
            Severity::Warning,
            AlertCode::PersonUnavailable,
            format!(
                "{} has status '{}', which is not available for duty",
                person.name, status.name
            ),
            vec![person.id],
        ));
    }

    if let Some(leave) = person.leave.as_ref().filter(|l| l.overlaps(interval)) {
        alerts.push(Alert::new(
            Severity::Warning,
            AlertCode::OnLeave,
            format!("{} is on leave during {leave}", person.name),
            vec![person.id],
        ));
    }

    alerts
}

/// Validates assigning `person` to `interval`.
///
/// # Arguments
///
/// * `person` - The person to assign
/// * `interval` - The proposed interval
/// * `existing` - Existing assignments (other persons are ignored)
/// * `exclude` - The assignment being replaced, when editing
/// * `policy` - Rest rules
///
/// # Returns
///
/// A `ValidationResult`. Each overlapping assignment yields one `Overlap`
/// error; rest and availability problems yield warnings.
#[must_use]
pub fn validate_assignment(
    person: &Person,
    interval: &Interval,
    existing: &[Assignment],
    exclude: Option<AssignmentId>,
    policy: &SchedulingPolicy,
) -> ValidationResult {
    let mut alerts: Vec<Alert> = Vec::new();

    // Rule: no double booking
    for conflict in find_conflicts(person.id, interval, existing, exclude) {
        alerts.push(Alert::new(
            Severity::Error,
            AlertCode::Overlap,
            format!(
                "{} is already assigned during {} (assignment {})",
                person.name, conflict.interval, conflict.id
            ),
            vec![person.id],
        ));
    }

    // Rule: enough rest on both sides
    let violations = evaluate_rest(person.id, interval, existing, exclude, policy);
    alerts.extend(rest_alerts(person, &violations, policy));

    alerts.extend(availability_alerts(person, interval));

    ValidationResult::from_alerts(alerts)
}

/// Validates an assignment against a snapshot.
///
/// # Errors
///
/// Returns `DomainError::PersonNotFound` if the person is not in the snapshot.
pub fn validate_assignment_in(
    snapshot: &RosterSnapshot,
    person_id: PersonId,
    interval: &Interval,
    exclude: Option<AssignmentId>,
    policy: &SchedulingPolicy,
) -> Result<ValidationResult, DomainError> {
    let person: &Person = snapshot.require_person(person_id)?;
    Ok(validate_assignment(
        person,
        interval,
        snapshot.assignments(),
        exclude,
        policy,
    ))
}

/// Validates the team that would cover a slot.
///
/// The team is everyone already on the slot plus `proposed`, without
/// duplicates. Coverage findings are never blocking.
///
/// # Errors
///
/// Returns an error if the post or a proposed person is not in the snapshot.
pub fn validate_team(
    snapshot: &RosterSnapshot,
    post_id: PostId,
    slot: &Interval,
    proposed: &[PersonId],
) -> Result<ValidationResult, DomainError> {
    let post: &Post = snapshot.require_post(post_id)?;
    let mut team: Vec<&Person> = team_for_slot(snapshot, post_id, slot);
    for &person_id in proposed {
        let person: &Person = snapshot.require_person(person_id)?;
        if !team.iter().any(|p| p.id == person_id) {
            team.push(person);
        }
    }

    Ok(ValidationResult::from_alerts(check_team_coverage(
        post, &team,
    )))
}
