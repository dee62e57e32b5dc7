// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team qualification coverage.
//!
//! Coverage is a team-level property: a post's required certificates must be
//! held by *someone* on the slot, not by every person. Coverage gaps are
//! reported as warnings and never block an assignment.

use crate::alert::{Alert, AlertCode, Severity};
use crate::snapshot::RosterSnapshot;
use crate::types::{CertificateId, Interval, Person, PersonId, Post, PostId};
use std::collections::BTreeSet;

/// Returns the required certificates no team member holds.
///
/// An empty result means the team is fully qualified.
#[must_use]
pub fn missing_certificates<'a, I>(
    required: &BTreeSet<CertificateId>,
    team: I,
) -> BTreeSet<CertificateId>
where
    I: IntoIterator<Item = &'a Person>,
{
    let held: BTreeSet<CertificateId> = team
        .into_iter()
        .flat_map(|person| person.certificates.iter().copied())
        .collect();

    required.difference(&held).copied().collect()
}

/// Persons holding an effective assignment at `post_id` overlapping `slot`.
///
/// Each person appears once, in snapshot order of their first matching
/// assignment. Assignments naming a person missing from the snapshot are
/// skipped.
#[must_use]
pub fn team_for_slot<'a>(
    snapshot: &'a RosterSnapshot,
    post_id: PostId,
    slot: &Interval,
) -> Vec<&'a Person> {
    let mut seen: BTreeSet<PersonId> = BTreeSet::new();
    snapshot
        .assignments_at(post_id)
        .filter(|a| a.is_effective() && a.interval.overlaps(slot))
        .filter(|a| seen.insert(a.person_id))
        .filter_map(|a| snapshot.person(a.person_id))
        .collect()
}

/// Checks a proposed team against a post's requirements.
///
/// Produces a `MissingQualification` warning naming the uncovered
/// certificates and an `Understaffed` info alert when the team is smaller
/// than the post's headcount.
#[must_use]
pub fn check_team_coverage(post: &Post, team: &[&Person]) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = Vec::new();
    let person_ids: Vec<PersonId> = team.iter().map(|p| p.id).collect();

    let missing: BTreeSet<CertificateId> =
        missing_certificates(&post.required_certificates, team.iter().copied());
    if !missing.is_empty() {
        let listed: Vec<String> = missing.iter().map(ToString::to_string).collect();
        alerts.push(Alert::new(
            Severity::Warning,
            AlertCode::MissingQualification,
            format!(
                "Team at '{}' is missing required certificates: {}",
                post.name,
                listed.join(", ")
            ),
            person_ids.clone(),
        ));
    }

    let headcount: usize = usize::try_from(post.required_headcount).unwrap_or(usize::MAX);
    if team.len() < headcount {
        alerts.push(Alert::new(
            Severity::Info,
            AlertCode::Understaffed,
            format!(
                "Post '{}' has {} of {} required persons",
                post.name,
                team.len(),
                post.required_headcount
            ),
            person_ids,
        ));
    }

    alerts
}
