// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command implementations.
//!
//! Each command takes loaded inputs and returns a serialisable result; the
//! caller decides where it is printed.

use crate::error::CliError;
use crate::store::InMemoryStore;
use duty_roster_domain::{
    Assignment, AssignmentId, FairnessLedger, Interval, PersonId, PostId, RosterSnapshot,
    SchedulingPolicy, Suggestion, ValidationResult, fairness_score, suggest,
    validate_assignment_in, validate_team,
};
use duty_roster_import::{ImportOptions, ImportReport, import_from_grid};
use serde::Serialize;

/// Result of the `import` command.
#[derive(Debug, Serialize)]
pub struct ImportOutput {
    /// Counts, failures and unresolved names.
    pub report: ImportReport,
    /// Assignments the import created.
    pub created: Vec<Assignment>,
}

/// Imports a grid into the store.
pub async fn import(
    grid: &str,
    snapshot: &RosterSnapshot,
    store: &mut InMemoryStore,
    options: ImportOptions<'_>,
) -> ImportOutput {
    let report: ImportReport = import_from_grid(grid, snapshot, store, options).await;
    ImportOutput {
        report,
        created: store.created().to_vec(),
    }
}

/// Result of the `validate` command.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    /// Overlap, rest and availability findings for the person.
    pub assignment: ValidationResult,
    /// Qualification and headcount findings for the post's team, when a
    /// post was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<ValidationResult>,
}

/// Validates a proposed assignment, and the resulting team when `post_id`
/// is given.
///
/// # Errors
///
/// Returns an error if the person or post is not in the snapshot.
pub fn validate(
    snapshot: &RosterSnapshot,
    person_id: PersonId,
    post_id: Option<PostId>,
    interval: &Interval,
    exclude: Option<AssignmentId>,
    policy: &SchedulingPolicy,
) -> Result<ValidateOutput, CliError> {
    let assignment: ValidationResult =
        validate_assignment_in(snapshot, person_id, interval, exclude, policy)?;
    let team: Option<ValidationResult> = post_id
        .map(|post_id| validate_team(snapshot, post_id, interval, &[person_id]))
        .transpose()?;

    Ok(ValidateOutput { assignment, team })
}

/// Ranks candidates for a slot.
///
/// # Errors
///
/// Returns an error if `post_id` names a post missing from the snapshot.
pub fn suggestions<'a>(
    snapshot: &'a RosterSnapshot,
    post_id: Option<PostId>,
    interval: &Interval,
    limit: usize,
    policy: &SchedulingPolicy,
) -> Result<Vec<Suggestion<'a>>, CliError> {
    if let Some(post_id) = post_id {
        snapshot.require_post(post_id)?;
    }
    Ok(suggest(snapshot, post_id, interval, limit, policy))
}

/// One person's fairness score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonScore {
    /// The person.
    pub person_id: PersonId,
    /// Display name.
    pub name: String,
    /// Accumulated weight of their assignments.
    pub score: f64,
}

/// Fairness scores for every person, highest first.
///
/// Without a post the totals come from a rebuilt `FairnessLedger`; with a
/// post only history at that post counts.
///
/// # Errors
///
/// Returns an error if `post_id` names a post missing from the snapshot.
pub fn scores(
    snapshot: &RosterSnapshot,
    post_id: Option<PostId>,
    policy: &SchedulingPolicy,
) -> Result<Vec<PersonScore>, CliError> {
    let ledger: Option<FairnessLedger> = match post_id {
        Some(post_id) => {
            snapshot.require_post(post_id)?;
            None
        }
        None => Some(FairnessLedger::rebuild(snapshot, policy)),
    };

    let mut scores: Vec<PersonScore> = snapshot
        .persons()
        .iter()
        .map(|person| PersonScore {
            person_id: person.id,
            name: person.name.clone(),
            score: ledger.as_ref().map_or_else(
                || fairness_score(snapshot, person.id, post_id, policy),
                |ledger| ledger.score(person.id),
            ),
        })
        .collect();

    scores.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(scores)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use duty_roster_domain::{AlertCode, CertificateId, DomainError, Person, Post};

    fn slot(day: u32, start_hour: u32, end_hour: u32) -> Interval {
        let date = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        Interval::new(
            date.and_hms_opt(start_hour, 0, 0).unwrap(),
            date.and_hms_opt(end_hour, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn snapshot() -> RosterSnapshot {
        RosterSnapshot::new(
            vec![
                Person::new(PersonId::new(1), "Dana Levi")
                    .with_certificates([CertificateId::new(1)]),
                Person::new(PersonId::new(2), "Omer Ben David"),
            ],
            vec![
                Post::new(PostId::new(10), "Gate")
                    .with_headcount(2)
                    .with_required_certificates([CertificateId::new(1)]),
                Post::new(PostId::new(11), "Tower"),
            ],
            vec![],
            vec![
                Assignment::new(
                    AssignmentId::new(1),
                    PersonId::new(1),
                    PostId::new(10),
                    slot(2, 6, 14),
                ),
                Assignment::new(
                    AssignmentId::new(2),
                    PersonId::new(2),
                    PostId::new(11),
                    slot(2, 10, 12),
                ),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_import_returns_created_assignments() {
        let snapshot = snapshot();
        let mut store = InMemoryStore::from_snapshot(&snapshot);
        let grid = "\
,,,,05/03/2026,,
,,,,,,
Name,6-10,10-14,14-18,18-22,22-02,02-06
Omer Ben David,Gate,Gate,,,,
";

        let output = import(grid, &snapshot, &mut store, ImportOptions::default()).await;

        assert_eq!(output.report.created, 1);
        assert_eq!(output.created.len(), 1);
        assert_eq!(output.created[0].id, AssignmentId::new(3));
        assert_eq!(output.created[0].interval, slot(5, 6, 14));
    }

    #[test]
    fn test_validate_with_team() {
        let snapshot = snapshot();
        let policy = SchedulingPolicy::default();

        let output = validate(
            &snapshot,
            PersonId::new(2),
            Some(PostId::new(10)),
            &slot(2, 8, 12),
            None,
            &policy,
        )
        .unwrap();

        // Omer already holds the tower from 10:00
        assert!(!output.assignment.is_valid);
        let team = output.team.unwrap();
        assert!(team.alerts.is_empty(), "Dana covers the certificate, two on the team");

        let output = validate(&snapshot, PersonId::new(2), None, &slot(3, 8, 12), None, &policy)
            .unwrap();
        assert!(output.assignment.is_valid);
        assert!(output.team.is_none());
    }

    #[test]
    fn test_validate_unknown_person() {
        let result = validate(
            &snapshot(),
            PersonId::new(9),
            None,
            &slot(3, 8, 12),
            None,
            &SchedulingPolicy::default(),
        );
        assert!(matches!(
            result,
            Err(CliError::Domain(DomainError::PersonNotFound(_)))
        ));
    }

    #[test]
    fn test_suggestions_rank_and_check_post() {
        let snapshot = snapshot();
        let policy = SchedulingPolicy::default();

        let ranked =
            suggestions(&snapshot, Some(PostId::new(10)), &slot(3, 10, 14), 5, &policy).unwrap();
        assert_eq!(ranked[0].person.id, PersonId::new(2));

        let unknown = suggestions(&snapshot, Some(PostId::new(99)), &slot(3, 10, 14), 5, &policy);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_scores_from_ledger_and_by_post() {
        let snapshot = snapshot();
        let policy = SchedulingPolicy::default();

        let all = scores(&snapshot, None, &policy).unwrap();
        assert_eq!(all[0].person_id, PersonId::new(1));
        assert!((all[0].score - 8.0).abs() < 1e-9);
        assert!((all[1].score - 2.0).abs() < 1e-9);

        let tower = scores(&snapshot, Some(PostId::new(11)), &policy).unwrap();
        assert_eq!(tower[0].person_id, PersonId::new(2));
        assert!(tower[1].score.abs() < 1e-9);

        let alert_free = validate(
            &snapshot,
            PersonId::new(1),
            None,
            &slot(4, 10, 14),
            None,
            &policy,
        )
        .unwrap();
        assert_eq!(alert_free.assignment.alerts_with(AlertCode::Overlap).count(), 0);
    }
}
