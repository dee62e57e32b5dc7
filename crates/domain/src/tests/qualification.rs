// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    cert, create_test_assignment, create_test_person, create_test_post, create_test_snapshot,
    hours,
};
use crate::{
    AlertCode, AssignmentStatus, DomainError, PersonId, PostId, team_for_slot, validate_team,
};

fn tower_snapshot() -> crate::RosterSnapshot {
    create_test_snapshot(
        vec![
            create_test_person(1, "Alice").with_certificates([cert(1)]),
            create_test_person(2, "Bob").with_certificates([cert(2)]),
            create_test_person(3, "Carol"),
        ],
        vec![
            create_test_post(10, "Tower")
                .with_headcount(2)
                .with_required_certificates([cert(1), cert(2)]),
            create_test_post(11, "Gate"),
        ],
        vec![
            create_test_assignment(1, 1, 10, hours(2, 6, 10)),
            create_test_assignment(2, 1, 10, hours(2, 8, 12)),
            create_test_assignment(3, 2, 11, hours(2, 6, 10)),
            create_test_assignment(4, 3, 10, hours(2, 6, 10))
                .with_status(AssignmentStatus::Cancelled),
        ],
    )
}

#[test]
fn test_team_for_slot_dedups_and_filters() {
    let snapshot = tower_snapshot();
    let team = team_for_slot(&snapshot, PostId::new(10), &hours(2, 7, 9));
    let ids: Vec<PersonId> = team.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![PersonId::new(1)]);
}

#[test]
fn test_validate_team_reports_missing_then_covered() {
    let snapshot = tower_snapshot();

    let result = validate_team(&snapshot, PostId::new(10), &hours(2, 6, 10), &[]).unwrap();
    assert!(result.is_valid);
    assert_eq!(result.alerts_with(AlertCode::MissingQualification).count(), 1);
    assert_eq!(result.alerts_with(AlertCode::Understaffed).count(), 1);

    let result = validate_team(
        &snapshot,
        PostId::new(10),
        &hours(2, 6, 10),
        &[PersonId::new(2), PersonId::new(1)],
    )
    .unwrap();
    assert!(result.alerts.is_empty());
}

#[test]
fn test_validate_team_unknown_ids() {
    let snapshot = tower_snapshot();
    assert_eq!(
        validate_team(&snapshot, PostId::new(99), &hours(2, 6, 10), &[]),
        Err(DomainError::PostNotFound(PostId::new(99)))
    );
    assert_eq!(
        validate_team(
            &snapshot,
            PostId::new(10),
            &hours(2, 6, 10),
            &[PersonId::new(42)]
        ),
        Err(DomainError::PersonNotFound(PersonId::new(42)))
    );
}
