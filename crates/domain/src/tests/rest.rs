// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_assignment, hours, span};
use crate::{
    Assignment, AssignmentId, AssignmentStatus, PersonId, RestSeverity, RestSide, RestViolation,
    SchedulingPolicy, evaluate_rest,
};

fn day_shift_history() -> Vec<Assignment> {
    // 06:00-14:00 on Monday
    vec![create_test_assignment(1, 7, 1, hours(2, 6, 14))]
}

fn half_shift_policy() -> SchedulingPolicy {
    SchedulingPolicy {
        critical_rest_factor: 0.5,
        ..SchedulingPolicy::default()
    }
}

#[test]
fn test_one_hour_after_eight_hour_shift_is_critical() {
    let history = day_shift_history();
    let violations: Vec<RestViolation> = evaluate_rest(
        PersonId::new(7),
        &hours(2, 15, 19),
        &history,
        None,
        &SchedulingPolicy::default(),
    );

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].side, RestSide::Before);
    assert_eq!(violations[0].severity, RestSeverity::Critical);
    assert_eq!(violations[0].rest_minutes, 60);
    assert_eq!(violations[0].neighbour, AssignmentId::new(1));
}

#[test]
fn test_six_hours_after_eight_hour_shift() {
    let history = day_shift_history();

    // Against the full shift length six hours is still critical
    let violations = evaluate_rest(
        PersonId::new(7),
        &hours(2, 20, 23),
        &history,
        None,
        &SchedulingPolicy::default(),
    );
    assert_eq!(violations[0].severity, RestSeverity::Critical);

    // With the critical threshold at half the shift it is a standard violation
    let violations = evaluate_rest(
        PersonId::new(7),
        &hours(2, 20, 23),
        &history,
        None,
        &half_shift_policy(),
    );
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, RestSeverity::Standard);
    assert_eq!(violations[0].required_minutes, 8 * 60);
}

#[test]
fn test_eight_hours_after_eight_hour_shift_is_fine() {
    let history = day_shift_history();
    for policy in [SchedulingPolicy::default(), half_shift_policy()] {
        assert!(
            evaluate_rest(
                PersonId::new(7),
                &span(2, 22, 3, 2),
                &history,
                None,
                &policy
            )
            .is_empty()
        );
    }
}

#[test]
fn test_gap_after_uses_candidate_duration() {
    // next shift starts Tuesday 06:00
    let history = vec![create_test_assignment(1, 7, 1, hours(3, 6, 10))];

    // 2h candidate ending 02:00 leaves 4h: not critical (>= 2h) but under 8h
    let violations = evaluate_rest(
        PersonId::new(7),
        &span(3, 0, 3, 2),
        &history,
        None,
        &SchedulingPolicy::default(),
    );
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].side, RestSide::After);
    assert_eq!(violations[0].severity, RestSeverity::Standard);

    // 6h candidate ending 02:00 leaves 4h: critical
    let violations = evaluate_rest(
        PersonId::new(7),
        &span(2, 20, 3, 2),
        &history,
        None,
        &SchedulingPolicy::default(),
    );
    assert_eq!(violations[0].severity, RestSeverity::Critical);
    assert_eq!(violations[0].required_minutes, 6 * 60);
}

#[test]
fn test_nearest_neighbours_only() {
    let history = vec![
        create_test_assignment(1, 7, 1, hours(2, 0, 4)),
        create_test_assignment(2, 7, 1, hours(2, 6, 8)),
        create_test_assignment(3, 7, 1, hours(2, 20, 22)),
        create_test_assignment(4, 7, 1, hours(2, 18, 19)),
    ];
    let violations = evaluate_rest(
        PersonId::new(7),
        &hours(2, 10, 12),
        &history,
        None,
        &SchedulingPolicy::default(),
    );

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].neighbour, AssignmentId::new(2));
    assert_eq!(violations[1].neighbour, AssignmentId::new(4));
}

#[test]
fn test_cancelled_excluded_and_other_persons_ignored() {
    let history = vec![
        create_test_assignment(1, 7, 1, hours(2, 6, 14)).with_status(AssignmentStatus::Cancelled),
        create_test_assignment(2, 7, 1, hours(2, 8, 14)),
        create_test_assignment(3, 8, 1, hours(2, 6, 14)),
    ];

    let violations = evaluate_rest(
        PersonId::new(7),
        &hours(2, 15, 19),
        &history,
        Some(AssignmentId::new(2)),
        &SchedulingPolicy::default(),
    );
    assert!(violations.is_empty());
}
