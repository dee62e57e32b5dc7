// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::at;
use crate::{DomainError, PersonId, PostId};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidInterval {
        start: at(2, 14),
        end: at(2, 10),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid interval: start 2026-03-02 14:00:00 must be before end 2026-03-02 10:00:00"
    );

    let err: DomainError = DomainError::PersonNotFound(PersonId::new(7));
    assert_eq!(format!("{err}"), "Person 7 not found");

    let err: DomainError = DomainError::PostNotFound(PostId::new(3));
    assert_eq!(format!("{err}"), "Post 3 not found");

    let err: DomainError = DomainError::DuplicatePerson(PersonId::new(7));
    assert_eq!(format!("{err}"), "Person 7 appears more than once");

    let err: DomainError = DomainError::InvalidAssignmentStatus(String::from("paused"));
    assert_eq!(format!("{err}"), "Invalid assignment status: 'paused'");

    let err: DomainError = DomainError::InvalidPolicy {
        field: "night_multiplier",
        reason: String::from("must be a positive number, got 0"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid scheduling policy (night_multiplier): must be a positive number, got 0"
    );
}
