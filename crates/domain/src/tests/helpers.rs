// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignment, AssignmentId, CertificateId, Interval, Person, PersonId, Post, PostId,
    RosterSnapshot,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Wall-clock instant in March 2026. The 2nd is a Monday, the 6th a Friday.
pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .expect("valid test date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid test time")
}

/// Interval within a single day of March 2026.
pub fn hours(day: u32, start_hour: u32, end_hour: u32) -> Interval {
    Interval::new(at(day, start_hour), at(day, end_hour)).expect("valid test interval")
}

/// Interval spanning two instants of March 2026.
pub fn span(day: u32, start_hour: u32, end_day: u32, end_hour: u32) -> Interval {
    Interval::new(at(day, start_hour), at(end_day, end_hour)).expect("valid test interval")
}

pub fn create_test_person(id: i64, name: &str) -> Person {
    Person::new(PersonId::new(id), name)
}

pub fn create_test_post(id: i64, name: &str) -> Post {
    Post::new(PostId::new(id), name)
}

pub fn create_test_assignment(id: i64, person: i64, post: i64, interval: Interval) -> Assignment {
    Assignment::new(
        AssignmentId::new(id),
        PersonId::new(person),
        PostId::new(post),
        interval,
    )
}

pub fn cert(id: i64) -> CertificateId {
    CertificateId::new(id)
}

pub fn create_test_snapshot(
    persons: Vec<Person>,
    posts: Vec<Post>,
    assignments: Vec<Assignment>,
) -> RosterSnapshot {
    RosterSnapshot::new(persons, posts, vec![], assignments).expect("valid test snapshot")
}
