// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentWriter, WriteError};
use chrono::{NaiveDate, NaiveDateTime};
use duty_roster_domain::{
    Assignment, AssignmentId, Interval, NewAssignment, Person, PersonId, Post, PostId,
    RosterSnapshot,
};
use std::future::{Future, ready};

/// Wall-clock instant in March 2026.
pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .expect("valid test date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid test time")
}

pub fn span(day: u32, start_hour: u32, end_day: u32, end_hour: u32) -> Interval {
    Interval::new(at(day, start_hour), at(end_day, end_hour)).expect("valid test interval")
}

/// Header rows for a grid covering 5 and 6 March 2026.
pub const GRID_HEADER: &str = "\
,,,,05/03/2026,,,,,,06/03/2026,,
,,,,,,,,,,,,
Name,6-10,10-14,14-18,18-22,22-02,02-06,6-10,10-14,14-18,18-22,22-02,02-06
";

/// Builds a grid from person rows under `GRID_HEADER`.
pub fn create_test_grid(rows: &[&str]) -> String {
    let mut grid: String = GRID_HEADER.to_string();
    for row in rows {
        grid.push_str(row);
        grid.push('\n');
    }
    grid
}

pub fn create_test_snapshot(assignments: Vec<Assignment>) -> RosterSnapshot {
    RosterSnapshot::new(
        vec![
            Person::new(PersonId::new(1), "Dana Levi"),
            Person::new(PersonId::new(2), "Omer Ben David"),
        ],
        vec![
            Post::new(PostId::new(10), "Gate"),
            Post::new(PostId::new(11), "Tower"),
        ],
        vec![],
        assignments,
    )
    .expect("valid test snapshot")
}

/// In-memory writer recording every created assignment.
///
/// Writes whose draft starts at an instant in `fail_at` are rejected.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub created: Vec<Assignment>,
    pub fail_at: Vec<NaiveDateTime>,
    pub next_id: i64,
}

impl AssignmentWriter for RecordingWriter {
    fn create(
        &mut self,
        draft: NewAssignment,
    ) -> impl Future<Output = Result<Assignment, WriteError>> + Send {
        let result: Result<Assignment, WriteError> =
            if self.fail_at.contains(&draft.interval.start()) {
                Err(WriteError::Unavailable {
                    reason: String::from("database is locked"),
                })
            } else {
                self.next_id += 1;
                let assignment: Assignment =
                    draft.into_assignment(AssignmentId::new(1000 + self.next_id));
                self.created.push(assignment.clone());
                Ok(assignment)
            };
        ready(result)
    }
}
