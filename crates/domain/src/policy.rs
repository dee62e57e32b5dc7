// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling policy.
//!
//! Every field has a default, so a policy file only needs to name the values
//! it changes.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A daily window of whole hours, `[start_hour, end_hour)`.
///
/// Wraps past midnight when `start_hour > end_hour` (22 to 6 covers 22:00
/// through 05:59). An equal start and end is an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    /// First hour inside the window.
    pub start_hour: u32,
    /// First hour after the window.
    pub end_hour: u32,
}

impl HourWindow {
    /// Whether `hour` falls inside the window.
    #[must_use]
    pub const fn contains_hour(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// A point in the week, at whole-hour precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPoint {
    /// Day of the week.
    pub day: Weekday,
    /// Hour of that day.
    pub hour: u32,
}

impl WeekPoint {
    fn minute_of_week(&self) -> u32 {
        self.day.num_days_from_monday() * MINUTES_PER_DAY + self.hour * 60
    }
}

/// A recurring weekly window, `[start, end)`, which may wrap past Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWindow {
    /// Where the window opens.
    pub start: WeekPoint,
    /// Where the window closes.
    pub end: WeekPoint,
}

impl WeeklyWindow {
    /// Whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let minute: u32 = instant.weekday().num_days_from_monday() * MINUTES_PER_DAY
            + instant.hour() * 60
            + instant.minute();
        let start: u32 = self.start.minute_of_week();
        let end: u32 = self.end.minute_of_week();

        if start <= end {
            minute >= start && minute < end
        } else {
            minute >= start || minute < end
        }
    }
}

/// Which existing assignments an imported candidate is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapScope {
    /// Only assignments of the same person at the same post.
    #[default]
    PersonAndPost,
    /// Every assignment of the same person.
    Person,
}

/// Tunable scheduling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Minimum rest between two assignments of the same person.
    pub min_rest_hours: u32,
    /// Lower bound of the critical rest threshold.
    pub critical_rest_floor_hours: u32,
    /// Multiplier applied to the adjacent shift's duration to obtain the
    /// critical rest threshold.
    ///
    /// At 1.0 an 8h shift needs 8h of rest before it stops being critical,
    /// so 6h after it is critical. At 0.5 the same 6h is a standard
    /// violation and only rest under 4h is critical.
    pub critical_rest_factor: f64,
    /// Report critical rest as `Severity::Error` instead of a warning.
    pub critical_rest_blocks: bool,
    /// Night hours for the fairness scorer.
    pub night_window: HourWindow,
    /// Fairness multiplier for shifts touching the night window.
    pub night_multiplier: f64,
    /// Weekend window for the fairness scorer.
    pub weekend_window: WeeklyWindow,
    /// Fairness multiplier for shifts starting inside the weekend window.
    pub weekend_multiplier: f64,
    /// Overlap scope used when importing a grid.
    pub import_overlap_scope: OverlapScope,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            min_rest_hours: 8,
            critical_rest_floor_hours: 1,
            critical_rest_factor: 1.0,
            critical_rest_blocks: false,
            night_window: HourWindow {
                start_hour: 22,
                end_hour: 6,
            },
            night_multiplier: 1.3,
            weekend_window: WeeklyWindow {
                start: WeekPoint {
                    day: Weekday::Fri,
                    hour: 14,
                },
                end: WeekPoint {
                    day: Weekday::Sat,
                    hour: 22,
                },
            },
            weekend_multiplier: 1.5,
            import_overlap_scope: OverlapScope::PersonAndPost,
        }
    }
}

fn check_hour(field: &'static str, hour: u32) -> Result<(), DomainError> {
    if hour > 23 {
        return Err(DomainError::InvalidPolicy {
            field,
            reason: format!("hour must be between 0 and 23, got {hour}"),
        });
    }
    Ok(())
}

fn check_factor(field: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::InvalidPolicy {
            field,
            reason: format!("must be a positive number, got {value}"),
        });
    }
    Ok(())
}

impl SchedulingPolicy {
    /// Minimum rest in minutes.
    #[must_use]
    pub fn min_rest_minutes(&self) -> i64 {
        i64::from(self.min_rest_hours) * 60
    }

    /// Critical rest floor in minutes.
    #[must_use]
    pub fn critical_rest_floor_minutes(&self) -> i64 {
        i64::from(self.critical_rest_floor_hours) * 60
    }

    /// Checks every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPolicy` naming the first bad field.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_hour("night_window.start_hour", self.night_window.start_hour)?;
        check_hour("night_window.end_hour", self.night_window.end_hour)?;
        check_hour("weekend_window.start.hour", self.weekend_window.start.hour)?;
        check_hour("weekend_window.end.hour", self.weekend_window.end.hour)?;
        check_factor("critical_rest_factor", self.critical_rest_factor)?;
        check_factor("night_multiplier", self.night_multiplier)?;
        check_factor("weekend_multiplier", self.weekend_multiplier)?;
        Ok(())
    }
}
