// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rest rule evaluation.
//!
//! Rest is measured between a candidate interval and the nearest effective
//! assignment of the same person on either side of it:
//!
//! - the gap *before* is measured from the end of the nearest assignment
//!   ending at or before the candidate start; its critical threshold is that
//!   prior assignment's duration
//! - the gap *after* is measured to the start of the nearest assignment
//!   starting at or after the candidate end; its critical threshold is the
//!   candidate's own duration
//!
//! Critical thresholds are scaled by `critical_rest_factor` and never fall
//! below `critical_rest_floor_hours`. A gap that is not critical but shorter
//! than `min_rest_hours` is a standard violation.
//!
//! Rest violations are advisory. Only `critical_rest_blocks` turns the
//! critical tier into an error.

use crate::alert::{Alert, AlertCode, Severity};
use crate::policy::SchedulingPolicy;
use crate::types::{Assignment, AssignmentId, Interval, Person, PersonId, minutes_to_hours};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Which gap a violation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestSide {
    /// Between the previous assignment and the candidate.
    Before,
    /// Between the candidate and the next assignment.
    After,
}

/// Tier of a rest violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestSeverity {
    /// Rest shorter than the adjacent shift's duration.
    Critical,
    /// Rest shorter than the policy minimum.
    Standard,
}

/// A single rest violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestViolation {
    /// Which gap is too short.
    pub side: RestSide,
    /// How bad it is.
    pub severity: RestSeverity,
    /// The neighbouring assignment on that side.
    pub neighbour: AssignmentId,
    /// Actual rest.
    pub rest_minutes: i64,
    /// Rest required by the tier that was violated.
    pub required_minutes: i64,
}

/// Critical rest threshold for a gap next to a shift of `adjacent_minutes`.
#[must_use]
pub fn critical_threshold_minutes(adjacent_minutes: i64, policy: &SchedulingPolicy) -> i64 {
    let scaled: i64 = (adjacent_minutes.to_f64().unwrap_or_default()
        * policy.critical_rest_factor)
        .round()
        .to_i64()
        .unwrap_or(adjacent_minutes);
    scaled.max(policy.critical_rest_floor_minutes())
}

/// Classifies a single gap.
///
/// Returns the violated tier and the rest that tier requires, or `None` when
/// the gap is long enough.
#[must_use]
pub fn classify_rest(
    rest_minutes: i64,
    adjacent_minutes: i64,
    policy: &SchedulingPolicy,
) -> Option<(RestSeverity, i64)> {
    let critical: i64 = critical_threshold_minutes(adjacent_minutes, policy);
    if rest_minutes < critical {
        return Some((RestSeverity::Critical, critical));
    }

    let standard: i64 = policy.min_rest_minutes();
    if rest_minutes < standard {
        return Some((RestSeverity::Standard, standard));
    }

    None
}

/// Evaluates the rest before and after a candidate interval.
///
/// # Arguments
///
/// * `person_id` - The person being checked
/// * `interval` - The candidate interval
/// * `assignments` - Existing assignments (other persons are ignored)
/// * `exclude` - An assignment to ignore, for edits
/// * `policy` - Rest thresholds
///
/// # Returns
///
/// Zero, one or two violations, the gap before first.
pub fn evaluate_rest<'a, I>(
    person_id: PersonId,
    interval: &Interval,
    assignments: I,
    exclude: Option<AssignmentId>,
    policy: &SchedulingPolicy,
) -> Vec<RestViolation>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut prior: Option<&Assignment> = None;
    let mut next: Option<&Assignment> = None;

    for assignment in assignments.into_iter().filter(|a| {
        a.person_id == person_id && a.is_effective() && exclude != Some(a.id)
    }) {
        if assignment.interval.end() <= interval.start()
            && prior.is_none_or(|p| assignment.interval.end() > p.interval.end())
        {
            prior = Some(assignment);
        }
        if assignment.interval.start() >= interval.end()
            && next.is_none_or(|n| assignment.interval.start() < n.interval.start())
        {
            next = Some(assignment);
        }
    }

    let mut violations: Vec<RestViolation> = Vec::new();

    if let Some(prior) = prior {
        let rest_minutes: i64 = (interval.start() - prior.interval.end()).num_minutes();
        if let Some((severity, required_minutes)) =
            classify_rest(rest_minutes, prior.interval.duration_minutes(), policy)
        {
            violations.push(RestViolation {
                side: RestSide::Before,
                severity,
                neighbour: prior.id,
                rest_minutes,
                required_minutes,
            });
        }
    }

    if let Some(next) = next {
        let rest_minutes: i64 = (next.interval.start() - interval.end()).num_minutes();
        if let Some((severity, required_minutes)) =
            classify_rest(rest_minutes, interval.duration_minutes(), policy)
        {
            violations.push(RestViolation {
                side: RestSide::After,
                severity,
                neighbour: next.id,
                rest_minutes,
                required_minutes,
            });
        }
    }

    violations
}

/// Turns rest violations into alerts for `person`.
#[must_use]
pub fn rest_alerts(
    person: &Person,
    violations: &[RestViolation],
    policy: &SchedulingPolicy,
) -> Vec<Alert> {
    violations
        .iter()
        .map(|violation| {
            let (severity, code): (Severity, AlertCode) = match violation.severity {
                RestSeverity::Critical if policy.critical_rest_blocks => {
                    (Severity::Error, AlertCode::CriticalRest)
                }
                RestSeverity::Critical => (Severity::Warning, AlertCode::CriticalRest),
                RestSeverity::Standard => (Severity::Warning, AlertCode::InsufficientRest),
            };
            let side: &str = match violation.side {
                RestSide::Before => "after the previous shift",
                RestSide::After => "before the next shift",
            };
            Alert::new(
                severity,
                code,
                format!(
                    "{} would rest only {:.1}h {side} (requires {:.1}h)",
                    person.name,
                    minutes_to_hours(violation.rest_minutes),
                    minutes_to_hours(violation.required_minutes)
                ),
                vec![person.id],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_against_eight_hour_shift() {
        let policy = SchedulingPolicy::default();
        let eight_hours: i64 = 8 * 60;

        assert_eq!(
            classify_rest(60, eight_hours, &policy),
            Some((RestSeverity::Critical, eight_hours))
        );
        assert_eq!(
            classify_rest(8 * 60, eight_hours, &policy),
            None,
            "rest equal to the shift and the minimum is enough"
        );
    }

    #[test]
    fn test_standard_tier_between_critical_and_minimum() {
        let policy = SchedulingPolicy::default();
        // 4h shift: critical below 4h, standard below 8h
        assert_eq!(
            classify_rest(3 * 60, 4 * 60, &policy),
            Some((RestSeverity::Critical, 4 * 60))
        );
        assert_eq!(
            classify_rest(6 * 60, 4 * 60, &policy),
            Some((RestSeverity::Standard, 8 * 60))
        );
        assert_eq!(classify_rest(9 * 60, 4 * 60, &policy), None);
    }

    #[test]
    fn test_critical_floor_applies_to_short_shifts() {
        let policy = SchedulingPolicy::default();
        // 30-minute shift still needs one hour before it is merely standard
        assert_eq!(
            classify_rest(45, 30, &policy),
            Some((RestSeverity::Critical, 60))
        );
        assert_eq!(
            classify_rest(60, 30, &policy),
            Some((RestSeverity::Standard, 8 * 60))
        );
    }

    #[test]
    fn test_critical_factor_scales_threshold() {
        let policy = SchedulingPolicy {
            critical_rest_factor: 0.5,
            ..SchedulingPolicy::default()
        };
        assert_eq!(critical_threshold_minutes(8 * 60, &policy), 4 * 60);
        assert_eq!(critical_threshold_minutes(60, &policy), 60);
    }

    #[test]
    fn test_long_shift_makes_long_rest_critical() {
        let policy = SchedulingPolicy::default();
        // after a 12h shift, 10h rest is above the 8h minimum but still critical
        assert_eq!(
            classify_rest(10 * 60, 12 * 60, &policy),
            Some((RestSeverity::Critical, 12 * 60))
        );
    }
}
