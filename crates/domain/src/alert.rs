// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Alerts produced by validation.
//!
//! Alerts are never persisted. Only `Severity::Error` blocks an assignment.

use crate::types::PersonId;
use serde::{Deserialize, Serialize};

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the assignment.
    Error,
    /// Surfaced to the caller, does not block.
    Warning,
    /// Informational only.
    Info,
}

/// Machine-readable alert code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCode {
    /// The person already holds an overlapping assignment.
    Overlap,
    /// Rest shorter than the adjacent shift's duration.
    CriticalRest,
    /// Rest shorter than the policy minimum.
    InsufficientRest,
    /// The team on a slot does not hold every required certificate.
    MissingQualification,
    /// The team on a slot is smaller than the post's headcount.
    Understaffed,
    /// The person's status does not allow duty.
    PersonUnavailable,
    /// The person is on leave during the interval.
    OnLeave,
}

impl AlertCode {
    /// Converts this code to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overlap => "OVERLAP",
            Self::CriticalRest => "CRITICAL_REST",
            Self::InsufficientRest => "INSUFFICIENT_REST",
            Self::MissingQualification => "MISSING_QUALIFICATION",
            Self::Understaffed => "UNDERSTAFFED",
            Self::PersonUnavailable => "PERSON_UNAVAILABLE",
            Self::OnLeave => "ON_LEAVE",
        }
    }
}

impl std::fmt::Display for AlertCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Severity.
    pub severity: Severity,
    /// Machine-readable code.
    pub code: AlertCode,
    /// Human-readable message.
    pub message: String,
    /// The persons this alert concerns.
    pub person_ids: Vec<PersonId>,
}

impl Alert {
    /// Creates a new alert.
    #[must_use]
    pub const fn new(
        severity: Severity,
        code: AlertCode,
        message: String,
        person_ids: Vec<PersonId>,
    ) -> Self {
        Self {
            severity,
            code,
            message,
            person_ids,
        }
    }

    /// Whether this alert blocks the assignment.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}
