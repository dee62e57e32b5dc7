// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loading roster data and configuration from disk.

use crate::error::CliError;
use chrono::NaiveDateTime;
use duty_roster_domain::{RosterSnapshot, SchedulingPolicy};
use duty_roster_import::GridLayout;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Reads a file to a string.
///
/// # Errors
///
/// Returns `CliError::Read` if the file cannot be read.
pub fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text: String = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a roster snapshot.
///
/// # Errors
///
/// Returns an error if the file is unreadable, not valid JSON, or holds
/// duplicate ids or inverted intervals.
pub fn load_snapshot(path: &Path) -> Result<RosterSnapshot, CliError> {
    let snapshot: RosterSnapshot = read_json(path)?;
    info!(
        path = %path.display(),
        persons = snapshot.persons().len(),
        posts = snapshot.posts().len(),
        assignments = snapshot.assignments().len(),
        "Loaded roster snapshot"
    );
    Ok(snapshot)
}

/// Loads a scheduling policy, or the default when no path is given.
///
/// # Errors
///
/// Returns an error if the file is unreadable, not valid JSON, or the
/// policy is out of range.
pub fn load_policy(path: Option<&Path>) -> Result<SchedulingPolicy, CliError> {
    let policy: SchedulingPolicy = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading scheduling policy");
            read_json(path)?
        }
        None => SchedulingPolicy::default(),
    };
    policy.validate()?;
    Ok(policy)
}

/// Loads a grid layout, or the default when no path is given.
///
/// # Errors
///
/// Returns an error if the file is unreadable, not valid JSON, or the
/// layout is inconsistent.
pub fn load_layout(path: Option<&Path>) -> Result<GridLayout, CliError> {
    let layout: GridLayout = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading grid layout");
            read_json(path)?
        }
        None => GridLayout::default(),
    };
    layout.validate()?;
    Ok(layout)
}

/// Parses a wall-clock date and time argument.
///
/// Accepts `2026-03-05T06:00`, `2026-03-05T06:00:00` and `2026-03-05 06:00`.
///
/// # Errors
///
/// Returns a message naming the accepted forms.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
        .ok_or_else(|| format!("'{value}' is not a date and time like 2026-03-05T06:00"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use duty_roster_import::LayoutError;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("duty-roster-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_datetime_forms() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        for value in ["2026-03-05T06:00", "2026-03-05T06:00:00", "2026-03-05 06:00"] {
            assert_eq!(parse_datetime(value), Ok(expected), "value {value}");
        }
        assert!(parse_datetime("05/03/2026 06:00").is_err());
    }

    #[test]
    fn test_defaults_without_files() {
        assert_eq!(load_policy(None).unwrap(), SchedulingPolicy::default());
        assert_eq!(load_layout(None).unwrap(), GridLayout::default());
    }

    #[test]
    fn test_partial_policy_file() {
        let path = temp_file(
            "policy.json",
            r#"{"min_rest_hours": 10, "critical_rest_blocks": true}"#,
        );
        let policy = load_policy(Some(&path)).unwrap();
        assert_eq!(policy.min_rest_hours, 10);
        assert!(policy.critical_rest_blocks);
        assert!((policy.night_multiplier - 1.3).abs() < f64::EPSILON);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_inputs_are_reported() {
        let path = temp_file("bad-layout.json", r#"{"block_stride": 0}"#);
        assert!(matches!(
            load_layout(Some(&path)),
            Err(CliError::Layout(LayoutError::ZeroStride))
        ));
        std::fs::remove_file(path).unwrap();

        let path = temp_file("bad-snapshot.json", "{ not json");
        assert!(matches!(load_snapshot(&path), Err(CliError::Json { .. })));
        std::fs::remove_file(path).unwrap();

        let missing = std::env::temp_dir().join("duty-roster-does-not-exist.json");
        assert!(matches!(load_snapshot(&missing), Err(CliError::Read { .. })));
    }
}
