// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grid export layout.
//!
//! The calendar export is a character grid with three header rows and one
//! row per person:
//!
//! - the date row repeats a date label once per block of `block_stride`
//!   columns, at `date_offset` within the block
//! - the label row names one time slot per column
//! - every later row starts with a name cell followed by post labels or
//!   "no assignment" tokens
//!
//! All positions are zero-based.

use crate::error::LayoutError;
use chrono::{Days, NaiveDate, NaiveDateTime};
use duty_roster_domain::Interval;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry in the closed time-slot vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotDef {
    /// Label as it appears in the label row, e.g. `6-10`.
    pub label: String,
    /// Hour the slot starts.
    pub start_hour: u32,
    /// Hour the slot ends.
    pub end_hour: u32,
    /// The slot ends on the day after it starts.
    #[serde(default)]
    pub overnight: bool,
    /// The whole slot lies on the day after the block's date.
    #[serde(default)]
    pub after_midnight: bool,
}

impl TimeSlotDef {
    /// Creates a same-day slot.
    #[must_use]
    pub fn new(label: &str, start_hour: u32, end_hour: u32) -> Self {
        Self {
            label: label.to_string(),
            start_hour,
            end_hour,
            overnight: false,
            after_midnight: false,
        }
    }

    /// Marks the slot as ending on the next day.
    #[must_use]
    pub const fn overnight(mut self) -> Self {
        self.overnight = true;
        self
    }

    /// Marks the slot as lying entirely on the next day.
    #[must_use]
    pub const fn after_midnight(mut self) -> Self {
        self.after_midnight = true;
        self
    }

    /// The concrete interval this slot covers in the block dated `date`.
    ///
    /// Returns `None` when the hours are out of range or the slot would be
    /// empty.
    #[must_use]
    pub fn interval_on(&self, date: NaiveDate) -> Option<Interval> {
        let day: NaiveDate = if self.after_midnight {
            date.checked_add_days(Days::new(1))?
        } else {
            date
        };
        let end_day: NaiveDate = if self.overnight {
            day.checked_add_days(Days::new(1))?
        } else {
            day
        };

        let start: NaiveDateTime = day.and_hms_opt(self.start_hour, 0, 0)?;
        let end: NaiveDateTime = end_day.and_hms_opt(self.end_hour, 0, 0)?;
        Interval::new(start, end).ok()
    }
}

/// Normalises a time-slot label for comparison.
///
/// Whitespace is dropped and leading zeros are removed from each hour, so
/// `06 - 10` and `6-10` compare equal.
#[must_use]
pub fn normalize_slot_label(label: &str) -> String {
    let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split('-')
        .map(|part| {
            let trimmed: &str = part.trim_start_matches('0');
            if trimmed.is_empty() && !part.is_empty() {
                "0"
            } else {
                trimmed
            }
        })
        .collect::<Vec<&str>>()
        .join("-")
}

fn default_time_slots() -> Vec<TimeSlotDef> {
    vec![
        TimeSlotDef::new("6-10", 6, 10),
        TimeSlotDef::new("10-14", 10, 14),
        TimeSlotDef::new("14-18", 14, 18),
        TimeSlotDef::new("18-22", 18, 22),
        TimeSlotDef::new("22-02", 22, 2).overnight(),
        TimeSlotDef::new("02-06", 2, 6).after_midnight(),
    ]
}

fn default_empty_tokens() -> Vec<String> {
    ["", "--", "-", "."].iter().map(ToString::to_string).collect()
}

fn default_placeholder_prefixes() -> Vec<String> {
    ["#", "*", "total"].iter().map(ToString::to_string).collect()
}

/// Row and column layout of a grid export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Row holding the date labels.
    pub date_row: usize,
    /// Row holding the time-slot labels.
    pub label_row: usize,
    /// First row holding a person.
    pub first_person_row: usize,
    /// Column holding person names.
    pub name_column: usize,
    /// Number of columns per day block.
    pub block_stride: usize,
    /// Position of the date label inside its block.
    pub date_offset: usize,
    /// The time-slot vocabulary.
    pub time_slots: Vec<TimeSlotDef>,
    /// Cell values meaning "no assignment".
    pub empty_tokens: Vec<String>,
    /// Name cells starting with one of these (case-insensitive) are not
    /// persons.
    pub placeholder_prefixes: Vec<String>,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            date_row: 0,
            label_row: 2,
            first_person_row: 3,
            name_column: 0,
            block_stride: 6,
            date_offset: 3,
            time_slots: default_time_slots(),
            empty_tokens: default_empty_tokens(),
            placeholder_prefixes: default_placeholder_prefixes(),
        }
    }
}

impl GridLayout {
    /// Checks that the layout can describe a grid.
    ///
    /// # Errors
    ///
    /// Returns a `LayoutError` for a zero stride, a date offset outside its
    /// block, header rows below the first person row, or an invalid or
    /// duplicated time slot.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.block_stride == 0 {
            return Err(LayoutError::ZeroStride);
        }
        if self.date_offset >= self.block_stride {
            return Err(LayoutError::DateOffsetOutsideBlock {
                offset: self.date_offset,
                stride: self.block_stride,
            });
        }
        let last_header_row: usize = self.label_row.max(self.date_row);
        if self.first_person_row <= last_header_row {
            return Err(LayoutError::PersonRowsOverlapHeader {
                first_person_row: self.first_person_row,
                label_row: last_header_row,
            });
        }

        let mut seen: HashSet<String> = HashSet::new();
        for slot in &self.time_slots {
            for hour in [slot.start_hour, slot.end_hour] {
                if hour > 23 {
                    return Err(LayoutError::SlotHourOutOfRange {
                        label: slot.label.clone(),
                        hour,
                    });
                }
            }
            if !slot.overnight && slot.start_hour >= slot.end_hour {
                return Err(LayoutError::InvertedSlot {
                    label: slot.label.clone(),
                });
            }
            if !seen.insert(normalize_slot_label(&slot.label)) {
                return Err(LayoutError::DuplicateSlotLabel {
                    label: slot.label.clone(),
                });
            }
        }

        Ok(())
    }

    /// Looks up a time slot by its label, ignoring whitespace and leading
    /// zeros.
    #[must_use]
    pub fn find_slot(&self, label: &str) -> Option<&TimeSlotDef> {
        let wanted: String = normalize_slot_label(label);
        if wanted.is_empty() {
            return None;
        }
        self.time_slots
            .iter()
            .find(|slot| normalize_slot_label(&slot.label) == wanted)
    }

    /// Whether a (trimmed) cell means "no assignment".
    #[must_use]
    pub fn is_empty_token(&self, cell: &str) -> bool {
        let cell: &str = cell.trim();
        self.empty_tokens.iter().any(|token| token.trim() == cell)
    }

    /// Whether a name cell starts with a placeholder prefix.
    #[must_use]
    pub fn is_placeholder(&self, name: &str) -> bool {
        let lowered: String = name.trim().to_lowercase();
        self.placeholder_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .any(|prefix| lowered.starts_with(&prefix.to_lowercase()))
    }
}

/// Parses a date label from the date row.
///
/// Accepts `DD/MM/YYYY`, `DD.MM.YYYY`, `DD-MM-YYYY`, `YYYY-MM-DD` and the
/// two-digit-year forms of the first three. A label may carry other words
/// (`Sun 01/03/2026`); the first token that parses wins.
#[must_use]
pub fn parse_grid_date(label: &str) -> Option<NaiveDate> {
    label.split_whitespace().find_map(parse_date_token)
}

fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let separator: char = token.chars().find(|c| matches!(c, '/' | '.' | '-'))?;
    let parts: Vec<&str> = token.split(separator).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let format: String = if parts[0].len() == 4 {
        if separator != '-' {
            return None;
        }
        String::from("%Y-%m-%d")
    } else if parts[2].len() == 2 {
        format!("%d{separator}%m{separator}%y")
    } else if parts[2].len() == 4 {
        format!("%d{separator}%m{separator}%Y")
    } else {
        return None;
    };

    NaiveDate::parse_from_str(token, &format).ok()
}
