// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Free-text name handling for grid cells.

use crate::layout::GridLayout;

/// Normalises a name for matching: trimmed, lowercased, whitespace runs
/// collapsed to a single space.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Whether a name cell obviously does not hold a person.
///
/// Empty cells, single characters, placeholder rows and punctuation-only
/// cells are skipped.
#[must_use]
pub fn is_skippable_name(name: &str, layout: &GridLayout) -> bool {
    let name: &str = name.trim();
    name.chars().count() < 2
        || layout.is_placeholder(name)
        || !name.chars().any(char::is_alphanumeric)
}

fn strip_bracket_tail(name: &str) -> Option<&str> {
    let open: char = match name.chars().last()? {
        ')' => '(',
        ']' => '[',
        _ => return None,
    };
    let idx: usize = name.rfind(open)?;
    Some(&name[..idx])
}

fn strip_dash_tail(name: &str) -> Option<&str> {
    [" - ", " – "]
        .iter()
        .filter_map(|separator| name.find(separator))
        .min()
        .map(|idx| &name[..idx])
}

fn strip_numeric_tail(name: &str) -> Option<&str> {
    let idx: usize = name.rfind(char::is_whitespace)?;
    let tail: &str = &name[idx..];
    tail.trim()
        .chars()
        .all(|c| c.is_ascii_digit())
        .then_some(&name[..idx])
}

/// Strips a trailing unit or organisation suffix from a person name.
///
/// Removes bracketed tails (`Dana Levi (Unit 4)`), anything after a spaced
/// dash (`Dana Levi - North`) and trailing numeric tokens (`Dana Levi 8812`),
/// repeatedly. A name that would be stripped to nothing is returned trimmed
/// but otherwise unchanged.
#[must_use]
pub fn strip_suffix(name: &str) -> &str {
    let mut current: &str = name.trim();
    loop {
        let next: Option<&str> = strip_bracket_tail(current)
            .or_else(|| strip_dash_tail(current))
            .or_else(|| strip_numeric_tail(current))
            .map(str::trim);

        match next {
            Some(stripped) if !stripped.is_empty() => current = stripped,
            _ => return current,
        }
    }
}
