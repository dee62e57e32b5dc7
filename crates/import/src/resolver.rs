// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Free-text entity resolution.
//!
//! A `Resolver` is an ordered cascade of `MatchRule`s. The first rule that
//! matches any registry entry wins, and within a rule the first entry in
//! registry order wins. Rules only ever see normalised names.
//!
//! Fuzzy matching is inherently ambiguous: a short input can be a substring
//! of several names. Keeping each rule as its own type lets the cascade be
//! reordered or trimmed per deployment.

use crate::names::normalize_name;
use duty_roster_domain::{Person, Post};
use std::fmt::Debug;

/// One matching strategy.
pub trait MatchRule: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether `input` refers to `candidate`. Both are normalised.
    fn matches(&self, input: &str, candidate: &str) -> bool;
}

/// Equal after normalisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl MatchRule for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn matches(&self, input: &str, candidate: &str) -> bool {
        input == candidate
    }
}

/// One name contains the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatch;

impl MatchRule for SubstringMatch {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn matches(&self, input: &str, candidate: &str) -> bool {
        !input.is_empty()
            && !candidate.is_empty()
            && (candidate.contains(input) || input.contains(candidate))
    }
}

/// Given and family name tokens, in any order.
///
/// Applies only to inputs of two or more tokens: the first and the last
/// input token must both be tokens of the candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenMatch;

impl MatchRule for TokenMatch {
    fn name(&self) -> &'static str {
        "token"
    }

    fn matches(&self, input: &str, candidate: &str) -> bool {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return false;
        };
        if tokens.len() < 2 {
            return false;
        }
        let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();
        candidate_tokens.contains(first) && candidate_tokens.contains(last)
    }
}

/// Compound post labels such as `gate.night-cover.`.
///
/// Applies only when the input contains a `.`: the text before the first `.`
/// must equal the candidate's text before its first `.`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingSegmentMatch;

fn leading_segment(name: &str) -> &str {
    name.split('.').next().unwrap_or_default().trim()
}

impl MatchRule for LeadingSegmentMatch {
    fn name(&self) -> &'static str {
        "leading-segment"
    }

    fn matches(&self, input: &str, candidate: &str) -> bool {
        if !input.contains('.') {
            return false;
        }
        let lead: &str = leading_segment(input);
        !lead.is_empty() && lead == leading_segment(candidate)
    }
}

/// Registry entries paired with their normalised names.
///
/// Built once per import so names are normalised once, not once per lookup.
#[derive(Debug, Clone)]
pub struct NameIndex<'a, T> {
    entries: Vec<(String, &'a T)>,
}

impl<'a, T> NameIndex<'a, T> {
    /// Indexes `items` by the name `name_of` returns, keeping their order.
    #[must_use]
    pub fn new<I, F>(items: I, name_of: F) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&T) -> &str,
    {
        Self {
            entries: items
                .into_iter()
                .map(|item| (normalize_name(name_of(item)), item))
                .collect(),
        }
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> NameIndex<'a, Person> {
    /// Indexes persons by display name.
    #[must_use]
    pub fn persons<I>(persons: I) -> Self
    where
        I: IntoIterator<Item = &'a Person>,
    {
        Self::new(persons, |p| p.name.as_str())
    }
}

impl<'a> NameIndex<'a, Post> {
    /// Indexes posts by name.
    #[must_use]
    pub fn posts<I>(posts: I) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        Self::new(posts, |p| p.name.as_str())
    }
}

/// An ordered cascade of match rules.
#[derive(Debug)]
pub struct Resolver {
    rules: Vec<Box<dyn MatchRule>>,
}

impl Resolver {
    /// Creates a cascade from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn MatchRule>>) -> Self {
        Self { rules }
    }

    /// Exact, then substring, then given/family token match.
    #[must_use]
    pub fn for_persons() -> Self {
        Self::new(vec![
            Box::new(ExactMatch),
            Box::new(SubstringMatch),
            Box::new(TokenMatch),
        ])
    }

    /// Exact, then leading segment of compound labels, then substring.
    #[must_use]
    pub fn for_posts() -> Self {
        Self::new(vec![
            Box::new(ExactMatch),
            Box::new(LeadingSegmentMatch),
            Box::new(SubstringMatch),
        ])
    }

    /// Rule names in priority order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Resolves free text against the index.
    ///
    /// # Returns
    ///
    /// The matched entry and the name of the rule that matched it, or `None`
    /// when no rule matches any entry.
    #[must_use]
    pub fn resolve_with_rule<'a, T>(
        &self,
        input: &str,
        index: &NameIndex<'a, T>,
    ) -> Option<(&'a T, &'static str)> {
        let input: String = normalize_name(input);
        if input.is_empty() {
            return None;
        }

        self.rules.iter().find_map(|rule| {
            index
                .entries
                .iter()
                .find(|(name, _)| rule.matches(&input, name))
                .map(|(_, item)| (*item, rule.name()))
        })
    }

    /// Resolves free text against the index.
    #[must_use]
    pub fn resolve<'a, T>(&self, input: &str, index: &NameIndex<'a, T>) -> Option<&'a T> {
        self.resolve_with_rule(input, index).map(|(item, _)| item)
    }
}
