// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grid import orchestration.
//!
//! Parse, resolve, merge, then check for overlap and write one merged
//! candidate at a time. Writes are awaited strictly in sequence: whether a later candidate
//! overlaps depends on what earlier candidates created, so nothing here runs
//! concurrently.

use crate::error::WriteError;
use crate::grid::{RawCandidate, parse_grid};
use crate::layout::GridLayout;
use crate::merge::{ResolvedCandidate, merge_candidates};
use crate::names::normalize_name;
use crate::resolver::{NameIndex, Resolver};
use chrono::NaiveDateTime;
use duty_roster_domain::{
    Assignment, NewAssignment, OverlapScope, Person, Post, PostId, RosterSnapshot,
    SchedulingPolicy, has_conflict,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// The store collaborator's write function.
///
/// The store assigns the id and returns the persisted assignment.
pub trait AssignmentWriter {
    /// Persists a new assignment.
    fn create(
        &mut self,
        draft: NewAssignment,
    ) -> impl Future<Output = Result<Assignment, WriteError>> + Send;
}

/// Adapts an async closure into an `AssignmentWriter`.
#[derive(Debug, Clone)]
pub struct WriteFn<F>(F);

/// Wraps `f` so it can be passed as an `AssignmentWriter`.
#[must_use]
pub const fn write_fn<F, Fut>(f: F) -> WriteFn<F>
where
    F: FnMut(NewAssignment) -> Fut,
    Fut: Future<Output = Result<Assignment, WriteError>> + Send,
{
    WriteFn(f)
}

impl<F, Fut> AssignmentWriter for WriteFn<F>
where
    F: FnMut(NewAssignment) -> Fut,
    Fut: Future<Output = Result<Assignment, WriteError>> + Send,
{
    fn create(
        &mut self,
        draft: NewAssignment,
    ) -> impl Future<Output = Result<Assignment, WriteError>> + Send {
        (self.0)(draft)
    }
}

/// Cooperative cancellation signal for a running import.
///
/// Clones share the same flag. The import checks it between candidates.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Creates a flag that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Import stage a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPhase {
    /// Reading the grid, resolving names and merging slots.
    Parsing,
    /// Checking and writing merged candidates.
    Importing,
}

/// A progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportProgress {
    /// Steps done in this phase.
    pub current: usize,
    /// Steps in this phase.
    pub total: usize,
    /// The phase.
    pub phase: ImportPhase,
}

/// Settings for one import run.
#[derive(Default)]
pub struct ImportOptions<'a> {
    /// Grid layout.
    pub layout: GridLayout,
    /// Scheduling policy; the import reads its overlap scope.
    pub policy: SchedulingPolicy,
    /// Receives progress events.
    pub progress: Option<&'a mut (dyn FnMut(ImportProgress) + Send)>,
    /// Stops the run between candidates when set.
    pub cancellation: Option<CancellationFlag>,
}

impl<'a> ImportOptions<'a> {
    /// Uses `layout` instead of the default grid layout.
    #[must_use]
    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Uses `policy` instead of the default scheduling policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends progress events to `progress`.
    #[must_use]
    pub const fn with_progress(
        mut self,
        progress: &'a mut (dyn FnMut(ImportProgress) + Send),
    ) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Checks `flag` between candidates.
    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }
}

/// A candidate whose write failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportItemError {
    /// Source row, 1-based.
    pub row: usize,
    /// Person name as written in the grid.
    pub person: String,
    /// Post label as written in the grid.
    pub post: String,
    /// Start of the candidate.
    pub start: NaiveDateTime,
    /// End of the candidate.
    pub end: NaiveDateTime,
    /// The writer's error.
    pub message: String,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Assignments written.
    pub created: usize,
    /// Candidates dropped because they overlap an existing or imported
    /// assignment.
    pub skipped: usize,
    /// Grid cells dropped because their person or post did not resolve.
    pub unresolved: usize,
    /// Candidates whose write failed.
    pub errors: Vec<ImportItemError>,
    /// Person names that did not resolve, each once, sorted.
    pub not_found_persons: Vec<String>,
    /// Post labels that did not resolve, each once, sorted.
    pub not_found_posts: Vec<String>,
    /// The run stopped early on request.
    pub cancelled: bool,
}

struct ProgressSink<'a>(Option<&'a mut (dyn FnMut(ImportProgress) + Send)>);

impl ProgressSink<'_> {
    fn emit(&mut self, current: usize, total: usize, phase: ImportPhase) {
        if let Some(callback) = self.0.as_mut() {
            callback(ImportProgress {
                current,
                total,
                phase,
            });
        }
    }
}

/// Not-found names keyed by their normalised form, so spelling variants of
/// the same name are reported once.
#[derive(Default)]
struct NotFound(BTreeMap<String, String>);

impl NotFound {
    fn record(&mut self, name: &str) {
        self.0
            .entry(normalize_name(name))
            .or_insert_with(|| name.trim().to_string());
    }

    fn into_sorted(self) -> Vec<String> {
        self.0.into_values().collect()
    }
}

/// State carried across the candidates of one run.
struct ImportRun<'s> {
    persons: NameIndex<'s, Person>,
    posts: NameIndex<'s, Post>,
    person_resolver: Resolver,
    post_resolver: Resolver,
    overlap_scope: OverlapScope,
    /// Pre-existing assignments plus those created by this run.
    tracked: Vec<Assignment>,
    report: ImportReport,
    not_found_persons: NotFound,
    not_found_posts: NotFound,
}

impl<'s> ImportRun<'s> {
    fn new(snapshot: &'s RosterSnapshot, policy: &SchedulingPolicy) -> Self {
        Self {
            persons: NameIndex::persons(snapshot.persons()),
            posts: NameIndex::posts(snapshot.posts()),
            person_resolver: Resolver::for_persons(),
            post_resolver: Resolver::for_posts(),
            overlap_scope: policy.import_overlap_scope,
            tracked: snapshot.assignments().to_vec(),
            report: ImportReport::default(),
            not_found_persons: NotFound::default(),
            not_found_posts: NotFound::default(),
        }
    }

    fn resolve(&mut self, candidate: RawCandidate) -> Option<ResolvedCandidate<'s>> {
        let person: Option<&'s Person> =
            self.person_resolver.resolve(&candidate.person, &self.persons);
        let post: Option<&'s Post> = self.post_resolver.resolve(&candidate.post, &self.posts);

        if person.is_none() {
            debug!(row = candidate.row, name = %candidate.person, "Person not found");
            self.not_found_persons.record(&candidate.person);
        }
        if post.is_none() {
            debug!(row = candidate.row, name = %candidate.post, "Post not found");
            self.not_found_posts.record(&candidate.post);
        }

        let Some((person, post)) = person.zip(post) else {
            self.report.unresolved += 1;
            return None;
        };
        Some(ResolvedCandidate {
            source: candidate,
            person,
            post,
        })
    }

    fn resolve_all(&mut self, candidates: Vec<RawCandidate>) -> Vec<ResolvedCandidate<'s>> {
        candidates
            .into_iter()
            .filter_map(|candidate| self.resolve(candidate))
            .collect()
    }

    fn overlaps(&self, candidate: &ResolvedCandidate<'_>) -> bool {
        let scope: OverlapScope = self.overlap_scope;
        let post_id: PostId = candidate.post.id;
        let in_scope = self.tracked.iter().filter(|a| match scope {
            OverlapScope::PersonAndPost => a.post_id == post_id,
            OverlapScope::Person => true,
        });
        has_conflict(candidate.person.id, candidate.interval(), in_scope, None)
    }

    async fn import_candidate<W>(&mut self, candidate: &ResolvedCandidate<'_>, writer: &mut W)
    where
        W: AssignmentWriter + Send,
    {
        let source: &RawCandidate = &candidate.source;

        if self.overlaps(candidate) {
            debug!(
                row = source.row,
                person = %candidate.person.name,
                post = %candidate.post.name,
                interval = %source.interval,
                "Skipping overlapping candidate"
            );
            self.report.skipped += 1;
            return;
        }

        let draft: NewAssignment =
            NewAssignment::new(candidate.person.id, candidate.post.id, source.interval);
        match writer.create(draft).await {
            Ok(assignment) => {
                self.tracked.push(assignment);
                self.report.created += 1;
            }
            Err(e) => {
                warn!(row = source.row, error = %e, "Failed to write imported assignment");
                self.report.errors.push(ImportItemError {
                    row: source.row,
                    person: source.person.clone(),
                    post: source.post.clone(),
                    start: source.interval.start(),
                    end: source.interval.end(),
                    message: e.to_string(),
                });
            }
        }
    }

    fn finish(mut self, cancelled: bool) -> ImportReport {
        self.report.not_found_persons = self.not_found_persons.into_sorted();
        self.report.not_found_posts = self.not_found_posts.into_sorted();
        self.report.cancelled = cancelled;
        self.report
    }
}

/// Imports a grid export into the store.
///
/// # Arguments
///
/// * `text` - The exported grid
/// * `snapshot` - Persons, posts and existing assignments to reconcile with
/// * `writer` - Creates each accepted assignment
/// * `options` - Layout, overlap scope, progress and cancellation
///
/// # Returns
///
/// An `ImportReport`. Every grid cell is either counted in `unresolved` or
/// folded into a merged candidate, and every merged candidate that was
/// reached is counted in exactly one of `created`, `skipped` and `errors`.
/// None of these outcomes stops the run.
pub async fn import_from_grid<W>(
    text: &str,
    snapshot: &RosterSnapshot,
    writer: &mut W,
    options: ImportOptions<'_>,
) -> ImportReport
where
    W: AssignmentWriter + Send,
{
    let ImportOptions {
        layout,
        policy,
        progress,
        cancellation,
    } = options;
    let mut progress: ProgressSink<'_> = ProgressSink(progress);
    let is_cancelled = || cancellation.as_ref().is_some_and(CancellationFlag::is_cancelled);

    info!(bytes = text.len(), "Starting grid import");
    progress.emit(0, 1, ImportPhase::Parsing);
    let mut run: ImportRun<'_> = ImportRun::new(snapshot, &policy);
    let parsed: Vec<RawCandidate> = parse_grid(text, &layout);
    let candidates: Vec<ResolvedCandidate<'_>> = merge_candidates(run.resolve_all(parsed));
    progress.emit(1, 1, ImportPhase::Parsing);

    let total: usize = candidates.len();
    let mut cancelled: bool = false;

    progress.emit(0, total, ImportPhase::Importing);
    for (idx, candidate) in candidates.iter().enumerate() {
        if is_cancelled() {
            info!(processed = idx, total, "Grid import cancelled");
            cancelled = true;
            break;
        }
        run.import_candidate(candidate, writer).await;
        progress.emit(idx + 1, total, ImportPhase::Importing);
    }

    let report: ImportReport = run.finish(cancelled);
    info!(
        created = report.created,
        skipped = report.skipped,
        unresolved = report.unresolved,
        errors = report.errors.len(),
        not_found_persons = report.not_found_persons.len(),
        not_found_posts = report.not_found_posts.len(),
        cancelled = report.cancelled,
        "Finished grid import"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_progress_serializes_lowercase_phase() {
        let event = ImportProgress {
            current: 2,
            total: 5,
            phase: ImportPhase::Importing,
        };
        assert_eq!(
            serde_json::to_value(event).unwrap_or_default(),
            serde_json::json!({"current": 2, "total": 5, "phase": "importing"})
        );
    }

    #[test]
    fn test_not_found_dedups_by_normalized_name() {
        let mut not_found = NotFound::default();
        not_found.record("Zed  Unknown");
        not_found.record("zed unknown");
        not_found.record(" Ann Nobody ");
        assert_eq!(not_found.into_sorted(), vec!["Ann Nobody", "Zed  Unknown"]);
    }
}
