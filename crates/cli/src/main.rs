// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod error;
mod input;
mod store;

use crate::error::CliError;
use crate::input::{load_layout, load_policy, load_snapshot, parse_datetime, read_text};
use crate::store::InMemoryStore;
use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use duty_roster_domain::{
    AssignmentId, Interval, PersonId, PostId, RosterSnapshot, SchedulingPolicy,
};
use duty_roster_import::{CancellationFlag, GridLayout, ImportOptions, ImportProgress};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

/// Duty roster batch driver: validates, ranks, scores and imports
/// assignments against a JSON roster snapshot.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    async fn run(self) -> Result<(), CliError> {
        self.command.run().await
    }
}

/// Inputs shared by every command.
#[derive(Debug, Clone, ClapArgs)]
struct RosterArgs {
    /// Roster snapshot (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Scheduling policy (JSON); defaults apply to missing fields
    #[arg(long)]
    policy: Option<PathBuf>,
}

impl RosterArgs {
    fn load(&self) -> Result<(RosterSnapshot, SchedulingPolicy), CliError> {
        Ok((
            load_snapshot(&self.snapshot)?,
            load_policy(self.policy.as_deref())?,
        ))
    }
}

/// A proposed slot.
#[derive(Debug, Clone, ClapArgs)]
struct SlotArgs {
    /// Slot start, e.g. 2026-03-05T06:00
    #[arg(long, value_parser = parse_datetime)]
    start: NaiveDateTime,

    /// Slot end, exclusive
    #[arg(long, value_parser = parse_datetime)]
    end: NaiveDateTime,
}

impl SlotArgs {
    fn interval(&self) -> Result<Interval, CliError> {
        Ok(Interval::new(self.start, self.end)?)
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Import a grid export into the roster
    #[command(visible_alias = "i")]
    Import {
        #[command(flatten)]
        roster: RosterArgs,

        /// Grid export (CSV)
        #[arg(long)]
        grid: PathBuf,

        /// Grid layout (JSON); defaults apply to missing fields
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Write the updated snapshot here
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Validate a proposed assignment
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        roster: RosterArgs,

        /// Person to assign
        #[arg(long)]
        person: i64,

        #[command(flatten)]
        slot: SlotArgs,

        /// Also check the team at this post
        #[arg(long)]
        post: Option<i64>,

        /// Assignment being edited, ignored when checking overlap and rest
        #[arg(long)]
        exclude: Option<i64>,
    },

    /// Rank persons for an open slot
    #[command(visible_alias = "s")]
    Suggest {
        #[command(flatten)]
        roster: RosterArgs,

        #[command(flatten)]
        slot: SlotArgs,

        /// Only count fairness history at this post
        #[arg(long)]
        post: Option<i64>,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Print fairness scores, highest first
    Score {
        #[command(flatten)]
        roster: RosterArgs,

        /// Only count history at this post
        #[arg(long)]
        post: Option<i64>,
    },
}

impl Command {
    async fn run(self) -> Result<(), CliError> {
        match self {
            Self::Import {
                roster,
                grid,
                layout,
                save,
            } => {
                let (snapshot, policy) = roster.load()?;
                let layout: GridLayout = load_layout(layout.as_deref())?;
                let text: String = read_text(&grid)?;
                run_import(&text, &snapshot, layout, policy, save.as_deref()).await
            }
            Self::Validate {
                roster,
                person,
                slot,
                post,
                exclude,
            } => {
                let (snapshot, policy) = roster.load()?;
                let output = commands::validate(
                    &snapshot,
                    PersonId::new(person),
                    post.map(PostId::new),
                    &slot.interval()?,
                    exclude.map(AssignmentId::new),
                    &policy,
                )?;
                print_json(&output)
            }
            Self::Suggest {
                roster,
                slot,
                post,
                limit,
            } => {
                let (snapshot, policy) = roster.load()?;
                let ranked = commands::suggestions(
                    &snapshot,
                    post.map(PostId::new),
                    &slot.interval()?,
                    limit,
                    &policy,
                )?;
                print_json(&ranked)
            }
            Self::Score { roster, post } => {
                let (snapshot, policy) = roster.load()?;
                print_json(&commands::scores(&snapshot, post.map(PostId::new), &policy)?)
            }
        }
    }
}

async fn run_import(
    text: &str,
    snapshot: &RosterSnapshot,
    layout: GridLayout,
    policy: SchedulingPolicy,
    save: Option<&Path>,
) -> Result<(), CliError> {
    let cancellation: CancellationFlag = CancellationFlag::new();
    let interrupt: CancellationFlag = cancellation.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping import after the current assignment");
            interrupt.cancel();
        }
    });

    let mut on_progress = |event: ImportProgress| {
        debug!(
            current = event.current,
            total = event.total,
            phase = ?event.phase,
            "Import progress"
        );
    };
    let options: ImportOptions<'_> = ImportOptions::default()
        .with_layout(layout)
        .with_policy(policy)
        .with_progress(&mut on_progress)
        .with_cancellation(cancellation);

    let mut store: InMemoryStore = InMemoryStore::from_snapshot(snapshot);
    let output = commands::import(text, snapshot, &mut store, options).await;
    watcher.abort();

    if let Some(path) = save {
        let data = store.to_snapshot_data(snapshot);
        let json: String = serde_json::to_string_pretty(&data)?;
        std::fs::write(path, json).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Saved updated snapshot");
    }

    print_json(&output)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json: String = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // RUST_LOG wins over -v/-q
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .init();

    args.run().await?;
    Ok(())
}
