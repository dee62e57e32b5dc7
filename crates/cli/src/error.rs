// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use duty_roster_domain::DomainError;
use duty_roster_import::LayoutError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command-line driver.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not the JSON we expect.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A result could not be serialised.
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    /// Roster data or arguments were rejected by the engine.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The grid layout cannot describe a grid.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
