// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the ferret command-line interface.
//!
//! Three subcommands: `build` to ingest a stream file into an index
//! directory, `inspect` to print its store sizes, and `search` to run a
//! single query and print matching documents.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ferret", about = "Inverted-index full-text search", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a stream-ingest file (§4.8 grammar)
    Build {
        /// Path to the stream-ingest text file
        #[arg(short, long)]
        input: String,

        /// Output directory for the index stores
        #[arg(short, long)]
        output: String,
    },

    /// Inspect an index directory's store sizes
    Inspect {
        /// Index directory
        dir: String,
    },

    /// Run a single term query against an index directory
    Search {
        /// Index directory
        dir: String,

        /// Query term (exact match only; see `match_terms` for other modes)
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}
