// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! ferret CLI: build and inspect inverted-index search directories.
//!
//! ```bash
//! ferret build --input stream.txt --output ./index
//! ferret inspect ./index
//! ferret search ./index "rust" --limit 10
//! ```

use std::path::Path;
use std::process::exit;

use clap::Parser;

use ferret::build::{build_from_stream, BuiltIndex};
use ferret::{match_terms, MatchMode};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => run_build(&input, &output),
        Commands::Inspect { dir } => run_inspect(&dir),
        Commands::Search { dir, query, limit } => run_search(&dir, &query, limit),
    }
}

fn run_build(input: &str, output: &str) {
    let stream = match std::fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ferret: failed to read {input}: {e}");
            exit(1);
        }
    };

    let index = match build_from_stream(&stream) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("ferret: build failed: {e}");
            exit(1);
        }
    };

    if let Err(e) = index.write_to_dir(Path::new(output)) {
        eprintln!("ferret: failed to write index to {output}: {e}");
        exit(1);
    }

    println!(
        "built index: {} documents, {} terms -> {output}",
        index.documents.document_count(),
        index.term_dict.len()
    );
}

fn run_inspect(dir: &str) {
    let index = match BuiltIndex::open_from_dir(Path::new(dir)) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("ferret: failed to open {dir}: {e}");
            exit(1);
        }
    };
    println!("documents: {}", index.documents.document_count());
    println!("terms:     {}", index.term_dict.len());
    println!("keys:      {}", index.key_dict.len());
}

fn run_search(dir: &str, query: &str, limit: usize) {
    let index = match BuiltIndex::open_from_dir(Path::new(dir)) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("ferret: failed to open {dir}: {e}");
            exit(1);
        }
    };

    let matches = match match_terms(&index.term_dict, query, &MatchMode::Regular, None) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("ferret: {e}");
            exit(1);
        }
    };

    for term_info in matches {
        let Ok(record) = index.term_dict.lookup_record(&term_info.term) else {
            continue;
        };
        let Ok(postings) = index.index_data.read(record.index_block_id) else {
            continue;
        };
        let Ok(postings) = ferret::posting::decode_postings(postings) else {
            continue;
        };
        let mut shown = 0;
        for posting in postings {
            if shown >= limit {
                break;
            }
            if let Ok(data) = index.documents.data(posting.doc_id) {
                println!("{}\t{}\t{}", posting.doc_id, data.doc_key, data.title);
            }
            shown += 1;
        }
    }
}
