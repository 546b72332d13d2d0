// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the globalsearch command-line interface.
//!
//! Three subcommands: `search` runs one query through a headless widget and
//! prints what the page would show, `watch` feeds stdin lines to the widget
//! as keystrokes (debounced like a real input field), and `config` prints the
//! effective configuration.

pub mod display;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "globalsearch",
    about = "Incremental multi-collection search against a headless CMS",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base path or URL of the Collection Query API
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Origin that a relative API base is resolved against
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Collection to search (repeatable; replaces the configured list)
    #[arg(long = "collection", global = true)]
    pub collections: Vec<String>,

    /// Locale tag; overrides the configured locale
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Debounce delay in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the rendered result
    Search {
        /// Search text (trimmed before use)
        query: String,

        /// Print the results list markup instead of the boxed view
        #[arg(long)]
        html: bool,
    },

    /// Read queries from stdin, one keystroke state per line
    ///
    /// Each line replaces the input field's contents. Lines arriving within
    /// the debounce window coalesce into one search; every render is printed.
    Watch,

    /// Print the effective configuration as TOML
    Config,
}
