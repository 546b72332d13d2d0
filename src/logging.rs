// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tracing subscriber setup for the `globalsearch` binary.
//!
//! The library only emits events; installing a subscriber is the binary's
//! job. Filter priority, highest first:
//!
//! 1. `GLOBALSEARCH_LOG` (directives, e.g. `globalsearch=debug,warn`)
//! 2. `RUST_LOG`
//! 3. `-v` (debug) / `-q` (error)
//! 4. `warn`
//!
//! Logs go to stderr so stdout stays clean for rendered results.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GLOBALSEARCH_LOG";

/// Verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// `-v` wins over `-q` when both are given.
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init(verbosity: Verbosity) -> bool {
    let use_ansi = atty::is(atty::Stream::Stderr) && std::env::var_os("NO_COLOR").is_none();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(verbosity == Verbosity::Verbose);

    let registry = tracing_subscriber::registry().with(env_filter(verbosity));
    if verbosity == Verbosity::Verbose {
        registry.with(layer.with_timer(fmt::time::uptime())).try_init().is_ok()
    } else {
        registry.with(layer.without_time().compact()).try_init().is_ok()
    }
}

/// Build the filter from the environment, falling back to `verbosity`.
/// Unparseable directives are skipped rather than fatal.
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    directives_filter(std::env::var(LOG_ENV).ok().as_deref())
        .or_else(|| directives_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .unwrap_or_else(|| EnvFilter::new(verbosity.default_level().as_str().to_ascii_lowercase()))
}

fn directives_filter(directives: Option<&str>) -> Option<EnvFilter> {
    let directives = directives?.trim();
    if directives.is_empty() {
        return None;
    }
    EnvFilter::try_new(directives).ok()
}
