// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Merge per-collection answers into the list the user sees.
//!
//! No ranking, no dedup: collection declaration order first, response order
//! within a collection. An entry returned by two collections shows up twice,
//! which is what the CMS said.

use crate::types::ResultItem;

/// Flatten `per_collection` in order, keeping at most `max_results` items.
pub fn aggregate(per_collection: Vec<Vec<ResultItem>>, max_results: Option<usize>) -> Vec<ResultItem> {
    let total: usize = per_collection.iter().map(Vec::len).sum();
    let limit = max_results.map_or(total, |cap| cap.min(total));

    let mut merged = Vec::with_capacity(limit);
    merged.extend(per_collection.into_iter().flatten().take(limit));
    merged
}
