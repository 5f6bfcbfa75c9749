// projectinfo/src/chunker.rs
//! Chunk builder: packs file records into JSON arrays whose estimated token
//! totals stay under a budget.
//!
//! - Input order is kept exactly; records are never sorted, split or dropped.
//! - A record larger than the budget gets a chunk of its own.
//! - The budget is a batching target, not a per-record cap.

use std::ops::Range;
use crate::{
    error::ChunkError,
    file_record::FileRecord
};

/// ~1 token per 4 chars, rounded up. Counts `char`s, not bytes.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Group boundaries for records with the given token estimates.
///
/// A group is closed before a record that would push its running total past
/// `budget`, unless the group is still empty.
pub fn plan_chunks(token_counts: &[usize], budget: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0usize;
    let mut total = 0usize;

    for (i, &tokens) in token_counts.iter().enumerate() {
        if i > start && total.saturating_add(tokens) > budget {
            ranges.push(start..i);
            start = i;
            total = 0;
        }
        total = total.saturating_add(tokens);
    }
    if start < token_counts.len() {
        ranges.push(start..token_counts.len());
    }
    ranges
}

/// Fill in `token_count` for every record, then serialize them in order into
/// JSON arrays of at most `budget` estimated tokens each.
pub fn chunk_files<'a, I>(files: I, budget: usize) -> Result<Vec<String>, ChunkError>
where
    I: IntoIterator<Item = &'a mut FileRecord>,
{
    let mut ordered: Vec<&FileRecord> = Vec::new();
    for f in files {
        f.token_count = estimate_tokens(&f.contents);
        ordered.push(f);
    }
    let files = ordered;

    let counts: Vec<usize> = files.iter().map(|f| f.token_count).collect();
    let plan = plan_chunks(&counts, budget);
    tracing::debug!("{} file(s) into {} chunk(s), budget {budget}", files.len(), plan.len());

    plan.into_iter()
        .enumerate()
        .map(|(index, range)| {
            serde_json::to_string(&files[range])
                .map_err(|source| ChunkError::Serialize { index, source })
        })
        .collect()
}

/* ===================================== Tests ======================================= */
