//! Consensus generation from an ordered set of reads.

use crate::config::ConsensusMethod;
use crate::layout::suffix_prefix_overlap;
use crate::reads::ReadStore;

/// Sentinel emitted for consensus columns that collected no votes.
const UNKNOWN_BASE: char = 'N';

/// Merges ordered reads into a single consensus sequence.
#[derive(Debug, Clone, Copy)]
pub struct ConsensusBuilder {
    method: ConsensusMethod,
}

impl ConsensusBuilder {
    /// Create a builder for `method`.
    pub fn new(method: ConsensusMethod) -> Self {
        Self { method }
    }

    /// Build the consensus of the reads named by `order`.
    ///
    /// Identifiers in `order` that are missing from the store are skipped;
    /// an empty order yields an empty string.
    pub fn build(&self, reads: &ReadStore, order: &[String]) -> String {
        let sequences: Vec<&str> = order.iter().filter_map(|id| reads.get(id)).collect();
        match self.method {
            ConsensusMethod::Majority => majority_consensus(&sequences),
            ConsensusMethod::Poa { min_run } => progressive_consensus(&sequences, min_run),
        }
    }
}

/// Positional majority voting.
///
/// A seed is formed by merging the ordered reads on their maximal literal
/// suffix-prefix overlaps. Each read then votes at its minimum-mismatch
/// offset within the seed, and every column emits its most frequent base.
/// Base ties break to the first-seen base; empty columns emit `N`.
fn majority_consensus(sequences: &[&str]) -> String {
    let seed = merge_ordered(sequences);
    if seed.is_empty() {
        return seed;
    }

    // Per column: bases in first-seen order with their vote counts.
    let mut columns: Vec<Vec<(u8, u32)>> = vec![Vec::new(); seed.len()];
    for sequence in sequences {
        let offset = best_offset(&seed, sequence);
        for (i, &base) in sequence.as_bytes().iter().enumerate() {
            let Some(column) = columns.get_mut(offset + i) else {
                break;
            };
            match column.iter_mut().find(|(seen, _)| *seen == base) {
                Some((_, count)) => *count += 1,
                None => column.push((base, 1)),
            }
        }
    }

    columns
        .iter()
        .map(|column| {
            column
                .iter()
                // Strict comparison keeps the first-seen base on ties.
                .fold(None::<(u8, u32)>, |best, &(base, count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((base, count)),
                })
                .map_or(UNKNOWN_BASE, |(base, _)| base as char)
        })
        .collect()
}

/// Merge sequences left to right on their maximal suffix-prefix overlaps.
fn merge_ordered(sequences: &[&str]) -> String {
    let mut merged = String::new();
    for sequence in sequences {
        if merged.is_empty() {
            merged.push_str(sequence);
            continue;
        }
        let overlap = suffix_prefix_overlap(&merged, sequence);
        merged.push_str(&sequence[overlap..]);
    }
    merged
}

/// Offset of `read` within `seed` with the fewest mismatches (first best).
fn best_offset(seed: &str, read: &str) -> usize {
    let seed = seed.as_bytes();
    let read = read.as_bytes();
    if read.len() >= seed.len() {
        return 0;
    }
    let mut best_offset = 0;
    let mut best_matches = 0usize;
    for offset in 0..=seed.len() - read.len() {
        let matches = read
            .iter()
            .zip(&seed[offset..offset + read.len()])
            .filter(|(a, b)| a == b)
            .count();
        if matches > best_matches {
            best_matches = matches;
            best_offset = offset;
        }
    }
    best_offset
}

/// Progressive merge (POA-lite).
///
/// The consensus starts as the first read. Each subsequent read is located by
/// the longest common contiguous run against the current consensus: runs of at
/// least `min_run` splice the read's tail in after the run, shorter runs
/// append the whole read.
fn progressive_consensus(sequences: &[&str], min_run: usize) -> String {
    let mut consensus = String::new();
    for sequence in sequences {
        if consensus.is_empty() {
            consensus.push_str(sequence);
            continue;
        }
        let (consensus_end, read_end, length) = longest_common_run(&consensus, sequence);
        if length >= min_run.max(1) {
            consensus.truncate(consensus_end);
            consensus.push_str(&sequence[read_end..]);
        } else {
            consensus.push_str(sequence);
        }
    }
    consensus
}

/// Longest common contiguous run between `a` and `b`.
///
/// Returns `(end_in_a, end_in_b, length)` for the first-found longest run.
fn longest_common_run(a: &str, b: &str) -> (usize, usize, usize) {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut previous = vec![0usize; b.len() + 1];
    let mut best = (0usize, 0usize, 0usize);
    for i in 1..=a.len() {
        let mut current = vec![0usize; b.len() + 1];
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                current[j] = previous[j - 1] + 1;
                if current[j] > best.2 {
                    best = (i, j, current[j]);
                }
            }
        }
        previous = current;
    }
    best
}
