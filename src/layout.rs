//! Read ordering from overlap scores.

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::config::LayoutMethod;
use crate::overlap::{pair_key, OverlapMap};
use crate::reads::ReadStore;

/// Hard cutoff for the factorial superstring search.
pub const MAX_SUPERSTRING_READS: usize = 8;

/// An ordering of reads plus the overlapping pairs the ordering did not use.
///
/// A non-empty layout is always a full permutation of the loaded reads. The
/// superstring strategy alone may produce an empty layout (no valid ordering
/// or input over the size cutoff).
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Read identifiers in assembly order.
    pub order: Vec<String>,
    /// Overlapping pairs not adjacent in `order`, as `(min_pos, max_pos)`
    /// position indices into `order`, sorted.
    pub branches: Vec<(usize, usize)>,
}

impl Layout {
    /// Whether the layout holds no ordering.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Orders reads into a linear arrangement with the configured strategy.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder {
    method: LayoutMethod,
}

impl LayoutBuilder {
    /// Create a builder for `method`.
    pub fn new(method: LayoutMethod) -> Self {
        Self { method }
    }

    /// Build a layout from `reads` and their overlap scores.
    pub fn build(&self, reads: &ReadStore, overlaps: &OverlapMap) -> Layout {
        let order = match self.method {
            LayoutMethod::Greedy { threshold } => greedy_order(reads, overlaps, threshold),
            LayoutMethod::Superstring { min_overlap } => superstring_order(reads, min_overlap),
        };
        let branches = detect_branches(&order, overlaps);
        Layout { order, branches }
    }
}

/// Greedy chain extension.
///
/// Starts from the read on the highest-scoring edge (first stored read when no
/// overlaps exist), then repeatedly appends the unused read scoring best
/// against the chain tail, provided the score exceeds `threshold`. When no
/// candidate qualifies, the first unused read in store order is appended, so
/// the result is a full permutation even with sparse overlaps.
fn greedy_order(reads: &ReadStore, overlaps: &OverlapMap, threshold: f64) -> Vec<String> {
    if reads.is_empty() {
        return Vec::new();
    }
    let ids = reads.ids();

    let start_idx = overlaps
        .iter()
        .fold(None::<(&String, f64)>, |best, (pair, &score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((&pair.0, score)),
        })
        .and_then(|(id, _)| ids.iter().position(|candidate| candidate == id))
        .unwrap_or(0);

    let mut used = vec![false; ids.len()];
    used[start_idx] = true;
    let mut order = vec![ids[start_idx].clone()];

    while order.len() < ids.len() {
        let tail = order.last().expect("chain is non-empty");
        let mut best: Option<(usize, f64)> = None;
        for (idx, id) in ids.iter().enumerate() {
            if used[idx] {
                continue;
            }
            if let Some(&score) = overlaps.get(&pair_key(tail, id)) {
                // Strict comparison keeps the earliest store-order candidate on ties.
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((idx, score));
                }
            }
        }
        let next_idx = match best {
            Some((idx, score)) if score > threshold => idx,
            _ => used
                .iter()
                .position(|flag| !flag)
                .expect("an unused read remains"),
        };
        used[next_idx] = true;
        order.push(ids[next_idx].clone());
    }
    order
}

/// Exhaustive shortest-common-superstring search over all read orderings.
///
/// Orderings with any consecutive literal suffix-prefix overlap below
/// `min_overlap` are rejected; the winner produces the shortest merged string
/// (first permutation enumerated wins ties). Inputs over
/// [`MAX_SUPERSTRING_READS`] or with no valid ordering yield an empty order.
fn superstring_order(reads: &ReadStore, min_overlap: usize) -> Vec<String> {
    let count = reads.len();
    if count == 0 || count > MAX_SUPERSTRING_READS {
        return Vec::new();
    }
    let entries: Vec<(&str, &str)> = reads.iter().collect();

    let mut best: Option<(usize, Vec<usize>)> = None;
    for ordering in (0..count).permutations(count) {
        let mut merged_len = entries[ordering[0]].1.len();
        let mut valid = true;
        for window in ordering.windows(2) {
            let overlap = suffix_prefix_overlap(entries[window[0]].1, entries[window[1]].1);
            if overlap < min_overlap {
                valid = false;
                break;
            }
            merged_len += entries[window[1]].1.len() - overlap;
        }
        if !valid {
            continue;
        }
        if best
            .as_ref()
            .map_or(true, |(best_len, _)| merged_len < *best_len)
        {
            best = Some((merged_len, ordering));
        }
    }

    best.map(|(_, ordering)| {
        ordering
            .into_iter()
            .map(|idx| entries[idx].0.to_string())
            .collect()
    })
    .unwrap_or_default()
}

/// Longest `L` such that `left` ends with the first `L` characters of `right`.
pub(crate) fn suffix_prefix_overlap(left: &str, right: &str) -> usize {
    let max = left.len().min(right.len());
    for length in (1..=max).rev() {
        if left.as_bytes()[left.len() - length..] == right.as_bytes()[..length] {
            return length;
        }
    }
    0
}

/// Overlapping pairs whose edge is not adjacent (in either direction) in the
/// final order, identified by position indices.
fn detect_branches(order: &[String], overlaps: &OverlapMap) -> Vec<(usize, usize)> {
    let positions: FxHashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(pos, id)| (id.as_str(), pos))
        .collect();

    let mut branches = Vec::new();
    for ((left, right), &score) in overlaps {
        if score <= 0.0 {
            continue;
        }
        let (Some(&a), Some(&b)) = (positions.get(left.as_str()), positions.get(right.as_str()))
        else {
            continue;
        };
        if a.abs_diff(b) != 1 {
            branches.push((a.min(b), a.max(b)));
        }
    }
    branches.sort_unstable();
    branches.dedup();
    branches
}
