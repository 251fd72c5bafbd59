//! Pairwise overlap detection between reads.
//!
//! Four interchangeable strategies produce the same shape of output: a map
//! from canonical unordered read-id pairs to a non-negative score. Score
//! semantics differ per method (shared k-mer length, sketch similarity, or
//! alignment score), so scores are only comparable within one run.

use std::collections::BTreeMap;

use fxhash::FxHashMap;

use crate::config::{AlignmentScores, OverlapMethod};
use crate::kmer::hash_with_seed;
use crate::reads::ReadStore;

/// Shingle length used by the MinHash sketches.
const SHINGLE_LEN: usize = 5;

/// Minimum sketch similarity for a MinHash pair to be recorded.
const MIN_SIMILARITY: f64 = 0.1;

/// Overlap scores keyed by canonical `(smaller_id, larger_id)` pairs.
///
/// The ordered map makes "first pair in iteration order" deterministic, which
/// greedy layout relies on for tie breaking.
pub type OverlapMap = BTreeMap<(String, String), f64>;

/// Canonical unordered key for a read pair.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Computes pairwise overlap scores with the configured strategy.
#[derive(Debug, Clone, Copy)]
pub struct OverlapDetector {
    method: OverlapMethod,
}

impl OverlapDetector {
    /// Create a detector for `method`.
    pub fn new(method: OverlapMethod) -> Self {
        Self { method }
    }

    /// Score every read pair that the strategy considers overlapping.
    pub fn detect(&self, reads: &ReadStore) -> OverlapMap {
        match self.method {
            OverlapMethod::Kmer { k } => kmer_overlaps(reads, k),
            OverlapMethod::MinHash { hash_count } => minhash_overlaps(reads, hash_count),
            OverlapMethod::SmithWaterman(scores) => local_alignment_overlaps(reads, scores),
            OverlapMethod::NeedlemanWunsch(scores) => global_alignment_overlaps(reads, scores),
        }
    }
}

/// Index every length-k substring across all reads; any substring shared by
/// two distinct reads scores that pair `k`.
fn kmer_overlaps(reads: &ReadStore, k: usize) -> OverlapMap {
    let mut overlaps = OverlapMap::new();
    if k == 0 {
        return overlaps;
    }

    let entries: Vec<(&str, &str)> = reads.iter().collect();
    let mut index: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (idx, (_, sequence)) in entries.iter().enumerate() {
        if sequence.len() < k {
            continue;
        }
        for start in 0..=sequence.len() - k {
            let readers = index.entry(&sequence[start..start + k]).or_default();
            // One entry per read even when the k-mer repeats within it.
            if readers.last() != Some(&idx) {
                readers.push(idx);
            }
        }
    }

    for readers in index.values() {
        for (left, &a) in readers.iter().enumerate() {
            for &b in &readers[left + 1..] {
                overlaps.insert(pair_key(entries[a].0, entries[b].0), k as f64);
            }
        }
    }
    overlaps
}

/// MinHash sketch per read, similarity = fraction of agreeing sketch slots.
fn minhash_overlaps(reads: &ReadStore, hash_count: usize) -> OverlapMap {
    let mut overlaps = OverlapMap::new();
    let entries: Vec<(&str, &str)> = reads.iter().collect();
    let sketches: Vec<Option<Vec<u64>>> = entries
        .iter()
        .map(|(_, sequence)| minhash_sketch(sequence, hash_count))
        .collect();

    for a in 0..entries.len() {
        for b in a + 1..entries.len() {
            let (Some(left), Some(right)) = (&sketches[a], &sketches[b]) else {
                continue;
            };
            let agreeing = left
                .iter()
                .zip(right.iter())
                .filter(|(x, y)| x == y)
                .count();
            let similarity = agreeing as f64 / hash_count as f64;
            if similarity > MIN_SIMILARITY {
                overlaps.insert(pair_key(entries[a].0, entries[b].0), similarity);
            }
        }
    }
    overlaps
}

/// Minimum hash over all length-5 shingles, one slot per hash function.
/// Reads shorter than the shingle length have no sketch and pair with nothing.
fn minhash_sketch(sequence: &str, hash_count: usize) -> Option<Vec<u64>> {
    let bytes = sequence.as_bytes();
    if hash_count == 0 || bytes.len() < SHINGLE_LEN {
        return None;
    }
    let mut sketch = vec![u64::MAX; hash_count];
    for shingle in bytes.windows(SHINGLE_LEN) {
        for (slot, minimum) in sketch.iter_mut().enumerate() {
            let hash = hash_with_seed(slot as u64, shingle);
            if hash < *minimum {
                *minimum = hash;
            }
        }
    }
    Some(sketch)
}

fn local_alignment_overlaps(reads: &ReadStore, scores: AlignmentScores) -> OverlapMap {
    let mut overlaps = OverlapMap::new();
    let entries: Vec<(&str, &str)> = reads.iter().collect();
    for a in 0..entries.len() {
        for b in a + 1..entries.len() {
            let length = smith_waterman_length(entries[a].1, entries[b].1, scores);
            if length > 0 {
                overlaps.insert(pair_key(entries[a].0, entries[b].0), length as f64);
            }
        }
    }
    overlaps
}

fn global_alignment_overlaps(reads: &ReadStore, scores: AlignmentScores) -> OverlapMap {
    let mut overlaps = OverlapMap::new();
    let entries: Vec<(&str, &str)> = reads.iter().collect();
    for a in 0..entries.len() {
        for b in a + 1..entries.len() {
            let score = needleman_wunsch_score(entries[a].1, entries[b].1, scores);
            if score > 0 {
                overlaps.insert(pair_key(entries[a].0, entries[b].0), score as f64);
            }
        }
    }
    overlaps
}

/// Smith-Waterman local alignment; returns the traced-back alignment length.
///
/// Cell values are floored at zero. Traceback tie-break order is a fixed
/// policy: diagonal first, then up, then left.
pub(crate) fn smith_waterman_length(a: &str, b: &str, scores: AlignmentScores) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut matrix = vec![vec![0i32; b.len() + 1]; a.len() + 1];
    let mut best = 0i32;
    let mut best_cell = (0usize, 0usize);

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitution = if a[i - 1] == b[j - 1] {
                scores.matching
            } else {
                scores.mismatch
            };
            let cell = (matrix[i - 1][j - 1] + substitution)
                .max(matrix[i - 1][j] + scores.gap)
                .max(matrix[i][j - 1] + scores.gap)
                .max(0);
            matrix[i][j] = cell;
            if cell > best {
                best = cell;
                best_cell = (i, j);
            }
        }
    }

    let (mut i, mut j) = best_cell;
    let mut length = 0usize;
    while i > 0 && j > 0 && matrix[i][j] > 0 {
        let cell = matrix[i][j];
        let substitution = if a[i - 1] == b[j - 1] {
            scores.matching
        } else {
            scores.mismatch
        };
        if matrix[i - 1][j - 1] + substitution == cell {
            i -= 1;
            j -= 1;
        } else if matrix[i - 1][j] + scores.gap == cell {
            i -= 1;
        } else {
            j -= 1;
        }
        length += 1;
    }
    length
}

/// Needleman-Wunsch global alignment score with a linear gap penalty.
pub(crate) fn needleman_wunsch_score(a: &str, b: &str, scores: AlignmentScores) -> i32 {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut matrix = vec![vec![0i32; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate().skip(1) {
        row[0] = i as i32 * scores.gap;
    }
    for j in 1..=b.len() {
        matrix[0][j] = j as i32 * scores.gap;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitution = if a[i - 1] == b[j - 1] {
                scores.matching
            } else {
                scores.mismatch
            };
            matrix[i][j] = (matrix[i - 1][j - 1] + substitution)
                .max(matrix[i - 1][j] + scores.gap)
                .max(matrix[i][j - 1] + scores.gap);
        }
    }
    matrix[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reads::ReadStore;

    fn store(sequences: &[&str]) -> ReadStore {
        ReadStore::from_sequences(sequences.iter().copied())
    }

    #[test]
    fn shared_kmers_score_k_for_every_sharing_pair() {
        let reads = store(&["ACTGAC", "TGACGT", "ACGTGA"]);
        let detector = OverlapDetector::new(OverlapMethod::Kmer { k: 3 });
        let overlaps = detector.detect(&reads);
        assert_eq!(
            overlaps.get(&pair_key("read0", "read1")),
            Some(&3.0),
            "read0/read1 share TGA and GAC"
        );
        assert_eq!(overlaps.get(&pair_key("read1", "read2")), Some(&3.0));
        assert_eq!(overlaps.get(&pair_key("read0", "read2")), Some(&3.0));
    }

    #[test]
    fn kmer_score_never_exceeds_shorter_read() {
        let reads = store(&["ACGT", "ACGTACGT"]);
        let overlaps = OverlapDetector::new(OverlapMethod::Kmer { k: 4 }).detect(&reads);
        let score = overlaps[&pair_key("read0", "read1")];
        assert!(score <= 4.0);
    }

    #[test]
    fn minhash_identical_reads_have_full_similarity() {
        let reads = store(&["ACGTACGTACGT", "ACGTACGTACGT"]);
        let overlaps = OverlapDetector::new(OverlapMethod::MinHash { hash_count: 16 }).detect(&reads);
        assert_eq!(overlaps.get(&pair_key("read0", "read1")), Some(&1.0));
    }

    #[test]
    fn minhash_skips_reads_shorter_than_a_shingle() {
        let reads = store(&["ACG", "ACG"]);
        let overlaps = OverlapDetector::new(OverlapMethod::MinHash { hash_count: 8 }).detect(&reads);
        assert!(overlaps.is_empty());
    }

    #[test]
    fn smith_waterman_full_self_match_reports_length_four() {
        let scores = AlignmentScores {
            matching: 2,
            mismatch: -1,
            gap: -1,
        };
        assert_eq!(smith_waterman_length("ACTG", "ACTG", scores), 4);
    }

    #[test]
    fn smith_waterman_finds_embedded_local_match() {
        let scores = AlignmentScores::default();
        // "CTGA" is embedded in both; local alignment should cover it.
        assert!(smith_waterman_length("TTCTGATT", "GGCTGAGG", scores) >= 4);
    }

    #[test]
    fn needleman_wunsch_drops_non_positive_pairs() {
        let reads = store(&["AAAA", "TTTT"]);
        let overlaps =
            OverlapDetector::new(OverlapMethod::NeedlemanWunsch(AlignmentScores::default()))
                .detect(&reads);
        assert!(overlaps.is_empty(), "all-mismatch global score is negative");
    }

    #[test]
    fn needleman_wunsch_self_alignment_scores_match_per_base() {
        let scores = AlignmentScores::default();
        assert_eq!(needleman_wunsch_score("ACTG", "ACTG", scores), 8);
    }
}
