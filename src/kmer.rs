//! K-mer counting and error filtering for the de Bruijn pipeline.

use std::collections::BTreeMap;
use std::hash::Hasher;

use fxhash::FxHasher;
use tracing::debug;

use crate::config::ErrorFilter;
use crate::reads::ReadStore;

/// Bit width of the Bloom filter. Fixed: sizing is not coverage-adaptive.
pub const BLOOM_BITS: usize = 1 << 16;

/// Number of hash functions the Bloom filter applies per item.
pub const BLOOM_HASHES: usize = 3;

/// Occurrence counts per k-mer, ordered lexicographically so graph edge
/// insertion order is deterministic.
pub type KmerCounts = BTreeMap<String, u32>;

/// Count every length-`k` substring across all reads.
pub fn count_kmers(reads: &ReadStore, k: usize) -> KmerCounts {
    let mut counts = KmerCounts::new();
    if k == 0 {
        return counts;
    }
    for (_, sequence) in reads.iter() {
        if sequence.len() < k {
            continue;
        }
        for start in 0..=sequence.len() - k {
            *counts.entry(sequence[start..start + k].to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Apply the configured error filter, returning surviving k-mers in
/// lexicographic order.
pub fn filter_kmers(counts: &KmerCounts, filter: ErrorFilter) -> Vec<String> {
    match filter {
        ErrorFilter::Threshold { min_count } => counts
            .iter()
            .filter(|(_, &count)| count >= min_count)
            .map(|(kmer, _)| kmer.clone())
            .collect(),
        ErrorFilter::Bloom { min_count } => {
            let mut bloom = BloomFilter::new(BLOOM_BITS, BLOOM_HASHES);
            for (kmer, &count) in counts {
                if count >= min_count {
                    bloom.insert(kmer);
                }
            }
            // Membership is probabilistic: anything the filter admits
            // survives, including false positives below the threshold.
            let surviving: Vec<String> = counts
                .keys()
                .filter(|kmer| bloom.check(kmer))
                .cloned()
                .collect();
            debug!(
                total = counts.len(),
                surviving = surviving.len(),
                "bloom filter pass"
            );
            surviving
        }
    }
}

/// Fixed-size Bloom filter: no false negatives, false positives possible.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    blocks: Vec<u64>,
    bits: usize,
    hash_count: usize,
}

impl BloomFilter {
    /// Create a filter with `bits` bits and `hash_count` hash functions.
    pub fn new(bits: usize, hash_count: usize) -> Self {
        let bits = bits.max(64);
        Self {
            blocks: vec![0u64; bits.div_ceil(64)],
            bits,
            hash_count: hash_count.max(1),
        }
    }

    /// Add `item` to the filter.
    pub fn insert(&mut self, item: &str) {
        for position in self.bit_positions(item) {
            self.blocks[position / 64] |= 1u64 << (position % 64);
        }
    }

    /// Whether `item` may be in the filter. Always true for inserted items.
    pub fn check(&self, item: &str) -> bool {
        self.bit_positions(item)
            .all(|position| self.blocks[position / 64] >> (position % 64) & 1 == 1)
    }

    /// Bit indexes for `item` via double hashing.
    fn bit_positions(&self, item: &str) -> impl Iterator<Item = usize> {
        let h1 = hash_with_seed(0x9e37_79b9, item.as_bytes());
        let h2 = hash_with_seed(0x85eb_ca6b, item.as_bytes()) | 1;
        let bits = self.bits as u64;
        (0..self.hash_count as u64)
            .map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % bits) as usize)
    }
}

/// Seeded 64-bit hash shared by the Bloom filter and the MinHash sketches.
pub(crate) fn hash_with_seed(seed: u64, data: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    hasher.write(data);
    hasher.finish()
}
