//! Per-method configuration as tagged unions.
//!
//! Each method family is a sum type whose variants carry exactly the numeric
//! parameters that method needs. String-named selection happens once, at
//! configuration construction, via the `from_name` constructors; an
//! unrecognized name is rejected there with [`AssemblyError::UnknownMethod`]
//! rather than at first use.

use crate::AssemblyError;

/// Scoring parameters shared by the alignment-based overlap methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentScores {
    /// Score contribution of a matching base pair.
    pub matching: i32,
    /// Score contribution of a mismatching base pair.
    pub mismatch: i32,
    /// Linear gap penalty.
    pub gap: i32,
}

impl Default for AlignmentScores {
    fn default() -> Self {
        Self {
            matching: 2,
            mismatch: -1,
            gap: -1,
        }
    }
}

/// Pairwise overlap detection strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlapMethod {
    /// Exact shared k-mer indexing; score is `k` for any sharing pair.
    Kmer {
        /// Substring length indexed across all reads.
        k: usize,
    },
    /// MinHash sketch similarity over length-5 shingles.
    MinHash {
        /// Number of hash functions (sketch slots).
        hash_count: usize,
    },
    /// Smith-Waterman local alignment; score is the traced-back length.
    SmithWaterman(AlignmentScores),
    /// Needleman-Wunsch global alignment; score is the final cell value.
    NeedlemanWunsch(AlignmentScores),
}

impl OverlapMethod {
    /// Resolve a method name (`kmer`|`minhash`|`sw`|`nw`) to a variant.
    pub fn from_name(
        name: &str,
        k: usize,
        hash_count: usize,
        scores: AlignmentScores,
    ) -> Result<Self, AssemblyError> {
        match name {
            "kmer" => Ok(Self::Kmer { k }),
            "minhash" => Ok(Self::MinHash { hash_count }),
            "sw" => Ok(Self::SmithWaterman(scores)),
            "nw" => Ok(Self::NeedlemanWunsch(scores)),
            other => Err(AssemblyError::UnknownMethod {
                family: "overlap",
                name: other.to_string(),
            }),
        }
    }
}

/// Read ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutMethod {
    /// Greedy chain extension by best overlap score above a threshold.
    Greedy {
        /// Minimum score required to extend the chain by overlap.
        threshold: f64,
    },
    /// Exhaustive shortest-superstring search, tractable for ≤ 8 reads.
    Superstring {
        /// Minimum literal suffix-prefix overlap between consecutive reads.
        min_overlap: usize,
    },
}

impl LayoutMethod {
    /// Resolve a method name (`greedy`|`superstring`) to a variant.
    pub fn from_name(
        name: &str,
        threshold: f64,
        min_overlap: usize,
    ) -> Result<Self, AssemblyError> {
        match name {
            "greedy" => Ok(Self::Greedy { threshold }),
            "superstring" => Ok(Self::Superstring { min_overlap }),
            other => Err(AssemblyError::UnknownMethod {
                family: "layout",
                name: other.to_string(),
            }),
        }
    }
}

/// Consensus generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusMethod {
    /// Per-column majority voting over positioned reads.
    Majority,
    /// Progressive splice on the longest common run (POA-lite).
    Poa {
        /// Minimum common-run length required to splice instead of append.
        min_run: usize,
    },
}

impl ConsensusMethod {
    /// Resolve a method name (`majority`|`poa`) to a variant.
    pub fn from_name(name: &str, min_run: usize) -> Result<Self, AssemblyError> {
        match name {
            "majority" => Ok(Self::Majority),
            "poa" => Ok(Self::Poa { min_run }),
            other => Err(AssemblyError::UnknownMethod {
                family: "consensus",
                name: other.to_string(),
            }),
        }
    }
}

/// K-mer error filtering mode for the de Bruijn pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFilter {
    /// Keep k-mers whose count reaches `min_count`.
    Threshold {
        /// Minimum occurrence count.
        min_count: u32,
    },
    /// Probabilistic membership: a Bloom filter is seeded from k-mers passing
    /// `min_count`, then any counted k-mer the filter admits survives
    /// (false positives by design).
    Bloom {
        /// Minimum occurrence count used to seed the filter.
        min_count: u32,
    },
}

impl ErrorFilter {
    /// Resolve a filter name (`threshold`|`bloom`) to a variant.
    pub fn from_name(name: &str, min_count: u32) -> Result<Self, AssemblyError> {
        match name {
            "threshold" => Ok(Self::Threshold { min_count }),
            "bloom" => Ok(Self::Bloom { min_count }),
            other => Err(AssemblyError::UnknownMethod {
                family: "error-filter",
                name: other.to_string(),
            }),
        }
    }
}

/// Eulerian path traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerianMethod {
    /// Iterative Hierholzer with an explicit stack (default).
    Hierholzer,
    /// Depth-guarded recursive DFS; equivalent path, bounded stack depth.
    Recursive,
}

impl EulerianMethod {
    /// Resolve a method name (`hierholzer`|`recursive`) to a variant.
    pub fn from_name(name: &str) -> Result<Self, AssemblyError> {
        match name {
            "hierholzer" => Ok(Self::Hierholzer),
            "recursive" => Ok(Self::Recursive),
            other => Err(AssemblyError::UnknownMethod {
                family: "eulerian",
                name: other.to_string(),
            }),
        }
    }
}

/// Full configuration for the Overlap-Layout-Consensus pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlcConfig {
    /// Overlap detection strategy.
    pub overlap: OverlapMethod,
    /// Read ordering strategy.
    pub layout: LayoutMethod,
    /// Consensus generation strategy.
    pub consensus: ConsensusMethod,
    /// Whether to explore alternate assemblies at branch points.
    pub detect_alternates: bool,
}

impl Default for OlcConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapMethod::Kmer { k: 3 },
            layout: LayoutMethod::Greedy { threshold: 0.0 },
            consensus: ConsensusMethod::Majority,
            detect_alternates: false,
        }
    }
}

/// Full configuration for the de Bruijn graph pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbgConfig {
    /// K-mer length.
    pub k: usize,
    /// Error filtering mode.
    pub filter: ErrorFilter,
    /// Eulerian path traversal strategy.
    pub euler: EulerianMethod,
    /// Whether to explore alternate paths at branch nodes.
    pub detect_alternates: bool,
}

impl Default for DbgConfig {
    fn default() -> Self {
        Self {
            k: 3,
            filter: ErrorFilter::Threshold { min_count: 1 },
            euler: EulerianMethod::Hierholzer,
            detect_alternates: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_names_resolve() {
        let scores = AlignmentScores::default();
        assert_eq!(
            OverlapMethod::from_name("kmer", 4, 8, scores).unwrap(),
            OverlapMethod::Kmer { k: 4 }
        );
        assert_eq!(
            OverlapMethod::from_name("minhash", 4, 8, scores).unwrap(),
            OverlapMethod::MinHash { hash_count: 8 }
        );
        assert!(matches!(
            OverlapMethod::from_name("sw", 4, 8, scores).unwrap(),
            OverlapMethod::SmithWaterman(_)
        ));
    }

    #[test]
    fn unknown_names_are_rejected_with_the_offending_value() {
        let err = OverlapMethod::from_name("blast", 3, 8, AlignmentScores::default())
            .expect_err("must reject");
        match err {
            AssemblyError::UnknownMethod { family, name } => {
                assert_eq!(family, "overlap");
                assert_eq!(name, "blast");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(LayoutMethod::from_name("random", 0.0, 1).is_err());
        assert!(ConsensusMethod::from_name("plurality", 10).is_err());
        assert!(ErrorFilter::from_name("cuckoo", 1).is_err());
        assert!(EulerianMethod::from_name("fleury").is_err());
    }
}
