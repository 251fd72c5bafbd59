//! Assembly results and per-alternate outcomes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of one assembly run.
///
/// `assemblies` lists candidate sequences with the primary first, followed by
/// distinct alternates. Branch coordinate semantics differ by engine: OLC
/// reports position-index pairs into the primary layout order, the de Bruijn
/// engine reports synthetic `(i, i)` markers over its branch nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssemblyResult {
    /// Candidate sequences, primary first.
    pub assemblies: Vec<String>,
    /// Ambiguous-location coordinate pairs.
    pub branches: Vec<(usize, usize)>,
    /// One outcome per explored alternate, in branch order.
    pub alternates: Vec<AlternateOutcome>,
}

impl AssemblyResult {
    /// The empty result returned for zero input reads.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The primary assembly, if any.
    pub fn primary(&self) -> Option<&str> {
        self.assemblies.first().map(String::as_str)
    }
}

/// Outcome of one alternate-assembly attempt.
///
/// Alternate failures are recorded here instead of surfacing as errors; the
/// primary result is never affected by a failed alternate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlternateOutcome {
    /// The alternate was distinct and appended to `assemblies`.
    Kept {
        /// Branch coordinates the alternate was derived from.
        branch: (usize, usize),
    },
    /// The alternate was dropped.
    Skipped {
        /// Branch coordinates the alternate was derived from.
        branch: (usize, usize),
        /// Why it was dropped.
        reason: SkipReason,
    },
}

/// Reason an alternate assembly was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkipReason {
    /// Reassembly produced an empty sequence.
    Empty,
    /// Reassembly reproduced an already-kept sequence.
    Duplicate,
    /// Reassembly failed; the message describes the failure.
    Failed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty alternate sequence"),
            Self::Duplicate => write!(f, "duplicate of an existing assembly"),
            Self::Failed(message) => write!(f, "alternate assembly failed: {message}"),
        }
    }
}
