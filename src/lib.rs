//! # readweaver
//!
//! Reconstructs a DNA sequence from overlapping fragment reads using two
//! independent strategies:
//!
//! 1. **Overlap-Layout-Consensus (OLC)**: score pairwise overlaps, order the
//!    reads into a linear layout, and merge them into a consensus sequence.
//! 2. **De Bruijn graph (DBG)**: count k-mers, filter likely errors, build a
//!    prefix/suffix graph, and linearize an Eulerian path through it.
//!
//! Both engines are pure functions of their reads and configuration: fully
//! synchronous, no state across runs. Ambiguous assembly points ("branches")
//! are reported on the result, and each engine can optionally perturb them to
//! produce alternate candidate sequences.
//!
//! ## Usage Example
//!
//! ```
//! use readweaver::{AssemblyEngine, OlcConfig, ReadInput, ReadStore};
//!
//! let reads = ReadStore::load(ReadInput::List(vec![
//!     "ACTGAC".into(),
//!     "TGACGT".into(),
//!     "ACGTGA".into(),
//! ]));
//! let result = AssemblyEngine::new(OlcConfig::default()).assemble(&reads)?;
//! assert_eq!(result.primary(), Some("ACTGACGTGA"));
//! # Ok::<(), readweaver::AssemblyError>(())
//! ```
//!
//! This is not a production-grade genome assembler: it does not guarantee
//! biological correctness and the exhaustive superstring layout is bounded to
//! small inputs by design.

#![warn(missing_docs, missing_debug_implementations)]

pub mod config; // Per-method configuration as tagged unions
pub mod consensus; // Consensus generation from ordered reads
pub mod counter; // Default-zero frequency counters
pub mod dbg; // De Bruijn engine orchestration
pub mod euler; // Eulerian path reconstruction
pub mod graph; // De Bruijn graph construction
pub mod kmer; // K-mer counting, error filtering, Bloom filter
pub mod layout; // Read ordering strategies
pub mod olc; // OLC engine orchestration
pub mod overlap; // Pairwise overlap detection
pub mod reads; // Read normalization
pub mod result; // Assembly results and alternate outcomes

// Re-exports for convenience
pub use config::{
    AlignmentScores, ConsensusMethod, DbgConfig, ErrorFilter, EulerianMethod, LayoutMethod,
    OlcConfig, OverlapMethod,
};
pub use dbg::DebruijnEngine;
pub use olc::AssemblyEngine;
pub use reads::{ReadInput, ReadStore};
pub use result::{AlternateOutcome, AssemblyResult, SkipReason};

use thiserror::Error;

/// Errors fatal to an assembly run.
///
/// Per-alternate failures are deliberately absent: they are contained and
/// reported as [`AlternateOutcome::Skipped`] on the result instead.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// Read input held no usable sequence content where some was required.
    #[error("invalid read input: {0}")]
    InvalidInput(String),

    /// Unrecognized method name for the given configuration family.
    #[error("unknown {family} method '{name}'")]
    UnknownMethod {
        /// Configuration family the name was resolved against.
        family: &'static str,
        /// The offending value.
        name: String,
    },

    /// The recursive traversal variant exceeded its depth guard.
    #[error("recursion depth limit {limit} exceeded during path traversal")]
    RecursionLimit {
        /// Maximum permitted recursion depth.
        limit: usize,
    },
}
