//! Overlap-Layout-Consensus orchestration.

use tracing::{debug, warn};

use crate::config::OlcConfig;
use crate::consensus::ConsensusBuilder;
use crate::layout::LayoutBuilder;
use crate::overlap::OverlapDetector;
use crate::reads::ReadStore;
use crate::result::{AlternateOutcome, AssemblyResult, SkipReason};
use crate::AssemblyError;

/// Runs the OLC pipeline: overlaps → layout → consensus, with optional
/// alternate exploration at branch points.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyEngine {
    config: OlcConfig,
}

impl AssemblyEngine {
    /// Create an engine with `config`.
    pub fn new(config: OlcConfig) -> Self {
        Self { config }
    }

    /// Assemble `reads` into a primary sequence and optional alternates.
    ///
    /// Zero reads yield an empty result; reads with an empty layout (the
    /// superstring strategy may produce one) yield a single empty assembly.
    pub fn assemble(&self, reads: &ReadStore) -> Result<AssemblyResult, AssemblyError> {
        if reads.is_empty() {
            return Ok(AssemblyResult::empty());
        }

        let overlaps = OverlapDetector::new(self.config.overlap).detect(reads);
        debug!(reads = reads.len(), pairs = overlaps.len(), "computed overlaps");

        let layout = LayoutBuilder::new(self.config.layout).build(reads, &overlaps);
        debug!(
            ordered = layout.order.len(),
            branches = layout.branches.len(),
            "computed layout"
        );

        let consensus = ConsensusBuilder::new(self.config.consensus);
        let primary = if layout.is_empty() {
            String::new()
        } else {
            consensus.build(reads, &layout.order)
        };

        let mut assemblies = vec![primary];
        let mut alternates = Vec::new();

        if self.config.detect_alternates && !layout.is_empty() {
            for &branch in &layout.branches {
                let outcome = self.try_alternate(reads, &layout.order, branch, &mut assemblies);
                if let AlternateOutcome::Skipped { reason, .. } = &outcome {
                    warn!(?branch, %reason, "skipping alternate assembly");
                }
                alternates.push(outcome);
            }
        }

        Ok(AssemblyResult {
            assemblies,
            branches: layout.branches,
            alternates,
        })
    }

    /// Reassemble with the two branch positions swapped in a copy of the
    /// primary order. Failures are contained here; they never abort the run.
    fn try_alternate(
        &self,
        reads: &ReadStore,
        order: &[String],
        branch: (usize, usize),
        assemblies: &mut Vec<String>,
    ) -> AlternateOutcome {
        let (a, b) = branch;
        if a >= order.len() || b >= order.len() {
            return AlternateOutcome::Skipped {
                branch,
                reason: SkipReason::Failed(format!(
                    "branch positions ({a}, {b}) out of range for {} reads",
                    order.len()
                )),
            };
        }

        let mut swapped = order.to_vec();
        swapped.swap(a, b);
        let alternate = ConsensusBuilder::new(self.config.consensus).build(reads, &swapped);

        if alternate.is_empty() {
            AlternateOutcome::Skipped {
                branch,
                reason: SkipReason::Empty,
            }
        } else if assemblies.contains(&alternate) {
            AlternateOutcome::Skipped {
                branch,
                reason: SkipReason::Duplicate,
            }
        } else {
            assemblies.push(alternate);
            AlternateOutcome::Kept { branch }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConsensusMethod, LayoutMethod, OverlapMethod};
    use crate::reads::ReadStore;

    fn engine(detect_alternates: bool) -> AssemblyEngine {
        AssemblyEngine::new(OlcConfig {
            overlap: OverlapMethod::Kmer { k: 3 },
            layout: LayoutMethod::Greedy { threshold: 0.0 },
            consensus: ConsensusMethod::Majority,
            detect_alternates,
        })
    }

    #[test]
    fn empty_reads_yield_an_empty_result() {
        let reads = ReadStore::from_sequences(std::iter::empty::<String>());
        let result = engine(false).assemble(&reads).unwrap();
        assert!(result.assemblies.is_empty());
        assert!(result.branches.is_empty());
    }

    #[test]
    fn primary_assembly_covers_all_reads() {
        let reads = ReadStore::from_sequences(["ACTGAC", "TGACGT", "ACGTGA"]);
        let result = engine(false).assemble(&reads).unwrap();
        assert_eq!(result.primary(), Some("ACTGACGTGA"));
        assert_eq!(result.branches, vec![(0, 2)]);
        assert!(result.alternates.is_empty());
    }

    #[test]
    fn alternates_record_an_outcome_per_branch() {
        let reads = ReadStore::from_sequences(["ACTGAC", "TGACGT", "ACGTGA"]);
        let result = engine(true).assemble(&reads).unwrap();
        assert_eq!(result.alternates.len(), result.branches.len());
        // Every kept alternate appears in the assemblies list and is distinct.
        let kept = result
            .alternates
            .iter()
            .filter(|outcome| matches!(outcome, AlternateOutcome::Kept { .. }))
            .count();
        assert_eq!(result.assemblies.len(), 1 + kept);
        let mut unique = result.assemblies.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), result.assemblies.len());
    }

    #[test]
    fn superstring_without_valid_ordering_yields_single_empty_assembly() {
        let reads = ReadStore::from_sequences(["AAAA", "TTTT"]);
        let engine = AssemblyEngine::new(OlcConfig {
            overlap: OverlapMethod::Kmer { k: 3 },
            layout: LayoutMethod::Superstring { min_overlap: 2 },
            consensus: ConsensusMethod::Majority,
            detect_alternates: false,
        });
        let result = engine.assemble(&reads).unwrap();
        assert_eq!(result.assemblies, vec![String::new()]);
    }
}
