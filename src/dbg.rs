//! De Bruijn graph assembly orchestration.

use tracing::{debug, warn};

use crate::config::DbgConfig;
use crate::euler::{path_to_sequence, EulerianPathFinder};
use crate::graph::DeBruijnGraph;
use crate::kmer::{count_kmers, filter_kmers};
use crate::reads::ReadStore;
use crate::result::{AlternateOutcome, AssemblyResult, SkipReason};
use crate::AssemblyError;

/// Runs the DBG pipeline: k-mer counts → error filter → graph → one tip
/// pass → Eulerian path → sequence, with optional alternate paths at branch
/// nodes.
#[derive(Debug, Clone, Copy)]
pub struct DebruijnEngine {
    config: DbgConfig,
}

impl DebruijnEngine {
    /// Create an engine with `config`.
    pub fn new(config: DbgConfig) -> Self {
        Self { config }
    }

    /// Assemble `reads` into a primary sequence and optional alternates.
    ///
    /// Zero reads yield an empty result; reads surviving to an empty graph
    /// yield a single empty assembly. A failure while reconstructing one
    /// alternate is contained; the primary result is unaffected.
    pub fn assemble(&self, reads: &ReadStore) -> Result<AssemblyResult, AssemblyError> {
        if reads.is_empty() {
            return Ok(AssemblyResult::empty());
        }

        let counts = count_kmers(reads, self.config.k);
        let surviving = filter_kmers(&counts, self.config.filter);
        debug!(
            k = self.config.k,
            counted = counts.len(),
            surviving = surviving.len(),
            "filtered k-mers"
        );

        let mut graph = DeBruijnGraph::from_kmers(&surviving);
        let removed = graph.simplify_tips();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            tips_removed = removed,
            "constructed graph"
        );

        let finder = EulerianPathFinder::new(self.config.euler);
        let path = finder.find_path(&graph)?;
        let primary = path_to_sequence(&path);

        let branch_nodes = graph.branch_nodes();
        // Synthetic markers: consumers read these as an ambiguity count, not
        // as graph coordinates.
        let branches: Vec<(usize, usize)> =
            (0..branch_nodes.len()).map(|index| (index, index)).collect();

        let mut assemblies = vec![primary];
        let mut alternates = Vec::new();

        if self.config.detect_alternates {
            for (index, node) in branch_nodes.iter().enumerate() {
                let outcome =
                    self.try_alternate(&graph, &finder, node, (index, index), &mut assemblies);
                if let AlternateOutcome::Skipped { reason, .. } = &outcome {
                    warn!(node = node.as_str(), %reason, "skipping alternate path");
                }
                alternates.push(outcome);
            }
        }

        Ok(AssemblyResult {
            assemblies,
            branches,
            alternates,
        })
    }

    /// Re-run path finding on a clone of the graph with the branch node's
    /// first two outgoing edges swapped. Failures are contained here.
    fn try_alternate(
        &self,
        graph: &DeBruijnGraph,
        finder: &EulerianPathFinder,
        node: &str,
        branch: (usize, usize),
        assemblies: &mut Vec<String>,
    ) -> AlternateOutcome {
        let mut perturbed = graph.clone();
        if !perturbed.swap_first_successors(node) {
            return AlternateOutcome::Skipped {
                branch,
                reason: SkipReason::Failed(format!(
                    "branch node {node} has fewer than two outgoing edges"
                )),
            };
        }

        let alternate = match finder.find_path(&perturbed) {
            Ok(path) => path_to_sequence(&path),
            Err(error) => {
                return AlternateOutcome::Skipped {
                    branch,
                    reason: SkipReason::Failed(error.to_string()),
                }
            }
        };

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
