//! De Bruijn graph construction and simplification.

use std::collections::BTreeMap;

use crate::counter::Counter;

/// A directed multigraph over (k−1)-mers.
///
/// Each surviving k-mer contributes one edge from its prefix node to its
/// suffix node. Adjacency is an ordered map so node iteration order — which
/// start-node selection and branch reporting refer to — is lexicographic and
/// deterministic; successor lists keep edge insertion order.
#[derive(Debug, Clone, Default)]
pub struct DeBruijnGraph {
    adjacency: BTreeMap<String, Vec<String>>,
    in_degree: Counter<String>,
    out_degree: Counter<String>,
}

impl DeBruijnGraph {
    /// Build a graph from surviving k-mers (each at least 2 characters).
    pub fn from_kmers<I, S>(kmers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::default();
        for kmer in kmers {
            let kmer = kmer.as_ref();
            if kmer.len() < 2 {
                continue;
            }
            let prefix = &kmer[..kmer.len() - 1];
            let suffix = &kmer[1..];
            graph.add_edge(prefix.to_string(), suffix.to_string());
        }
        graph
    }

    fn add_edge(&mut self, from: String, to: String) {
        self.adjacency.entry(to.clone()).or_default();
        self.out_degree.increment(from.clone());
        self.in_degree.increment(to.clone());
        self.adjacency.entry(from).or_default().push(to);
    }

    /// Nodes in lexicographic order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Successors of `node` in edge insertion order.
    pub fn successors(&self, node: &str) -> &[String] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// A deep copy of the adjacency lists for destructive traversal.
    pub fn clone_adjacency(&self) -> BTreeMap<String, Vec<String>> {
        self.adjacency.clone()
    }

    /// In-degree of `node` (zero for unknown nodes).
    pub fn in_degree(&self, node: &str) -> usize {
        self.in_degree.get(node)
    }

    /// Out-degree of `node` (zero for unknown nodes).
    pub fn out_degree(&self, node: &str) -> usize {
        self.out_degree.get(node)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// One pass of tip removal, returning the number of removed tips.
    ///
    /// Removes pure sources with a single outgoing edge (out-degree 1,
    /// in-degree 0), decrementing the neighbor's in-degree and the tip's
    /// out-degree. Deliberately a single non-recursive pass: newly exposed
    /// sources, sink tips, and bubbles are left alone.
    pub fn simplify_tips(&mut self) -> usize {
        let tips: Vec<String> = self
            .nodes()
            .filter(|node| self.out_degree(node) == 1 && self.in_degree(node) == 0)
            .map(str::to_string)
            .collect();

        for tip in &tips {
            if let Some(successors) = self.adjacency.remove(tip) {
                for successor in &successors {
                    self.in_degree.decrement(successor);
                }
            }
            self.out_degree.decrement(tip);
        }
        tips.len()
    }

    /// Nodes with more than one outgoing edge, in lexicographic order.
    pub fn branch_nodes(&self) -> Vec<String> {
        self.adjacency
            .iter()
            .filter(|(_, successors)| successors.len() > 1)
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Swap the first two successors of `node`. Returns false when the node
    /// has fewer than two outgoing edges.
    pub fn swap_first_successors(&mut self, node: &str) -> bool {
        match self.adjacency.get_mut(node) {
            Some(successors) if successors.len() >= 2 => {
                successors.swap(0, 1);
                true
            }
            _ => false,
        }
    }
}
