//! Eulerian path reconstruction and linearization.

use std::collections::BTreeMap;

use crate::config::EulerianMethod;
use crate::graph::DeBruijnGraph;
use crate::AssemblyError;

/// Frame limit for the recursive traversal variant.
const MAX_RECURSION_DEPTH: usize = 4096;

/// Reconstructs a path covering every edge of a de Bruijn graph.
///
/// Both strategies consume edges from a cloned adjacency structure; the graph
/// itself stays untouched and reusable for alternate-path generation. An
/// unbalanced graph does not fail: traversal starts from a best-effort node
/// and returns whatever path it can cover.
#[derive(Debug, Clone, Copy)]
pub struct EulerianPathFinder {
    method: EulerianMethod,
}

impl EulerianPathFinder {
    /// Create a finder for `method`.
    pub fn new(method: EulerianMethod) -> Self {
        Self { method }
    }

    /// Find a path through `graph`. An empty graph yields an empty path.
    pub fn find_path(&self, graph: &DeBruijnGraph) -> Result<Vec<String>, AssemblyError> {
        let Some(start) = start_node(graph) else {
            return Ok(Vec::new());
        };
        let mut adjacency = graph.clone_adjacency();
        match self.method {
            EulerianMethod::Hierholzer => Ok(hierholzer(start, &mut adjacency)),
            EulerianMethod::Recursive => {
                let mut path = Vec::new();
                visit(start, &mut adjacency, &mut path, 0)?;
                path.reverse();
                Ok(path)
            }
        }
    }
}

/// First node (in iteration order) with out-degree exceeding in-degree by
/// one; the first node overall when the graph is balanced or imbalanced
/// beyond a clean Eulerian path.
fn start_node(graph: &DeBruijnGraph) -> Option<String> {
    graph
        .nodes()
        .find(|node| graph.out_degree(node) == graph.in_degree(node) + 1)
        .or_else(|| graph.nodes().next())
        .map(str::to_string)
}

/// Iterative Hierholzer with an explicit stack.
fn hierholzer(start: String, adjacency: &mut BTreeMap<String, Vec<String>>) -> Vec<String> {
    let mut stack = vec![start];
    let mut path = Vec::new();
    while let Some(top) = stack.last().cloned() {
        let next = adjacency
            .get_mut(&top)
            .and_then(|successors| (!successors.is_empty()).then(|| successors.remove(0)));
        match next {
            Some(next) => stack.push(next),
            None => path.push(stack.pop().expect("stack top exists")),
        }
    }
    path.reverse();
    path
}

/// Recursive DFS equivalent of Hierholzer; appends each node after its
/// outgoing edges are exhausted. Depth-guarded to bound stack usage.
fn visit(
    node: String,
    adjacency: &mut BTreeMap<String, Vec<String>>,
    path: &mut Vec<String>,
    depth: usize,
) -> Result<(), AssemblyError> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(AssemblyError::RecursionLimit {
            limit: MAX_RECURSION_DEPTH,
        });
    }
    while let Some(next) = adjacency
        .get_mut(&node)
        .and_then(|successors| (!successors.is_empty()).then(|| successors.remove(0)))
    {
        visit(next, adjacency, path, depth + 1)?;
    }
    path.push(node);
    Ok(())
}

/// Linearize a node path into a sequence: the first node in full, then the
/// last character of each subsequent node.
pub fn path_to_sequence(path: &[String]) -> String {
    let mut sequence = String::new();
    for (index, node) in path.iter().enumerate() {
        if index == 0 {
            sequence.push_str(node);
        } else if !node.is_empty() {
            sequence.push_str(&node[node.len() - 1..]);
        }
    }
    sequence
}
