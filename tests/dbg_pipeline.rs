//! End-to-end tests for the de Bruijn graph pipeline.

use test_case::test_case;

use readweaver::euler::{path_to_sequence, EulerianPathFinder};
use readweaver::graph::DeBruijnGraph;
use readweaver::kmer::{count_kmers, filter_kmers};
use readweaver::{
    AssemblyError, DbgConfig, DebruijnEngine, ErrorFilter, EulerianMethod, ReadInput, ReadStore,
};

mod common;
use common::store;

fn config(k: usize) -> DbgConfig {
    DbgConfig {
        k,
        filter: ErrorFilter::Threshold { min_count: 1 },
        euler: EulerianMethod::Hierholzer,
        detect_alternates: false,
    }
}

#[test]
fn graph_nodes_are_the_two_mers_of_surviving_three_mers() {
    let reads = store(&["ACTGAC", "TGACGT"]);
    let counts = count_kmers(&reads, 3);
    let surviving = filter_kmers(&counts, ErrorFilter::Threshold { min_count: 1 });
    let graph = DeBruijnGraph::from_kmers(&surviving);

    let nodes: Vec<&str> = graph.nodes().collect();
    assert_eq!(nodes, vec!["AC", "CG", "CT", "GA", "GT", "TG"]);
    for kmer in &surviving {
        assert!(nodes.contains(&&kmer[..2]));
        assert!(nodes.contains(&&kmer[1..]));
    }
}

#[test]
fn degree_sums_equal_surviving_kmer_count_before_simplification() {
    let reads = store(&["ACTGAC", "TGACGT"]);
    let counts = count_kmers(&reads, 3);
    let surviving = filter_kmers(&counts, ErrorFilter::Threshold { min_count: 1 });
    let graph = DeBruijnGraph::from_kmers(&surviving);

    let out_sum: usize = graph.nodes().map(|node| graph.out_degree(node)).sum();
    let in_sum: usize = graph.nodes().map(|node| graph.in_degree(node)).sum();
    assert_eq!(out_sum, surviving.len());
    assert_eq!(in_sum, surviving.len());
}

#[test]
fn primary_assembly_is_at_least_as_long_as_the_longest_read() {
    let reads = store(&["ACTGAC", "TGACGT"]);
    let result = DebruijnEngine::new(config(3)).assemble(&reads).unwrap();
    let primary = result.primary().unwrap();
    assert_eq!(primary, "ACTGACGT");
    assert!(primary.len() >= 6);
}

#[test]
fn empty_reads_produce_an_empty_assembly_list() {
    let reads = ReadStore::load(ReadInput::List(Vec::new()));
    let result = DebruijnEngine::new(config(3)).assemble(&reads).unwrap();
    assert!(result.assemblies.is_empty());
    assert!(result.branches.is_empty());
}

#[test]
fn aggressive_threshold_yields_a_single_empty_assembly() {
    let reads = store(&["ACTGAC"]);
    let result = DebruijnEngine::new(DbgConfig {
        filter: ErrorFilter::Threshold { min_count: 10 },
        ..config(3)
    })
    .assemble(&reads)
    .unwrap();
    assert_eq!(result.assemblies, vec![String::new()]);
}

#[test]
fn bloom_filter_pipeline_reconstructs_the_same_sequence() {
    let reads = store(&["ACTGAC", "TGACGT"]);
    let threshold = DebruijnEngine::new(config(3)).assemble(&reads).unwrap();
    let bloom = DebruijnEngine::new(DbgConfig {
        filter: ErrorFilter::Bloom { min_count: 1 },
        ..config(3)
    })
    .assemble(&reads)
    .unwrap();
    // Every threshold survivor passes the bloom filter, and at min_count 1
    // there is nothing extra for false positives to admit.
    assert_eq!(threshold.primary(), bloom.primary());
}

#[test_case(EulerianMethod::Hierholzer)]
#[test_case(EulerianMethod::Recursive)]
fn both_traversals_cover_every_edge(method: EulerianMethod) {
    let reads = store(&["ACTGAC", "TGACGT"]);
    let counts = count_kmers(&reads, 3);
    let surviving = filter_kmers(&counts, ErrorFilter::Threshold { min_count: 1 });
    let graph = DeBruijnGraph::from_kmers(&surviving);

    let path = EulerianPathFinder::new(method).find_path(&graph).unwrap();
    assert_eq!(path.len(), graph.edge_count() + 1);
    assert_eq!(path_to_sequence(&path), "ACTGACGT");
}

#[test]
fn branch_markers_count_ambiguous_nodes() {
    let reads = store(&["ACTGAC", "TGACGT"]);
    let result = DebruijnEngine::new(DbgConfig {
        detect_alternates: true,
        ..config(3)
    })
    .assemble(&reads)
    .unwrap();
    // "AC" is the single node with two outgoing edges.
    assert_eq!(result.branches, vec![(0, 0)]);
    assert_eq!(result.alternates.len(), 1);
}

#[test]
fn unknown_filter_and_euler_methods_are_rejected() {
    assert!(matches!(
        ErrorFilter::from_name("cuckoo", 1),
        Err(AssemblyError::UnknownMethod {
            family: "error-filter",
            ..
        })
    ));
    assert!(matches!(
        EulerianMethod::from_name("fleury"),
        Err(AssemblyError::UnknownMethod {
            family: "eulerian",
            ..
        })
    ));
}
