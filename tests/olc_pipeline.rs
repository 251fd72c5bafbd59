//! End-to-end tests for the Overlap-Layout-Consensus pipeline.

use test_case::test_case;

use readweaver::overlap::{pair_key, OverlapDetector};
use readweaver::{
    AlignmentScores, AssemblyEngine, AssemblyError, ConsensusMethod, LayoutMethod, OlcConfig,
    OverlapMethod, ReadInput, ReadStore,
};

mod common;
use common::store;

#[test]
fn kmer_overlaps_score_shared_triplets() {
    let reads = store(&["ACTGAC", "TGACGT", "ACGTGA"]);
    let overlaps = OverlapDetector::new(OverlapMethod::Kmer { k: 3 }).detect(&reads);
    assert_eq!(overlaps.get(&pair_key("read0", "read1")), Some(&3.0));
}

#[test]
fn smith_waterman_self_alignment_covers_the_read() {
    let reads = store(&["ACTG", "ACTG"]);
    let scores = AlignmentScores {
        matching: 2,
        mismatch: -1,
        gap: -1,
    };
    let overlaps =
        OverlapDetector::new(OverlapMethod::SmithWaterman(scores)).detect(&reads);
    assert_eq!(overlaps.get(&pair_key("read0", "read1")), Some(&4.0));
}

#[test]
fn default_pipeline_reconstructs_overlapping_fragments() {
    let reads = store(&["ACTGAC", "TGACGT", "ACGTGA"]);
    let result = AssemblyEngine::new(OlcConfig::default())
        .assemble(&reads)
        .unwrap();
    assert_eq!(result.primary(), Some("ACTGACGTGA"));
    assert_eq!(result.branches, vec![(0, 2)]);
}

#[test]
fn empty_reads_produce_an_empty_assembly_list() {
    let reads = ReadStore::load(ReadInput::List(Vec::new()));
    let result = AssemblyEngine::new(OlcConfig::default())
        .assemble(&reads)
        .unwrap();
    assert!(result.assemblies.is_empty());
    assert!(result.branches.is_empty());
    assert!(result.alternates.is_empty());
}

#[test]
fn superstring_layout_with_poa_consensus_merges_two_fragments() {
    let reads = store(&["AACCGGTTAACCGGTT", "GGTTAACCGGTTACGT"]);
    let config = OlcConfig {
        overlap: OverlapMethod::Kmer { k: 4 },
        layout: LayoutMethod::Superstring { min_overlap: 4 },
        consensus: ConsensusMethod::Poa { min_run: 10 },
        detect_alternates: false,
    };
    let result = AssemblyEngine::new(config).assemble(&reads).unwrap();
    assert_eq!(result.primary(), Some("AACCGGTTAACCGGTTACGT"));
}

#[test]
fn alternates_never_duplicate_the_primary() {
    let reads = store(&["ACTGAC", "TGACGT", "ACGTGA", "GACGTG"]);
    let config = OlcConfig {
        detect_alternates: true,
        ..OlcConfig::default()
    };
    let result = AssemblyEngine::new(config).assemble(&reads).unwrap();
    let primary = result.primary().unwrap().to_string();
    for alternate in &result.assemblies[1..] {
        assert!(!alternate.is_empty());
        assert_ne!(*alternate, primary);
    }
    assert_eq!(result.alternates.len(), result.branches.len());
}

#[test_case("kmer")]
#[test_case("minhash")]
#[test_case("sw")]
#[test_case("nw")]
fn known_overlap_methods_resolve(name: &str) {
    assert!(OverlapMethod::from_name(name, 3, 16, AlignmentScores::default()).is_ok());
}

#[test_case("blast", "overlap")]
#[test_case("mummer", "overlap")]
fn unknown_overlap_methods_fail_with_the_offending_name(name: &str, family: &str) {
    let error = OverlapMethod::from_name(name, 3, 16, AlignmentScores::default())
        .expect_err("unknown method must be rejected");
    match error {
        AssemblyError::UnknownMethod {
            family: reported_family,
            name: reported_name,
        } => {
            assert_eq!(reported_family, family);
            assert_eq!(reported_name, name);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_layout_and_consensus_methods_are_rejected() {
    assert!(matches!(
        LayoutMethod::from_name("spectral", 0.0, 1),
        Err(AssemblyError::UnknownMethod { family: "layout", .. })
    ));
    assert!(matches!(
        ConsensusMethod::from_name("quorum", 10),
        Err(AssemblyError::UnknownMethod {
            family: "consensus",
            ..
        })
    ));
}
