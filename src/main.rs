use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use readweaver::{
    AlignmentScores, AlternateOutcome, AssemblyEngine, AssemblyError, AssemblyResult,
    ConsensusMethod, DbgConfig, DebruijnEngine, ErrorFilter, EulerianMethod, LayoutMethod,
    OlcConfig, OverlapMethod, ReadInput, ReadStore,
};

#[derive(Parser, Debug)]
#[command(
    name = "readweaver",
    about = "Reconstructs a DNA sequence from overlapping fragment reads"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble with the Overlap-Layout-Consensus pipeline.
    Olc {
        /// Reads file: one sequence per line, comma-separated, or FASTA-style.
        reads: PathBuf,
        /// Overlap method: kmer | minhash | sw | nw.
        #[arg(long, default_value = "kmer")]
        overlap: String,
        /// K-mer length for the kmer overlap method.
        #[arg(long, default_value_t = 3)]
        k: usize,
        /// Number of hash functions for the minhash overlap method.
        #[arg(long, default_value_t = 16)]
        hash_count: usize,
        /// Match score for the alignment overlap methods.
        #[arg(long, default_value_t = 2, allow_hyphen_values = true)]
        match_score: i32,
        /// Mismatch score for the alignment overlap methods.
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        mismatch_score: i32,
        /// Gap penalty for the alignment overlap methods.
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        gap_score: i32,
        /// Layout method: greedy | superstring.
        #[arg(long, default_value = "greedy")]
        layout: String,
        /// Minimum overlap score for greedy chain extension.
        #[arg(long, default_value_t = 0.0)]
        threshold: f64,
        /// Minimum consecutive overlap for the superstring layout.
        #[arg(long, default_value_t = 1)]
        min_overlap: usize,
        /// Consensus method: majority | poa.
        #[arg(long, default_value = "majority")]
        consensus: String,
        /// Minimum common-run length for the poa consensus.
        #[arg(long, default_value_t = 10)]
        min_run: usize,
        /// Explore alternate assemblies at branch points.
        #[arg(long)]
        alternates: bool,
    },
    /// Assemble with the de Bruijn graph pipeline.
    Dbg {
        /// Reads file: one sequence per line, comma-separated, or FASTA-style.
        reads: PathBuf,
        /// K-mer length.
        #[arg(long, default_value_t = 3)]
        k: usize,
        /// Error filter: threshold | bloom.
        #[arg(long, default_value = "threshold")]
        filter: String,
        /// Minimum k-mer count for the error filter.
        #[arg(long, default_value_t = 1)]
        min_count: u32,
        /// Eulerian path method: hierholzer | recursive.
        #[arg(long, default_value = "hierholzer")]
        euler: String,
        /// Explore alternate paths at branch nodes.
        #[arg(long)]
        alternates: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Olc {
            reads,
            overlap,
            k,
            hash_count,
            match_score,
            mismatch_score,
            gap_score,
            layout,
            threshold,
            min_overlap,
            consensus,
            min_run,
            alternates,
        } => {
            let scores = AlignmentScores {
                matching: match_score,
                mismatch: mismatch_score,
                gap: gap_score,
            };
            let config = OlcConfig {
                overlap: OverlapMethod::from_name(&overlap, k, hash_count, scores)?,
                layout: LayoutMethod::from_name(&layout, threshold, min_overlap)?,
                consensus: ConsensusMethod::from_name(&consensus, min_run)?,
                detect_alternates: alternates,
            };
            let store = load_reads(&reads)?;
            let result = AssemblyEngine::new(config).assemble(&store)?;
            print_result(&result);
        }
        Commands::Dbg {
            reads,
            k,
            filter,
            min_count,
            euler,
            alternates,
        } => {
            let config = DbgConfig {
                k,
                filter: ErrorFilter::from_name(&filter, min_count)?,
                euler: EulerianMethod::from_name(&euler)?,
                detect_alternates: alternates,
            };
            let store = load_reads(&reads)?;
            let result = DebruijnEngine::new(config).assemble(&store)?;
            print_result(&result);
        }
    }

    Ok(())
}

fn load_reads(path: &PathBuf) -> Result<ReadStore> {
    let blob = fs::read_to_string(path)
        .with_context(|| format!("failed to read sequences from {}", path.display()))?;
    let store = ReadStore::load(ReadInput::Text(blob));
    if store.is_empty() {
        return Err(AssemblyError::InvalidInput(format!(
            "{} contains no sequences",
            path.display()
        ))
        .into());
    }
    Ok(store)
}

fn print_result(result: &AssemblyResult) {
    for (index, assembly) in result.assemblies.iter().enumerate() {
        let label = if index == 0 { "primary" } else { "alternate" };
        println!("{label}\t{assembly}");
    }
    for &(a, b) in &result.branches {
        println!("branch\t{a}\t{b}");
    }
    for outcome in &result.alternates {
        if let AlternateOutcome::Skipped { branch, reason } = outcome {
            println!("skipped\t{}\t{}\t{reason}", branch.0, branch.1);
        }
    }
}
