use readweaver::ReadStore;

/// Build a store from literal sequences, ids assigned as `read0`, `read1`, …
pub fn store(sequences: &[&str]) -> ReadStore {
    ReadStore::from_sequences(sequences.iter().copied())
}
