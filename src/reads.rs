//! Read normalization: heterogeneous caller input becomes an ordered store of
//! identifier → uppercase nucleotide sequence.

use fxhash::FxHashMap;

/// Raw read input as supplied by the upstream input-handling layer.
#[derive(Debug, Clone)]
pub enum ReadInput {
    /// A delimited text blob: comma-separated, newline-separated, or
    /// FASTA-style with `>` header lines (headers are skipped).
    Text(String),
    /// An explicit ordered list of sequence strings.
    List(Vec<String>),
}

/// Normalized read collection.
///
/// Insertion order is preserved and observable: layout construction and tie
/// breaking refer to "store order", which is the order reads were supplied.
/// Identifiers are synthetic (`read0`, `read1`, …).
#[derive(Debug, Clone, Default)]
pub struct ReadStore {
    order: Vec<String>,
    sequences: FxHashMap<String, String>,
}

impl ReadStore {
    /// Normalize `input` into a read store.
    pub fn load(input: ReadInput) -> Self {
        match input {
            ReadInput::Text(blob) => Self::from_sequences(split_text_blob(&blob)),
            ReadInput::List(list) => Self::from_sequences(list),
        }
    }

    /// Build a store from an explicit sequence list, assigning synthetic ids.
    pub fn from_sequences<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::default();
        for sequence in sequences {
            let id = format!("read{}", store.order.len());
            store
                .sequences
                .insert(id.clone(), sequence.as_ref().to_ascii_uppercase());
            store.order.push(id);
        }
        store
    }

    /// Number of reads.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no reads.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Read identifiers in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Sequence for `id`, if present.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.sequences.get(id).map(String::as_str)
    }

    /// Iterate `(id, sequence)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(move |id| (id.as_str(), self.sequences[id].as_str()))
    }
}

/// Split a text blob on commas and newlines, dropping empties and `>` headers.
fn split_text_blob(blob: &str) -> Vec<String> {
    blob.split(|c| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty() && !fragment.starts_with('>'))
        .map(str::to_string)
        .collect()
}
