use std::collections::HashMap;
use std::fmt;

use crate::models::flags::QueryFlags;
use crate::models::query::{QuerySequence, SeqIdx};
use crate::utils::errors::ParseError;

/// Size statistics of the loaded transcriptome
///
/// N50/N90 are computed over descending-sorted sequence lengths: the
/// length at which the cumulative sum first exceeds 50% (90%) of the
/// total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptomeSummary {
    pub count: u64,
    pub total_len: u64,
    pub average_len: f64,
    pub n50: u64,
    pub n90: u64,
    pub shortest_len: u64,
    pub shortest_id: String,
    pub longest_len: u64,
    pub longest_id: String,
    pub is_protein: bool,
}

impl fmt::Display for TranscriptomeSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} sequences found",
            if self.is_protein {
                "Protein"
            } else {
                "Nucleotide"
            }
        )?;
        writeln!(f, "Total sequences: {}", self.count)?;
        writeln!(f, "Total length of transcriptome(bp): {}", self.total_len)?;
        writeln!(f, "Average sequence length(bp): {:.2}", self.average_len)?;
        writeln!(f, "n50: {}", self.n50)?;
        writeln!(f, "n90: {}", self.n90)?;
        writeln!(
            f,
            "Longest sequence(bp): {} ({})",
            self.longest_len, self.longest_id
        )?;
        write!(
            f,
            "Shortest sequence(bp): {} ({})",
            self.shortest_len, self.shortest_id
        )
    }
}

/// In-memory arena of every input sequence, keyed by id
///
/// Insertion order is preserved in the arena; ids are unique and a
/// duplicate on ingest is a fatal parse error. Neighbour links and
/// all cross-sequence references use [`SeqIdx`] arena indices.
///
/// # Examples
///
/// ```rust
/// use transannot::models::{QueryFlags, QuerySequence, QueryStore};
///
/// let mut store = QueryStore::new(false);
/// store
///     .insert(QuerySequence::new("q1".to_string(), "ATGACG".to_string(), false))
///     .unwrap();
/// assert_eq!(store.len(), 1);
/// assert!(store.get("q1").is_some());
/// assert!(store.insert(QuerySequence::new("q1".to_string(), "A".to_string(), false)).is_err());
/// ```
pub struct QueryStore {
    list: Vec<QuerySequence>,
    index: HashMap<String, SeqIdx>,
    is_protein: bool,
}

impl QueryStore {
    pub fn new(is_protein: bool) -> Self {
        Self {
            list: vec![],
            index: HashMap::new(),
            is_protein,
        }
    }

    pub fn with_capacity(capacity: usize, is_protein: bool) -> Self {
        Self {
            list: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            is_protein,
        }
    }

    /// True when the input transcriptome held protein sequences
    pub fn is_protein(&self) -> bool {
        self.is_protein
    }

    /// Adds a sequence; a duplicate id is a fatal parse error
    pub fn insert(&mut self, record: QuerySequence) -> Result<SeqIdx, ParseError> {
        if self.index.contains_key(record.id()) {
            return Err(ParseError::new(
                "<transcriptome>",
                0,
                format!("Duplicate headers in your input transcriptome: {}", record.id()),
            ));
        }
        let idx = self.list.len() as SeqIdx;
        self.index.insert(record.id().to_string(), idx);
        self.list.push(record);
        Ok(idx)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&QuerySequence> {
        self.index.get(id).map(|idx| &self.list[*idx as usize])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut QuerySequence> {
        match self.index.get(id) {
            Some(idx) => Some(&mut self.list[*idx as usize]),
            None => None,
        }
    }

    pub fn idx_of(&self, id: &str) -> Option<SeqIdx> {
        self.index.get(id).copied()
    }

    pub fn by_idx(&self, idx: SeqIdx) -> Option<&QuerySequence> {
        self.list.get(idx as usize)
    }

    pub fn by_idx_mut(&mut self, idx: SeqIdx) -> Option<&mut QuerySequence> {
        self.list.get_mut(idx as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<QuerySequence> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<QuerySequence> {
        self.list.iter_mut()
    }

    /// Sequences whose flags contain the full mask
    pub fn filter(&self, mask: QueryFlags) -> Vec<&QuerySequence> {
        self.list
            .iter()
            .filter(|seq| seq.flags().contains(mask))
            .collect()
    }

    /// Number of sequences whose flags contain the full mask
    pub fn count_where(&self, mask: QueryFlags) -> usize {
        self.list
            .iter()
            .filter(|seq| seq.flags().contains(mask))
            .count()
    }

    /// Sets flags on every sequence
    ///
    /// Skipped stages call this so that later statistics see "all
    /// sequences kept".
    pub fn flag_all(&mut self, flags: QueryFlags) {
        for seq in &mut self.list {
            seq.flags_mut().insert(flags);
        }
    }

    /// Computes the transcriptome summary over all sequences
    pub fn summary(&self) -> TranscriptomeSummary {
        let mut lengths: Vec<u64> = Vec::with_capacity(self.list.len());
        let mut total: u64 = 0;
        let mut shortest: (u64, &str) = (u64::MAX, "");
        let mut longest: (u64, &str) = (0, "");
        for seq in &self.list {
            let len = seq.length_bp();
            total += len;
            lengths.push(len);
            if len < shortest.0 {
                shortest = (len, seq.id());
            }
            if len > longest.0 {
                longest = (len, seq.id());
            }
        }
        let count = self.list.len() as u64;
        let (n50, n90) = calculate_n_vals(&mut lengths, total);
        TranscriptomeSummary {
            count,
            total_len: total,
            average_len: if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            },
            n50,
            n90,
            shortest_len: if count == 0 { 0 } else { shortest.0 },
            shortest_id: shortest.1.to_string(),
            longest_len: longest.0,
            longest_id: longest.1.to_string(),
            is_protein: self.is_protein,
        }
    }
}

impl<'a> IntoIterator for &'a QueryStore {
    type Item = &'a QuerySequence;
    type IntoIter = std::slice::Iter<'a, QuerySequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

/// N50 and N90 over a mutable slice of sequence lengths
///
/// The slice is sorted descending in place.
fn calculate_n_vals(lengths: &mut [u64], total_len: u64) -> (u64, u64) {
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    let fifty = total_len as f64 * 0.5;
    let ninety = total_len as f64 * 0.9;
    let mut running: u64 = 0;
    let mut n50: u64 = 0;
    let mut n90: u64 = 0;
    for len in lengths.iter() {
        running += len;
        if running as f64 > fifty && n50 == 0 {
            n50 = *len;
        }
        if running as f64 > ninety && n90 == 0 {
            n90 = *len;
        }
    }
    (n50, n90)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::QuerySequence;

    fn store_with(lengths: &[(&str, usize)]) -> QueryStore {
        let mut store = QueryStore::new(false);
        for (id, len) in lengths {
            store
                .insert(QuerySequence::new(id.to_string(), "A".repeat(*len), false))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let mut store = QueryStore::new(false);
        store
            .insert(QuerySequence::new("q1".to_string(), "ATG".to_string(), false))
            .unwrap();
        let err = store
            .insert(QuerySequence::new("q1".to_string(), "ATG".to_string(), false))
            .unwrap_err();
        assert!(err.reason.contains("q1"));
    }

    #[test]
    fn test_n50_n90() {
        // lengths 100, 80, 60, 40, 20 -> total 300
        // cumulative: 100, 180, 240, 280, 300
        // n50 first > 150 -> 80; n90 first > 270 -> 40
        let store = store_with(&[("a", 100), ("b", 80), ("c", 60), ("d", 40), ("e", 20)]);
        let summary = store.summary();
        assert_eq!(summary.n50, 80);
        assert_eq!(summary.n90, 40);
        assert_eq!(summary.total_len, 300);
        assert_eq!(summary.longest_id, "a");
        assert_eq!(summary.shortest_id, "e");
    }

    #[test]
    fn test_count_where_and_filter() {
        let mut store = store_with(&[("a", 10), ("b", 20), ("c", 30)]);
        store.get_mut("a").unwrap().flags_mut().insert(QueryFlags::SIM_HIT);
        store.get_mut("b").unwrap().flags_mut().insert(QueryFlags::SIM_HIT);
        assert_eq!(store.count_where(QueryFlags::SIM_HIT), 2);
        assert_eq!(store.filter(QueryFlags::SIM_HIT).len(), 2);
        store.flag_all(QueryFlags::EXPRESSION_KEPT);
        assert_eq!(store.count_where(QueryFlags::EXPRESSION_KEPT), 3);
    }

    #[test]
    fn test_empty_store_summary() {
        let store = QueryStore::new(false);
        let summary = store.summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.n50, 0);
    }
}
