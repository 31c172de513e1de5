use std::collections::HashMap;
use std::hash::Hash;

/// An insertion-counting container with an ordered view
///
/// Parsers count species, taxonomic scopes and GO terms while they
/// stream tool output; the statistics blocks then ask for the most
/// frequent entries. The sorted view is built once on demand.
///
/// # Examples
///
/// ```rust
/// use transannot::models::Tally;
///
/// let mut tally = Tally::new();
/// tally.add("Homo sapiens");
/// tally.add("Homo sapiens");
/// tally.add("Mus musculus");
///
/// let sorted = tally.sorted_desc();
/// assert_eq!(sorted[0], (&"Homo sapiens", 2));
/// assert_eq!(sorted[1], (&"Mus musculus", 1));
/// ```
pub struct Tally<T: Eq + Hash> {
    counts: HashMap<T, u64>,
}

impl<T: Eq + Hash + Ord> Tally<T> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Counts one occurrence of `value`
    pub fn add(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns the count for a single value (0 when never added)
    pub fn count(&self, value: &T) -> u64 {
        *self.counts.get(value).unwrap_or(&0)
    }

    /// Returns all entries, most frequent first
    ///
    /// Ties are broken by the value's own ordering so that the output
    /// is deterministic.
    pub fn sorted_desc(&self) -> Vec<(&T, u64)> {
        let mut entries: Vec<(&T, u64)> = self.counts.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Returns the most frequent entry, if any
    pub fn most_frequent(&self) -> Option<(&T, u64)> {
        self.sorted_desc().into_iter().next()
    }
}

impl<T: Eq + Hash + Ord> Default for Tally<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_ties() {
        let mut tally = Tally::new();
        tally.add("b");
        tally.add("a");
        let sorted = tally.sorted_desc();
        assert_eq!(sorted[0].0, &"a");
        assert_eq!(sorted[1].0, &"b");
    }

    #[test]
    fn test_most_frequent() {
        let mut tally: Tally<String> = Tally::new();
        assert!(tally.most_frequent().is_none());
        tally.add("PFAM".to_string());
        tally.add("PFAM".to_string());
        tally.add("SMART".to_string());
        let (value, count) = tally.most_frequent().unwrap();
        assert_eq!(value, "PFAM");
        assert_eq!(count, 2);
    }
}
