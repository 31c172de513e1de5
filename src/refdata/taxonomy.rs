use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::utils::errors::{DatabaseError, DatabaseKind};

/// One entry of the NCBI taxonomy
///
/// The lineage is a `;`-separated path from root to leaf, e.g.
/// `cellular organisms;Eukaryota;Metazoa;...;Homo sapiens`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct TaxEntry {
    pub tax_id: String,
    pub scientific_name: String,
    pub lineage: String,
}

impl TaxEntry {
    pub fn is_empty(&self) -> bool {
        self.lineage.is_empty()
    }
}

/// Species → lineage lookup over the compiled taxonomy map
///
/// Keys are lowercased scientific names. Lookups progressively drop
/// trailing words, so `homo sapiens neanderthalensis extra` still
/// resolves through `homo sapiens`.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use transannot::refdata::{TaxEntry, Taxonomy};
///
/// let mut map = HashMap::new();
/// map.insert(
///     "homo sapiens".to_string(),
///     TaxEntry {
///         tax_id: "9606".to_string(),
///         scientific_name: "Homo sapiens".to_string(),
///         lineage: "cellular organisms;Eukaryota;Metazoa;Homo sapiens".to_string(),
///     },
/// );
/// let tax = Taxonomy::new(map);
///
/// assert!(tax.entry("Homo sapiens subsp. Denisova").is_some());
/// assert!(tax.entry("Mus musculus").is_none());
/// ```
pub struct Taxonomy {
    entries: HashMap<String, TaxEntry>,
}

impl Taxonomy {
    pub fn new(entries: HashMap<String, TaxEntry>) -> Self {
        Self { entries }
    }

    /// Reads the compiled taxonomy map from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            DatabaseError::new(
                DatabaseKind::Taxonomy,
                format!(
                    "unable to open taxonomy database at {}: {}",
                    path.as_ref().display(),
                    e
                ),
            )
        })?;
        let entries: HashMap<String, TaxEntry> = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| {
                DatabaseError::new(
                    DatabaseKind::Taxonomy,
                    format!("corrupt taxonomy database: {}", e),
                )
            })?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a species string to its taxonomy entry
    ///
    /// The input is lowercased; on a miss, trailing words are dropped
    /// one at a time until a match is found or nothing is left.
    pub fn entry(&self, species: &str) -> Option<&TaxEntry> {
        let mut key = species.trim().to_lowercase();
        loop {
            if let Some(entry) = self.entries.get(&key) {
                return Some(entry);
            }
            match key.rfind(' ') {
                Some(pos) => key.truncate(pos),
                None => return None,
            }
        }
    }

    /// Resolves a species and falls back to an empty entry on a miss
    pub fn entry_or_default(&self, species: &str) -> TaxEntry {
        self.entry(species).cloned().unwrap_or_default()
    }
}

/// True when any of the tags occurs in the lowercased lineage
///
/// Returns the first matching tag so callers can record the
/// contamination type.
pub fn contaminant_match<'t>(lineage: &str, tags: &'t [String]) -> Option<&'t String> {
    if tags.is_empty() || lineage.is_empty() {
        return None;
    }
    let lineage = lineage.to_lowercase();
    tags.iter().find(|tag| lineage.contains(tag.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_taxonomy() -> Taxonomy {
        let mut map = HashMap::new();
        map.insert(
            "homo sapiens".to_string(),
            TaxEntry {
                tax_id: "9606".to_string(),
                scientific_name: "Homo sapiens".to_string(),
                lineage: "cellular organisms;Eukaryota;Metazoa;Chordata;Homo sapiens".to_string(),
            },
        );
        map.insert(
            "escherichia coli".to_string(),
            TaxEntry {
                tax_id: "562".to_string(),
                scientific_name: "Escherichia coli".to_string(),
                lineage: "cellular organisms;Bacteria;Proteobacteria;Escherichia coli".to_string(),
            },
        );
        Taxonomy::new(map)
    }

    #[test]
    fn test_exact_lookup() {
        let tax = test_taxonomy();
        let entry = tax.entry("Homo sapiens").unwrap();
        assert_eq!(entry.tax_id, "9606");
    }

    #[test]
    fn test_trailing_word_fallback() {
        let tax = test_taxonomy();
        let entry = tax.entry("Escherichia coli K-12 MG1655").unwrap();
        assert_eq!(entry.tax_id, "562");
    }

    #[test]
    fn test_miss() {
        let tax = test_taxonomy();
        assert!(tax.entry("Arabidopsis thaliana").is_none());
        assert!(tax.entry_or_default("Arabidopsis thaliana").is_empty());
    }

    #[test]
    fn test_contaminant_match() {
        let tags = vec!["bacteria".to_string(), "fungi".to_string()];
        let lineage = "cellular organisms;Bacteria;Proteobacteria";
        assert_eq!(contaminant_match(lineage, &tags).unwrap(), "bacteria");
        assert!(contaminant_match("cellular organisms;Eukaryota", &tags).is_none());
        assert!(contaminant_match(lineage, &[]).is_none());
    }
}
