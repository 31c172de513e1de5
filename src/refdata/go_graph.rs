use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::utils::errors::{DatabaseError, DatabaseKind};

/// Gene Ontology category of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum GoCategory {
    Biological,
    Cellular,
    Molecular,
}

impl GoCategory {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "biological_process" => Some(GoCategory::Biological),
            "cellular_component" => Some(GoCategory::Cellular),
            "molecular_function" => Some(GoCategory::Molecular),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoCategory::Biological => "biological_process",
            GoCategory::Cellular => "cellular_component",
            GoCategory::Molecular => "molecular_function",
        }
    }
}

impl fmt::Display for GoCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One resolved Gene Ontology term
///
/// Immutable after the graph is loaded. The level is the term's depth
/// in the ontology graph; [`GoEntry::UNKNOWN_LEVEL`] marks terms whose
/// depth was absent from the reference data.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GoEntry {
    pub go_id: String,
    pub term: String,
    pub category: GoCategory,
    pub level: i16,
}

impl GoEntry {
    pub const UNKNOWN_LEVEL: i16 = -1;

    /// True when this entry should be rendered at the requested level
    ///
    /// Level 0 means "all levels"; unknown-depth terms are always kept.
    pub fn at_level(&self, level: u16) -> bool {
        level == 0 || self.level == Self::UNKNOWN_LEVEL || self.level >= level as i16
    }
}

impl PartialOrd for GoEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GoEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.go_id.cmp(&other.go_id)
    }
}

/// Ordered set of GO entries attached to an alignment
pub type GoSet = BTreeSet<GoEntry>;

/// Renders a GO set for delimited output, filtered by level
///
/// Entries are joined with `,` in id order, each as
/// `GO:0005737-cytoplasm(L=5)`.
pub fn format_go_set(entries: &GoSet, level: u16) -> String {
    let mut out = String::new();
    for entry in entries {
        if !entry.at_level(level) {
            continue;
        }
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(&entry.go_id);
        if !entry.term.is_empty() {
            out.push('-');
            out.push_str(&entry.term);
        }
        if entry.level != GoEntry::UNKNOWN_LEVEL {
            out.push_str(&format!("(L={})", entry.level));
        }
    }
    out
}

/// The id → term mapping of the Gene Ontology graph
///
/// Loaded once from a compiled `bincode` map (produced at configuration
/// time from the go-basic release), then read-only.
pub struct GoGraph {
    terms: HashMap<String, GoEntry>,
}

impl GoGraph {
    pub fn new(terms: HashMap<String, GoEntry>) -> Self {
        Self { terms }
    }

    /// Reads the compiled GO map from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            DatabaseError::new(
                DatabaseKind::GeneOntology,
                format!(
                    "unable to open GO database at {}: {}",
                    path.as_ref().display(),
                    e
                ),
            )
        })?;
        let terms: HashMap<String, GoEntry> = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| {
                DatabaseError::new(
                    DatabaseKind::GeneOntology,
                    format!("corrupt GO database: {}", e),
                )
            })?;
        Ok(Self { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Resolves a single GO id
    pub fn entry(&self, go_id: &str) -> Option<&GoEntry> {
        self.terms.get(go_id)
    }

    /// Tokenises a delimited GO id list and resolves every id
    ///
    /// Ids missing from the graph are kept with an empty term and
    /// unknown level so that downstream output still lists them.
    pub fn format_go_delim(&self, list: &str, delim: char) -> GoSet {
        let mut out = GoSet::new();
        for token in list.split(delim) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match self.entry(token) {
                Some(entry) => {
                    out.insert(entry.clone());
                }
                None => {
                    out.insert(GoEntry {
                        go_id: token.to_string(),
                        term: String::new(),
                        category: GoCategory::Biological,
                        level: GoEntry::UNKNOWN_LEVEL,
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_graph() -> GoGraph {
        let mut terms = HashMap::new();
        for (id, term, cat, level) in [
            ("GO:0000001", "mitochondrion inheritance", GoCategory::Biological, 5),
            ("GO:0005737", "cytoplasm", GoCategory::Cellular, 5),
            ("GO:0003674", "molecular_function", GoCategory::Molecular, 1),
        ] {
            terms.insert(
                id.to_string(),
                GoEntry {
                    go_id: id.to_string(),
                    term: term.to_string(),
                    category: cat,
                    level,
                },
            );
        }
        GoGraph::new(terms)
    }

    #[test]
    fn test_entry_lookup() {
        let graph = test_graph();
        assert_eq!(graph.entry("GO:0005737").unwrap().term, "cytoplasm");
        assert!(graph.entry("GO:9999999").is_none());
    }

    #[test]
    fn test_format_go_delim_keeps_unknown_ids() {
        let graph = test_graph();
        let set = graph.format_go_delim("GO:0005737,GO:9999999,", ',');
        assert_eq!(set.len(), 2);
        let unknown = set.iter().find(|e| e.go_id == "GO:9999999").unwrap();
        assert_eq!(unknown.level, GoEntry::UNKNOWN_LEVEL);
    }

    #[test]
    fn test_level_filtering() {
        let graph = test_graph();
        let set = graph.format_go_delim("GO:0000001,GO:0003674", ',');
        // level 0 renders everything
        let all = format_go_set(&set, 0);
        assert!(all.contains("GO:0000001"));
        assert!(all.contains("GO:0003674"));
        // level 2 drops the level-1 term
        let filtered = format_go_set(&set, 2);
        assert!(filtered.contains("GO:0000001"));
        assert!(!filtered.contains("GO:0003674"));
    }

    #[test]
    fn test_rendering_format() {
        let graph = test_graph();
        let set = graph.format_go_delim("GO:0005737", ',');
        assert_eq!(format_go_set(&set, 0), "GO:0005737-cytoplasm(L=5)");
    }
}
