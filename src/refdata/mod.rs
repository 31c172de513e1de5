//! Reference data lookups (taxonomy, Gene Ontology, UniProt)

pub mod go_graph;
pub mod taxonomy;
pub mod uniprot;
