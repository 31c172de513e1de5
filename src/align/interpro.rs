use crate::align::header::HeaderId;
use crate::refdata::go_graph::{format_go_set, GoCategory, GoSet};

/// One InterProScan protein-domain match
#[derive(Debug, Clone, Default)]
pub struct InterproHit {
    pub qseqid: String,
    pub database_path: String,
    pub e_value: String,
    pub e_value_raw: f64,
    pub interpro_desc_id: String,
    pub database_desc_id: String,
    pub database_type: String,
    pub pathways: String,
    pub parsed_go: GoSet,
}

impl InterproHit {
    pub fn is_better_than(&self, other: &InterproHit) -> bool {
        self.e_value_raw < other.e_value_raw
    }

    pub fn value(&self, header: HeaderId, go_level: u16) -> Option<String> {
        match header {
            HeaderId::Query => Some(self.qseqid.clone()),
            HeaderId::InterEvalue => Some(self.e_value.clone()),
            HeaderId::InterInterproId => Some(self.interpro_desc_id.clone()),
            HeaderId::InterDatabaseTerm => Some(self.database_desc_id.clone()),
            HeaderId::InterDatabaseType => Some(self.database_type.clone()),
            HeaderId::InterPathways => Some(self.pathways.clone()),
            HeaderId::InterGoBiological => Some(self.go_by_category(GoCategory::Biological, go_level)),
            HeaderId::InterGoCellular => Some(self.go_by_category(GoCategory::Cellular, go_level)),
            HeaderId::InterGoMolecular => Some(self.go_by_category(GoCategory::Molecular, go_level)),
            _ => None,
        }
    }

    fn go_by_category(&self, category: GoCategory, level: u16) -> String {
        let filtered = self
            .parsed_go
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect();
        format_go_set(&filtered, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let a = InterproHit {
            e_value_raw: 1e-30,
            ..Default::default()
        };
        let b = InterproHit {
            e_value_raw: 1e-3,
            ..Default::default()
        };
        assert!(a.is_better_than(&b));
    }
}
