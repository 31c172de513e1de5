use crate::align::header::HeaderId;
use crate::align::sim::{SelectionStrategy, SimSearchHit};

/// Which side of the horizontal-gene-transfer search a database is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HgtDatabaseKind {
    Donor,
    Recipient,
}

/// One alignment against a donor or recipient database
///
/// Wraps a similarity-search row; the ordering is the per-database
/// similarity ordering since HGT hits never compete across databases.
#[derive(Debug, Clone)]
pub struct HgtHit {
    pub hit: SimSearchHit,
    pub kind: HgtDatabaseKind,
}

impl HgtHit {
    pub fn is_better_than(&self, other: &HgtHit) -> bool {
        self.hit
            .is_better_than(&other.hit, SelectionStrategy::WithinDatabase)
    }

    pub fn value(&self, header: HeaderId) -> Option<String> {
        match header {
            HeaderId::Query => Some(self.hit.qseqid.clone()),
            // the Yes/No answer is owned by the sequence flags
            _ => None,
        }
    }
}
