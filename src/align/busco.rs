use crate::align::header::HeaderId;

/// One BUSCO completeness assessment for a sequence
#[derive(Debug, Clone, Default)]
pub struct BuscoHit {
    pub qseqid: String,
    pub database_path: String,
    pub busco_id: String,
    pub status: String,
    pub score: f64,
    pub score_str: String,
    pub length: String,
}

impl BuscoHit {
    // BUSCO rarely reports more than one hit per sequence; keep the
    // best score in case it does
    pub fn is_better_than(&self, other: &BuscoHit) -> bool {
        self.score > other.score
    }

    pub fn value(&self, header: HeaderId) -> Option<String> {
        match header {
            HeaderId::Query => Some(self.qseqid.clone()),
            HeaderId::BuscoId => Some(self.busco_id.clone()),
            HeaderId::BuscoStatus => Some(self.status.clone()),
            HeaderId::BuscoScore => Some(self.score_str.clone()),
            HeaderId::BuscoLength => Some(self.length.clone()),
            _ => None,
        }
    }
}
