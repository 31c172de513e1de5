use std::collections::HashMap;

use crate::align::sim::yes_no;
use crate::align::{Alignment, AlignmentKey, HeaderId, SelectionStrategy, Tool};
use crate::models::flags::QueryFlags;
use crate::models::frame::Frame;
use crate::pipeline::state::Stage;
use crate::refdata::go_graph::GoSet;

/// Index of a sequence inside the [`QueryStore`](crate::models::QueryStore) arena
///
/// Upstream/downstream neighbour references are stored as indices
/// instead of pointers so that sequences can link to each other
/// without cyclic ownership.
pub type SeqIdx = u32;

/// One input sequence and everything the pipeline learned about it
///
/// Alignments accumulate per `(stage, tool, database)` bucket while a
/// stage parses tool output; each bucket is sorted best-first exactly
/// once at the end of parsing, and the overall best per stage and
/// tool is recorded alongside.
///
/// # Examples
///
/// ```rust
/// use transannot::models::{QueryFlags, QuerySequence};
///
/// let mut seq = QuerySequence::new("q1".to_string(), "ATGACGTAA".to_string(), false);
/// assert_eq!(seq.length_bp(), 9);
/// assert!(!seq.is_annotated());
///
/// seq.flags_mut().insert(QueryFlags::EXPRESSION_KEPT | QueryFlags::FRAME_KEPT);
/// assert!(seq.is_kept());
/// ```
#[derive(Debug)]
pub struct QuerySequence {
    id: String,
    sequence_n: String,
    sequence_p: String,
    length_bp: u64,
    frame: Frame,
    flags: QueryFlags,
    fpkm: f64,
    tpm: f64,
    effective_length: f64,
    alignments: HashMap<AlignmentKey, Vec<Alignment>>,
    best: HashMap<(Stage, Tool), Alignment>,
    upstream: Option<SeqIdx>,
    downstream: Option<SeqIdx>,
    donor_hits: u16,
    recipient_hits: u16,
}

impl QuerySequence {
    pub fn new(id: String, sequence: String, is_protein: bool) -> Self {
        let residues = sequence.chars().filter(|c| !c.is_whitespace()).count() as u64;
        // protein records are reported in base pairs
        let length_bp = if is_protein { residues * 3 } else { residues };
        let mut flags = QueryFlags::empty();
        if is_protein {
            flags.insert(QueryFlags::IS_PROTEIN);
        }
        let (sequence_n, sequence_p) = if is_protein {
            (String::new(), sequence)
        } else {
            (sequence, String::new())
        };
        QuerySequence {
            id,
            sequence_n,
            sequence_p,
            length_bp,
            frame: Frame::Unset,
            flags,
            fpkm: 0.0,
            tpm: 0.0,
            effective_length: 0.0,
            alignments: HashMap::new(),
            best: HashMap::new(),
            upstream: None,
            downstream: None,
            donor_hits: 0,
            recipient_hits: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn length_bp(&self) -> u64 {
        self.length_bp
    }

    pub fn nucleotide(&self) -> &str {
        &self.sequence_n
    }

    pub fn protein(&self) -> &str {
        &self.sequence_p
    }

    /// Stores the protein sequence selected by frame selection
    pub fn set_protein(&mut self, sequence: String) {
        self.sequence_p = sequence;
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }

    pub fn flags(&self) -> QueryFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut QueryFlags {
        &mut self.flags
    }

    pub fn fpkm(&self) -> f64 {
        self.fpkm
    }

    pub fn tpm(&self) -> f64 {
        self.tpm
    }

    pub fn effective_length(&self) -> f64 {
        self.effective_length
    }

    /// Records the expression-stage numbers for this sequence
    pub fn set_expression(&mut self, fpkm: f64, tpm: f64, effective_length: f64) {
        self.fpkm = fpkm;
        self.tpm = tpm;
        self.effective_length = effective_length;
    }

    pub fn upstream(&self) -> Option<SeqIdx> {
        self.upstream
    }

    pub fn downstream(&self) -> Option<SeqIdx> {
        self.downstream
    }

    pub fn set_upstream(&mut self, idx: SeqIdx) {
        self.upstream = Some(idx);
    }

    pub fn set_downstream(&mut self, idx: SeqIdx) {
        self.downstream = Some(idx);
    }

    pub fn donor_hits(&self) -> u16 {
        self.donor_hits
    }

    pub fn recipient_hits(&self) -> u16 {
        self.recipient_hits
    }

    pub fn set_hgt_hit_counts(&mut self, donor: u16, recipient: u16) {
        self.donor_hits = donor;
        self.recipient_hits = recipient;
    }

    /// True when the sequence survived expression filtering and frame
    /// selection (skipped stages keep everything)
    pub fn is_kept(&self) -> bool {
        self.flags
            .contains(QueryFlags::EXPRESSION_KEPT | QueryFlags::FRAME_KEPT)
    }

    /// True when any stage attached an annotation
    pub fn is_annotated(&self) -> bool {
        self.flags
            .intersects(QueryFlags::SIM_HIT | QueryFlags::FAMILY_ASSIGNED)
    }

    pub fn is_contaminant(&self) -> bool {
        self.flags.contains(QueryFlags::CONTAMINANT)
    }

    /// Updates one side of the contamination verdict and recomputes
    /// the composite bit
    pub fn set_contam(&mut self, side: QueryFlags, value: bool) {
        debug_assert!(side == QueryFlags::SIM_CONTAM || side == QueryFlags::FAMILY_CONTAM);
        self.flags.set(side, value);
        let composite = self
            .flags
            .intersects(QueryFlags::SIM_CONTAM | QueryFlags::FAMILY_CONTAM);
        self.flags.set(QueryFlags::CONTAMINANT, composite);
    }

    /// Appends an alignment to its bucket; the bucket stays unsorted
    /// until [`QuerySequence::sort_bucket`] runs
    pub fn add_alignment(&mut self, key: AlignmentKey, alignment: Alignment) {
        debug_assert_eq!(alignment.query_id(), self.id);
        self.alignments.entry(key).or_insert_with(Vec::new).push(alignment);
    }

    /// Sorts one bucket best-first; called once at end of parse
    pub fn sort_bucket(&mut self, key: &AlignmentKey) {
        if let Some(bucket) = self.alignments.get_mut(key) {
            crate::align::sort_best_first(bucket, SelectionStrategy::WithinDatabase);
        }
    }

    /// Best alignment of one bucket (index 0 after sorting)
    pub fn best_hit(&self, key: &AlignmentKey) -> Option<&Alignment> {
        self.alignments.get(key).and_then(|bucket| bucket.first())
    }

    /// True when this sequence has at least one alignment against the
    /// given database
    pub fn hit_database(&self, key: &AlignmentKey) -> bool {
        self.alignments
            .get(key)
            .map(|bucket| !bucket.is_empty())
            .unwrap_or(false)
    }

    /// All bucket keys of one stage and tool
    pub fn bucket_keys(&self, stage: Stage, tool: Tool) -> Vec<AlignmentKey> {
        self.alignments
            .keys()
            .filter(|k| k.stage == stage && k.tool == tool)
            .cloned()
            .collect()
    }

    /// Recomputes the overall best alignment across the stage's
    /// databases using the cross-database strategy
    pub fn select_overall(&mut self, stage: Stage, tool: Tool) {
        let mut winner: Option<&Alignment> = None;
        for (key, bucket) in &self.alignments {
            if key.stage != stage || key.tool != tool {
                continue;
            }
            if let Some(best) = bucket.first() {
                winner = match winner {
                    None => Some(best),
                    Some(current) => {
                        if best.is_better_than(current, SelectionStrategy::Overall) {
                            Some(best)
                        } else {
                            Some(current)
                        }
                    }
                };
            }
        }
        if let Some(alignment) = winner.cloned() {
            self.best.insert((stage, tool), alignment);
        }
    }

    /// Overall best alignment of a stage and tool, if any
    pub fn overall_best(&self, stage: Stage, tool: Tool) -> Option<&Alignment> {
        self.best.get(&(stage, tool))
    }

    /// Replaces the stored overall best (used when enrichment rewrote
    /// the record)
    pub fn set_overall_best(&mut self, stage: Stage, tool: Tool, alignment: Alignment) {
        self.best.insert((stage, tool), alignment);
    }

    /// Value of one output column, answered by the sequence itself or
    /// by the overall best alignment of the column's stage
    pub fn header_value(&self, header: HeaderId, go_level: u16) -> Option<String> {
        match header {
            HeaderId::Query => return Some(self.id.clone()),
            HeaderId::Frame => {
                return match self.frame {
                    Frame::Unset => None,
                    frame => Some(frame.to_string()),
                }
            }
            HeaderId::ExpFpkm => return Some(format!("{:.2}", self.fpkm)),
            HeaderId::ExpTpm => return Some(format!("{:.2}", self.tpm)),
            HeaderId::ExpEffectiveLength => return Some(format!("{:.2}", self.effective_length)),
            HeaderId::HgtGene => {
                return Some(yes_no(self.flags.contains(QueryFlags::HGT_CONFIRMED)))
            }
            _ => {}
        }
        let stage = header.stage()?;
        self.best
            .iter()
            .filter(|((s, _), _)| *s == stage)
            .find_map(|(_, alignment)| alignment.value(header, go_level))
    }

    /// Union of the GO terms of the best family and UniProt hits
    pub fn go_terms(&self) -> GoSet {
        let mut out = GoSet::new();
        for ((_, tool), alignment) in &self.best {
            match (tool, alignment) {
                (Tool::EggnogMapper, Alignment::Eggnog(hit))
                | (Tool::EggnogDmnd, Alignment::Eggnog(hit)) => {
                    out.extend(hit.parsed_go.iter().cloned());
                }
                (Tool::InterProScan, Alignment::Interpro(hit)) => {
                    out.extend(hit.parsed_go.iter().cloned());
                }
                (Tool::Diamond, Alignment::SimSearch(hit)) => {
                    if let Some(uniprot) = &hit.uniprot {
                        out.extend(uniprot.go_terms.iter().cloned());
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// True when any attached GO term passes the level filter
    pub fn contains_go_level(&self, level: u16) -> bool {
        self.go_terms().iter().any(|entry| entry.at_level(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::SimSearchHit;

    fn sim_alignment(id: &str, db: &str, e_value: f64, coverage: f64) -> Alignment {
        Alignment::SimSearch(SimSearchHit {
            qseqid: id.to_string(),
            database_path: db.to_string(),
            e_value_raw: e_value,
            coverage_raw: coverage,
            e_value: format!("{:e}", e_value),
            ..Default::default()
        })
    }

    #[test]
    fn test_protein_length_in_bp() {
        let seq = QuerySequence::new("p1".to_string(), "MKT".to_string(), true);
        assert_eq!(seq.length_bp(), 9);
        assert!(seq.flags().contains(QueryFlags::IS_PROTEIN));
    }

    #[test]
    fn test_composite_contaminant_flag() {
        let mut seq = QuerySequence::new("q1".to_string(), "ATG".to_string(), false);
        seq.set_contam(QueryFlags::SIM_CONTAM, true);
        assert!(seq.is_contaminant());
        seq.set_contam(QueryFlags::FAMILY_CONTAM, true);
        seq.set_contam(QueryFlags::SIM_CONTAM, false);
        // family verdict still holds the composite up
        assert!(seq.is_contaminant());
        seq.set_contam(QueryFlags::FAMILY_CONTAM, false);
        assert!(!seq.is_contaminant());
    }

    #[test]
    fn test_best_hit_after_sorting() {
        let mut seq = QuerySequence::new("q1".to_string(), "ATG".to_string(), false);
        let key = AlignmentKey::new(Stage::SimilaritySearch, Tool::Diamond, "db1");
        seq.add_alignment(key.clone(), sim_alignment("q1", "db1", 1e-5, 80.0));
        seq.add_alignment(key.clone(), sim_alignment("q1", "db1", 1e-50, 80.0));
        seq.sort_bucket(&key);
        match seq.best_hit(&key).unwrap() {
            Alignment::SimSearch(hit) => assert_eq!(hit.e_value_raw, 1e-50),
            _ => panic!("expected a similarity hit"),
        }
    }

    #[test]
    fn test_overall_selection_prefers_coverage() {
        let mut seq = QuerySequence::new("q1".to_string(), "ATG".to_string(), false);
        let key1 = AlignmentKey::new(Stage::SimilaritySearch, Tool::Diamond, "db1");
        let key2 = AlignmentKey::new(Stage::SimilaritySearch, Tool::Diamond, "db2");
        seq.add_alignment(key1.clone(), sim_alignment("q1", "db1", 1e-5, 80.0));
        seq.add_alignment(key2.clone(), sim_alignment("q1", "db2", 1e-30, 70.0));
        seq.sort_bucket(&key1);
        seq.sort_bucket(&key2);
        seq.select_overall(Stage::SimilaritySearch, Tool::Diamond);
        match seq.overall_best(Stage::SimilaritySearch, Tool::Diamond).unwrap() {
            Alignment::SimSearch(hit) => assert_eq!(hit.database_path, "db1"),
            _ => panic!("expected a similarity hit"),
        }
    }

    #[test]
    fn test_header_value_falls_back_to_best_hit() {
        let mut seq = QuerySequence::new("q1".to_string(), "ATG".to_string(), false);
        assert!(seq.header_value(HeaderId::SimEvalue, 0).is_none());
        let key = AlignmentKey::new(Stage::SimilaritySearch, Tool::Diamond, "db1");
        seq.add_alignment(key.clone(), sim_alignment("q1", "db1", 1e-5, 80.0));
        seq.sort_bucket(&key);
        seq.select_overall(Stage::SimilaritySearch, Tool::Diamond);
        assert!(seq.header_value(HeaderId::SimEvalue, 0).is_some());
        assert_eq!(seq.header_value(HeaderId::Query, 0).unwrap(), "q1");
    }
}
