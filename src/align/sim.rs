use crate::align::header::HeaderId;
use crate::refdata::go_graph::{format_go_set, GoCategory};
use crate::refdata::uniprot::UniprotPayload;
use crate::utils::normalize_lineage;

/// Absolute log10 e-value difference below which two hits are
/// considered comparable and secondary criteria apply
const E_VAL_DIF: f64 = 8.0;
/// Coverage difference above which coverage alone decides
const COV_DIF: f64 = 5.0;
/// Tax-score bonus for informative hits without lineage overlap
const INFORM_ADD: f64 = 3.0;
/// Tax-score factor for informative hits with lineage overlap
const INFORM_FACTOR: f64 = 1.2;
/// Substitute for a zero e-value before taking the log
const E_VAL_FLOOR: f64 = 1e-300;

/// How two alignments are compared during best-hit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Hits from the same database: log-e-value window, then coverage,
    /// contaminant status, tax score, raw e-value
    WithinDatabase,
    /// Best hits from different databases: coverage window first,
    /// then contaminant status and tax score
    Overall,
}

/// One similarity-search alignment row, enriched with taxonomy
#[derive(Debug, Clone, Default)]
pub struct SimSearchHit {
    pub qseqid: String,
    pub sseqid: String,
    pub pident: String,
    pub length: String,
    pub mismatch: String,
    pub gapopen: String,
    pub qstart: String,
    pub qend: String,
    pub sstart: String,
    pub send: String,
    pub stitle: String,
    pub bit_score: String,
    pub e_value: String,
    pub e_value_raw: f64,
    pub coverage: String,
    pub coverage_raw: f64,
    pub database_path: String,
    pub species: String,
    pub lineage: String,
    pub contaminant: bool,
    pub contam_type: String,
    pub is_informative: bool,
    pub tax_score: f64,
    pub uniprot: Option<UniprotPayload>,
}

impl SimSearchHit {
    /// Computes and stores the taxonomic affinity score
    ///
    /// Walks the hit's lineage front to back, counting prefixes that
    /// occur in the target lineage, then applies the informativeness
    /// bonus.
    pub fn set_tax_score(&mut self, target_lineage: &str) {
        self.tax_score = tax_score(&self.lineage, target_lineage, self.is_informative);
    }

    /// True when this hit beats `other` under the given strategy
    pub fn is_better_than(&self, other: &SimSearchHit, strategy: SelectionStrategy) -> bool {
        let eval1 = self.e_value_raw.max(E_VAL_FLOOR);
        let eval2 = other.e_value_raw.max(E_VAL_FLOOR);
        let cov1 = self.coverage_raw;
        let cov2 = other.coverage_raw;
        let coverage_dif = (cov1 - cov2).abs();

        match strategy {
            SelectionStrategy::WithinDatabase => {
                if (eval1.log10() - eval2.log10()).abs() < E_VAL_DIF {
                    if coverage_dif > COV_DIF {
                        return cov1 > cov2;
                    }
                    if self.contaminant && !other.contaminant {
                        return false;
                    }
                    if !self.contaminant && other.contaminant {
                        return true;
                    }
                    if self.tax_score == other.tax_score {
                        return eval1 < eval2;
                    }
                    self.tax_score > other.tax_score
                } else {
                    eval1 < eval2
                }
            }
            SelectionStrategy::Overall => {
                if coverage_dif > COV_DIF {
                    return cov1 > cov2;
                }
                if self.contaminant && !other.contaminant {
                    return false;
                }
                if !self.contaminant && other.contaminant {
                    return true;
                }
                if self.tax_score == other.tax_score {
                    cov1 > cov2
                } else {
                    self.tax_score > other.tax_score
                }
            }
        }
    }

    /// Value of one output column, `None` when the column does not
    /// belong to a similarity-search hit
    pub fn value(&self, header: HeaderId, go_level: u16) -> Option<String> {
        match header {
            HeaderId::Query => Some(self.qseqid.clone()),
            HeaderId::SimSubject => Some(self.sseqid.clone()),
            HeaderId::SimPercentIdentity => Some(self.pident.clone()),
            HeaderId::SimAlignLength => Some(self.length.clone()),
            HeaderId::SimMismatch => Some(self.mismatch.clone()),
            HeaderId::SimGapOpen => Some(self.gapopen.clone()),
            HeaderId::SimQueryStart => Some(self.qstart.clone()),
            HeaderId::SimQueryEnd => Some(self.qend.clone()),
            HeaderId::SimSubjStart => Some(self.sstart.clone()),
            HeaderId::SimSubjEnd => Some(self.send.clone()),
            HeaderId::SimEvalue => Some(self.e_value.clone()),
            HeaderId::SimBitScore => Some(self.bit_score.clone()),
            HeaderId::SimCoverage => Some(self.coverage.clone()),
            HeaderId::SimTitle => Some(self.stitle.clone()),
            HeaderId::SimSpecies => Some(self.species.clone()),
            HeaderId::SimTaxLineage => Some(self.lineage.clone()),
            HeaderId::SimDatabase => Some(self.database_path.clone()),
            HeaderId::SimContaminant => Some(yes_no(self.contaminant)),
            HeaderId::SimInformative => Some(yes_no(self.is_informative)),
            HeaderId::UniDataXref => self.uniprot.as_ref().map(|u| u.database_x_refs.clone()),
            HeaderId::UniComments => self.uniprot.as_ref().map(|u| u.comments.clone()),
            HeaderId::UniKegg => self.uniprot.as_ref().map(|u| u.kegg.clone()),
            HeaderId::UniGoBiological => self.uniprot_go(GoCategory::Biological, go_level),
            HeaderId::UniGoCellular => self.uniprot_go(GoCategory::Cellular, go_level),
            HeaderId::UniGoMolecular => self.uniprot_go(GoCategory::Molecular, go_level),
            _ => None,
        }
    }

    fn uniprot_go(&self, category: GoCategory, level: u16) -> Option<String> {
        let payload = self.uniprot.as_ref()?;
        let filtered = payload
            .go_terms
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect();
        Some(format_go_set(&filtered, level))
    }
}

pub fn yes_no(val: bool) -> String {
    if val {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

/// Taxonomic affinity of a lineage towards the target lineage
///
/// Both inputs are compared lowercased and whitespace-stripped. Each
/// `;`-separated token of `lineage` that occurs in `target` counts as
/// one point; informative hits get the configured bonus or factor.
pub fn tax_score(lineage: &str, target: &str, is_informative: bool) -> f64 {
    let target = normalize_lineage(target);
    let mut score = 0.0;
    for token in normalize_lineage(lineage).split(';') {
        if token.is_empty() {
            continue;
        }
        if target.contains(token) {
            score += 1.0;
        }
    }
    if score == 0.0 {
        if is_informative {
            score += INFORM_ADD;
        }
    } else if is_informative {
        score *= INFORM_FACTOR;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(e_value: f64, coverage: f64, contaminant: bool, tax_score: f64) -> SimSearchHit {
        SimSearchHit {
            e_value_raw: e_value,
            coverage_raw: coverage,
            contaminant,
            tax_score,
            ..Default::default()
        }
    }

    #[test]
    fn test_large_evalue_gap_decides_within_database() {
        let good = hit(1e-50, 10.0, true, 0.0);
        let bad = hit(1e-5, 90.0, false, 9.0);
        assert!(good.is_better_than(&bad, SelectionStrategy::WithinDatabase));
        assert!(!bad.is_better_than(&good, SelectionStrategy::WithinDatabase));
    }

    #[test]
    fn test_coverage_decides_within_evalue_window() {
        let a = hit(1e-10, 90.0, false, 0.0);
        let b = hit(1e-12, 70.0, false, 0.0);
        assert!(a.is_better_than(&b, SelectionStrategy::WithinDatabase));
    }

    #[test]
    fn test_contaminant_loses_tie() {
        let clean = hit(1e-10, 80.0, false, 0.0);
        let dirty = hit(1e-12, 80.0, true, 5.0);
        assert!(clean.is_better_than(&dirty, SelectionStrategy::WithinDatabase));
        assert!(!dirty.is_better_than(&clean, SelectionStrategy::WithinDatabase));
    }

    #[test]
    fn test_tax_score_breaks_tie() {
        let near = hit(1e-10, 80.0, false, 4.0);
        let far = hit(1e-11, 80.0, false, 1.0);
        assert!(near.is_better_than(&far, SelectionStrategy::WithinDatabase));
    }

    #[test]
    fn test_evalue_breaks_final_tie() {
        let a = hit(1e-12, 80.0, false, 2.0);
        let b = hit(1e-10, 80.0, false, 2.0);
        assert!(a.is_better_than(&b, SelectionStrategy::WithinDatabase));
    }

    #[test]
    fn test_overall_prefers_coverage() {
        // spec scenario: A e=1e-5 cov=80, B e=1e-30 cov=70, equal tax score
        let a = hit(1e-5, 80.0, false, 3.0);
        let b = hit(1e-30, 70.0, false, 3.0);
        assert!(a.is_better_than(&b, SelectionStrategy::Overall));
        assert!(!a.is_better_than(&b, SelectionStrategy::WithinDatabase));
    }

    #[test]
    fn test_zero_evalue_is_floored() {
        let a = hit(0.0, 80.0, false, 0.0);
        let b = hit(1e-250, 80.0, false, 0.0);
        // both within the comparable window after flooring
        assert!(a.is_better_than(&b, SelectionStrategy::WithinDatabase) || b.e_value_raw > 0.0);
    }

    #[test]
    fn test_tax_score_counts_prefixes() {
        let target = "cellular organisms;Eukaryota;Metazoa;Chordata;Homo sapiens";
        let score = tax_score("cellular organisms;Eukaryota;Metazoa", target, false);
        assert_eq!(score, 3.0);
    }

    #[test]
    fn test_tax_score_informative_bonus() {
        let target = "cellular organisms;Eukaryota";
        // no overlap, informative
        assert_eq!(tax_score("Bacteria;Proteobacteria", target, true), INFORM_ADD);
        // no overlap, uninformative
        assert_eq!(tax_score("Bacteria;Proteobacteria", target, false), 0.0);
        // overlap, informative: multiplied
        let boosted = tax_score("cellular organisms;Eukaryota", target, true);
        assert!((boosted - 2.0 * INFORM_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_tax_score_monotone_in_prefix_domination() {
        let target = "cellular organisms;Eukaryota;Metazoa;Chordata";
        let shallow = tax_score("cellular organisms;Eukaryota", target, false);
        let deep = tax_score("cellular organisms;Eukaryota;Metazoa", target, false);
        assert!(deep >= shallow);
    }
}
