use crate::align::header::HeaderId;
use crate::refdata::go_graph::{format_go_set, GoCategory, GoSet};

/// One EggNOG assignment, from either the mapper TSV or the SQL path
///
/// Fields absent from the producing path stay empty and render as
/// `NA` downstream.
#[derive(Debug, Clone, Default)]
pub struct EggnogHit {
    pub qseqid: String,
    pub database_path: String,
    pub seed_ortholog: String,
    pub seed_evalue: String,
    pub seed_evalue_raw: f64,
    pub seed_score: String,
    pub predicted_gene: String,
    pub tax_scope: String,
    pub tax_scope_lvl_max: String,
    pub tax_scope_readable: String,
    pub member_ogs: String,
    pub description: String,
    pub cog_abbreviation: String,
    pub cog_description: String,
    pub bigg: String,
    pub kegg: String,
    pub kegg_ko: String,
    pub kegg_pathway: String,
    pub kegg_module: String,
    pub kegg_reaction: String,
    pub kegg_rclass: String,
    pub kegg_tc: String,
    pub brite: String,
    pub ec: String,
    pub cazy: String,
    pub protein_domains: String,
    pub parsed_go: GoSet,
    pub is_contaminant: bool,
}

impl EggnogHit {
    /// Lower raw seed e-value wins; additional assignments to the
    /// same sequence are rare but possible with multiple databases
    pub fn is_better_than(&self, other: &EggnogHit) -> bool {
        self.seed_evalue_raw < other.seed_evalue_raw
    }

    pub fn value(&self, header: HeaderId, go_level: u16) -> Option<String> {
        match header {
            HeaderId::Query => Some(self.qseqid.clone()),
            HeaderId::EggSeedOrtholog => Some(self.seed_ortholog.clone()),
            HeaderId::EggSeedEvalue => Some(self.seed_evalue.clone()),
            HeaderId::EggSeedScore => Some(self.seed_score.clone()),
            HeaderId::EggPredictedGene => Some(self.predicted_gene.clone()),
            HeaderId::EggTaxScope => Some(self.tax_scope_readable.clone()),
            HeaderId::EggTaxScopeMax => Some(self.tax_scope_lvl_max.clone()),
            HeaderId::EggMemberOgs => Some(self.member_ogs.clone()),
            HeaderId::EggDescription => Some(self.description.clone()),
            HeaderId::EggCogAbbreviation => Some(self.cog_abbreviation.clone()),
            HeaderId::EggCogDescription => Some(self.cog_description.clone()),
            HeaderId::EggBigg => Some(self.bigg.clone()),
            HeaderId::EggKegg => Some(self.kegg.clone()),
            HeaderId::EggKeggKo => Some(self.kegg_ko.clone()),
            HeaderId::EggKeggPathway => Some(self.kegg_pathway.clone()),
            HeaderId::EggKeggModule => Some(self.kegg_module.clone()),
            HeaderId::EggKeggReaction => Some(self.kegg_reaction.clone()),
            HeaderId::EggKeggRclass => Some(self.kegg_rclass.clone()),
            HeaderId::EggKeggTc => Some(self.kegg_tc.clone()),
            HeaderId::EggBrite => Some(self.brite.clone()),
            HeaderId::EggEc => Some(self.ec.clone()),
            HeaderId::EggCazy => Some(self.cazy.clone()),
            HeaderId::EggProteinDomains => Some(self.protein_domains.clone()),
            HeaderId::EggGoBiological => Some(self.go_by_category(GoCategory::Biological, go_level)),
            HeaderId::EggGoCellular => Some(self.go_by_category(GoCategory::Cellular, go_level)),
            HeaderId::EggGoMolecular => Some(self.go_by_category(GoCategory::Molecular, go_level)),
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
