use std::fmt;

use crate::pipeline::state::Stage;

/// Identifier of one output column
///
/// Every renderable field of a sequence or alignment has a fixed id.
/// The composer walks the run's enabled header list and asks each
/// record for the value of each id; records answer `None` for ids
/// they do not carry, and the composer then falls back to the owning
/// sequence (and finally to `NA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderId {
    // Query data
    Query,
    Frame,
    // Expression
    ExpFpkm,
    ExpTpm,
    ExpEffectiveLength,
    // Similarity search
    SimSubject,
    SimPercentIdentity,
    SimAlignLength,
    SimMismatch,
    SimGapOpen,
    SimQueryStart,
    SimQueryEnd,
    SimSubjStart,
    SimSubjEnd,
    SimEvalue,
    SimBitScore,
    SimCoverage,
    SimTitle,
    SimSpecies,
    SimTaxLineage,
    SimDatabase,
    SimContaminant,
    SimInformative,
    // UniProt extras (enabled once a database is detected as UniProt)
    UniDataXref,
    UniComments,
    UniKegg,
    UniGoBiological,
    UniGoCellular,
    UniGoMolecular,
    // EggNOG
    EggSeedOrtholog,
    EggSeedEvalue,
    EggSeedScore,
    EggPredictedGene,
    EggTaxScope,
    EggTaxScopeMax,
    EggMemberOgs,
    EggDescription,
    EggCogAbbreviation,
    EggCogDescription,
    EggBigg,
    EggKegg,
    EggKeggKo,
    EggKeggPathway,
    EggKeggModule,
    EggKeggReaction,
    EggKeggRclass,
    EggKeggTc,
    EggBrite,
    EggEc,
    EggCazy,
    EggProteinDomains,
    EggGoBiological,
    EggGoCellular,
    EggGoMolecular,
    // InterProScan
    InterEvalue,
    InterInterproId,
    InterDatabaseTerm,
    InterDatabaseType,
    InterPathways,
    InterGoBiological,
    InterGoCellular,
    InterGoMolecular,
    // BUSCO
    BuscoId,
    BuscoStatus,
    BuscoScore,
    BuscoLength,
    // Horizontal gene transfer
    HgtGene,
}

impl HeaderId {
    /// Column title used in delimited output
    pub fn title(&self) -> &'static str {
        match self {
            HeaderId::Query => "Query Sequence",
            HeaderId::Frame => "Frame",
            HeaderId::ExpFpkm => "FPKM",
            HeaderId::ExpTpm => "TPM",
            HeaderId::ExpEffectiveLength => "Effective Length",
            HeaderId::SimSubject => "Subject Sequence",
            HeaderId::SimPercentIdentity => "Percent Identical",
            HeaderId::SimAlignLength => "Alignment Length",
            HeaderId::SimMismatch => "Mismatches",
            HeaderId::SimGapOpen => "Gap Openings",
            HeaderId::SimQueryStart => "Query Start",
            HeaderId::SimQueryEnd => "Query End",
            HeaderId::SimSubjStart => "Subject Start",
            HeaderId::SimSubjEnd => "Subject End",
            HeaderId::SimEvalue => "E Value",
            HeaderId::SimBitScore => "Bit Score",
            HeaderId::SimCoverage => "Coverage",
            HeaderId::SimTitle => "Description",
            HeaderId::SimSpecies => "Species",
            HeaderId::SimTaxLineage => "Taxonomic Lineage",
            HeaderId::SimDatabase => "Origin Database",
            HeaderId::SimContaminant => "Contaminant",
            HeaderId::SimInformative => "Informative",
            HeaderId::UniDataXref => "UniProt Database Cross Reference",
            HeaderId::UniComments => "UniProt Additional Information",
            HeaderId::UniKegg => "UniProt KEGG Terms",
            HeaderId::UniGoBiological => "UniProt GO Biological",
            HeaderId::UniGoCellular => "UniProt GO Cellular",
            HeaderId::UniGoMolecular => "UniProt GO Molecular",
            HeaderId::EggSeedOrtholog => "EggNOG Seed Ortholog",
            HeaderId::EggSeedEvalue => "EggNOG Seed E-Value",
            HeaderId::EggSeedScore => "EggNOG Seed Score",
            HeaderId::EggPredictedGene => "EggNOG Predicted Gene",
            HeaderId::EggTaxScope => "EggNOG Tax Scope",
            HeaderId::EggTaxScopeMax => "EggNOG Tax Scope Max",
            HeaderId::EggMemberOgs => "EggNOG Member OGs",
            HeaderId::EggDescription => "EggNOG Description",
            HeaderId::EggCogAbbreviation => "EggNOG COG Abbreviation",
            HeaderId::EggCogDescription => "EggNOG COG Description",
            HeaderId::EggBigg => "EggNOG BIGG Reaction",
            HeaderId::EggKegg => "EggNOG KEGG Terms",
            HeaderId::EggKeggKo => "EggNOG KEGG KO",
            HeaderId::EggKeggPathway => "EggNOG KEGG Pathway",
            HeaderId::EggKeggModule => "EggNOG KEGG Module",
            HeaderId::EggKeggReaction => "EggNOG KEGG Reaction",
            HeaderId::EggKeggRclass => "EggNOG KEGG RClass",
            HeaderId::EggKeggTc => "EggNOG KEGG TC",
            HeaderId::EggBrite => "EggNOG BRITE",
            HeaderId::EggEc => "EggNOG EC",
            HeaderId::EggCazy => "EggNOG CAZy",
            HeaderId::EggProteinDomains => "EggNOG Protein Domains",
            HeaderId::EggGoBiological => "EggNOG GO Biological",
            HeaderId::EggGoCellular => "EggNOG GO Cellular",
            HeaderId::EggGoMolecular => "EggNOG GO Molecular",
            HeaderId::InterEvalue => "InterPro E Value",
            HeaderId::InterInterproId => "InterPro Description ID",
            HeaderId::InterDatabaseTerm => "InterPro Database Term",
            HeaderId::InterDatabaseType => "InterPro Database Type",
            HeaderId::InterPathways => "InterPro Pathways",
            HeaderId::InterGoBiological => "InterPro GO Biological",
            HeaderId::InterGoCellular => "InterPro GO Cellular",
            HeaderId::InterGoMolecular => "InterPro GO Molecular",
            HeaderId::BuscoId => "BUSCO ID",
            HeaderId::BuscoStatus => "BUSCO Status",
            HeaderId::BuscoScore => "BUSCO Score",
            HeaderId::BuscoLength => "BUSCO Length",
            HeaderId::HgtGene => "Horizontally Transferred Gene",
        }
    }

    /// The pipeline stage whose best hit answers for this header
    ///
    /// `None` for headers answered by the sequence itself.
    pub fn stage(&self) -> Option<Stage> {
        use HeaderId::*;
        match self {
            Query | Frame => None,
            ExpFpkm | ExpTpm | ExpEffectiveLength => Some(Stage::Expression),
            SimSubject | SimPercentIdentity | SimAlignLength | SimMismatch | SimGapOpen
            | SimQueryStart | SimQueryEnd | SimSubjStart | SimSubjEnd | SimEvalue | SimBitScore
            | SimCoverage | SimTitle | SimSpecies | SimTaxLineage | SimDatabase
            | SimContaminant | SimInformative | UniDataXref | UniComments | UniKegg
            | UniGoBiological | UniGoCellular | UniGoMolecular => Some(Stage::SimilaritySearch),
            EggSeedOrtholog | EggSeedEvalue | EggSeedScore | EggPredictedGene | EggTaxScope
            | EggTaxScopeMax | EggMemberOgs | EggDescription | EggCogAbbreviation
            | EggCogDescription | EggBigg | EggKegg | EggKeggKo | EggKeggPathway
            | EggKeggModule | EggKeggReaction | EggKeggRclass | EggKeggTc | EggBrite | EggEc
            | EggCazy | EggProteinDomains | EggGoBiological | EggGoCellular | EggGoMolecular
            | InterEvalue | InterInterproId | InterDatabaseTerm | InterDatabaseType
            | InterPathways | InterGoBiological | InterGoCellular | InterGoMolecular => {
                Some(Stage::GeneFamily)
            }
            BuscoId | BuscoStatus | BuscoScore | BuscoLength => Some(Stage::Busco),
            HgtGene => Some(Stage::Hgt),
        }
    }

    /// The default header set before any stage toggles extras on
    pub fn defaults() -> Vec<HeaderId> {
        use HeaderId::*;
        vec![
            Query,
            Frame,
            SimSubject,
            SimPercentIdentity,
            SimAlignLength,
            SimMismatch,
            SimGapOpen,
            SimQueryStart,
            SimQueryEnd,
            SimSubjStart,
            SimSubjEnd,
            SimEvalue,
            SimBitScore,
            SimCoverage,
            SimTitle,
            SimSpecies,
            SimTaxLineage,
            SimDatabase,
            SimContaminant,
            SimInformative,
        ]
    }

    /// Headers switched on when a database turns out to be UniProt
    pub fn uniprot_set() -> Vec<HeaderId> {
        use HeaderId::*;
        vec![
            UniDataXref,
            UniComments,
            UniKegg,
            UniGoBiological,
            UniGoCellular,
            UniGoMolecular,
        ]
    }
}

impl fmt::Display for HeaderId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_are_unique() {
        let headers = HeaderId::defaults();
        let mut titles: Vec<&str> = headers.iter().map(|h| h.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), headers.len());
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(HeaderId::Query.stage(), None);
        assert_eq!(HeaderId::SimEvalue.stage(), Some(Stage::SimilaritySearch));
        assert_eq!(HeaderId::EggKeggKo.stage(), Some(Stage::GeneFamily));
        assert_eq!(HeaderId::HgtGene.stage(), Some(Stage::Hgt));
    }
}
