use bitflags::bitflags;

bitflags! {
    /// Per-sequence status bits accumulated across pipeline stages
    ///
    /// A sequence is "kept" when it survived both expression filtering
    /// and frame selection (stages that did not run keep everything).
    ///
    /// The composite `CONTAMINANT` bit is always the disjunction of
    /// `SIM_CONTAM` and `FAMILY_CONTAM`; use
    /// [`QuerySequence::set_contam`](crate::models::QuerySequence::set_contam)
    /// instead of toggling it directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct QueryFlags: u32 {
        const IS_PROTEIN        = 0b0000_0000_0000_0001;
        const EXPRESSION_KEPT   = 0b0000_0000_0000_0010;
        const FRAME_KEPT        = 0b0000_0000_0000_0100;
        const SIM_HIT           = 0b0000_0000_0000_1000;
        const FAMILY_ASSIGNED   = 0b0000_0000_0001_0000;
        const FAMILY_ONE_GO     = 0b0000_0000_0010_0000;
        const FAMILY_ONE_KEGG   = 0b0000_0000_0100_0000;
        const CONTAMINANT       = 0b0000_0000_1000_0000;
        const SIM_CONTAM        = 0b0000_0001_0000_0000;
        const FAMILY_CONTAM     = 0b0000_0010_0000_0000;
        const HGT_BLASTED       = 0b0000_0100_0000_0000;
        const HGT_CANDIDATE     = 0b0000_1000_0000_0000;
        const HGT_CONFIRMED     = 0b0001_0000_0000_0000;
        const BLASTED           = 0b0010_0000_0000_0000;
    }
}

impl Default for QueryFlags {
    fn default() -> Self {
        QueryFlags::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_independence() {
        let mut flags = QueryFlags::empty();
        flags.insert(QueryFlags::EXPRESSION_KEPT | QueryFlags::FRAME_KEPT);
        assert!(flags.contains(QueryFlags::EXPRESSION_KEPT));
        assert!(!flags.contains(QueryFlags::SIM_HIT));
        flags.remove(QueryFlags::FRAME_KEPT);
        assert!(flags.contains(QueryFlags::EXPRESSION_KEPT));
        assert!(!flags.contains(QueryFlags::FRAME_KEPT));
    }
}
