use super::frame::ProteinFrame;
use super::hbond::HBondLookup;
use super::state::SecondaryStructureMap;
use super::tasks::{beta_sheets, helices};
use tracing::{debug, instrument};

/// Derives DSSP secondary structure from a residue frame and its hydrogen bonds.
///
/// Beta ladders are assigned first and helices second, so alpha helices take priority
/// over strands while strands keep 3-10 and pi helices and turns out.
pub struct SecondaryStructureClassifier<'a, L: HBondLookup> {
    frame: &'a ProteinFrame,
    bonds: &'a L,
    prefer_pi_helices: bool,
}

impl<'a, L: HBondLookup> SecondaryStructureClassifier<'a, L> {
    pub fn new(frame: &'a ProteinFrame, bonds: &'a L) -> Self {
        Self {
            frame,
            bonds,
            prefer_pi_helices: false,
        }
    }

    /// Lets pi helices overwrite alpha helices.
    pub fn with_pi_preference(mut self, prefer_pi_helices: bool) -> Self {
        self.prefer_pi_helices = prefer_pi_helices;
        self
    }

    #[instrument(skip_all, name = "classify")]
    pub fn classify(&self) -> SecondaryStructureMap {
        let mut map = SecondaryStructureMap::new(
            self.frame
                .residues()
                .iter()
                .map(|residue| residue.residue_id)
                .collect(),
        );

        beta_sheets::run(self.frame, self.bonds, &mut map);
        helices::run(self.frame, self.bonds, self.prefer_pi_helices, &mut map);

        debug!(residues = map.len(), "Classification complete.");
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fixtures::SyntheticBackbone;
    use crate::engine::hbond::HydrogenBondModel;
    use crate::engine::progress::ProgressReporter;
    use crate::engine::state::SecondaryStructure;
    use std::collections::HashSet;

    struct BondSet(HashSet<(usize, usize)>);

    impl HBondLookup for BondSet {
        fn is_bond(&self, donor: usize, acceptor: usize) -> bool {
            self.0.contains(&(donor, acceptor))
        }
    }

    fn classify_geometry(builder: SyntheticBackbone) -> SecondaryStructureMap {
        let (system, _) = builder.build();
        let frame = ProteinFrame::from_system(&system);
        let model = HydrogenBondModel::build_quadratic(&frame, &ProgressReporter::new());
        SecondaryStructureClassifier::new(&frame, &model).classify()
    }

    #[test]
    fn planted_four_turns_give_alpha_helix() {
        let map = classify_geometry(SyntheticBackbone::new().chain('A', 8).bond(4, 0).bond(5, 1));
        assert_eq!(map.to_dssp_string(), " HHHH   ");
        assert!(map.ladders().is_empty());
    }

    #[test]
    fn planted_three_turns_give_three_ten_helix() {
        let map = classify_geometry(SyntheticBackbone::new().chain('A', 8).bond(3, 0).bond(4, 1));
        assert_eq!(map.to_dssp_string(), " GGG    ");
    }

    #[test]
    fn lone_turn_is_not_a_helix() {
        let map = classify_geometry(SyntheticBackbone::new().chain('A', 8).bond(4, 0));
        assert_eq!(map.to_dssp_string(), " TTT    ");
        assert!(map.structures().iter().all(|s| !s.is_helix()));
    }

    #[test]
    fn planted_antiparallel_bridge_between_chains() {
        let map = classify_geometry(
            SyntheticBackbone::new()
                .chain('A', 6)
                .chain('B', 6)
                .bond(3, 7)
                .bond(9, 1),
        );

        assert_eq!(map.to_dssp_string(), "  B     B   ");
        let forward = map.beta_partners(2)[0].unwrap();
        let backward = map.beta_partners(8)[0].unwrap();
        assert_eq!(forward.partner, 8);
        assert_eq!(backward.partner, 2);
        assert!(!forward.parallel && !backward.parallel);
        assert_eq!(forward.ladder, backward.ladder);
        assert_eq!(map.sheet(2), Some(1));
    }

    #[test]
    fn planted_antiparallel_ladder_gives_strands() {
        let map = classify_geometry(
            SyntheticBackbone::new()
                .chain('A', 6)
                .chain('B', 6)
                .bond(3, 8)
                .bond(10, 1)
                .bond(4, 7)
                .bond(9, 2),
        );

        assert_eq!(map.to_dssp_string(), "  EE    EE  ");
        assert_eq!(map.ladders().len(), 1);
        assert_eq!(map.structure(3), Some(SecondaryStructure::Strand));
    }

    #[test]
    fn planted_parallel_bridge() {
        let map = classify_geometry(
            SyntheticBackbone::new()
                .chain('A', 6)
                .chain('B', 6)
                .bond(3, 8)
                .bond(8, 1),
        );

        assert_eq!(map.structure(2), Some(SecondaryStructure::Bridge));
        assert_eq!(map.structure(8), Some(SecondaryStructure::Bridge));
        assert!(map.beta_partners(2)[0].unwrap().parallel);
    }

    #[test]
    fn pi_preference_is_forwarded() {
        let (system, _) = SyntheticBackbone::new().chain('A', 10).build();
        let frame = ProteinFrame::from_system(&system);
        let bonds = BondSet([(4, 0), (5, 1), (5, 0), (6, 1)].into_iter().collect());

        let default = SecondaryStructureClassifier::new(&frame, &bonds).classify();
        let preferred = SecondaryStructureClassifier::new(&frame, &bonds)
            .with_pi_preference(true)
            .classify();

        assert_eq!(default.structure(1), Some(SecondaryStructure::AlphaHelix));
        assert_eq!(preferred.structure(1), Some(SecondaryStructure::PiHelix));
        assert_eq!(preferred.structure(5), Some(SecondaryStructure::PiHelix));
    }

    #[test]
    fn alpha_helix_wins_over_strand_but_three_ten_does_not() {
        let (system, _) = SyntheticBackbone::new().chain('A', 6).chain('B', 6).build();
        let frame = ProteinFrame::from_system(&system);
        // Antiparallel ladder on 2..=3 and 8..=9 plus four-turns over residues 7..=10.
        let bonds = BondSet(
            [(3, 8), (10, 1), (4, 7), (9, 2), (10, 6), (11, 7)]
                .into_iter()
                .collect(),
        );
        let map = SecondaryStructureClassifier::new(&frame, &bonds).classify();
        assert_eq!(map.to_dssp_string(), "  EE   HHHH ");

        let bonds = BondSet(
            [(3, 8), (10, 1), (4, 7), (9, 2), (9, 6), (10, 7)]
                .into_iter()
                .collect(),
        );
        let map = SecondaryStructureClassifier::new(&frame, &bonds).classify();
        assert_eq!(map.structure(8), Some(SecondaryStructure::Strand));
        assert_eq!(map.structure(9), Some(SecondaryStructure::Strand));
    }

    #[test]
    fn empty_frame_classifies_to_empty_map() {
        let frame = ProteinFrame::default();
        let bonds = BondSet(HashSet::new());
        let map = SecondaryStructureClassifier::new(&frame, &bonds).classify();
        assert!(map.is_empty());
    }
}
