use crate::core::models::system::MolecularSystem;
use crate::core::models::{ChainId, ResidueId};
use crate::core::utils::identifiers::{
    BACKBONE_CARBON, BACKBONE_NITROGEN, BACKBONE_OXYGEN, is_alpha_carbon,
};
use nalgebra::Point3;
use std::collections::HashMap;

/// Backbone atom positions of one residue. Absent atoms stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Backbone {
    pub n: Option<Point3<f64>>,
    pub ca: Option<Point3<f64>>,
    pub c: Option<Point3<f64>>,
    pub o: Option<Point3<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameResidue {
    pub residue_id: ResidueId,
    /// Ordinal of the owning chain in [`ProteinFrame::chains`].
    pub chain: usize,
    pub number: isize,
    pub insertion_code: Option<char>,
    pub is_protein: bool,
    pub is_proline: bool,
    pub backbone: Backbone,
    pub atom_positions: Vec<Point3<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpan {
    pub chain_id: ChainId,
    pub label: char,
    /// Dense index of the first residue of the chain.
    pub start: usize,
    pub len: usize,
    /// Length of the leading run of protein residues.
    pub protein_len: usize,
}

/// Dense, per-run residue table derived from a [`MolecularSystem`].
///
/// Residues are laid out chain after chain in chain order and, within a chain, in the
/// order they were added. Every later stage addresses residues by their position in this
/// table.
#[derive(Debug, Clone, Default)]
pub struct ProteinFrame {
    residues: Vec<FrameResidue>,
    chains: Vec<ChainSpan>,
    index: HashMap<ResidueId, usize>,
}

impl ProteinFrame {
    pub fn from_system(system: &MolecularSystem) -> Self {
        let mut frame = Self::default();

        for (ordinal, (chain_id, chain)) in system.chains_iter().enumerate() {
            let start = frame.residues.len();

            for &residue_id in chain.residues() {
                let Some(residue) = system.residue(residue_id) else {
                    continue;
                };

                let named = |name: &str| system.atom_position(residue_id, name);
                let ca = residue
                    .atoms()
                    .iter()
                    .filter_map(|&atom_id| system.atom(atom_id))
                    .find(|atom| is_alpha_carbon(&atom.name))
                    .map(|atom| atom.position);

                frame.index.insert(residue_id, frame.residues.len());
                frame.residues.push(FrameResidue {
                    residue_id,
                    chain: ordinal,
                    number: residue.number,
                    insertion_code: residue.insertion_code,
                    is_protein: residue.is_protein(),
                    is_proline: residue.is_proline(),
                    backbone: Backbone {
                        n: named(BACKBONE_NITROGEN),
                        ca,
                        c: named(BACKBONE_CARBON),
                        o: named(BACKBONE_OXYGEN),
                    },
                    atom_positions: residue
                        .atoms()
                        .iter()
                        .filter_map(|&atom_id| system.atom(atom_id))
                        .map(|atom| atom.position)
                        .collect(),
                });
            }

            let members = &frame.residues[start..];
            frame.chains.push(ChainSpan {
                chain_id,
                label: chain.id,
                start,
                len: members.len(),
                protein_len: members.iter().take_while(|r| r.is_protein).count(),
            });
        }

        frame
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[FrameResidue] {
        &self.residues
    }

    pub fn residue(&self, index: usize) -> Option<&FrameResidue> {
        self.residues.get(index)
    }

    pub fn chains(&self) -> &[ChainSpan] {
        &self.chains
    }

    pub fn index_of(&self, residue_id: ResidueId) -> Option<usize> {
        self.index.get(&residue_id).copied()
    }

    /// Dense indices of all protein residues, in frame order.
    pub fn protein_indices(&self) -> Vec<usize> {
        self.residues
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_protein)
            .map(|(i, _)| i)
            .collect()
    }

    /// The residue covalently preceding `index` in the backbone.
    ///
    /// That is the previous residue of the same chain, provided it is a protein residue
    /// and its sequence number is exactly one less. Chain starts, numbering gaps and
    /// non-protein neighbors have no predecessor.
    pub fn predecessor(&self, index: usize) -> Option<usize> {
        let prev_index = index.checked_sub(1)?;
        let current = self.residues.get(index)?;
        let prev = &self.residues[prev_index];
        (prev.chain == current.chain && prev.is_protein && prev.number + 1 == current.number)
            .then_some(prev_index)
    }

    /// Whether the backbone is interrupted anywhere between `from` and `to` (inclusive):
    /// a chain boundary or a jump in sequence numbering.
    pub fn has_chain_break(&self, from: usize, to: usize) -> bool {
        (from + 1..=to).any(|i| match (self.residues.get(i - 1), self.residues.get(i)) {
            (Some(prev), Some(current)) => {
                prev.chain != current.chain || prev.number + 1 != current.number
            }
            _ => true,
        })
    }
}
