//! Synthetic backbones for tests.
//!
//! Residue `k` of chain `c` sits at `(20k, 100c, 0)`, far enough from every other residue
//! that no hydrogen bond forms by accident. Each residue carries `N`, `CA`, `C` and `O`
//! laid out so that the estimated amide hydrogen of the next residue points along `+y`.
//! A planted bond moves the donor's `N` to 2.9 Å below the acceptor's `O`, which scores
//! -2.904 kcal/mol.

use super::atom::Atom;
use super::system::MolecularSystem;
use super::ResidueId;
use nalgebra::{Point3, Vector3};

const SPACING: f64 = 20.0;
const CHAIN_OFFSET: f64 = 100.0;
const PLANTED_N_O_DISTANCE: f64 = 2.9;

pub(crate) const PLANTED_BOND_ENERGY: f64 = -2.904;

struct ChainSpec {
    id: char,
    names: Vec<String>,
}

#[derive(Default)]
pub(crate) struct SyntheticBackbone {
    chains: Vec<ChainSpec>,
    bonds: Vec<(usize, usize)>,
    missing: Vec<(usize, &'static str)>,
    gaps: Vec<usize>,
    shifts: Vec<(usize, Vector3<f64>)>,
}

impl SyntheticBackbone {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a chain of `len` alanines.
    pub(crate) fn chain(self, id: char, len: usize) -> Self {
        self.chain_with_names(id, &vec!["ALA"; len])
    }

    pub(crate) fn chain_with_names(mut self, id: char, names: &[&str]) -> Self {
        self.chains.push(ChainSpec {
            id,
            names: names.iter().map(|n| n.to_string()).collect(),
        });
        self
    }

    /// Plants a backbone hydrogen bond, `donor` N-H to `acceptor` C=O, by dense index.
    pub(crate) fn bond(mut self, donor: usize, acceptor: usize) -> Self {
        self.bonds.push((donor, acceptor));
        self
    }

    pub(crate) fn without_atom(mut self, index: usize, name: &'static str) -> Self {
        self.missing.push((index, name));
        self
    }

    /// Breaks sequence numbering right before `index`.
    pub(crate) fn gap_before(mut self, index: usize) -> Self {
        self.gaps.push(index);
        self
    }

    /// Moves every atom of residue `index` by `offset`.
    pub(crate) fn shift(mut self, index: usize, offset: Vector3<f64>) -> Self {
        self.shifts.push((index, offset));
        self
    }

    pub(crate) fn total_len(&self) -> usize {
        self.chains.iter().map(|c| c.names.len()).sum()
    }

    fn site(&self, index: usize) -> Point3<f64> {
        let mut remaining = index;
        let mut site = Point3::origin();
        for (c, chain) in self.chains.iter().enumerate() {
            if remaining < chain.names.len() {
                site = Point3::new(SPACING * remaining as f64, CHAIN_OFFSET * c as f64, 0.0);
                break;
            }
            remaining -= chain.names.len();
        }
        self.shifts
            .iter()
            .filter(|(i, _)| *i == index)
            .fold(site, |p, (_, offset)| p + offset)
    }

    fn backbone(&self, index: usize) -> [(&'static str, Point3<f64>); 4] {
        let s = self.site(index);
        let o = s + Vector3::new(1.5, -1.23, 0.0);
        let n = self
            .bonds
            .iter()
            .find(|(donor, _)| *donor == index)
            .map(|&(_, acceptor)| {
                let acceptor_o = self.site(acceptor) + Vector3::new(1.5, -1.23, 0.0);
                acceptor_o + Vector3::new(0.0, -PLANTED_N_O_DISTANCE, 0.0)
            })
            .unwrap_or(s + Vector3::new(-1.0, 0.0, 0.0));
        [
            ("N", n),
            ("CA", s),
            ("C", s + Vector3::new(1.5, 0.0, 0.0)),
            ("O", o),
        ]
    }

    /// Builds the system and returns residue ids in dense (chain, then sequence) order.
    pub(crate) fn build(&self) -> (MolecularSystem, Vec<ResidueId>) {
        let mut system = MolecularSystem::new();
        let mut ids = Vec::with_capacity(self.total_len());
        let mut index = 0;

        for chain in &self.chains {
            let chain_id = system.add_chain(chain.id);
            let mut number = 1isize;
            for name in &chain.names {
                if self.gaps.contains(&index) {
                    number += 10;
                }
                let residue_id = system
                    .add_residue(chain_id, number, None, name)
                    .expect("chain was just added");
                for (atom_name, position) in self.backbone(index) {
                    if self.missing.contains(&(index, atom_name)) {
                        continue;
                    }
                    system
                        .add_atom_to_residue(residue_id, Atom::new(atom_name, residue_id, position))
                        .expect("residue was just added");
                }
                ids.push(residue_id);
                number += 1;
                index += 1;
            }
        }

        (system, ids)
    }
}
