use super::config::DsspConfig;
use super::frame::ProteinFrame;
use super::progress::{Progress, ProgressReporter};
use crate::core::spatial::grid::SpatialIndex;
use crate::core::spatial::pairs::{PairSet, PairSetError};
use crate::core::utils::geometry::estimate_amide_hydrogen;
use nalgebra::Point3;
use tracing::{debug, instrument};

/// Strongest energy a backbone hydrogen bond may take, in kcal/mol.
pub const MIN_HBOND_ENERGY: f64 = -9.9;
/// A pair only counts as bonded below this energy, in kcal/mol.
pub const MAX_HBOND_ENERGY: f64 = -0.5;

/// `q1 * q2 * f` of the DSSP electrostatic model (0.42e * 0.20e * 332 kcal*A/mol).
const COUPLING_CONSTANT: f64 = -27.888;
/// Distances below this are treated as overlapping atoms.
const MINIMAL_DISTANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondPartner {
    /// Dense index of the partner residue.
    pub residue: usize,
    pub energy: f64,
}

/// The two lowest-energy partners seen so far; slot 0 always holds the lower energy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartnerSlots([Option<BondPartner>; 2]);

impl PartnerSlots {
    /// Offers a candidate partner.
    ///
    /// A candidate stronger than slot 0 takes it and pushes the old slot 0 down; otherwise
    /// it takes slot 1 if that is empty or weaker. Ties keep the earlier partner.
    pub fn insert(&mut self, candidate: BondPartner) {
        match self.0 {
            [None, _] => self.0[0] = Some(candidate),
            [Some(first), _] if candidate.energy < first.energy => {
                self.0 = [Some(candidate), Some(first)];
            }
            [Some(_), None] => self.0[1] = Some(candidate),
            [Some(_), Some(second)] if candidate.energy < second.energy => {
                self.0[1] = Some(candidate);
            }
            _ => {}
        }
    }

    pub fn get(&self, slot: usize) -> Option<&BondPartner> {
        self.0.get(slot).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BondPartner> {
        self.0.iter().flatten()
    }

    fn find(&self, residue: usize) -> Option<&BondPartner> {
        self.iter().find(|p| p.residue == residue)
    }
}

/// Per-residue summary of the backbone hydrogen bonds it takes part in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HBondRecord {
    /// Residues whose C=O accepts this residue's N-H.
    pub acceptors: PartnerSlots,
    /// Residues whose N-H donates to this residue's C=O.
    pub donors: PartnerSlots,
}

/// Answers whether a backbone hydrogen bond runs from one residue to another.
///
/// Classification stages depend on this rather than on the energy model so they can be
/// driven by any bond source.
pub trait HBondLookup {
    /// True when `donor`'s N-H is hydrogen bonded to `acceptor`'s C=O.
    fn is_bond(&self, donor: usize, acceptor: usize) -> bool;
}

/// How candidate residue pairs were enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy {
    /// Every pair of protein residues.
    Quadratic,
    /// Only pairs found within the cutoff by a spatial index.
    Indexed,
}

/// Electrostatic energy of the hydrogen bond from `donor`'s N-H to `acceptor`'s C=O.
///
/// Returns `None` when the pair cannot be evaluated: the donor has no covalent
/// predecessor to place its hydrogen, or a required backbone atom is missing. Proline
/// donors evaluate to zero.
pub fn hbond_energy(frame: &ProteinFrame, donor: usize, acceptor: usize) -> Option<f64> {
    let pred = frame.predecessor(donor)?;
    let donor_residue = frame.residue(donor)?;
    if donor_residue.is_proline {
        return Some(0.0);
    }

    let prev = &frame.residue(pred)?.backbone;
    let acc = &frame.residue(acceptor)?.backbone;

    let n = donor_residue.backbone.n?;
    let h = estimate_amide_hydrogen(&n, &prev.c?, &prev.o?)?;
    let c = acc.c?;
    let o = acc.o?;

    Some(coulomb_energy(&n, &h, &c, &o))
}

fn coulomb_energy(n: &Point3<f64>, h: &Point3<f64>, c: &Point3<f64>, o: &Point3<f64>) -> f64 {
    let d_ho = (h - o).norm();
    let d_hc = (h - c).norm();
    let d_nc = (n - c).norm();
    let d_no = (n - o).norm();

    if [d_ho, d_hc, d_nc, d_no]
        .iter()
        .any(|&d| d < MINIMAL_DISTANCE)
    {
        return MIN_HBOND_ENERGY;
    }

    let energy = COUPLING_CONSTANT * (1.0 / d_ho - 1.0 / d_hc + 1.0 / d_nc - 1.0 / d_no);
    // Round half up to 1e-3 kcal/mol.
    let rounded = (energy * 1000.0 + 0.5).floor() / 1000.0;
    rounded.max(MIN_HBOND_ENERGY)
}

/// Backbone hydrogen bond network of one structure.
#[derive(Debug, Clone)]
pub struct HydrogenBondModel {
    records: Vec<HBondRecord>,
    strategy: BuildStrategy,
}

impl HydrogenBondModel {
    /// Evaluates all candidate pairs, picking the strategy from the residue count.
    ///
    /// Waters and ligands count towards the threshold even though only protein residues
    /// take part in bonds.
    #[instrument(skip_all, name = "hbond_model")]
    pub fn build(
        frame: &ProteinFrame,
        config: &DsspConfig,
        reporter: &ProgressReporter,
    ) -> Result<Self, PairSetError> {
        if frame.len() > config.large_structure_threshold {
            debug!(
                residues = frame.len(),
                threshold = config.large_structure_threshold,
                "Using spatial index for hydrogen bond candidates."
            );
            Self::build_indexed(frame, config, reporter)
        } else {
            debug!(
                residues = frame.len(),
                "Scanning all residue pairs for hydrogen bonds."
            );
            Ok(Self::build_quadratic(frame, reporter))
        }
    }

    /// Evaluates every pair of protein residues.
    pub fn build_quadratic(frame: &ProteinFrame, reporter: &ProgressReporter) -> Self {
        let mut model = Self::empty(frame.len(), BuildStrategy::Quadratic);
        let protein = frame.protein_indices();

        reporter.report(Progress::TaskStart {
            total_steps: protein.len() as u64,
        });
        for (a, &i) in protein.iter().enumerate() {
            for &j in &protein[a + 1..] {
                model.evaluate_pair(frame, i, j);
            }
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);

        model
    }

    /// Evaluates only pairs where one residue has an atom within the cutoff of the
    /// other's alpha carbon.
    ///
    /// Pairs are evaluated in ascending `(low, high)` order, the same order the all-pairs
    /// scan visits them, so both strategies agree wherever their candidates agree.
    pub fn build_indexed(
        frame: &ProteinFrame,
        config: &DsspConfig,
        reporter: &ProgressReporter,
    ) -> Result<Self, PairSetError> {
        let mut model = Self::empty(frame.len(), BuildStrategy::Indexed);
        let protein = frame.protein_indices();

        let index = SpatialIndex::new(
            protein.iter().flat_map(|&i| {
                frame.residues()[i]
                    .atom_positions
                    .iter()
                    .map(move |&position| (position, i))
            }),
            config.cell_size,
        );

        let n = protein.len();
        let mut pairs = PairSet::new(
            n * n.saturating_sub(1) / 2,
            config.pair_table_width,
            config.pair_bucket_slots,
        );

        reporter.report(Progress::TaskStart {
            total_steps: protein.len() as u64,
        });
        let mut candidates = Vec::new();
        for &i in &protein {
            if let Some(ca) = frame.residues()[i].backbone.ca {
                candidates.clear();
                index.query_radius(&ca, config.hbond_cutoff, |&j| candidates.push(j));
                for &j in &candidates {
                    if j != i {
                        pairs.add(i, j)?;
                    }
                }
            }
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);

        debug!(
            atoms = index.len(),
            pairs = pairs.len(),
            "Collected hydrogen bond candidates."
        );

        let mut ordered: Vec<(usize, usize)> = pairs.iter().collect();
        ordered.sort_unstable();
        for (lo, hi) in ordered {
            model.evaluate_pair(frame, lo, hi);
        }

        Ok(model)
    }

    fn empty(len: usize, strategy: BuildStrategy) -> Self {
        Self {
            records: vec![HBondRecord::default(); len],
            strategy,
        }
    }

    /// Both bond directions of a pair `lo < hi`. A residue never donates to the residue
    /// right before it in the table.
    fn evaluate_pair(&mut self, frame: &ProteinFrame, lo: usize, hi: usize) {
        self.record_bond(frame, lo, hi);
        if hi != lo + 1 {
            self.record_bond(frame, hi, lo);
        }
    }

    fn record_bond(&mut self, frame: &ProteinFrame, donor: usize, acceptor: usize) {
        if let Some(energy) = hbond_energy(frame, donor, acceptor) {
            self.records[donor].acceptors.insert(BondPartner {
                residue: acceptor,
                energy,
            });
            self.records[acceptor].donors.insert(BondPartner {
                residue: donor,
                energy,
            });
        }
    }

    pub fn strategy(&self) -> BuildStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&HBondRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[HBondRecord] {
        &self.records
    }

    /// Energy retained for the `donor -> acceptor` bond, or `0.0` if the pair is not
    /// among the donor's two strongest acceptors.
    pub fn energy(&self, donor: usize, acceptor: usize) -> f64 {
        self.records
            .get(donor)
            .and_then(|r| r.acceptors.find(acceptor))
            .map_or(0.0, |p| p.energy)
    }
}

impl HBondLookup for HydrogenBondModel {
    fn is_bond(&self, donor: usize, acceptor: usize) -> bool {
        self.records.get(donor).is_some_and(|r| {
            r.acceptors
                .iter()
                .any(|p| p.residue == acceptor && p.energy < MAX_HBOND_ENERGY)
        })
    }
}
