use super::atom::Atom;
use super::chain::Chain;
use super::residue::Residue;
use super::{AtomId, ChainId, ResidueId};
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Key identifying a residue within its chain: sequence number plus insertion code.
type ResidueKey = (ChainId, isize, Option<char>);

/// A complete molecular structure snapshot: atoms, residues and chains.
///
/// This struct is the input contract of the secondary structure pipeline. Chains keep
/// the order in which they were added and residues keep the order in which they were
/// added to their chain; the pipeline derives its dense residue numbering from exactly
/// that order.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain, sequence number and insertion code.
    residue_id_map: HashMap<ResidueKey, ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    ///
    /// Updating positions through this accessor is how a new conformation is loaded into
    /// an existing system; the secondary structure must then be recomputed from scratch.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the system.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the system (storage order).
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in insertion order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue by chain, sequence number and insertion code.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, number, insertion_code))
            .copied()
    }

    /// Position of the first atom with the given name in a residue.
    pub fn atom_position(&self, residue_id: ResidueId, name: &str) -> Option<Point3<f64>> {
        let atom_id = self.residue(residue_id)?.get_atom_id_by_name(name)?;
        self.atom(atom_id).map(|atom| atom.position)
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Appends a residue to a chain or returns the existing one.
    ///
    /// This method is idempotent on `(chain, number, insertion_code)`. The residue type is
    /// recognised from `name`; unrecognised names produce a non-protein residue.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, number, insertion_code);

        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let residue_id = self
            .residues
            .insert(Residue::new(number, insertion_code, name, chain_id));
        self.residue_id_map.insert(key, residue_id);
        chain.residues.push(residue_id);

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        let name = atom.name.clone();
        let atom_id = self.atoms.insert(Atom {
            residue_id,
            ..atom
        });
        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);

        Some(atom_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chain_system() -> (MolecularSystem, ChainId, ChainId) {
        let mut system = MolecularSystem::new();
        let chain_b = system.add_chain('B');
        let chain_a = system.add_chain('A');
        (system, chain_a, chain_b)
    }

    #[test]
    fn chains_iterate_in_insertion_order() {
        let (system, chain_a, chain_b) = two_chain_system();
        let order: Vec<ChainId> = system.chains_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![chain_b, chain_a]);
        assert_eq!(system.chain_count(), 2);
    }

    #[test]
    fn add_chain_is_idempotent() {
        let (mut system, chain_a, _) = two_chain_system();
        assert_eq!(system.add_chain('A'), chain_a);
        assert_eq!(system.chain_count(), 2);
        assert_eq!(system.find_chain_by_id('A'), Some(chain_a));
        assert_eq!(system.find_chain_by_id('Z'), None);
    }

    #[test]
    fn add_residue_is_idempotent_on_number_and_insertion_code() {
        let (mut system, chain_a, _) = two_chain_system();
        let first = system.add_residue(chain_a, 10, None, "ALA").unwrap();
        let again = system.add_residue(chain_a, 10, None, "ALA").unwrap();
        let inserted = system.add_residue(chain_a, 10, Some('A'), "GLY").unwrap();

        assert_eq!(first, again);
        assert_ne!(first, inserted);
        assert_eq!(system.chain(chain_a).unwrap().residues(), &[first, inserted]);
        assert_eq!(system.find_residue(chain_a, 10, Some('A')), Some(inserted));
        assert_eq!(system.residue_count(), 2);
    }

    #[test]
    fn add_residue_fails_for_unknown_chain() {
        let (mut system, _, _) = two_chain_system();
        assert!(system.add_residue(ChainId::default(), 1, None, "ALA").is_none());
        assert_eq!(system.residue_count(), 0);
    }

    #[test]
    fn add_atom_registers_atom_with_residue() {
        let (mut system, chain_a, _) = two_chain_system();
        let residue_id = system.add_residue(chain_a, 1, None, "ALA").unwrap();
        let atom_id = system
            .add_atom_to_residue(
                residue_id,
                Atom::new("CA", ResidueId::default(), Point3::new(1.0, 2.0, 3.0)),
            )
            .unwrap();

        let atom = system.atom(atom_id).unwrap();
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(system.residue(residue_id).unwrap().atoms(), &[atom_id]);
        assert_eq!(
            system.atom_position(residue_id, "CA"),
            Some(Point3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(system.atom_position(residue_id, "CB"), None);
        assert_eq!(system.atom_count(), 1);
    }

    #[test]
    fn atom_mut_updates_positions_in_place() {
        let (mut system, chain_a, _) = two_chain_system();
        let residue_id = system.add_residue(chain_a, 1, None, "ALA").unwrap();
        let atom_id = system
            .add_atom_to_residue(residue_id, Atom::new("N", residue_id, Point3::origin()))
            .unwrap();

        system.atom_mut(atom_id).unwrap().position = Point3::new(4.0, 5.0, 6.0);
        assert_eq!(
            system.atom_position(residue_id, "N"),
            Some(Point3::new(4.0, 5.0, 6.0))
        );
    }
}
