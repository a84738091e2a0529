//! # Core Models Module
//!
//! In-memory representation of the molecular structure consumed by the secondary
//! structure pipeline.
//!
//! ## Overview
//!
//! The models are deliberately small: the pipeline only needs atom names and positions,
//! residue identity (sequence number, insertion code, residue name) and the grouping of
//! residues into chains. Everything is stored in [`slotmap`] arenas and addressed through
//! stable keys, so a caller can update coordinates in place and re-run the assignment on a
//! new conformation without rebuilding the system.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom name, owning residue and 3D position
//! - [`residue`] - Residue identity and the recognised amino acid type
//! - [`chain`] - Ordered residue list of one polymer
//! - [`system`] - The complete structure with lookup maps
//!
//! ## Usage
//!
//! ```ignore
//! use nalgebra::Point3;
//! use ssmap::core::models::{atom::Atom, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A');
//! let residue_id = system.add_residue(chain_id, 1, None, "ALA").unwrap();
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom).unwrap();
//! ```

use slotmap::new_key_type;

pub mod atom;
pub mod chain;
pub mod residue;
pub mod system;

#[cfg(test)]
pub(crate) mod fixtures;

new_key_type! {
    /// Stable handle of an atom inside a [`system::MolecularSystem`].
    pub struct AtomId;
    /// Stable handle of a residue inside a [`system::MolecularSystem`].
    pub struct ResidueId;
    /// Stable handle of a chain inside a [`system::MolecularSystem`].
    pub struct ChainId;
}
