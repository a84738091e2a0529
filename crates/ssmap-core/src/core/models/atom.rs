use super::ResidueId;
use nalgebra::Point3;

/// An atom of the input structure.
///
/// Only the information the secondary structure pipeline reads is kept: the atom name
/// (used to locate the backbone atoms `N`, `CA`/`C1`, `C` and `O`), the owning residue and
/// the Cartesian position in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// Surrounding whitespace is stripped from the name so that fixed-column names such as
    /// `" CA "` resolve the same way as `"CA"`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.trim().to_string(),
            residue_id,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn new_atom_trims_padded_names() {
        let atom = Atom::new(" CA ", ResidueId::default(), Point3::origin());
        assert_eq!(atom.name, "CA");
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", ResidueId::default(), Point3::new(0.0, 0.0, 0.0));
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
