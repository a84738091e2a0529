use super::{AtomId, ChainId};
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The amino acid types recognised as protein residues.
///
/// A residue whose name maps to one of these types is treated as part of the polypeptide
/// backbone; any other residue (ligands, waters, nucleotides) is ignored by the hydrogen
/// bond model and terminates the protein run of its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueType {
    // --- Aliphatic, Nonpolar ---
    Alanine,
    Glycine,
    Isoleucine,
    Leucine,
    Proline,
    Valine,

    // --- Aromatic ---
    Phenylalanine,
    Tryptophan,
    Tyrosine,

    // --- Polar, Uncharged ---
    Asparagine,
    Cysteine,
    Glutamine,
    Serine,
    Threonine,
    Methionine,

    // --- Positively Charged (Basic) ---
    Arginine,
    Lysine,

    // --- Negatively Charged (Acidic) ---
    AsparticAcid,
    GlutamicAcid,

    // --- Histidine and its protonation variants ---
    Histidine,
    HistidineDelta,
    HistidineEpsilon,
    HistidineProtonated,
}

static RESIDUE_NAMES: Map<&'static str, ResidueType> = phf_map! {
    "ALA" => ResidueType::Alanine,
    "GLY" => ResidueType::Glycine,
    "ILE" => ResidueType::Isoleucine,
    "LEU" => ResidueType::Leucine,
    "PRO" => ResidueType::Proline,
    "VAL" => ResidueType::Valine,
    "PHE" => ResidueType::Phenylalanine,
    "TRP" => ResidueType::Tryptophan,
    "TYR" => ResidueType::Tyrosine,
    "ASN" => ResidueType::Asparagine,
    "CYS" => ResidueType::Cysteine,
    "CYX" => ResidueType::Cysteine,
    "GLN" => ResidueType::Glutamine,
    "SER" => ResidueType::Serine,
    "THR" => ResidueType::Threonine,
    "MET" => ResidueType::Methionine,
    "MSE" => ResidueType::Methionine,
    "ARG" => ResidueType::Arginine,
    "LYS" => ResidueType::Lysine,
    "ASP" => ResidueType::AsparticAcid,
    "GLU" => ResidueType::GlutamicAcid,
    "HIS" => ResidueType::Histidine,
    "HID" => ResidueType::HistidineDelta,
    "HSD" => ResidueType::HistidineDelta,
    "HIE" => ResidueType::HistidineEpsilon,
    "HSE" => ResidueType::HistidineEpsilon,
    "HIP" => ResidueType::HistidineProtonated,
    "HSP" => ResidueType::HistidineProtonated,
};

impl ResidueType {
    /// Looks up the residue type for a residue name, ignoring case and padding.
    pub fn from_name(name: &str) -> Option<Self> {
        RESIDUE_NAMES
            .get(name.trim().to_ascii_uppercase().as_str())
            .copied()
    }

    /// Returns the canonical three-letter code.
    pub fn three_letter_code(&self) -> &'static str {
        match self {
            ResidueType::Alanine => "ALA",
            ResidueType::Glycine => "GLY",
            ResidueType::Isoleucine => "ILE",
            ResidueType::Leucine => "LEU",
            ResidueType::Proline => "PRO",
            ResidueType::Valine => "VAL",
            ResidueType::Phenylalanine => "PHE",
            ResidueType::Tryptophan => "TRP",
            ResidueType::Tyrosine => "TYR",
            ResidueType::Asparagine => "ASN",
            ResidueType::Cysteine => "CYS",
            ResidueType::Glutamine => "GLN",
            ResidueType::Serine => "SER",
            ResidueType::Threonine => "THR",
            ResidueType::Methionine => "MET",
            ResidueType::Arginine => "ARG",
            ResidueType::Lysine => "LYS",
            ResidueType::AsparticAcid => "ASP",
            ResidueType::GlutamicAcid => "GLU",
            ResidueType::Histidine => "HIS",
            ResidueType::HistidineDelta => "HID",
            ResidueType::HistidineEpsilon => "HIE",
            ResidueType::HistidineProtonated => "HIP",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown amino acid residue name: '{0}'")]
pub struct ParseResidueTypeError(pub String);

impl FromStr for ResidueType {
    type Err = ParseResidueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseResidueTypeError(s.to_string()))
    }
}

impl fmt::Display for ResidueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                      // Residue sequence number from source file
    pub insertion_code: Option<char>,       // PDB insertion code, if any
    pub name: String,                       // Name of the residue (e.g., "ALA", "HOH")
    pub residue_type: Option<ResidueType>,  // Recognised amino acid type
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms in input order
    atom_name_map: HashMap<String, AtomId>, // First atom carrying each name
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            insertion_code,
            name: name.trim().to_string(),
            residue_type: ResidueType::from_name(name),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn is_protein(&self) -> bool {
        self.residue_type.is_some()
    }

    /// Proline has no backbone amide hydrogen and therefore never donates.
    pub fn is_proline(&self) -> bool {
        self.residue_type == Some(ResidueType::Proline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, Some('A'), "GLY", chain_id);
        assert_eq!(residue.number, 10);
        assert_eq!(residue.insertion_code, Some('A'));
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.residue_type, Some(ResidueType::Glycine));
        assert_eq!(residue.chain_id, chain_id);
        assert!(residue.atoms().is_empty());
    }

    #[test]
    fn first_atom_with_a_name_wins_the_lookup() {
        let mut residue = Residue::new(5, None, "ALA", dummy_chain_id(2));
        residue.add_atom("CA", dummy_atom_id(1));
        residue.add_atom("CA", dummy_atom_id(2));
        assert_eq!(residue.atoms().len(), 2);
        assert_eq!(residue.get_atom_id_by_name("CA"), Some(dummy_atom_id(1)));
        assert!(residue.get_atom_id_by_name("CB").is_none());
    }

    #[test]
    fn protein_and_proline_flags_follow_the_residue_name() {
        let chain_id = dummy_chain_id(3);
        assert!(Residue::new(1, None, "PRO", chain_id).is_proline());
        assert!(Residue::new(1, None, "PRO", chain_id).is_protein());
        assert!(!Residue::new(1, None, "ALA", chain_id).is_proline());
        assert!(!Residue::new(1, None, "HOH", chain_id).is_protein());
        assert!(!Residue::new(1, None, "HOH", chain_id).is_proline());
    }

    #[test]
    fn residue_type_parses_names_and_variants() {
        assert_eq!(ResidueType::from_name("ala"), Some(ResidueType::Alanine));
        assert_eq!(ResidueType::from_name(" HSE "), Some(ResidueType::HistidineEpsilon));
        assert_eq!(ResidueType::from_name("CYX"), Some(ResidueType::Cysteine));
        assert_eq!(ResidueType::from_name("MSE"), Some(ResidueType::Methionine));
        assert_eq!(ResidueType::from_name("HOH"), None);
        assert_eq!(
            "LIG".parse::<ResidueType>(),
            Err(ParseResidueTypeError("LIG".to_string()))
        );
        assert_eq!("trp".parse::<ResidueType>(), Ok(ResidueType::Tryptophan));
    }

    #[test]
    fn residue_type_displays_three_letter_code() {
        assert_eq!(ResidueType::GlutamicAcid.to_string(), "GLU");
        assert_eq!(ResidueType::HistidineProtonated.to_string(), "HIP");
    }
}
