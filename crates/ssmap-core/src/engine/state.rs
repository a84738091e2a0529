use crate::core::models::ResidueId;
use std::collections::HashMap;
use std::fmt;

/// DSSP secondary structure class of one residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryStructure {
    #[default]
    Loop,
    AlphaHelix,
    ThreeTenHelix,
    PiHelix,
    Strand,
    Bridge,
    Turn,
    Bend,
}

impl SecondaryStructure {
    /// The one-letter DSSP code; loops are a blank.
    pub fn code(&self) -> char {
        match self {
            SecondaryStructure::Loop => ' ',
            SecondaryStructure::AlphaHelix => 'H',
            SecondaryStructure::ThreeTenHelix => 'G',
            SecondaryStructure::PiHelix => 'I',
            SecondaryStructure::Strand => 'E',
            SecondaryStructure::Bridge => 'B',
            SecondaryStructure::Turn => 'T',
            SecondaryStructure::Bend => 'S',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            ' ' | '-' => Some(SecondaryStructure::Loop),
            'H' => Some(SecondaryStructure::AlphaHelix),
            'G' => Some(SecondaryStructure::ThreeTenHelix),
            'I' => Some(SecondaryStructure::PiHelix),
            'E' => Some(SecondaryStructure::Strand),
            'B' => Some(SecondaryStructure::Bridge),
            'T' => Some(SecondaryStructure::Turn),
            'S' => Some(SecondaryStructure::Bend),
            _ => None,
        }
    }

    pub fn is_helix(&self) -> bool {
        matches!(
            self,
            SecondaryStructure::AlphaHelix
                | SecondaryStructure::ThreeTenHelix
                | SecondaryStructure::PiHelix
        )
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Position of a residue relative to an `n`-turn, the bond `i + n -> i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelixFlag {
    Start,
    Middle,
    End,
    StartAndEnd,
}

impl HelixFlag {
    pub fn is_start(&self) -> bool {
        matches!(self, HelixFlag::Start | HelixFlag::StartAndEnd)
    }
}

/// Turn strides examined for helices: 3-10, alpha and pi.
pub const HELIX_STRIDES: [usize; 3] = [3, 4, 5];

/// Turn flags of every residue for each stride in [`HELIX_STRIDES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelixFlagTable {
    flags: [Vec<Option<HelixFlag>>; 3],
}

impl HelixFlagTable {
    pub fn new(len: usize) -> Self {
        Self {
            flags: [vec![None; len], vec![None; len], vec![None; len]],
        }
    }

    fn lane(&self, stride: usize) -> Option<&Vec<Option<HelixFlag>>> {
        self.flags.get(stride.checked_sub(3)?)
    }

    pub fn get(&self, stride: usize, residue: usize) -> Option<HelixFlag> {
        self.lane(stride)?.get(residue).copied().flatten()
    }

    pub fn is_start(&self, stride: usize, residue: usize) -> bool {
        self.get(stride, residue).is_some_and(|f| f.is_start())
    }

    pub(crate) fn set(&mut self, stride: usize, residue: usize, flag: HelixFlag) {
        if let Some(slot) = stride
            .checked_sub(3)
            .and_then(|lane| self.flags.get_mut(lane))
            .and_then(|lane| lane.get_mut(residue))
        {
            *slot = Some(flag);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeKind {
    Parallel,
    Antiparallel,
}

/// A run of consecutive bridge partners; after merging, a ladder.
///
/// `i` and `j` hold dense residue indices and both ascend. In a parallel bridge `i[k]`
/// faces `j[k]`; in an antiparallel one it faces `j[len - 1 - k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bridge {
    pub kind: BridgeKind,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub chain_i: usize,
    pub chain_j: usize,
    pub ladder: usize,
    pub sheet: usize,
}

impl Bridge {
    pub fn is_parallel(&self) -> bool {
        self.kind == BridgeKind::Parallel
    }

    pub fn len(&self) -> usize {
        self.i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetaPartner {
    pub partner: usize,
    pub ladder: usize,
    pub parallel: bool,
}

/// Result of a classification run: one code per residue plus the ladder, sheet and
/// helix detail it was derived from. Indices are dense frame indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryStructureMap {
    pub(crate) residue_ids: Vec<ResidueId>,
    pub(crate) index: HashMap<ResidueId, usize>,
    pub(crate) structures: Vec<SecondaryStructure>,
    pub(crate) sheets: Vec<Option<usize>>,
    pub(crate) beta_partners: Vec<[Option<BetaPartner>; 2]>,
    pub(crate) ladders: Vec<Bridge>,
    pub(crate) helix_flags: HelixFlagTable,
    pub(crate) bends: Vec<bool>,
}

impl SecondaryStructureMap {
    pub(crate) fn new(residue_ids: Vec<ResidueId>) -> Self {
        let len = residue_ids.len();
        let index = residue_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        Self {
            residue_ids,
            index,
            structures: vec![SecondaryStructure::Loop; len],
            sheets: vec![None; len],
            beta_partners: vec![[None; 2]; len],
            ladders: Vec::new(),
            helix_flags: HelixFlagTable::new(len),
            bends: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn structures(&self) -> &[SecondaryStructure] {
        &self.structures
    }

    pub fn structure(&self, index: usize) -> Option<SecondaryStructure> {
        self.structures.get(index).copied()
    }

    /// Structure of a residue looked up by its id in the source system.
    pub fn structure_of(&self, residue_id: ResidueId) -> Option<SecondaryStructure> {
        self.structure(*self.index.get(&residue_id)?)
    }

    pub fn residue_id(&self, index: usize) -> Option<ResidueId> {
        self.residue_ids.get(index).copied()
    }

    pub fn index_of(&self, residue_id: ResidueId) -> Option<usize> {
        self.index.get(&residue_id).copied()
    }

    /// Sheet id (from 1) of a strand or bridge residue.
    pub fn sheet(&self, index: usize) -> Option<usize> {
        self.sheets.get(index).copied().flatten()
    }

    pub fn beta_partners(&self, index: usize) -> [Option<BetaPartner>; 2] {
        self.beta_partners.get(index).copied().unwrap_or([None; 2])
    }

    /// Surviving ladders in ladder id order.
    pub fn ladders(&self) -> &[Bridge] {
        &self.ladders
    }

    pub fn helix_flags(&self) -> &HelixFlagTable {
        &self.helix_flags
    }

    pub fn is_bend(&self, index: usize) -> bool {
        self.bends.get(index).copied().unwrap_or(false)
    }

    /// The classic one-letter DSSP string, one character per residue.
    pub fn to_dssp_string(&self) -> String {
        self.structures.iter().map(SecondaryStructure::code).collect()
    }
}
