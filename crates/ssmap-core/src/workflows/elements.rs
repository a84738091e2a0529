use crate::core::models::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::engine::frame::ProteinFrame;
use crate::engine::state::{SecondaryStructure, SecondaryStructureMap};
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Helix classes as numbered in PDB `HELIX` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelixClass {
    Alpha,
    Pi,
    ThreeTen,
}

impl HelixClass {
    pub fn pdb_class(&self) -> u8 {
        match self {
            HelixClass::Alpha => 1,
            HelixClass::Pi => 3,
            HelixClass::ThreeTen => 5,
        }
    }

    fn of(structure: SecondaryStructure) -> Option<Self> {
        match structure {
            SecondaryStructure::AlphaHelix => Some(HelixClass::Alpha),
            SecondaryStructure::PiHelix => Some(HelixClass::Pi),
            SecondaryStructure::ThreeTenHelix => Some(HelixClass::ThreeTen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `serial` numbers helices from 1 in residue order.
    Helix { class: HelixClass, serial: usize },
    Strand { sheet: usize },
    Bridge,
    Turn,
    Bend,
    Coil,
}

/// A maximal run of residues sharing one structure code (and sheet), within one chain.
///
/// `start` and `end` are inclusive frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralElement {
    pub kind: ElementKind,
    pub start: usize,
    pub end: usize,
}

impl StructuralElement {
    pub fn residue_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// The residue ids this element spans, in order.
    pub fn residue_ids<'m>(
        &self,
        map: &'m SecondaryStructureMap,
    ) -> impl Iterator<Item = ResidueId> + 'm {
        (self.start..=self.end).filter_map(|i| map.residue_id(i))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub id: usize,
    pub strands: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralElements {
    elements: Vec<StructuralElement>,
    sheets: Vec<Sheet>,
}

impl StructuralElements {
    /// Splits the classified residues of `frame` into elements.
    pub fn from_map(frame: &ProteinFrame, map: &SecondaryStructureMap) -> Self {
        let mut elements = Vec::new();
        let mut sheets: BTreeMap<usize, Vec<StructuralElement>> = BTreeMap::new();
        let mut helix_serial = 0;

        let runs = (0..map.len().min(frame.len())).chunk_by(|&i| {
            (
                frame.residues()[i].chain,
                map.structures()[i],
                map.sheet(i),
            )
        });

        for ((_, structure, sheet), run) in &runs {
            let members = run.collect_vec();
            let (Some(&start), Some(&end)) = (members.first(), members.last()) else {
                continue;
            };

            let kind = match (HelixClass::of(structure), structure) {
                (Some(class), _) => {
                    helix_serial += 1;
                    ElementKind::Helix {
                        class,
                        serial: helix_serial,
                    }
                }
                (None, SecondaryStructure::Strand) => ElementKind::Strand {
                    sheet: sheet.unwrap_or_default(),
                },
                (None, SecondaryStructure::Bridge) => ElementKind::Bridge,
                (None, SecondaryStructure::Turn) => ElementKind::Turn,
                (None, SecondaryStructure::Bend) => ElementKind::Bend,
                (None, _) => ElementKind::Coil,
            };

            let element = StructuralElement { kind, start, end };
            if let ElementKind::Strand { sheet } = kind {
                sheets.entry(sheet).or_default().push(element);
            }
            elements.push(element);
        }

        Self {
            elements,
            sheets: sheets
                .into_iter()
                .map(|(id, strands)| Sheet { id, strands })
                .collect(),
        }
    }

    pub fn elements(&self) -> &[StructuralElement] {
        &self.elements
    }

    pub fn helices(&self) -> impl Iterator<Item = &StructuralElement> {
        self.elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Helix { .. }))
    }

    /// Sheets in ascending id order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

/// Builds the element view of an assignment made for `system`.
#[instrument(skip_all, name = "structural_elements")]
pub fn run(system: &MolecularSystem, map: &SecondaryStructureMap) -> StructuralElements {
    let frame = ProteinFrame::from_system(system);
    let elements = StructuralElements::from_map(&frame, map);
    debug!(
        elements = elements.elements().len(),
        helices = elements.helices().count(),
        sheets = elements.sheets().len(),
        "Built structural elements."
    );
    elements
}
