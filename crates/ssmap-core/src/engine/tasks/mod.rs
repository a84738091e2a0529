//! Classification stages.
//!
//! Each stage reads the [`ProteinFrame`](crate::engine::frame::ProteinFrame) and an
//! [`HBondLookup`](crate::engine::hbond::HBondLookup) and writes its findings into a
//! shared [`SecondaryStructureMap`](crate::engine::state::SecondaryStructureMap). Order
//! matters: beta sheets are assigned first and helices second.

pub(crate) mod beta_sheets;
pub(crate) mod helices;
