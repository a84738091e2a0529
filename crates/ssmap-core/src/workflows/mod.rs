//! # Workflows Module
//!
//! High-level entry points of ssmap. A workflow takes a
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem) and a
//! [`DsspConfig`](crate::engine::config::DsspConfig), drives the engine stages with
//! progress reporting and hands back the finished assignment.
//!
//! - **Assignment** ([`assign`]) - Hydrogen bonds and classification for one structure,
//!   or a batch of independent structures
//! - **Structural Elements** ([`elements`]) - Helices, strands and sheets as residue
//!   ranges derived from an assignment

pub mod assign;
pub mod elements;
