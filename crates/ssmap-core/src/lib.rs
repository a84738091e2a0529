//! # ssmap Core Library
//!
//! Secondary structure assignment for protein structures following the DSSP method of
//! Kabsch and Sander: backbone hydrogen bond energies, helices, beta bridges, ladders and
//! sheets, turns and bends.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the three-layer split of its data model, logic and public API.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), backbone
//!   geometry helpers and the spatial data structures (`SpatialIndex`, `PairSet`) used to
//!   find residue neighbors in large structures.
//!
//! - **[`engine`]: The Logic Core.** Builds a dense residue frame, evaluates the hydrogen
//!   bond model and runs the classifier that produces a `SecondaryStructureMap`.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together: one call assigns
//!   secondary structure to a system, another turns the result into helices, strands and
//!   sheets.

pub mod core;
pub mod engine;
pub mod workflows;
