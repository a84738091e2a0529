//! # Core Module
//!
//! Foundation layer of the library: the in-memory structure model, the spatial search
//! primitives and small geometric helpers. Nothing here knows about secondary structure.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and the system that owns them
//! - **Neighbor Search** ([`spatial`]) - Uniform grid index and the pair set used to deduplicate candidates
//! - **Utilities** ([`utils`]) - Backbone geometry and atom name recognition

pub mod models;
pub mod spatial;
pub mod utils;
