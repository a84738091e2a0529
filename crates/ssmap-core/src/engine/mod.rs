//! # Engine Module
//!
//! The stateful layer of ssmap: it turns a [`MolecularSystem`](crate::core::models::system::MolecularSystem)
//! into a DSSP secondary structure assignment.
//!
//! ## Architecture
//!
//! - **Frame** ([`frame`]) - Dense, chain-ordered residue table with backbone positions
//! - **Hydrogen Bonds** ([`hbond`]) - Backbone electrostatic energy model and the two best
//!   donor and acceptor partners of every residue
//! - **Classification** ([`classifier`]) - Helix flags, bends, helices, turns, bridges,
//!   ladders and sheets
//! - **State** ([`state`]) - The resulting [`SecondaryStructureMap`](state::SecondaryStructureMap)
//! - **Configuration** ([`config`]) - Thresholds and table sizes, loadable from TOML
//! - **Progress Monitoring** ([`progress`]) - Phase and task reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-level error types
//!
//! Every stage addresses residues by their index in the frame, so results can be mapped
//! back to residue ids through [`frame::ProteinFrame::index_of`].

pub mod classifier;
pub mod config;
pub mod error;
pub mod frame;
pub mod hbond;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
