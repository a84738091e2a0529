//! # Spatial Module
//!
//! Neighbor search primitives used by the hydrogen bond model on large structures.
//!
//! - [`grid`] - Uniform grid answering "everything within radius r of a point"
//! - [`pairs`] - Fixed-capacity set of unordered index pairs
//!
//! Both structures are built once per run and never resized afterwards.

pub mod grid;
pub mod pairs;
