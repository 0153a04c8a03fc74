//! # pdbmetrics Core Library
//!
//! Native implementations of the small set of structural and biochemical metrics that are
//! computed for every protein model: backbone dihedral (Ramachandran) plots, structure
//! images, isoelectric point estimation, and mean solvent-accessible surface area.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), the PDB reader,
//!   amino-acid reference tables and geometric helpers.
//!
//! - **[`analysis`]: The Algorithms.** Pure metric computations over a parsed structure or a
//!   sequence (dihedral angles, Shrake-Rupley surface area, sequence properties), together with
//!   their configuration and error types.
//!
//! - **[`workflows`]: The Public API.** Load-compute-emit entry points that take an input path or
//!   sequence and return a typed `Result`, so that a legitimate zero is never confused with a
//!   failed computation.
//!
//! Image output lives in [`render`], which is driven by the workflows.

pub mod analysis;
pub mod core;
pub mod render;
pub mod workflows;
