//! Provides input functionality for molecular file formats.
//!
//! Structures are read through the [`traits::MolecularFile`] interface; [`pdb`] implements it
//! for fixed-column Protein Data Bank files.

pub mod pdb;
pub mod traits;
