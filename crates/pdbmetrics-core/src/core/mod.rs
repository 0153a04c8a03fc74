//! # Core Module
//!
//! The fundamental building blocks shared by every metric: the molecular data model, the PDB
//! reader, amino-acid reference data and small geometry helpers.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and the system that owns them
//! - **File I/O** ([`io`]) - Reading PDB coordinate files into a [`models::system::MolecularSystem`]
//! - **Reference Data** ([`residues`]) - Amino-acid codes, masses, hydropathy and pKa scales
//! - **Geometry** ([`utils`]) - Dihedral angles and sphere sampling

pub mod io;
pub mod models;
pub mod residues;
pub mod utils;
