//! # Core Models Module
//!
//! Data structures representing a parsed protein structure.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with coordinates, element and record kind
//! - [`residue`] - Residue with its amino-acid classification and atom lookup
//! - [`chain`] - Chain organization and classification
//! - [`system`] - Complete molecular system owning all components
//! - [`ids`] - Stable key types for atoms, residues and chains
//!
//! ## Usage
//!
//! ```ignore
//! use pdbmetrics::core::models::{system::MolecularSystem, atom::Atom};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A', ChainType::Protein);
//! let residue_id = system.add_residue(chain_id, 1, None, "ALA")?;
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom)?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
