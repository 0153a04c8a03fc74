//! # Analysis Module
//!
//! Metric computations over a parsed [`MolecularSystem`](crate::core::models::system::MolecularSystem)
//! or a one-letter sequence. Every operation returns `Result<_, MetricError>`; no function in
//! this module signals failure with a numeric placeholder.
//!
//! - [`ramachandran`] - Backbone phi/psi angles and their local density
//! - [`sasa`] - Shrake-Rupley solvent-accessible surface area
//! - [`sequence`] - Molecular weight, instability, hydropathy, isoelectric point and
//!   sequence extraction from structures
//! - [`config`] - Builders for surface-area, plotting and path settings
//! - [`progress`] - Callback-based progress reporting for long workflows

pub mod config;
pub mod error;
pub mod progress;
pub mod ramachandran;
pub mod sasa;
pub mod sequence;
