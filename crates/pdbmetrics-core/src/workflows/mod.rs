//! # Workflows Module
//!
//! Top-level entry points used by the command-line tool. Each workflow loads its input,
//! runs one metric from [`crate::analysis`], and either returns the scalar or writes an image
//! through [`crate::render`].
//!
//! - **Single metrics** ([`metrics`]) - Ramachandran plot, structure rendering, isoelectric
//!   point, mean surface area, sequence properties and sequence extraction
//! - **Batch evaluation** ([`batch`]) - Sequence properties and surface area for every row of
//!   a `protein,fasta` table, with progress reporting
//!
//! Failures are always returned as [`MetricError`](crate::analysis::error::MetricError); callers
//! decide how to present them.

pub mod batch;
pub mod metrics;
