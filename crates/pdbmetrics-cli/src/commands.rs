pub mod batch;
pub mod pi;
pub mod properties;
pub mod ramachandran;
pub mod render;
pub mod sasa;
pub mod sequence;

use pdbmetrics::analysis::error::MetricError;
use pdbmetrics::core::residues::PkaModel;

/// The pKa scale named on the command line, or the configured one.
pub(crate) fn pka_model(name: Option<&str>, configured: PkaModel) -> Result<PkaModel, MetricError> {
    match name {
        Some(name) => Ok(name.parse()?),
        None => Ok(configured),
    }
}
