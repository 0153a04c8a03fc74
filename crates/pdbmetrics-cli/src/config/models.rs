use pdbmetrics::analysis::config::{PathLayout, PlotConfig, SasaConfig};
use pdbmetrics::core::residues::PkaModel;

/// Fully resolved settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub layout: PathLayout,
    pub sasa: SasaConfig,
    pub plot: PlotConfig,
    pub pka_model: PkaModel,
}
