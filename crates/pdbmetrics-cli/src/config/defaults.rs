use pdbmetrics::analysis::config::{PathLayout, PlotConfig, SasaConfig};
use pdbmetrics::core::residues::PkaModel;

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub struct DefaultsConfig {
    pub layout: PathLayout,
    pub sasa: SasaConfig,
    pub plot: PlotConfig,
    pub pka_model: PkaModel,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            layout: PathLayout::default(),
            sasa: SasaConfig::default(),
            plot: PlotConfig::default(),
            pka_model: PkaModel::default(),
        }
    }
}
