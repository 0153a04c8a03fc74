use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePathsConfig {
    pub models_dir: Option<PathBuf>,
    pub model_extension: Option<String>,
    pub plots_dir: Option<PathBuf>,
    pub plot_extension: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSasaConfig {
    pub chain: Option<char>,
    pub probe_radius: Option<f64>,
    pub sphere_points: Option<usize>,
    pub include_hetatm: Option<bool>,
    pub include_hydrogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlotConfig {
    pub colormap: Option<String>,
    pub alpha: Option<f64>,
    pub dpi: Option<u32>,
    pub width_inches: Option<f64>,
    pub height_inches: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileIsoelectricConfig {
    pub model: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub paths: Option<FilePathsConfig>,
    pub sasa: Option<FileSasaConfig>,
    pub plot: Option<FilePlotConfig>,
    pub isoelectric: Option<FileIsoelectricConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
