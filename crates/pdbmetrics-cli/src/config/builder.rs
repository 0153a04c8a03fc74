use super::defaults::{CONFIG_FILE_NAME, DefaultsConfig};
use super::file::FileConfig;
use super::models::AppConfig;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use pdbmetrics::analysis::config::{PathLayoutBuilder, PlotConfigBuilder, SasaConfigBuilder};
use pdbmetrics::core::residues::PkaModel;
use pdbmetrics::render::colormap::Colormap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Location of the per-user configuration file, whether or not it exists.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "pdbmetrics", "pdbmetrics")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Resolves the settings from built-in defaults, the configuration file and `-S` overrides,
/// in increasing order of precedence.
///
/// An explicit `config_path` must exist; otherwise the per-user file is used when present.
pub fn build_config(config_path: Option<&Path>, set_values: &[String]) -> Result<AppConfig> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => match user_config_path().filter(|p| p.is_file()) {
            Some(path) => FileConfig::from_file(&path)?,
            None => FileConfig::default(),
        },
    };
    let file_config = apply_set_values(file_config, set_values)?;
    merge(file_config)
}

fn merge(mut file_config: FileConfig) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let paths = file_config.paths.take().unwrap_or_default();
    let layout = PathLayoutBuilder::new()
        .models_dir(paths.models_dir.unwrap_or(defaults.layout.models_dir))
        .model_extension(
            paths
                .model_extension
                .unwrap_or(defaults.layout.model_extension),
        )
        .plots_dir(paths.plots_dir.unwrap_or(defaults.layout.plots_dir))
        .plot_extension(paths.plot_extension.unwrap_or(defaults.layout.plot_extension))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let sasa_file = file_config.sasa.take().unwrap_or_default();
    let sasa = SasaConfigBuilder::new()
        .chain_id(sasa_file.chain.unwrap_or(defaults.sasa.chain_id))
        .probe_radius(sasa_file.probe_radius.unwrap_or(defaults.sasa.probe_radius))
        .sphere_points(sasa_file.sphere_points.unwrap_or(defaults.sasa.sphere_points))
        .include_hetatm(
            sasa_file
                .include_hetatm
                .unwrap_or(defaults.sasa.include_hetatm),
        )
        .include_hydrogens(
            sasa_file
                .include_hydrogens
                .unwrap_or(defaults.sasa.include_hydrogens),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let plot_file = file_config.plot.take().unwrap_or_default();
    let colormap = match plot_file.colormap {
        Some(name) => parse_named::<Colormap>(&name)?,
        None => defaults.plot.colormap,
    };
    let plot = PlotConfigBuilder::new()
        .colormap(colormap)
        .alpha(plot_file.alpha.unwrap_or(defaults.plot.alpha))
        .dpi(plot_file.dpi.unwrap_or(defaults.plot.dpi))
        .width_inches(plot_file.width_inches.unwrap_or(defaults.plot.width_inches))
        .height_inches(
            plot_file
                .height_inches
                .unwrap_or(defaults.plot.height_inches),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let pka_model = match file_config.isoelectric.take().and_then(|i| i.model) {
        Some(name) => parse_named::<PkaModel>(&name)?,
        None => defaults.pka_model,
    };

    debug!(?layout, ?sasa, ?plot, %pka_model, "Configuration resolved.");
    Ok(AppConfig {
        layout,
        sasa,
        plot,
        pka_model,
    })
}

fn parse_named<T>(name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    name.parse().map_err(|e: T::Err| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn parse_char(key: &str, value: &str) -> Result<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::Config(format!(
            "Invalid single-character value for {}: {}",
            key, value
        ))),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "paths.models-dir" => {
                config.paths.get_or_insert_with(Default::default).models_dir =
                    Some(PathBuf::from(value_str));
            }
            "paths.model-extension" => {
                config.paths.get_or_insert_with(Default::default).model_extension =
                    Some(value_str.to_string());
            }
            "paths.plots-dir" => {
                config.paths.get_or_insert_with(Default::default).plots_dir =
                    Some(PathBuf::from(value_str));
            }
            "paths.plot-extension" => {
                config.paths.get_or_insert_with(Default::default).plot_extension =
                    Some(value_str.to_string());
            }
            "sasa.chain" => {
                config.sasa.get_or_insert_with(Default::default).chain =
                    Some(parse_char(key, value_str)?);
            }
            "sasa.probe-radius" => {
                config.sasa.get_or_insert_with(Default::default).probe_radius =
                    Some(parse_value(key, value_str, "float")?);
            }
            "sasa.sphere-points" => {
                config.sasa.get_or_insert_with(Default::default).sphere_points =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "sasa.include-hetatm" => {
                config.sasa.get_or_insert_with(Default::default).include_hetatm =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "sasa.include-hydrogens" => {
                config
                    .sasa
                    .get_or_insert_with(Default::default)
                    .include_hydrogens = Some(parse_value(key, value_str, "boolean")?);
            }
            "plot.colormap" => {
                config.plot.get_or_insert_with(Default::default).colormap =
                    Some(value_str.to_string());
            }
            "plot.alpha" => {
                config.plot.get_or_insert_with(Default::default).alpha =
                    Some(parse_value(key, value_str, "float")?);
            }
            "plot.dpi" => {
                config.plot.get_or_insert_with(Default::default).dpi =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "plot.width-inches" => {
                config.plot.get_or_insert_with(Default::default).width_inches =
                    Some(parse_value(key, value_str, "float")?);
            }
            "plot.height-inches" => {
                config.plot.get_or_insert_with(Default::default).height_inches =
                    Some(parse_value(key, value_str, "float")?);
            }
            "isoelectric.model" => {
                config.isoelectric.get_or_insert_with(Default::default).model =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
