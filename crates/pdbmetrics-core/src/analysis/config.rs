use crate::render::colormap::Colormap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        parameter,
        reason: reason.into(),
    }
}

pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_SPHERE_POINTS: usize = 100;
pub const DEFAULT_CHAIN: char = 'A';

/// Parameters of the Shrake-Rupley surface area calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct SasaConfig {
    pub probe_radius: f64,
    pub sphere_points: usize,
    /// Chain whose residue count normalises the total area.
    pub chain_id: char,
    pub include_hetatm: bool,
    pub include_hydrogens: bool,
}

impl Default for SasaConfig {
    fn default() -> Self {
        Self {
            probe_radius: DEFAULT_PROBE_RADIUS,
            sphere_points: DEFAULT_SPHERE_POINTS,
            chain_id: DEFAULT_CHAIN,
            include_hetatm: false,
            include_hydrogens: false,
        }
    }
}

#[derive(Default)]
pub struct SasaConfigBuilder {
    probe_radius: Option<f64>,
    sphere_points: Option<usize>,
    chain_id: Option<char>,
    include_hetatm: Option<bool>,
    include_hydrogens: Option<bool>,
}

impl SasaConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn sphere_points(mut self, n: usize) -> Self {
        self.sphere_points = Some(n);
        self
    }
    pub fn chain_id(mut self, chain: char) -> Self {
        self.chain_id = Some(chain);
        self
    }
    pub fn include_hetatm(mut self, include: bool) -> Self {
        self.include_hetatm = Some(include);
        self
    }
    pub fn include_hydrogens(mut self, include: bool) -> Self {
        self.include_hydrogens = Some(include);
        self
    }

    /// Builds the configuration, filling unset fields with the standard values.
    pub fn build(self) -> Result<SasaConfig, ConfigError> {
        let defaults = SasaConfig::default();
        let probe_radius = self.probe_radius.unwrap_or(defaults.probe_radius);
        if !probe_radius.is_finite() || probe_radius <= 0.0 {
            return Err(invalid("probe_radius", "must be a positive number"));
        }
        let sphere_points = self.sphere_points.unwrap_or(defaults.sphere_points);
        if sphere_points == 0 {
            return Err(invalid("sphere_points", "must be at least 1"));
        }
        Ok(SasaConfig {
            probe_radius,
            sphere_points,
            chain_id: self.chain_id.unwrap_or(defaults.chain_id),
            include_hetatm: self.include_hetatm.unwrap_or(defaults.include_hetatm),
            include_hydrogens: self.include_hydrogens.unwrap_or(defaults.include_hydrogens),
        })
    }
}

/// Visual settings shared by every rendered image.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub colormap: Colormap,
    pub alpha: f64,
    pub dpi: u32,
    pub width_inches: f64,
    pub height_inches: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            alpha: 0.75,
            dpi: 100,
            width_inches: 6.4,
            height_inches: 4.8,
        }
    }
}

impl PlotConfig {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_inches * dpi).round() as u32,
            (self.height_inches * dpi).round() as u32,
        )
    }
}

#[derive(Default)]
pub struct PlotConfigBuilder {
    colormap: Option<Colormap>,
    alpha: Option<f64>,
    dpi: Option<u32>,
    width_inches: Option<f64>,
    height_inches: Option<f64>,
}

impl PlotConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = Some(colormap);
        self
    }
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }
    pub fn width_inches(mut self, width: f64) -> Self {
        self.width_inches = Some(width);
        self
    }
    pub fn height_inches(mut self, height: f64) -> Self {
        self.height_inches = Some(height);
        self
    }

    pub fn build(self) -> Result<PlotConfig, ConfigError> {
        let defaults = PlotConfig::default();
        let alpha = self.alpha.unwrap_or(defaults.alpha);
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid("alpha", "must be within [0, 1]"));
        }
        let dpi = self.dpi.unwrap_or(defaults.dpi);
        if dpi == 0 {
            return Err(invalid("dpi", "must be at least 1"));
        }
        let width_inches = self.width_inches.unwrap_or(defaults.width_inches);
        let height_inches = self.height_inches.unwrap_or(defaults.height_inches);
        for (parameter, value) in [("width_inches", width_inches), ("height_inches", height_inches)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(parameter, "must be positive"));
            }
        }
        let config = PlotConfig {
            colormap: self.colormap.unwrap_or(defaults.colormap),
            alpha,
            dpi,
            width_inches,
            height_inches,
        };
        let (w, h) = config.pixel_size();
        if w < 16 || h < 16 {
            return Err(invalid("dpi", format!("canvas of {w}x{h} pixels is too small")));
        }
        Ok(config)
    }
}

/// Directory and extension conventions used to turn bare identifiers into paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub models_dir: PathBuf,
    pub model_extension: String,
    pub plots_dir: PathBuf,
    pub plot_extension: String,
}

impl Default for PathLayout {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("./static/models"),
            model_extension: "pdb".to_string(),
            plots_dir: PathBuf::from("./static/ramachandran_plots"),
            plot_extension: "jpg".to_string(),
        }
    }
}

impl PathLayout {
    /// Resolves a model input to a file path.
    ///
    /// An input naming an existing file is used unchanged; anything else is treated as an
    /// identifier and placed under the models directory with the model extension.
    pub fn resolve_model(&self, input: &str) -> PathBuf {
        let direct = Path::new(input);
        if direct.is_file() {
            return direct.to_path_buf();
        }
        self.models_dir
            .join(format!("{}.{}", input, self.model_extension))
    }

    /// Derived output path for a plot of the given model input.
    pub fn plot_path(&self, input: &str) -> PathBuf {
        let direct = Path::new(input);
        let stem = if direct.is_file() {
            direct
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.to_string())
        } else {
            input.to_string()
        };
        self.plots_dir
            .join(format!("{}.{}", stem, self.plot_extension))
    }
}

#[derive(Default)]
pub struct PathLayoutBuilder {
    models_dir: Option<PathBuf>,
    model_extension: Option<String>,
    plots_dir: Option<PathBuf>,
    plot_extension: Option<String>,
}

impl PathLayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = Some(dir.into());
        self
    }
    pub fn model_extension(mut self, ext: impl Into<String>) -> Self {
        self.model_extension = Some(ext.into());
        self
    }
    pub fn plots_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plots_dir = Some(dir.into());
        self
    }
    pub fn plot_extension(mut self, ext: impl Into<String>) -> Self {
        self.plot_extension = Some(ext.into());
        self
    }

    pub fn build(self) -> Result<PathLayout, ConfigError> {
        let normalize = |ext: String| ext.trim_start_matches('.').to_string();
        let model_extension = normalize(
            self.model_extension
                .ok_or(ConfigError::MissingParameter("model_extension"))?,
        );
        let plot_extension = normalize(
            self.plot_extension
                .ok_or(ConfigError::MissingParameter("plot_extension"))?,
        );
        if model_extension.is_empty() {
            return Err(invalid("model_extension", "must not be empty"));
        }
        if plot_extension.is_empty() {
            return Err(invalid("plot_extension", "must not be empty"));
        }
        Ok(PathLayout {
            models_dir: self
                .models_dir
                .ok_or(ConfigError::MissingParameter("models_dir"))?,
            model_extension,
            plots_dir: self
                .plots_dir
                .ok_or(ConfigError::MissingParameter("plots_dir"))?,
            plot_extension,
        })
    }
}
