//! # Render Module
//!
//! Raster images of a structure, written with the `plotters` bitmap backend. The image
//! format follows the output file extension. No text is drawn, so rendering needs no
//! system fonts.
//!
//! - [`ramachandran`] - Density-coloured phi/psi scatter plot
//! - [`trace`] - C-alpha trace projected onto the XY plane
//! - [`colormap`] - Sequential colormaps shared by both renderers

pub mod colormap;
pub mod ramachandran;
pub mod trace;

use crate::analysis::error::MetricError;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Raster formats the bitmap encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

/// Checks the output extension and creates missing parent directories.
pub(crate) fn prepare_output(path: &Path) -> Result<ImageFormat, MetricError> {
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        MetricError::Plot(format!(
            "unsupported image extension for '{}' (expected jpg, png or bmp)",
            path.display()
        ))
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| MetricError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(format)
}

pub(crate) fn plot_error(err: impl Display) -> MetricError {
    MetricError::Plot(err.to_string())
}

/// Marker radius in pixels at the configured resolution.
pub(crate) fn marker_radius(dpi: u32) -> i32 {
    ((3.0 * dpi as f64 / 100.0).round() as i32).max(1)
}
