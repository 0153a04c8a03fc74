use crate::analysis::config::{PathLayout, PlotConfig, SasaConfig};
use crate::analysis::error::MetricError;
use crate::analysis::ramachandran::ramachandran_points;
use crate::analysis::sasa::mean_residue_sasa;
use crate::analysis::sequence::{self, SequenceProperties};
use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::traits::MolecularFile;
use crate::core::models::system::MolecularSystem;
use crate::core::residues::PkaModel;
use crate::render::ramachandran::render_ramachandran;
use crate::render::trace::render_trace;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// What a structure image shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Backbone phi/psi scatter plot.
    #[default]
    Ramachandran,
    /// C-alpha trace projected onto the XY plane.
    Trace,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Ramachandran => f.write_str("ramachandran"),
            RenderStyle::Trace => f.write_str("trace"),
        }
    }
}

#[instrument(level = "debug")]
pub fn load_structure(path: &Path) -> Result<(MolecularSystem, PdbMetadata), MetricError> {
    PdbFile::read_from_path(path).map_err(|source| MetricError::Structure {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders the Ramachandran plot of a model named by identifier or path.
///
/// The output goes to the layout's derived plot path, which is returned.
#[instrument(skip(layout, plot))]
pub fn ramachandran_plot(
    input: &str,
    layout: &PathLayout,
    plot: &PlotConfig,
) -> Result<PathBuf, MetricError> {
    let model_path = layout.resolve_model(input);
    let output = layout.plot_path(input);
    render_structure(&model_path, &output, RenderStyle::Ramachandran, plot)?;
    Ok(output)
}

#[instrument(skip(plot))]
pub fn render_structure(
    input: &Path,
    output: &Path,
    style: RenderStyle,
    plot: &PlotConfig,
) -> Result<(), MetricError> {
    let (system, _) = load_structure(input)?;
    match style {
        RenderStyle::Ramachandran => {
            let points = ramachandran_points(&system)?;
            render_ramachandran(&points, output, plot)?;
        }
        RenderStyle::Trace => render_trace(&system, output, plot)?,
    }
    info!(output = %output.display(), "Image saved.");
    Ok(())
}

#[instrument(skip(sequence), fields(length = sequence.len()))]
pub fn isoelectric_point(sequence: &str, model: PkaModel) -> Result<f64, MetricError> {
    let pi = sequence::isoelectric_point(sequence, model)?;
    info!(pi, "Isoelectric point estimated.");
    Ok(pi)
}

/// Mean solvent-accessible surface area per residue of the configured chain.
#[instrument(skip(config), fields(chain = %config.chain_id))]
pub fn mean_sasa(input: &Path, config: &SasaConfig) -> Result<f64, MetricError> {
    let (system, _) = load_structure(input)?;
    let mean = mean_residue_sasa(&system, config)?;
    info!(mean, "Mean surface area per residue computed.");
    Ok(mean)
}

#[instrument(skip(sequence), fields(length = sequence.len()))]
pub fn properties(sequence: &str, model: PkaModel) -> Result<SequenceProperties, MetricError> {
    sequence::sequence_properties(sequence, model)
}

#[instrument]
pub fn structure_sequence(input: &Path, chain: Option<char>) -> Result<String, MetricError> {
    let (system, _) = load_structure(input)?;
    sequence::sequence_from_structure(&system, chain)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Alanine tripeptide with ideal-ish backbone geometry in chain A.
    pub const TRIPEPTIDE: &str = "\
HEADER    TEST                                    01-JAN-00   TRIP
ATOM      1  N   ALA A   1      -0.525   1.362   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      3  C   ALA A   1       1.520   0.000   0.000  1.00  0.00           C
ATOM      4  O   ALA A   1       2.162  -1.052   0.000  1.00  0.00           O
ATOM      5  CB  ALA A   1      -0.507  -0.774  -1.206  1.00  0.00           C
ATOM      6  N   ALA A   2       2.103   1.195   0.000  1.00  0.00           N
ATOM      7  CA  ALA A   2       3.550   1.330   0.000  1.00  0.00           C
ATOM      8  C   ALA A   2       4.080   2.760   0.300  1.00  0.00           C
ATOM      9  O   ALA A   2       3.330   3.730   0.420  1.00  0.00           O
ATOM     10  CB  ALA A   2       4.050   0.860  -1.360  1.00  0.00           C
ATOM     11  N   ALA A   3       5.400   2.890   0.420  1.00  0.00           N
ATOM     12  CA  ALA A   3       6.030   4.190   0.700  1.00  0.00           C
ATOM     13  C   ALA A   3       7.540   4.080   0.600  1.00  0.00           C
ATOM     14  O   ALA A   3       8.120   3.000   0.480  1.00  0.00           O
ATOM     15  CB  ALA A   3       5.600   5.250  -0.300  1.00  0.00           C
HETATM   16  O   HOH W   1      20.000  20.000  20.000  1.00  0.00           O
END
";

    /// [`TRIPEPTIDE`] with its first residue recorded as HETATM selenomethionine.
    pub fn mse_tripeptide() -> String {
        TRIPEPTIDE
            .lines()
            .map(|line| {
                if line.starts_with("ATOM") && &line[17..26] == "ALA A   1" {
                    format!("HETATM{}MSE{}", &line[6..17], &line[20..])
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn write_model(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
