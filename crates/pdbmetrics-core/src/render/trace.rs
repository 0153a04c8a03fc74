use super::{marker_radius, plot_error, prepare_output};
use crate::analysis::config::PlotConfig;
use crate::analysis::error::MetricError;
use crate::core::models::chain::ChainType;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::centroid;
use nalgebra::Point3;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, instrument};

/// Longest CA-CA distance drawn as a connected trace segment.
const MAX_CA_CA_DISTANCE: f64 = 4.2;
const PADDING_ANGSTROMS: f64 = 2.0;

/// C-alpha positions of each protein chain, in residue order.
fn ca_traces(system: &MolecularSystem) -> Vec<Vec<Point3<f64>>> {
    system
        .chains_iter()
        .filter(|(_, chain)| chain.chain_type == ChainType::Protein)
        .map(|(chain_id, _)| {
            system
                .chain_residues(chain_id)
                .filter_map(|(residue_id, _)| system.residue_atom_by_name(residue_id, "CA"))
                .map(|atom| atom.position)
                .collect::<Vec<_>>()
        })
        .filter(|trace| !trace.is_empty())
        .collect()
}

/// Draws the C-alpha trace of every protein chain, projected onto the XY plane and
/// coloured from N- to C-terminus through the configured colormap.
#[instrument(skip(system, config))]
pub fn render_trace(
    system: &MolecularSystem,
    output: &Path,
    config: &PlotConfig,
) -> Result<(), MetricError> {
    let traces = ca_traces(system);
    let all: Vec<Point3<f64>> = traces.iter().flatten().copied().collect();
    let center = centroid(&all).ok_or(MetricError::NoAtoms)?;
    prepare_output(output)?;

    let (width, height) = config.pixel_size();
    let aspect = width as f64 / height as f64;
    let half_extent = all
        .iter()
        .map(|p| ((p.x - center.x).abs() / aspect).max((p.y - center.y).abs()))
        .fold(0.0, f64::max)
        + PADDING_ANGSTROMS;
    let x_range = (center.x - half_extent * aspect)..(center.x + half_extent * aspect);
    let y_range = (center.y - half_extent)..(center.y + half_extent);

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin((config.dpi / 5).max(4))
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    let total = all.len().saturating_sub(1).max(1) as f64;
    let shade = |k: usize| config.colormap.color(k as f64 / total).mix(config.alpha);
    let radius = marker_radius(config.dpi);

    let mut offset = 0;
    for trace in &traces {
        for (k, pair) in trace.windows(2).enumerate() {
            if (pair[1] - pair[0]).norm() > MAX_CA_CA_DISTANCE {
                continue;
            }
            chart
                .draw_series(LineSeries::new(
                    [(pair[0].x, pair[0].y), (pair[1].x, pair[1].y)],
                    shade(offset + k).stroke_width(2),
                ))
                .map_err(plot_error)?;
        }
        chart
            .draw_series(trace.iter().enumerate().map(|(k, p)| {
                Circle::new((p.x, p.y), radius, shade(offset + k).filled())
            }))
            .map_err(plot_error)?;
        offset += trace.len();
    }

    root.present().map_err(plot_error)?;
    debug!(ca_atoms = all.len(), chains = traces.len(), "Trace image written.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use tempfile::tempdir;

    fn helix_like_chain(n: usize) -> MolecularSystem {
        let mut system = MolecularSystem::new();
        let chain_id = system.add_chain('A', ChainType::Protein);
        for i in 0..n {
            let residue_id = system
                .add_residue(chain_id, i as isize + 1, None, "ALA")
                .unwrap();
            let angle = i as f64 * 100f64.to_radians();
            let position = Point3::new(2.3 * angle.cos(), 2.3 * angle.sin(), 1.5 * i as f64);
            system
                .add_atom_to_residue(residue_id, Atom::new("CA", residue_id, position))
                .unwrap();
        }
        system
    }

    #[test]
    fn collects_one_trace_per_protein_chain() {
        let system = helix_like_chain(5);
        let traces = ca_traces(&system);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].len(), 5);
    }

    #[test]
    fn writes_trace_image() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("trace.png");
        render_trace(&helix_like_chain(12), &output, &PlotConfig::default()).unwrap();
        assert!(output.is_file());
    }

    #[test]
    fn structure_without_ca_atoms_is_an_error() {
        let mut system = MolecularSystem::new();
        let chain_id = system.add_chain('A', ChainType::Protein);
        let residue_id = system.add_residue(chain_id, 1, None, "ALA").unwrap();
        system
            .add_atom_to_residue(residue_id, Atom::new("N", residue_id, Point3::origin()))
            .unwrap();
        let dir = tempdir().unwrap();
        let output = dir.path().join("trace.png");
        assert!(matches!(
            render_trace(&system, &output, &PlotConfig::default()),
            Err(MetricError::NoAtoms)
        ));
    }
}
