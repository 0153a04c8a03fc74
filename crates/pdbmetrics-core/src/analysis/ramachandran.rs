use super::error::MetricError;
use crate::core::models::chain::ChainType;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::{angular_distance, dihedral_angle};
use nalgebra::Point3;
use tracing::debug;

/// Longest C(i-1)-N(i) distance still treated as a peptide bond.
const MAX_PEPTIDE_BOND_LENGTH: f64 = 2.0;

/// Radius in degrees of the neighbourhood used to estimate point density.
pub const DENSITY_RADIUS_DEGREES: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueDihedrals {
    pub residue_id: ResidueId,
    pub chain_id: char,
    pub residue_number: isize,
    pub residue_name: String,
    pub phi: Option<f64>,
    pub psi: Option<f64>,
}

impl ResidueDihedrals {
    pub fn phi_psi(&self) -> Option<(f64, f64)> {
        Some((self.phi?, self.psi?))
    }
}

struct Backbone {
    residue_id: ResidueId,
    n: Point3<f64>,
    ca: Point3<f64>,
    c: Point3<f64>,
}

fn is_bonded(previous: &Backbone, next: &Backbone) -> bool {
    (next.n - previous.c).norm() <= MAX_PEPTIDE_BOND_LENGTH
}

/// Backbone phi/psi angles for every protein residue that has N, CA and C atoms.
///
/// A residue's phi needs a peptide-bonded predecessor and its psi a peptide-bonded
/// successor, so chain termini and residues next to gaps have `None` for the missing angle.
pub fn backbone_dihedrals(system: &MolecularSystem) -> Vec<ResidueDihedrals> {
    let mut result = Vec::new();

    for (chain_id, chain) in system.chains_iter() {
        if chain.chain_type != ChainType::Protein {
            continue;
        }
        let backbone: Vec<Backbone> = system
            .chain_residues(chain_id)
            .filter_map(|(residue_id, _)| {
                Some(Backbone {
                    residue_id,
                    n: system.residue_atom_by_name(residue_id, "N")?.position,
                    ca: system.residue_atom_by_name(residue_id, "CA")?.position,
                    c: system.residue_atom_by_name(residue_id, "C")?.position,
                })
            })
            .collect();

        for (i, current) in backbone.iter().enumerate() {
            let previous = i
                .checked_sub(1)
                .map(|j| &backbone[j])
                .filter(|p| is_bonded(p, current));
            let next = backbone.get(i + 1).filter(|n| is_bonded(current, n));

            let phi = previous.and_then(|p| dihedral_angle(&p.c, &current.n, &current.ca, &current.c));
            let psi = next.and_then(|n| dihedral_angle(&current.n, &current.ca, &current.c, &n.n));

            let Some(residue) = system.residue(current.residue_id) else {
                continue;
            };
            result.push(ResidueDihedrals {
                residue_id: current.residue_id,
                chain_id: chain.id,
                residue_number: residue.id,
                residue_name: residue.name.clone(),
                phi,
                psi,
            });
        }
    }

    result
}

/// The `(phi, psi)` pairs of every residue where both angles are defined.
pub fn ramachandran_points(system: &MolecularSystem) -> Result<Vec<(f64, f64)>, MetricError> {
    let points: Vec<(f64, f64)> = backbone_dihedrals(system)
        .iter()
        .filter_map(ResidueDihedrals::phi_psi)
        .collect();
    if points.is_empty() {
        return Err(MetricError::NoDihedrals);
    }
    debug!(points = points.len(), "Collected backbone dihedral pairs.");
    Ok(points)
}

/// Relative local density of each point on the periodic phi/psi torus, scaled to `[0, 1]`.
///
/// The density of a point is the number of other points within `radius` degrees of it.
/// When every point has the same density the result is `0.5` throughout.
pub fn point_densities(points: &[(f64, f64)], radius: f64) -> Vec<f64> {
    let radius_sq = radius * radius;
    let counts: Vec<usize> = points
        .iter()
        .map(|&(phi, psi)| {
            points
                .iter()
                .filter(|&&(other_phi, other_psi)| {
                    let d_phi = angular_distance(phi, other_phi);
                    let d_psi = angular_distance(psi, other_psi);
                    d_phi * d_phi + d_psi * d_psi <= radius_sq
                })
                .count()
                - 1
        })
        .collect();

    let min = counts.iter().copied().min().unwrap_or(0);
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == min {
        return vec![0.5; points.len()];
    }
    let span = (max - min) as f64;
    counts.iter().map(|&c| (c - min) as f64 / span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;

    /// Builds a protein chain from explicit backbone coordinates.
    fn chain_from_backbone(residues: &[[Point3<f64>; 3]]) -> MolecularSystem {
        let mut system = MolecularSystem::new();
        let chain_id = system.add_chain('A', ChainType::Protein);
        for (i, atoms) in residues.iter().enumerate() {
            let residue_id = system
                .add_residue(chain_id, i as isize + 1, None, "ALA")
                .unwrap();
            for (name, position) in ["N", "CA", "C"].iter().zip(atoms.iter()) {
                system
                    .add_atom_to_residue(residue_id, Atom::new(name, residue_id, *position))
                    .unwrap();
            }
        }
        system
    }

    /// Three residues on a planar zig-zag; every defined angle is 180 degrees.
    fn extended_tripeptide() -> MolecularSystem {
        let p = |x: f64, y: f64| Point3::new(x, y, 0.0);
        chain_from_backbone(&[
            [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)],
            [p(3.0, 1.0), p(4.0, 0.0), p(5.0, 1.0)],
            [p(6.0, 0.0), p(7.0, 1.0), p(8.0, 0.0)],
        ])
    }

    #[test]
    fn termini_have_one_undefined_angle() {
        let dihedrals = backbone_dihedrals(&extended_tripeptide());
        assert_eq!(dihedrals.len(), 3);
        assert!(dihedrals[0].phi.is_none());
        assert!(dihedrals[0].psi.is_some());
        assert!(dihedrals[2].phi.is_some());
        assert!(dihedrals[2].psi.is_none());
    }

    #[test]
    fn planar_zigzag_is_fully_extended() {
        let dihedrals = backbone_dihedrals(&extended_tripeptide());
        let (phi, psi) = dihedrals[1].phi_psi().unwrap();
        assert!((phi.abs() - 180.0).abs() < 1e-9);
        assert!((psi.abs() - 180.0).abs() < 1e-9);
        assert_eq!(dihedrals[1].residue_number, 2);
        assert_eq!(dihedrals[1].chain_id, 'A');
    }

    #[test]
    fn chain_break_leaves_angles_undefined() {
        let p = |x: f64, y: f64| Point3::new(x, y, 0.0);
        let system = chain_from_backbone(&[
            [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)],
            [p(30.0, 1.0), p(31.0, 0.0), p(32.0, 1.0)],
        ]);
        let dihedrals = backbone_dihedrals(&system);
        assert!(dihedrals.iter().all(|d| d.phi_psi().is_none()));
        assert!(matches!(
            ramachandran_points(&system),
            Err(MetricError::NoDihedrals)
        ));
    }

    #[test]
    fn ramachandran_points_only_keeps_complete_pairs() {
        let points = ramachandran_points(&extended_tripeptide()).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn densities_favour_clustered_points() {
        let points = [(-60.0, -45.0), (-62.0, -40.0), (-58.0, -47.0), (60.0, 45.0)];
        let densities = point_densities(&points, DENSITY_RADIUS_DEGREES);
        assert_eq!(densities[0], 1.0);
        assert_eq!(densities[3], 0.0);
    }

    #[test]
    fn densities_wrap_across_the_periodic_boundary() {
        let points = [(179.0, 0.0), (-179.0, 0.0), (0.0, 90.0)];
        let densities = point_densities(&points, DENSITY_RADIUS_DEGREES);
        assert_eq!(densities, vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn uniform_density_maps_to_midpoint() {
        assert_eq!(point_densities(&[(0.0, 0.0)], 20.0), vec![0.5]);
        assert!(point_densities(&[], 20.0).is_empty());
    }
}
