use super::config::{ConfigError, SasaConfig};
use super::error::MetricError;
use crate::core::models::atom::RecordKind;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::golden_sphere_points;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const DEFAULT_VDW_RADIUS: f64 = 1.80;

/// Bondi van der Waals radius in Angstroms for an element symbol.
pub fn vdw_radius(element: &str) -> f64 {
    match element {
        "H" | "D" => 1.10,
        "C" => 1.70,
        "N" => 1.55,
        "O" => 1.52,
        "S" => 1.80,
        "P" => 1.80,
        "SE" => 1.90,
        "F" => 1.47,
        "CL" => 1.75,
        "BR" => 1.85,
        "I" => 1.98,
        _ => DEFAULT_VDW_RADIUS,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SasaResult {
    /// Total accessible area in square Angstroms.
    pub total: f64,
    /// Accessible area summed per residue. Residues with no eligible atom are absent.
    pub per_residue: HashMap<ResidueId, f64>,
    pub atom_count: usize,
}

struct SurfaceAtom {
    residue_id: ResidueId,
    center: Point3<f64>,
    /// Van der Waals radius extended by the probe radius.
    radius: f64,
}

fn collect_surface_atoms(system: &MolecularSystem, config: &SasaConfig) -> Vec<SurfaceAtom> {
    system
        .atoms_iter()
        .filter(|(_, atom)| config.include_hetatm || atom.record == RecordKind::Atom)
        .filter(|(_, atom)| config.include_hydrogens || !atom.is_hydrogen())
        .map(|(_, atom)| SurfaceAtom {
            residue_id: atom.residue_id,
            center: atom.position,
            radius: vdw_radius(&atom.element) + config.probe_radius,
        })
        .collect()
}

/// Computes solvent-accessible surface area with the Shrake-Rupley algorithm.
///
/// Each eligible atom is covered with `sphere_points` test points placed on its
/// probe-extended sphere; a point is accessible when it lies outside every neighbouring
/// extended sphere. The atom's area is its sphere area times the accessible fraction.
#[instrument(skip_all, name = "shrake_rupley")]
pub fn calculate_sasa(
    system: &MolecularSystem,
    config: &SasaConfig,
) -> Result<SasaResult, MetricError> {
    if config.sphere_points == 0 {
        return Err(ConfigError::InvalidValue {
            parameter: "sphere_points",
            reason: "must be at least 1".into(),
        }
        .into());
    }
    let atoms = collect_surface_atoms(system, config);
    if atoms.is_empty() {
        return Err(MetricError::NoAtoms);
    }

    let positions: Vec<[f64; 3]> = atoms
        .iter()
        .map(|a| [a.center.x, a.center.y, a.center.z])
        .collect();
    let kdtree: KdTree<f64, 3> = (&positions).into();
    let max_radius = atoms.iter().map(|a| a.radius).fold(0.0, f64::max);
    let sphere = golden_sphere_points(config.sphere_points);

    #[cfg(not(feature = "parallel"))]
    let iterator = atoms.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = atoms.par_iter().enumerate();

    let areas: Vec<f64> = iterator
        .map(|(index, atom)| atom_area(index, atom, &atoms, &kdtree, max_radius, &sphere))
        .collect();

    let mut per_residue: HashMap<ResidueId, f64> = HashMap::new();
    for (atom, area) in atoms.iter().zip(&areas) {
        *per_residue.entry(atom.residue_id).or_insert(0.0) += area;
    }
    let total = areas.iter().sum();

    debug!(atoms = atoms.len(), total_area = total, "Surface area computed.");
    Ok(SasaResult {
        total,
        per_residue,
        atom_count: atoms.len(),
    })
}

fn atom_area(
    index: usize,
    atom: &SurfaceAtom,
    atoms: &[SurfaceAtom],
    kdtree: &KdTree<f64, 3>,
    max_radius: f64,
    sphere: &[Vector3<f64>],
) -> f64 {
    let query = [atom.center.x, atom.center.y, atom.center.z];
    let cutoff = atom.radius + max_radius;

    let neighbours: Vec<&SurfaceAtom> = kdtree
        .within_unsorted::<SquaredEuclidean>(&query, cutoff * cutoff)
        .into_iter()
        .map(|n| n.item as usize)
        .filter(|&j| j != index)
        .map(|j| &atoms[j])
        .filter(|other| {
            let reach = atom.radius + other.radius;
            (other.center - atom.center).norm_squared() < reach * reach
        })
        .collect();

    let accessible = sphere
        .iter()
        .filter(|direction| {
            let point = atom.center + *direction * atom.radius;
            neighbours
                .iter()
                .all(|other| (point - other.center).norm_squared() >= other.radius * other.radius)
        })
        .count();

    4.0 * PI * atom.radius * atom.radius * accessible as f64 / sphere.len() as f64
}

/// Total accessible area divided by the number of residues of the configured chain.
///
/// The numerator covers every eligible atom of the structure; the denominator counts the
/// chain's residues that contributed at least one eligible atom.
pub fn mean_residue_sasa(
    system: &MolecularSystem,
    config: &SasaConfig,
) -> Result<f64, MetricError> {
    let chain_id = system
        .find_chain_by_id(config.chain_id)
        .ok_or(MetricError::ChainNotFound(config.chain_id))?;

    let result = calculate_sasa(system, config)?;
    let residue_count = system
        .chain_residues(chain_id)
        .filter(|(id, _)| result.per_residue.contains_key(id))
        .count();
    if residue_count == 0 {
        return Err(MetricError::EmptyChain(config.chain_id));
    }

    Ok(result.total / residue_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::SasaConfigBuilder;
    use crate::core::models::atom::{Atom, AtomRole};
    use crate::core::models::chain::ChainType;

    fn add_atom(
        system: &mut MolecularSystem,
        chain: char,
        residue: isize,
        name: &str,
        position: Point3<f64>,
        record: RecordKind,
    ) {
        let chain_id = system.add_chain(chain, ChainType::Protein);
        let residue_id = system.add_residue(chain_id, residue, None, "ALA").unwrap();
        let mut atom = Atom::new(name, residue_id, position);
        atom.record = record;
        atom.role = AtomRole::classify(record, "ALA", name);
        system.add_atom_to_residue(residue_id, atom).unwrap();
    }

    fn sphere_area(radius: f64) -> f64 {
        4.0 * PI * radius * radius
    }

    #[test]
    fn isolated_atom_is_fully_exposed() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "CA", Point3::origin(), RecordKind::Atom);

        let result = calculate_sasa(&system, &SasaConfig::default()).unwrap();
        let expected = sphere_area(1.70 + 1.4);
        assert!((result.total - expected).abs() < 1e-9);
        assert_eq!(result.atom_count, 1);
    }

    #[test]
    fn overlapping_atoms_bury_part_of_each_other() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "CA", Point3::origin(), RecordKind::Atom);
        add_atom(&mut system, 'A', 1, "CB", Point3::new(1.5, 0.0, 0.0), RecordKind::Atom);

        let result = calculate_sasa(&system, &SasaConfig::default()).unwrap();
        let free = 2.0 * sphere_area(1.70 + 1.4);
        assert!(result.total < free);
        assert!(result.total > 0.5 * free);
    }

    #[test]
    fn distant_atoms_do_not_interact() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "CA", Point3::origin(), RecordKind::Atom);
        add_atom(&mut system, 'A', 2, "CA", Point3::new(20.0, 0.0, 0.0), RecordKind::Atom);

        let result = calculate_sasa(&system, &SasaConfig::default()).unwrap();
        assert!((result.total - 2.0 * sphere_area(3.1)).abs() < 1e-9);
        assert_eq!(result.per_residue.len(), 2);
    }

    #[test]
    fn hydrogens_and_hetatm_are_excluded_by_default() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "CA", Point3::origin(), RecordKind::Atom);
        add_atom(&mut system, 'A', 1, "HA", Point3::new(30.0, 0.0, 0.0), RecordKind::Atom);
        add_atom(&mut system, 'B', 9, "O", Point3::new(-30.0, 0.0, 0.0), RecordKind::Hetatm);

        let default = calculate_sasa(&system, &SasaConfig::default()).unwrap();
        assert_eq!(default.atom_count, 1);

        let everything = SasaConfigBuilder::new()
            .include_hetatm(true)
            .include_hydrogens(true)
            .build()
            .unwrap();
        assert_eq!(calculate_sasa(&system, &everything).unwrap().atom_count, 3);
    }

    #[test]
    fn mean_divides_total_by_chain_residue_count() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "CA", Point3::origin(), RecordKind::Atom);
        add_atom(&mut system, 'A', 2, "CA", Point3::new(20.0, 0.0, 0.0), RecordKind::Atom);
        add_atom(&mut system, 'B', 1, "CA", Point3::new(40.0, 0.0, 0.0), RecordKind::Atom);

        let mean = mean_residue_sasa(&system, &SasaConfig::default()).unwrap();
        assert!((mean - 3.0 * sphere_area(3.1) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn missing_chain_is_reported() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'B', 1, "CA", Point3::origin(), RecordKind::Atom);
        let err = mean_residue_sasa(&system, &SasaConfig::default()).unwrap_err();
        assert!(matches!(err, MetricError::ChainNotFound('A')));
    }

    #[test]
    fn chain_with_only_excluded_atoms_is_empty() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "O", Point3::origin(), RecordKind::Hetatm);
        add_atom(&mut system, 'B', 1, "CA", Point3::new(10.0, 0.0, 0.0), RecordKind::Atom);
        let err = mean_residue_sasa(&system, &SasaConfig::default()).unwrap_err();
        assert!(matches!(err, MetricError::EmptyChain('A')));
    }

    #[test]
    fn structure_without_eligible_atoms_fails() {
        let mut system = MolecularSystem::new();
        add_atom(&mut system, 'A', 1, "O", Point3::origin(), RecordKind::Hetatm);
        assert!(matches!(
            calculate_sasa(&system, &SasaConfig::default()),
            Err(MetricError::NoAtoms)
        ));
    }

    #[test]
    fn unknown_elements_use_default_radius() {
        assert_eq!(vdw_radius("XX"), DEFAULT_VDW_RADIUS);
        assert_eq!(vdw_radius("SE"), 1.90);
    }
}
