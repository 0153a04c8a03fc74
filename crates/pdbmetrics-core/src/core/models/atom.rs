use super::ids::ResidueId;
use nalgebra::Point3;

const BACKBONE_ATOM_NAMES: [&str; 5] = ["N", "CA", "C", "O", "OXT"];
const WATER_RESIDUE_NAMES: [&str; 4] = ["HOH", "WAT", "H2O", "DOD"];

/// Represents the role or classification of an atom within a molecular structure.
///
/// Surface-area and plotting code use the role to decide which atoms take part in a
/// calculation (for example, ligands and waters are excluded from protein SASA by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AtomRole {
    /// Backbone atom of a polymer residue (N, CA, C, O, OXT).
    Backbone,
    /// Sidechain atom of a polymer residue.
    Sidechain,
    /// Atom of a small molecule or other hetero group.
    Ligand,
    /// Atom of a solvent water molecule.
    Water,
    /// Unknown or unclassified atom role.
    #[default]
    Other,
}

impl AtomRole {
    /// Classifies an atom from its record kind, residue name and atom name.
    pub fn classify(record: RecordKind, residue_name: &str, atom_name: &str) -> Self {
        match record {
            RecordKind::Atom => {
                if BACKBONE_ATOM_NAMES.contains(&atom_name) {
                    AtomRole::Backbone
                } else {
                    AtomRole::Sidechain
                }
            }
            RecordKind::Hetatm => {
                if WATER_RESIDUE_NAMES.contains(&residue_name) {
                    AtomRole::Water
                } else {
                    AtomRole::Ligand
                }
            }
        }
    }

    pub fn is_polymer(&self) -> bool {
        matches!(self, AtomRole::Backbone | AtomRole::Sidechain)
    }
}

/// The coordinate record an atom was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    #[default]
    Atom,
    Hetatm,
}

/// Represents an atom in a molecular structure with its properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The role or classification of the atom in the molecular structure.
    pub role: AtomRole,
    /// Which coordinate record the atom came from.
    pub record: RecordKind,
    /// Upper-case element symbol (e.g., "C", "SE").
    pub element: String,
    /// Alternate location indicator, if any.
    pub alt_loc: Option<char>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub b_factor: f64,
}

impl Atom {
    /// Creates a new `Atom` with default values for most fields.
    ///
    /// The element is inferred from the atom name; the parser overwrites it when the
    /// element columns are present.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            residue_id,
            role: AtomRole::default(),
            record: RecordKind::default(),
            element: infer_element(name),
            alt_loc: None,
            position,
            occupancy: 1.0,
            b_factor: 0.0,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element.as_str(), "H" | "D")
    }
}

/// Guesses an element symbol from a PDB atom name.
///
/// Only the first alphabetic character is used, which is correct for every standard
/// amino-acid atom. Two-letter elements must come from the element columns.
pub fn infer_element(atom_name: &str) -> String {
    atom_name
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.element, "C");
        assert_eq!(atom.role, AtomRole::Other);
        assert_eq!(atom.record, RecordKind::Atom);
        assert_eq!(atom.occupancy, 1.0);
        assert!(atom.alt_loc.is_none());
    }

    #[test]
    fn infer_element_skips_leading_digits() {
        assert_eq!(infer_element("1HB"), "H");
        assert_eq!(infer_element("OG1"), "O");
        assert_eq!(infer_element(""), "");
    }

    #[test]
    fn hydrogen_and_deuterium_are_detected() {
        let residue_id = ResidueId::default();
        let mut atom = Atom::new("H", residue_id, Point3::origin());
        assert!(atom.is_hydrogen());
        atom.element = "D".into();
        assert!(atom.is_hydrogen());
        atom.element = "HG".into();
        assert!(!atom.is_hydrogen());
    }

    #[test]
    fn classify_distinguishes_backbone_sidechain_water_and_ligand() {
        assert_eq!(
            AtomRole::classify(RecordKind::Atom, "ALA", "CA"),
            AtomRole::Backbone
        );
        assert_eq!(
            AtomRole::classify(RecordKind::Atom, "ALA", "CB"),
            AtomRole::Sidechain
        );
        assert_eq!(
            AtomRole::classify(RecordKind::Hetatm, "HOH", "O"),
            AtomRole::Water
        );
        assert_eq!(
            AtomRole::classify(RecordKind::Hetatm, "HEM", "FE"),
            AtomRole::Ligand
        );
        assert!(AtomRole::Backbone.is_polymer());
        assert!(!AtomRole::Ligand.is_polymer());
    }
}
