use super::error::MetricError;
use crate::core::models::atom::RecordKind;
use crate::core::models::chain::ChainType;
use crate::core::models::ids::ChainId;
use crate::core::models::system::MolecularSystem;
use crate::core::residues::{
    AVERAGE_RESIDUE_MASS, DIWV, HYDROPATHY, PkaModel, PkaScale, WATER_MASS, is_sequence_letter,
};

const PH_START: f64 = 6.51;
const PH_MIN: f64 = 0.0;
const PH_MAX: f64 = 14.0;
const PH_PRECISION: f64 = 0.01;
const MAX_BISECTION_STEPS: usize = 64;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Strips whitespace, upper-cases, and validates a one-letter protein sequence.
pub fn normalize_sequence(sequence: &str) -> Result<String, MetricError> {
    let normalized: String = sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return Err(MetricError::EmptySequence);
    }
    if let Some((index, letter)) = normalized
        .chars()
        .enumerate()
        .find(|(_, c)| !is_sequence_letter(*c))
    {
        return Err(MetricError::InvalidSequence {
            letter,
            position: index + 1,
        });
    }
    Ok(normalized)
}

/// Average molecular weight in kDa, rounded to two decimals.
///
/// Letters without a tabulated mass (ambiguity codes) contribute nothing.
pub fn molecular_weight(sequence: &str) -> Result<f64, MetricError> {
    let sequence = normalize_sequence(sequence)?;
    let residues: f64 = sequence
        .chars()
        .map(|c| AVERAGE_RESIDUE_MASS.get(&c).copied().unwrap_or(0.0))
        .sum();
    Ok(round_to((residues + WATER_MASS) / 1000.0, 2))
}

/// Guruprasad instability index, rounded to two decimals. Values above 40 suggest an
/// unstable protein.
pub fn instability_index(sequence: &str) -> Result<f64, MetricError> {
    let sequence = normalize_sequence(sequence)?;
    let letters: Vec<char> = sequence.chars().collect();
    let total: f64 = letters
        .windows(2)
        .map(|pair| {
            let dipeptide: String = pair.iter().collect();
            DIWV.get(dipeptide.as_str()).copied().unwrap_or(0.0)
        })
        .sum();
    Ok(round_to(10.0 / letters.len() as f64 * total, 2))
}

/// Mean Kyte-Doolittle hydropathy over the letters with a known value, rounded to four
/// decimals. A sequence with no such letters scores zero.
pub fn hydropathy(sequence: &str) -> Result<f64, MetricError> {
    let sequence = normalize_sequence(sequence)?;
    let values: Vec<f64> = sequence
        .chars()
        .filter_map(|c| HYDROPATHY.get(&c).copied())
        .collect();
    if values.is_empty() {
        return Ok(0.0);
    }
    Ok(round_to(values.iter().sum::<f64>() / values.len() as f64, 4))
}

#[derive(Debug, Default, Clone, Copy)]
struct ChargedGroups {
    asp: usize,
    glu: usize,
    cys: usize,
    tyr: usize,
    his: usize,
    lys: usize,
    arg: usize,
}

impl ChargedGroups {
    fn count(sequence: &str) -> Self {
        let mut groups = Self::default();
        for c in sequence.chars() {
            match c {
                'D' => groups.asp += 1,
                'E' => groups.glu += 1,
                'C' => groups.cys += 1,
                'Y' => groups.tyr += 1,
                'H' => groups.his += 1,
                'K' => groups.lys += 1,
                'R' => groups.arg += 1,
                _ => {}
            }
        }
        groups
    }

    fn net_charge(&self, scale: &PkaScale, ph: f64) -> f64 {
        let negative = |n: f64, pka: f64| -n / (1.0 + 10f64.powf(pka - ph));
        let positive = |n: f64, pka: f64| n / (1.0 + 10f64.powf(ph - pka));

        negative(1.0, scale.c_term)
            + negative(self.asp as f64, scale.asp)
            + negative(self.glu as f64, scale.glu)
            + negative(self.cys as f64, scale.cys)
            + negative(self.tyr as f64, scale.tyr)
            + positive(self.his as f64, scale.his)
            + positive(1.0, scale.n_term)
            + positive(self.lys as f64, scale.lys)
            + positive(self.arg as f64, scale.arg)
    }
}

/// Isoelectric point by bisection on the net charge between pH 0 and 14, rounded to two
/// decimals.
pub fn isoelectric_point(sequence: &str, model: PkaModel) -> Result<f64, MetricError> {
    let sequence = normalize_sequence(sequence)?;
    let groups = ChargedGroups::count(&sequence);
    let scale = model.scale();

    let mut ph = PH_START;
    let mut lower = PH_MIN;
    let mut upper = PH_MAX;
    for _ in 0..MAX_BISECTION_STEPS {
        if groups.net_charge(scale, ph) < 0.0 {
            upper = ph;
            ph -= (ph - lower) / 2.0;
        } else {
            lower = ph;
            ph += (upper - ph) / 2.0;
        }
        if ph - lower < PH_PRECISION && upper - ph < PH_PRECISION {
            break;
        }
    }
    Ok(round_to(ph, 2))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceProperties {
    pub molecular_weight: f64,
    pub instability_index: f64,
    pub hydropathy: f64,
    pub isoelectric_point: f64,
}

pub fn sequence_properties(
    sequence: &str,
    model: PkaModel,
) -> Result<SequenceProperties, MetricError> {
    Ok(SequenceProperties {
        molecular_weight: molecular_weight(sequence)?,
        instability_index: instability_index(sequence)?,
        hydropathy: hydropathy(sequence)?,
        isoelectric_point: isoelectric_point(sequence, model)?,
    })
}

/// One-letter sequence read from the ATOM records of a structure.
///
/// Residues appear once each, in file order; names without a one-letter code are skipped.
/// With `chain` unset every protein chain is read in the order it appears.
pub fn sequence_from_structure(
    system: &MolecularSystem,
    chain: Option<char>,
) -> Result<String, MetricError> {
    let chain_ids: Vec<ChainId> = match chain {
        Some(letter) => vec![
            system
                .find_chain_by_id(letter)
                .ok_or(MetricError::ChainNotFound(letter))?,
        ],
        None => system
            .chains_iter()
            .filter(|(_, c)| c.chain_type == ChainType::Protein)
            .map(|(id, _)| id)
            .collect(),
    };

    let sequence: String = chain_ids
        .into_iter()
        .flat_map(|chain_id| system.chain_residues(chain_id))
        .filter(|(residue_id, _)| {
            system
                .residue_atoms(*residue_id)
                .any(|(_, atom)| atom.record == RecordKind::Atom)
        })
        .filter_map(|(_, residue)| residue.amino_acid.map(|aa| aa.one_letter()))
        .collect();

    if sequence.is_empty() {
        return Err(match chain {
            Some(letter) => MetricError::EmptyChain(letter),
            None => MetricError::EmptySequence,
        });
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    const ALL_STANDARD: &str = "ACDEFGHIKLMNPQRSTVWY";

    #[test]
    fn normalize_uppercases_and_strips_whitespace() {
        assert_eq!(normalize_sequence(" ac\nde ").unwrap(), "ACDE");
    }

    #[test]
    fn normalize_rejects_empty_and_invalid_input() {
        assert!(matches!(
            normalize_sequence("  "),
            Err(MetricError::EmptySequence)
        ));
        assert!(matches!(
            normalize_sequence("AC1D"),
            Err(MetricError::InvalidSequence {
                letter: '1',
                position: 3
            })
        ));
    }

    #[test]
    fn molecular_weight_includes_one_water() {
        assert_eq!(molecular_weight(ALL_STANDARD).unwrap(), 2.4);
        assert_eq!(molecular_weight("G").unwrap(), 0.08);
    }

    #[test]
    fn instability_index_uses_dipeptide_weights() {
        assert_eq!(instability_index("AC").unwrap(), 224.7);
        assert_eq!(instability_index("WW").unwrap(), 5.0);
        assert_eq!(instability_index("GG").unwrap(), 0.0);
        assert_eq!(instability_index("K").unwrap(), 0.0);
    }

    #[test]
    fn hydropathy_is_mean_over_known_letters() {
        assert_eq!(hydropathy("AR").unwrap(), -1.35);
        assert_eq!(hydropathy("AX").unwrap(), 1.8);
        assert_eq!(hydropathy("XXX").unwrap(), 0.0);
    }

    #[test]
    fn isoelectric_point_matches_known_values() {
        let pi = |s: &str| isoelectric_point(s, PkaModel::IpcProtein).unwrap();
        assert_eq!(pi(ALL_STANDARD), 6.61);
        assert_eq!(pi("KKKKKK"), 9.84);
        assert_eq!(pi("DDDDDD"), 2.84);
        assert_eq!(pi("G"), 5.98);
    }

    #[test]
    fn isoelectric_point_stays_in_ph_range_for_every_model() {
        for model in [PkaModel::IpcProtein, PkaModel::IpcPeptide, PkaModel::Emboss] {
            let pi = isoelectric_point("MKWVTFISLLFLFSSAYS", model).unwrap();
            assert!(pi > 0.0 && pi < 14.0, "{model}: {pi}");
        }
    }

    #[test]
    fn isoelectric_point_rejects_invalid_sequence() {
        assert!(isoelectric_point("", PkaModel::default()).is_err());
        assert!(isoelectric_point("ACJ", PkaModel::default()).is_err());
    }

    #[test]
    fn properties_bundle_every_metric() {
        let props = sequence_properties(ALL_STANDARD, PkaModel::IpcProtein).unwrap();
        assert_eq!(props.molecular_weight, 2.4);
        assert_eq!(props.isoelectric_point, 6.61);
    }

    fn structure_with(residues: &[(char, isize, &str, RecordKind)]) -> MolecularSystem {
        let mut system = MolecularSystem::new();
        for &(chain, number, name, record) in residues {
            let chain_type = if record == RecordKind::Atom {
                ChainType::Protein
            } else {
                ChainType::Ligand
            };
            let chain_id = system.add_chain(chain, chain_type);
            let residue_id = system.add_residue(chain_id, number, None, name).unwrap();
            for atom_name in ["N", "CA"] {
                let mut atom = Atom::new(atom_name, residue_id, Point3::origin());
                atom.record = record;
                system.add_atom_to_residue(residue_id, atom).unwrap();
            }
        }
        system
    }

    #[test]
    fn sequence_from_structure_reads_each_residue_once() {
        let system = structure_with(&[
            ('A', 1, "MET", RecordKind::Atom),
            ('A', 2, "SEC", RecordKind::Atom),
            ('A', 3, "UNK", RecordKind::Atom),
            ('A', 4, "LYS", RecordKind::Atom),
            ('B', 1, "GLY", RecordKind::Atom),
        ]);
        assert_eq!(sequence_from_structure(&system, Some('A')).unwrap(), "MUK");
        assert_eq!(sequence_from_structure(&system, None).unwrap(), "MUKG");
    }

    #[test]
    fn sequence_from_structure_ignores_hetatm_residues() {
        let system = structure_with(&[
            ('A', 1, "ALA", RecordKind::Atom),
            ('C', 1, "MSE", RecordKind::Hetatm),
        ]);
        assert_eq!(sequence_from_structure(&system, None).unwrap(), "A");
        assert!(matches!(
            sequence_from_structure(&system, Some('C')),
            Err(MetricError::EmptyChain('C'))
        ));
        assert!(matches!(
            sequence_from_structure(&system, Some('Z')),
            Err(MetricError::ChainNotFound('Z'))
        ));
    }
}
