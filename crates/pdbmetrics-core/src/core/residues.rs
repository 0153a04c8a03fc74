//! Amino-acid reference data: residue codes, average masses, hydropathy, dipeptide
//! instability weights and pKa scales.

use phf::phf_map;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA / A
    Glycine,    // GLY / G
    Isoleucine, // ILE / I
    Leucine,    // LEU / L
    Proline,    // PRO / P
    Valine,     // VAL / V

    // --- Aromatic ---
    Phenylalanine, // PHE / F
    Tryptophan,    // TRP / W
    Tyrosine,      // TYR / Y

    // --- Polar, Uncharged ---
    Asparagine, // ASN / N
    Cysteine,   // CYS / C
    Glutamine,  // GLN / Q
    Serine,     // SER / S
    Threonine,  // THR / T
    Methionine, // MET / M

    // --- Positively Charged (Basic) ---
    Arginine,  // ARG / R
    Histidine, // HIS / H
    Lysine,    // LYS / K

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // ASP / D
    GlutamicAcid, // GLU / E

    // --- Non-standard, genetically encoded ---
    Selenocysteine, // SEC / U
    Pyrrolysine,    // PYL / O
}

static THREE_LETTER_CODES: phf::Map<&'static str, AminoAcid> = phf_map! {
    "ALA" => AminoAcid::Alanine,
    "GLY" => AminoAcid::Glycine,
    "ILE" => AminoAcid::Isoleucine,
    "LEU" => AminoAcid::Leucine,
    "PRO" => AminoAcid::Proline,
    "VAL" => AminoAcid::Valine,
    "PHE" => AminoAcid::Phenylalanine,
    "TRP" => AminoAcid::Tryptophan,
    "TYR" => AminoAcid::Tyrosine,
    "ASN" => AminoAcid::Asparagine,
    "CYS" => AminoAcid::Cysteine,
    "CYX" => AminoAcid::Cysteine,
    "GLN" => AminoAcid::Glutamine,
    "SER" => AminoAcid::Serine,
    "THR" => AminoAcid::Threonine,
    "MET" => AminoAcid::Methionine,
    "MSE" => AminoAcid::Methionine,
    "ARG" => AminoAcid::Arginine,
    "HIS" => AminoAcid::Histidine,
    "HSE" => AminoAcid::Histidine,
    "HSD" => AminoAcid::Histidine,
    "HSP" => AminoAcid::Histidine,
    "HIE" => AminoAcid::Histidine,
    "HID" => AminoAcid::Histidine,
    "HIP" => AminoAcid::Histidine,
    "LYS" => AminoAcid::Lysine,
    "ASP" => AminoAcid::AsparticAcid,
    "GLU" => AminoAcid::GlutamicAcid,
    "SEC" => AminoAcid::Selenocysteine,
    "PYL" => AminoAcid::Pyrrolysine,
};

impl AminoAcid {
    /// Resolves a PDB residue name, including common protonation and modification variants.
    pub fn from_three_letter(code: &str) -> Option<Self> {
        THREE_LETTER_CODES
            .get(code.trim().to_ascii_uppercase().as_str())
            .copied()
    }

    pub fn from_one_letter(code: char) -> Option<Self> {
        use AminoAcid::*;
        Some(match code.to_ascii_uppercase() {
            'A' => Alanine,
            'G' => Glycine,
            'I' => Isoleucine,
            'L' => Leucine,
            'P' => Proline,
            'V' => Valine,
            'F' => Phenylalanine,
            'W' => Tryptophan,
            'Y' => Tyrosine,
            'N' => Asparagine,
            'C' => Cysteine,
            'Q' => Glutamine,
            'S' => Serine,
            'T' => Threonine,
            'M' => Methionine,
            'R' => Arginine,
            'H' => Histidine,
            'K' => Lysine,
            'D' => AsparticAcid,
            'E' => GlutamicAcid,
            'U' => Selenocysteine,
            'O' => Pyrrolysine,
            _ => return None,
        })
    }

    pub fn one_letter(&self) -> char {
        use AminoAcid::*;
        match self {
            Alanine => 'A',
            Glycine => 'G',
            Isoleucine => 'I',
            Leucine => 'L',
            Proline => 'P',
            Valine => 'V',
            Phenylalanine => 'F',
            Tryptophan => 'W',
            Tyrosine => 'Y',
            Asparagine => 'N',
            Cysteine => 'C',
            Glutamine => 'Q',
            Serine => 'S',
            Threonine => 'T',
            Methionine => 'M',
            Arginine => 'R',
            Histidine => 'H',
            Lysine => 'K',
            AsparticAcid => 'D',
            GlutamicAcid => 'E',
            Selenocysteine => 'U',
            Pyrrolysine => 'O',
        }
    }
}

/// Letters accepted in a protein sequence: the amino acids above plus the ambiguity codes.
pub fn is_sequence_letter(c: char) -> bool {
    AminoAcid::from_one_letter(c).is_some() || matches!(c.to_ascii_uppercase(), 'B' | 'Z' | 'X')
}

/// Average residue masses in Daltons (residue in a chain, i.e. without water).
pub static AVERAGE_RESIDUE_MASS: phf::Map<char, f64> = phf_map! {
    'A' => 71.0788,
    'R' => 156.1875,
    'N' => 114.1038,
    'D' => 115.0886,
    'C' => 103.1388,
    'E' => 129.1155,
    'Q' => 128.1307,
    'G' => 57.0519,
    'H' => 137.1411,
    'I' => 113.1594,
    'L' => 113.1594,
    'K' => 128.1741,
    'M' => 131.1926,
    'F' => 147.1766,
    'P' => 97.1167,
    'S' => 87.0782,
    'T' => 101.1051,
    'W' => 186.2132,
    'Y' => 163.1760,
    'V' => 99.1326,
    'U' => 150.0388,
    'O' => 237.3018,
    'X' => 0.0,
};

pub const WATER_MASS: f64 = 18.01524;

/// Kyte-Doolittle hydropathy index. Positive values are hydrophobic.
pub static HYDROPATHY: phf::Map<char, f64> = phf_map! {
    'A' => 1.8,
    'R' => -4.5,
    'N' => -3.5,
    'D' => -3.5,
    'C' => 2.5,
    'Q' => -3.5,
    'E' => -3.5,
    'G' => -0.4,
    'H' => -3.2,
    'I' => 4.5,
    'L' => 3.8,
    'K' => -3.9,
    'M' => 1.9,
    'F' => 2.8,
    'P' => -1.6,
    'S' => -0.8,
    'T' => -0.7,
    'W' => -0.9,
    'Y' => -1.3,
    'V' => 4.2,
};

/// Dipeptide instability weight values. Pairs not listed contribute zero.
pub static DIWV: phf::Map<&'static str, f64> = phf_map! {
    "WW" => 1.0, "WC" => 1.0, "WM" => 24.68, "WH" => 24.68, "WY" => 1.0,
    "WF" => 1.0, "WQ" => 1.0, "WN" => 13.34, "WI" => 1.0, "WR" => 1.0,
    "WD" => 1.0, "WP" => 1.0, "WT" => -14.03, "WK" => 1.0, "WE" => 1.0,
    "WV" => -7.49, "WS" => 1.0, "WG" => -9.37, "WA" => -14.03, "WL" => 13.34,
    "AW" => 1.0, "AC" => 44.94, "AM" => 1.0, "AH" => -7.49, "AY" => 1.0,
    "AF" => 1.0, "AQ" => 1.0, "AN" => 1.0, "AI" => 1.0, "AR" => 1.0,
    "AD" => -7.49, "AP" => 20.26, "AT" => 1.0, "AK" => 1.0, "AE" => 1.0,
    "AV" => 1.0, "AS" => 1.0, "AG" => 1.0, "AA" => 1.0, "AL" => 1.0,
    "LW" => 24.68, "LC" => 1.0, "LM" => 1.0, "LH" => 1.0, "LY" => 1.0,
    "LF" => 1.0, "LQ" => 33.6, "LN" => 1.0, "LI" => 1.0, "LR" => 20.26,
    "LD" => 1.0, "LP" => 20.26, "LT" => 1.0, "LK" => -7.49, "LE" => 1.0,
    "LV" => 1.0, "LS" => 1.0, "LG" => 1.0, "LA" => 1.0, "LL" => 1.0,
};

/// pKa values of the ionisable groups used for isoelectric point estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PkaScale {
    pub c_term: f64,
    pub asp: f64,
    pub glu: f64,
    pub cys: f64,
    pub tyr: f64,
    pub his: f64,
    pub n_term: f64,
    pub lys: f64,
    pub arg: f64,
}

const IPC_PROTEIN: PkaScale = PkaScale {
    c_term: 2.869,
    asp: 3.872,
    glu: 4.412,
    cys: 7.555,
    tyr: 10.85,
    his: 5.637,
    n_term: 9.094,
    lys: 9.052,
    arg: 11.84,
};

const IPC_PEPTIDE: PkaScale = PkaScale {
    c_term: 2.383,
    asp: 3.887,
    glu: 4.317,
    cys: 8.297,
    tyr: 10.071,
    his: 6.018,
    n_term: 9.564,
    lys: 10.517,
    arg: 12.503,
};

const EMBOSS: PkaScale = PkaScale {
    c_term: 3.6,
    asp: 3.9,
    glu: 4.1,
    cys: 8.5,
    tyr: 10.1,
    his: 6.5,
    n_term: 8.6,
    lys: 10.8,
    arg: 12.5,
};

/// Named pKa scales selectable for isoelectric point prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PkaModel {
    #[default]
    IpcProtein,
    IpcPeptide,
    Emboss,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown pKa model '{0}'. Expected one of: IPC_protein, IPC_peptide, EMBOSS")]
pub struct ParsePkaModelError(pub String);

impl PkaModel {
    pub fn scale(&self) -> &'static PkaScale {
        match self {
            PkaModel::IpcProtein => &IPC_PROTEIN,
            PkaModel::IpcPeptide => &IPC_PEPTIDE,
            PkaModel::Emboss => &EMBOSS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PkaModel::IpcProtein => "IPC_protein",
            PkaModel::IpcPeptide => "IPC_peptide",
            PkaModel::Emboss => "EMBOSS",
        }
    }
}

impl FromStr for PkaModel {
    type Err = ParsePkaModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ipc_protein" => Ok(PkaModel::IpcProtein),
            "ipc_peptide" => Ok(PkaModel::IpcPeptide),
            "emboss" => Ok(PkaModel::Emboss),
            _ => Err(ParsePkaModelError(s.to_string())),
        }
    }
}

impl fmt::Display for PkaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_letter_codes_cover_variants() {
        assert_eq!(AminoAcid::from_three_letter("HSP"), Some(AminoAcid::Histidine));
        assert_eq!(AminoAcid::from_three_letter("cyx"), Some(AminoAcid::Cysteine));
        assert_eq!(AminoAcid::from_three_letter("MSE"), Some(AminoAcid::Methionine));
        assert_eq!(AminoAcid::from_three_letter("SEC"), Some(AminoAcid::Selenocysteine));
        assert_eq!(AminoAcid::from_three_letter("HOH"), None);
    }

    #[test]
    fn one_letter_codes_are_consistent_in_both_directions() {
        for c in "ACDEFGHIKLMNPQRSTVWYUO".chars() {
            let aa = AminoAcid::from_one_letter(c).unwrap();
            assert_eq!(aa.one_letter(), c);
        }
        assert!(AminoAcid::from_one_letter('B').is_none());
    }

    #[test]
    fn sequence_letters_include_ambiguity_codes() {
        assert!(is_sequence_letter('x'));
        assert!(is_sequence_letter('B'));
        assert!(!is_sequence_letter('J'));
        assert!(!is_sequence_letter('1'));
    }

    #[test]
    fn every_standard_residue_has_mass_and_hydropathy() {
        for c in "ACDEFGHIKLMNPQRSTVWY".chars() {
            assert!(AVERAGE_RESIDUE_MASS.contains_key(&c), "mass for {c}");
            assert!(HYDROPATHY.contains_key(&c), "hydropathy for {c}");
        }
    }

    #[test]
    fn pka_model_parses_known_names() {
        assert_eq!("IPC_protein".parse(), Ok(PkaModel::IpcProtein));
        assert_eq!("ipc-peptide".parse(), Ok(PkaModel::IpcPeptide));
        assert_eq!("EMBOSS".parse(), Ok(PkaModel::Emboss));
        assert!("Bjellqvist".parse::<PkaModel>().is_err());
        assert_eq!(PkaModel::default().to_string(), "IPC_protein");
    }

    #[test]
    fn pka_scales_order_groups_sensibly() {
        for model in [PkaModel::IpcProtein, PkaModel::IpcPeptide, PkaModel::Emboss] {
            let s = model.scale();
            assert!(s.c_term < s.asp.max(s.glu));
            assert!(s.arg > s.lys);
            assert!(s.n_term > s.his);
        }
    }
}
