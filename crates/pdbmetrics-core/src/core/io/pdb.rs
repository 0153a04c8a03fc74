use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::{Atom, AtomRole, RecordKind, infer_element};
use crate::core::models::chain::ChainType;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

const MIN_COORDINATE_LINE_LEN: usize = 54;
const DEFAULT_CHAIN_ID: char = 'A';

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub id_code: Option<String>,
    pub classification: Option<String>,
    pub title: Option<String>,
    /// Number of MODEL records seen before reading stopped. Only the first model is loaded.
    pub models_seen: usize,
    /// Alternate-location atoms dropped because an earlier conformer was already kept.
    pub skipped_alt_locs: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_optional_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: f64,
) -> Result<f64, PdbError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, line_num, start, end)
    }
}

/// Reader for fixed-column Protein Data Bank coordinate files.
///
/// Only the first model of a multi-model file is loaded. For atoms with alternate
/// locations, the first conformer encountered for each atom name is kept. A blank
/// chain identifier is read as chain `A`.
pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut system = MolecularSystem::new();
        let mut metadata = PdbMetadata::default();
        let mut next_serial = 1usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {
                    let atom = read_coordinate_record(&line, line_num, &mut system, next_serial)?;
                    next_serial = atom.serial + 1;
                    let residue_id = atom.residue_id;

                    if atom.alt_loc.is_some()
                        && system
                            .residue(residue_id)
                            .and_then(|r| r.get_atom_id_by_name(&atom.name))
                            .is_some()
                    {
                        trace!(line = line_num, "Skipping alternate location for {}", atom.name);
                        metadata.skipped_alt_locs += 1;
                        continue;
                    }

                    system.add_atom_to_residue(residue_id, atom).ok_or_else(|| {
                        PdbError::Inconsistency(format!(
                            "Residue for atom on line {} vanished during parsing",
                            line_num
                        ))
                    })?;
                }
                "HEADER" => {
                    let classification = slice_and_trim(&line, 10, 50);
                    let id_code = slice_and_trim(&line, 62, 66);
                    if !classification.is_empty() {
                        metadata.classification = Some(classification.to_string());
                    }
                    if !id_code.is_empty() {
                        metadata.id_code = Some(id_code.to_string());
                    }
                }
                "TITLE" => {
                    let part = slice_and_trim(&line, 10, 80);
                    match &mut metadata.title {
                        Some(title) => {
                            title.push(' ');
                            title.push_str(part);
                        }
                        None => metadata.title = Some(part.to_string()),
                    }
                }
                "MODEL" => {
                    metadata.models_seen += 1;
                    if metadata.models_seen > 1 {
                        break;
                    }
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        if system.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        debug!(
            atoms = system.atom_count(),
            chains = system.chains_iter().count(),
            "Parsed PDB structure."
        );
        Ok((system, metadata))
    }
}

/// Parses one ATOM/HETATM line, registering its chain and residue in `system`.
///
/// The returned atom already carries the residue it belongs to but has not been added.
fn read_coordinate_record(
    line: &str,
    line_num: usize,
    system: &mut MolecularSystem,
    fallback_serial: usize,
) -> Result<Atom, PdbError> {
    if line.len() < MIN_COORDINATE_LINE_LEN {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let record = if line.starts_with("HETATM") {
        RecordKind::Hetatm
    } else {
        RecordKind::Atom
    };

    let name = slice_and_trim(line, 12, 16);
    if name.is_empty() {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::MissingRequiredField {
                columns: "13-16".into(),
            },
        });
    }
    // Serial numbers overflow five columns in very large entries; fall back to counting.
    let serial = slice_and_trim(line, 6, 11)
        .parse::<usize>()
        .unwrap_or(fallback_serial);
    let alt_loc = column_char(line, 16);
    let res_name = slice_and_trim(line, 17, 20);
    let chain_char = column_char(line, 21).unwrap_or(DEFAULT_CHAIN_ID);

    let res_seq_str = slice_and_trim(line, 22, 26);
    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "23-26".into(),
            value: res_seq_str.into(),
        },
    })?;
    let insertion_code = column_char(line, 26);

    let x = parse_float(line, line_num, 30, 38)?;
    let y = parse_float(line, line_num, 38, 46)?;
    let z = parse_float(line, line_num, 46, 54)?;
    let occupancy = parse_optional_float(line, line_num, 54, 60, 1.0)?;
    let b_factor = parse_optional_float(line, line_num, 60, 66, 0.0)?;

    let element = match slice_and_trim(line, 76, 78) {
        "" => infer_element(name),
        symbol => symbol.to_ascii_uppercase(),
    };

    let role = AtomRole::classify(record, res_name, name);
    let chain_type = match role {
        _ if role.is_polymer() => ChainType::Protein,
        AtomRole::Water => ChainType::Water,
        AtomRole::Ligand => ChainType::Ligand,
        _ => ChainType::Other,
    };

    let chain_id = system.add_chain(chain_char, chain_type);
    let residue_id: ResidueId = system
        .add_residue(chain_id, res_seq, insertion_code, res_name)
        .ok_or_else(|| {
            PdbError::Inconsistency(format!("Chain '{}' could not be registered", chain_char))
        })?;

    let mut atom = Atom::new(name, residue_id, Point3::new(x, y, z));
    atom.serial = serial;
    atom.record = record;
    atom.role = role;
    atom.element = element;
    atom.alt_loc = alt_loc;
    atom.occupancy = occupancy;
    atom.b_factor = b_factor;
    Ok(atom)
}
