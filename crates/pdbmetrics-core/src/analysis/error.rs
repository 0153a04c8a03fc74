use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::residues::ParsePkaModelError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("Failed to load structure from '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Chain '{0}' not found in structure")]
    ChainNotFound(char),

    #[error("Chain '{0}' contains no residues")]
    EmptyChain(char),

    #[error("No atoms eligible for the calculation")]
    NoAtoms,

    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Invalid residue letter '{letter}' at position {position}")]
    InvalidSequence { letter: char, position: usize },

    #[error(transparent)]
    UnknownPkaModel(#[from] ParsePkaModelError),

    #[error("No residue in the structure has both phi and psi defined")]
    NoDihedrals,

    #[error("Failed to render image: {0}")]
    Plot(String),

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read table '{path}': {source}", path = path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
