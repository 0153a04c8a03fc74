use super::metrics::load_structure;
use crate::analysis::config::SasaConfig;
use crate::analysis::error::MetricError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::analysis::sasa::mean_residue_sasa;
use crate::analysis::sequence::{SequenceProperties, sequence_properties};
use crate::core::residues::PkaModel;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub pdb_dir: PathBuf,
    pub model_extension: String,
    pub pka_model: PkaModel,
    pub sasa: SasaConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub protein: String,
    pub fasta: String,
    pub properties: SequenceProperties,
    pub mean_sasa: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub protein: String,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub records: Vec<BatchRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Reads `protein,fasta` rows from a CSV table. The header row and rows with an empty
/// field are dropped.
pub fn read_table(path: &Path) -> Result<Vec<(String, String)>, MetricError> {
    let table_error = |source: csv::Error| MetricError::Table {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(table_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(table_error)?;
        let protein = record.get(0).unwrap_or("");
        let fasta = record.get(1).unwrap_or("");
        if protein.is_empty() || fasta.is_empty() {
            continue;
        }
        rows.push((protein.to_string(), fasta.to_string()));
    }
    Ok(rows)
}

fn evaluate_row(
    protein: &str,
    fasta: &str,
    config: &BatchConfig,
) -> Result<BatchRecord, MetricError> {
    let properties = sequence_properties(fasta, config.pka_model)?;
    let pdb_path = config
        .pdb_dir
        .join(format!("{}.{}", protein, config.model_extension));
    let (system, _) = load_structure(&pdb_path)?;
    let mean_sasa = mean_residue_sasa(&system, &config.sasa)?;
    Ok(BatchRecord {
        protein: protein.to_string(),
        fasta: fasta.to_string(),
        properties,
        mean_sasa,
    })
}

/// Evaluates every row of a `protein,fasta` table.
///
/// Rows whose structure file is missing, or whose metrics cannot be computed, are
/// reported and skipped; only an unreadable table aborts the run.
#[instrument(skip(config, reporter), fields(pdb_dir = %config.pdb_dir.display()))]
pub fn run(
    table: &Path,
    config: &BatchConfig,
    reporter: &ProgressReporter,
) -> Result<BatchSummary, MetricError> {
    reporter.report(Progress::PhaseStart {
        name: "Reading table",
    });
    let rows = read_table(table)?;
    reporter.report(Progress::PhaseFinish);
    info!(rows = rows.len(), "Loaded batch table.");

    let mut summary = BatchSummary::default();
    reporter.report(Progress::RowsStart {
        total: rows.len() as u64,
    });
    for (protein, fasta) in rows {
        match evaluate_row(&protein, &fasta, config) {
            Ok(record) => {
                reporter.report(Progress::RowFinished {
                    protein: protein.clone(),
                });
                summary.records.push(record);
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(protein = %protein, "Skipping row: {}", reason);
                reporter.report(Progress::RowSkipped {
                    protein: protein.clone(),
                    reason: reason.clone(),
                });
                summary.skipped.push(SkippedRow { protein, reason });
            }
        }
    }
    reporter.report(Progress::RowsFinish);

    info!(
        evaluated = summary.records.len(),
        skipped = summary.skipped.len(),
        "Batch finished."
    );
    Ok(summary)
}
