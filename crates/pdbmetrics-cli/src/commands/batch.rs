use super::pka_model;
use crate::cli::BatchArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdbmetrics::analysis::progress::ProgressReporter;
use pdbmetrics::workflows::batch::{self, BatchConfig, BatchRecord};
use std::io::Write;
use tracing::{info, warn};

fn format_record(record: &BatchRecord) -> String {
    let p = &record.properties;
    format!(
        "{}\t{}\t{:.2}\t{:.2}\t{:.4}\t{:.2}\t{:.2}",
        record.protein,
        record.fasta,
        p.molecular_weight,
        p.instability_index,
        p.hydropathy,
        p.isoelectric_point,
        record.mean_sasa
    )
}

pub fn run<W: Write>(args: BatchArgs, config: &AppConfig, quiet: bool, out: &mut W) -> Result<()> {
    let batch_config = BatchConfig {
        pdb_dir: args
            .pdb_dir
            .unwrap_or_else(|| config.layout.models_dir.clone()),
        model_extension: config.layout.model_extension.clone(),
        pka_model: pka_model(args.model.as_deref(), config.pka_model)?,
        sasa: config.sasa.clone(),
    };

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Evaluating table {:?}", &args.table);
    let summary = batch::run(&args.table, &batch_config, &reporter)?;

    for record in &summary.records {
        writeln!(out, "{}", format_record(record))?;
    }
    if !summary.skipped.is_empty() {
        warn!(
            "{} of {} row(s) were skipped.",
            summary.skipped.len(),
            summary.records.len() + summary.skipped.len()
        );
    }
    Ok(())
}
