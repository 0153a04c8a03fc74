use super::pka_model;
use crate::cli::PiArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::emit_scalar;
use pdbmetrics::workflows::metrics;
use std::io::Write;

pub fn run<W: Write>(args: PiArgs, config: &AppConfig, strict: bool, out: &mut W) -> Result<()> {
    let result = pka_model(args.model.as_deref(), config.pka_model)
        .and_then(|model| metrics::isoelectric_point(&args.sequence, model));
    emit_scalar(out, result, strict)
}
