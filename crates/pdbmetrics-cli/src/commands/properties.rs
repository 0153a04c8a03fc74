use super::pka_model;
use crate::cli::PropertiesArgs;
use crate::config::AppConfig;
use crate::error::Result;
use pdbmetrics::workflows::metrics;
use std::io::Write;

pub fn run<W: Write>(args: PropertiesArgs, config: &AppConfig, out: &mut W) -> Result<()> {
    let model = pka_model(args.model.as_deref(), config.pka_model)?;
    let props = metrics::properties(&args.sequence, model)?;
    writeln!(out, "molecular_weight\t{:?}", props.molecular_weight)?;
    writeln!(out, "instability_index\t{:?}", props.instability_index)?;
    writeln!(out, "hydropathy\t{:?}", props.hydropathy)?;
    writeln!(out, "isoelectric_point\t{:?}", props.isoelectric_point)?;
    Ok(())
}
