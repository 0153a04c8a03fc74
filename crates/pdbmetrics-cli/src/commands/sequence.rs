use crate::cli::SequenceArgs;
use crate::config::AppConfig;
use crate::error::Result;
use pdbmetrics::workflows::metrics;
use std::io::Write;

pub fn run<W: Write>(args: SequenceArgs, config: &AppConfig, out: &mut W) -> Result<()> {
    let input = config.layout.resolve_model(&args.input);
    let sequence = metrics::structure_sequence(&input, args.chain)?;
    writeln!(out, "{}", sequence)?;
    Ok(())
}
