use crate::cli::SasaArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::emit_scalar;
use pdbmetrics::workflows::metrics;
use std::io::Write;
use tracing::debug;

pub fn run<W: Write>(args: SasaArgs, config: &AppConfig, strict: bool, out: &mut W) -> Result<()> {
    let mut sasa = config.sasa.clone();
    if let Some(chain) = args.chain {
        sasa.chain_id = chain;
    }
    let input = config.layout.resolve_model(&args.input);
    debug!("Resolved '{}' to {:?}", args.input, input);
    emit_scalar(out, metrics::mean_sasa(&input, &sasa), strict)
}
