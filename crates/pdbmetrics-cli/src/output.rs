use crate::error::{CliError, Result};
use pdbmetrics::analysis::error::MetricError;
use std::io::Write;
use tracing::error;

/// Printed in place of a scalar metric that could not be computed.
pub const SENTINEL: &str = "0";

/// Writes a scalar metric as a single line.
///
/// Unless `strict` is set, a failure is logged and the sentinel is printed instead, so
/// callers that only read stdout keep working.
pub fn emit_scalar<W: Write>(
    out: &mut W,
    result: std::result::Result<f64, MetricError>,
    strict: bool,
) -> Result<()> {
    match result {
        Ok(value) => writeln!(out, "{:?}", value)?,
        Err(e) if strict => return Err(CliError::Metric(e)),
        Err(e) => {
            error!("Metric could not be computed: {}", e);
            writeln!(out, "{}", SENTINEL)?;
        }
    }
    Ok(())
}
