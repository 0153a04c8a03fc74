use crate::cli::RamachandranArgs;
use crate::config::AppConfig;
use crate::error::Result;
use pdbmetrics::workflows::metrics;
use tracing::info;

/// Renders the plot to its derived path. Nothing is written to stdout.
pub fn run(args: RamachandranArgs, config: &AppConfig) -> Result<()> {
    info!("Rendering Ramachandran plot for '{}'", args.id);
    let output = metrics::ramachandran_plot(&args.id, &config.layout, &config.plot)?;
    info!("Ramachandran plot written to {:?}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::*;
    use crate::error::CliError;
    use tempfile::tempdir;

    #[test]
    fn plot_is_written_under_plots_dir() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        write_file(&config.layout.models_dir, "trip.pdb", TRIPEPTIDE);

        run(RamachandranArgs { id: "trip".into() }, &config).unwrap();
        assert!(dir.path().join("plots").join("trip.png").is_file());
    }

    #[test]
    fn missing_model_is_an_error() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let result = run(RamachandranArgs { id: "nope".into() }, &config);
        assert!(matches!(result, Err(CliError::Metric(_))));
        assert!(!dir.path().join("plots").join("nope.png").exists());
    }
}
