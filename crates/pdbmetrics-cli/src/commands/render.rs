use crate::cli::RenderArgs;
use crate::config::AppConfig;
use crate::error::Result;
use pdbmetrics::workflows::metrics::{self, RenderStyle};
use tracing::info;

pub fn run(args: RenderArgs, config: &AppConfig) -> Result<()> {
    let style = RenderStyle::from(args.style);
    info!(
        "Rendering {} image of {:?} to {:?}",
        style, &args.input, &args.output
    );
    metrics::render_structure(&args.input, &args.output, style, &config.plot)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StyleArg;
    use crate::commands::fixtures::*;
    use crate::error::CliError;
    use tempfile::tempdir;

    #[test]
    fn both_styles_create_the_output_image() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let input = write_file(dir.path(), "trip.pdb", TRIPEPTIDE);

        for (style, name) in [(StyleArg::Ramachandran, "rama.jpg"), (StyleArg::Trace, "trace.png")] {
            let output = dir.path().join("images").join(name);
            let args = RenderArgs {
                input: input.clone(),
                output: output.clone(),
                style,
            };
            run(args, &config).unwrap();
            assert!(output.is_file(), "{name}");
        }
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let args = RenderArgs {
            input: dir.path().join("missing.pdb"),
            output: dir.path().join("out.png"),
            style: StyleArg::Trace,
        };
        assert!(matches!(run(args, &config), Err(CliError::Metric(_))));
        assert!(!dir.path().join("out.png").exists());
    }
}
