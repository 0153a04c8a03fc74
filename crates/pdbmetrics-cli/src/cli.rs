use clap::{Args, Parser, Subcommand, ValueEnum};
use pdbmetrics::workflows::metrics::RenderStyle;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pdbmetrics - Compute structural and biochemical metrics (Ramachandran plots, isoelectric point, surface area) from PDB models and protein sequences.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the per-user configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sasa.chain=B
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true, action = clap::ArgAction::Append)]
    pub set_values: Vec<String>,

    /// Fail with a non-zero exit code instead of printing `0` when a numeric metric
    /// cannot be computed.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the Ramachandran plot of a model to the plots directory.
    Ramachandran(RamachandranArgs),
    /// Render a structure file to an image at an explicit output path.
    Render(RenderArgs),
    /// Estimate the isoelectric point of a protein sequence.
    Pi(PiArgs),
    /// Compute the mean solvent-accessible surface area per residue of a structure.
    Sasa(SasaArgs),
    /// Print molecular weight, instability index, hydropathy and isoelectric point of a sequence.
    Properties(PropertiesArgs),
    /// Print the one-letter sequence of a structure.
    Sequence(SequenceArgs),
    /// Evaluate sequence properties and surface area for every row of a `protein,fasta` table.
    Batch(BatchArgs),
}

/// Arguments for the `ramachandran` subcommand.
#[derive(Args, Debug)]
pub struct RamachandranArgs {
    /// Model identifier (resolved under the models directory) or path to a PDB file.
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path of the image to write. The extension selects the format (jpg, png, bmp).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// What the image shows.
    #[arg(long, value_enum, default_value_t = StyleArg::Ramachandran)]
    pub style: StyleArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    /// Backbone phi/psi scatter plot.
    Ramachandran,
    /// C-alpha trace projected onto the XY plane.
    Trace,
}

impl From<StyleArg> for RenderStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Ramachandran => RenderStyle::Ramachandran,
            StyleArg::Trace => RenderStyle::Trace,
        }
    }
}

/// Arguments for the `pi` subcommand.
#[derive(Args, Debug)]
pub struct PiArgs {
    /// Protein sequence in one-letter codes.
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,

    /// pKa scale: IPC_protein, IPC_peptide or EMBOSS. Overrides `isoelectric.model`.
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,
}

/// Arguments for the `sasa` subcommand.
#[derive(Args, Debug)]
pub struct SasaArgs {
    /// Model identifier (resolved under the models directory) or path to a PDB file.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Chain whose residue count normalises the total area. Overrides `sasa.chain`.
    #[arg(long, value_name = "ID")]
    pub chain: Option<char>,
}

/// Arguments for the `properties` subcommand.
#[derive(Args, Debug)]
pub struct PropertiesArgs {
    /// Protein sequence in one-letter codes.
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,

    /// pKa scale used for the isoelectric point. Overrides `isoelectric.model`.
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,
}

/// Arguments for the `sequence` subcommand.
#[derive(Args, Debug)]
pub struct SequenceArgs {
    /// Model identifier (resolved under the models directory) or path to a PDB file.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Only read this chain. All protein chains are read when omitted.
    #[arg(long, value_name = "ID")]
    pub chain: Option<char>,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV table with `protein,fasta` columns and a header row.
    #[arg(value_name = "CSV")]
    pub table: PathBuf,

    /// Directory holding `<protein>.pdb` files. Defaults to the models directory.
    #[arg(long, value_name = "DIR")]
    pub pdb_dir: Option<PathBuf>,

    /// pKa scale used for the isoelectric point. Overrides `isoelectric.model`.
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,
}
