//! topocfg cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace host group tokens with the hosts of a topology
    #[command(alias = "m")]
    Materialize(TransformCommand),

    /// Replace hosts of a topology with host group tokens
    #[command(alias = "e")]
    Export(TransformCommand),

    /// List registered properties
    Registry(RegistryCommand),
}

#[derive(Parser, Debug)]
pub struct TransformCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Property file (config type -> property -> value)
    #[clap(short = 'p', long = "properties")]
    pub properties: PathBuf,

    /// Topology file (list of host groups)
    #[clap(short = 't', long = "topology")]
    pub topology: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RegistryCommand {
    /// Only list properties of this category
    #[clap(short = 'c', long = "category")]
    pub category: Option<CategoryArg>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CategoryArg {
    SingleHost,
    MultiHost,
    ConditionalResource,
    UnitSuffix,
}

impl From<CategoryArg> for topocfg::Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::SingleHost => topocfg::Category::SingleHost,
            CategoryArg::MultiHost => topocfg::Category::MultiHost,
            CategoryArg::ConditionalResource => topocfg::Category::ConditionalResource,
            CategoryArg::UnitSuffix => topocfg::Category::UnitSuffix,
        }
    }
}
