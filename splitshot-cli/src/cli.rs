use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_CONFIG_PATH: &str = "splitshot.toml";

#[derive(Parser, Debug)]
#[command(name = "splitshot", version, about = "Split-shot pattern calculator")]
pub struct Cli {
    /// TOML file holding the last-used inputs; a missing file means defaults
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the shot patterns closest to the target weight
    Patterns(PatternArgs),
    /// Count the combinations a search would visit
    Estimate(EstimateArgs),
    /// List the known shot sizes, heaviest first
    Catalog,
}

#[derive(Args, Debug, Default)]
pub struct PatternArgs {
    /// Number of shots in each pattern
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<f64>,
    /// Target total weight in grams
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<f64>,
    /// Enabled shot size id; repeat for several (e.g. --shot BB --shot AAA)
    #[arg(long = "shot", value_name = "ID")]
    pub shots: Vec<String>,
    /// Refuse searches larger than this; 0 disables the limit
    #[arg(long)]
    pub max_combinations: Option<u64>,
    /// Print the ranked patterns as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the inputs back to the config file after a successful search
    #[arg(long)]
    pub save: bool,
}

#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<f64>,
    #[arg(long = "shot", value_name = "ID")]
    pub shots: Vec<String>,
}
