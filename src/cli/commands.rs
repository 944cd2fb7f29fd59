use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vulnprobe",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_HASH"), ", built ", env!("BUILD_TIMESTAMP"), ")"
    ),
    about = "Catalog-driven vulnerability scenario test harness"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every scenario in a catalog and write the run report
    Run(RunArgs),
    /// List the scenarios in a catalog
    List(ListArgs),
    /// Validate a scenario catalog
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Scenario catalog: a YAML file or a directory of YAML files
    #[arg(short, long, default_value = "./scenarios")]
    pub scenarios: String,

    /// YAML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Target base URL substituted for {target} in HTTP triggers
    #[arg(short, long)]
    pub target: Option<String>,

    /// Max concurrent scenario invocations
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-invocation timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output directory for run reports
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the run report as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Custom run identifier
    #[arg(long)]
    pub run_id: Option<String>,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Scenario catalog: a YAML file or a directory of YAML files
    #[arg(short, long, default_value = "./scenarios")]
    pub scenarios: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Scenario catalog to validate
    pub scenarios: String,
}
