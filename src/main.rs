use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ec2pricing::core::log::init_logging;
use ec2pricing::core::period::Period;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the instance catalog with prices, sorted
    List {
        /// Path to a JSON catalog of instance types
        #[arg(long)]
        catalog: Option<String>,
        /// Field to sort by, e.g. apiName, cpus, onDemandPrice, reservedSavings
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort in descending order
        #[arg(short, long)]
        descending: bool,
        /// Price period: hourly, daily, weekly, monthly or yearly
        #[arg(short, long)]
        period: Option<Period>,
        /// Region to price in
        #[arg(short, long)]
        region: Option<String>,
        /// Operating system to price for
        #[arg(long)]
        os: Option<String>,
        /// Show at most this many instance types
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

impl From<Commands> for ec2pricing::AppCommand {
    fn from(cmd: Commands) -> ec2pricing::AppCommand {
        match cmd {
            Commands::List {
                catalog,
                sort,
                descending,
                period,
                region,
                os,
                limit,
            } => ec2pricing::AppCommand::List(ec2pricing::ListOptions {
                catalog,
                sort_field: sort,
                descending,
                period,
                region,
                operating_system: os,
                limit,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ec2pricing::cli::setup::setup(),
        Some(cmd) => ec2pricing::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
