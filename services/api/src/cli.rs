use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fiscal_peers::comparison::Metric;
use fiscal_peers::error::AppError;

use crate::{report, server};

#[derive(Parser, Debug)]
#[command(
    name = "fiscal-peers",
    about = "Compare a North Carolina municipality against its population-group peers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the fund balance, tax rate, and scatter comparison for one municipality
    Compare(CompareArgs),
    /// List municipalities whose name contains the query
    Search(SearchArgs),
    /// Print the ranked peer series for one metric, optionally exporting it as CSV
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Dataset snapshot to load instead of APP_DATA_PATH
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Municipality name (case-insensitive)
    #[arg(long)]
    pub(crate) unit: String,
    /// Emit the staged report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Substring to match; omit to list the first names in the snapshot
    pub(crate) query: Option<String>,
    /// Maximum number of names to print
    #[arg(long, default_value_t = 20)]
    pub(crate) limit: usize,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Municipality name (case-insensitive)
    #[arg(long)]
    pub(crate) unit: String,
    /// Metric key, e.g. fund_balance_pct or adjusted_tax_rate
    #[arg(long, default_value = "fund_balance_pct")]
    pub(crate) metric: Metric,
    /// Write the ranked series to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Compare(args) => report::run_compare(args),
        Command::Search(args) => report::run_search(args),
        Command::Rank(args) => report::run_rank(args),
    }
}
