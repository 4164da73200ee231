use crate::evaluate::{run_eligibility, run_purchase, EligibilityArgs, PurchaseArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vise_cards::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "VISE card program",
    about = "Serve or evaluate VISE card eligibility, purchase and discount rules",
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
    /// Check whether an applicant qualifies for a card tier
    Eligibility(EligibilityArgs),
    /// Authorize and price a single purchase
    Purchase(PurchaseArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Eligibility(args) => run_eligibility(args),
        Command::Purchase(args) => run_purchase(args),
    }
}
