use crate::batch::{run_classify, run_score, ClassifyArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_intent::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Intent Scorer",
    about = "Score leads for buying intent over HTTP or from the command line",
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
    /// Score a lead CSV against an offer file and print or save the results
    Score(ScoreArgs),
    /// Classify a single lead against an offer and print the verdict
    Classify(ClassifyArgs),
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
        Command::Score(args) => run_score(args).await,
        Command::Classify(args) => run_classify(args).await,
    }
}
