use crate::scenarios::{run_scenarios, ScenariosArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scenario_ranking::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scenario Ranking Service",
    about = "Assemble ranking requests and reshape ranking engine output",
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
    /// Reshape a project output CSV into ranked scenarios
    Scenarios(ScenariosArgs),
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
        Command::Scenarios(args) => run_scenarios(args),
    }
}
