use crate::demo::{
    run_badge_catalog, run_badge_evaluation, run_demo, run_score, BadgeCatalogArgs,
    BadgeEvaluateArgs, DemoArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use collabhub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CollabHub Scoring Core",
    about = "Host and exercise the collaboration compatibility and badge engines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the operational HTTP service (default command)
    Serve(ServeArgs),
    /// Score how well two profiles fit as collaborators
    Score(ScoreArgs),
    /// Inspect the badge catalog or evaluate an activity snapshot against it
    Badges {
        #[command(subcommand)]
        command: BadgesCommand,
    },
    /// Run an end-to-end demo covering matching and badge awarding
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BadgesCommand {
    /// List every badge definition, including retired ones
    Catalog(BadgeCatalogArgs),
    /// Award badges for an activity snapshot read from a JSON file
    Evaluate(BadgeEvaluateArgs),
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
        Command::Score(args) => run_score(args),
        Command::Badges {
            command: BadgesCommand::Catalog(args),
        } => run_badge_catalog(args),
        Command::Badges {
            command: BadgesCommand::Evaluate(args),
        } => run_badge_evaluation(args),
        Command::Demo(args) => run_demo(args),
    }
}
