use crate::demo::{run_analyze, run_compare, run_demo, AnalyzeArgs, CompareArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trichoscalp::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TrichoScalp",
    about = "Run the TrichoScalp evaluation engine as an HTTP service or from the command line",
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
    /// Synthesize indicators for one evaluation and print the analysis as JSON
    Analyze(AnalyzeArgs),
    /// Compare two indicator sets given as JSON objects
    Compare(CompareArgs),
    /// Walk a demo client through three visits and print the evolution report
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the indicator noise for reproducible analyses
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Compare(args) => run_compare(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["trichoscalp-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_compare_arguments() {
        let cli = Cli::try_parse_from([
            "trichoscalp-api",
            "compare",
            "--current",
            "{}",
            "--previous",
            "{}",
            "--days",
            "30",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Compare(args)) => assert_eq!(args.days, Some(30)),
            other => panic!("expected compare, got {other:?}"),
        }
    }

    #[test]
    fn analyze_requires_an_image() {
        assert!(Cli::try_parse_from(["trichoscalp-api", "analyze", "--subject", "c-1"]).is_err());
    }
}
