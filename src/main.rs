//! CASPER Studio - timeline tooling for CASPER solver output
//!
//! This is the command-line entry point. It decodes a result document, either from a
//! local file or from a running backend, and prints its statistics and answer sets.
//!
//! Usage:
//!   casper-studio summarize --file results/lung_cancer/naive/run.json --mode naive
//!   casper-studio fetch --endpoint http://localhost:4000 --app lung_cancer --mode consistent

use casper_studio::{
    client::{ResultFetcher, ResultSource},
    core::{Mode, TimeConfig},
    parsing::parse_result_json,
    report::{render_answer_sets, render_stats},
    ParseResult,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "casper-studio")]
#[command(about = "Inspect CASPER solver results as clinical event timelines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a result file on disk
    Summarize {
        /// Result JSON written by the solver
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Fetch the latest result from a running backend (bundled data if unreachable)
    Fetch {
        /// Backend base URL
        #[arg(short, long, default_value = "http://localhost:4000")]
        endpoint: String,

        /// Application name
        #[arg(short, long, default_value = "lung_cancer")]
        app: String,

        #[command(flatten)]
        display: DisplayArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct DisplayArgs {
    /// Solver mode: naive, consistent, preferred, or cautious
    #[arg(short, long, default_value = "naive")]
    mode: Mode,

    /// Calendar date of solver time 0
    #[arg(long, default_value = "2001-01-01T00:00:00Z")]
    base_date: String,

    /// Length of one solver time unit: seconds, minutes, hours, or days
    #[arg(long, default_value = "seconds")]
    unit: String,

    /// Answer set whose time range is shown
    #[arg(long, default_value = "witness-1")]
    answer_set: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summarize { file, display } => {
            let text = std::fs::read_to_string(&file)?;
            let result = parse_result_json(display.mode, &text)?;
            print_report(&result, &display)?;
        }
        Command::Fetch { endpoint, app, display } => {
            let fetcher = ResultFetcher::new(endpoint)?;
            let fetched = fetcher.fetch(display.mode, &app).await?;
            if fetched.source == ResultSource::Fixture {
                println!("(backend unreachable, showing bundled {} data)\n", display.mode);
            }
            print_report(&fetched.result, &display)?;
        }
    }

    Ok(())
}

fn print_report(result: &ParseResult, display: &DisplayArgs) -> casper_studio::Result<()> {
    let time_config = TimeConfig::parse(&display.base_date, &display.unit)?;
    print!("{}", render_stats(result, Some(&display.answer_set), &time_config));
    println!();
    print!("{}", render_answer_sets(&result.answer_sets));
    Ok(())
}
