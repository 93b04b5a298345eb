mod cli;
mod render;

use anyhow::Context;
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Commands, SearchArgs, ShellCommand, ShellLine};
use gummy_core::{AppConfig, CoreError, ErrorExt, ErrorReporter};
use link_summarizer::LinkSummarizer;
use llm_interface::PostClassifier;
use reddit_client::RedditSource;
use research_pipeline::{Dashboard, SearchOrchestrator};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type App = Dashboard<RedditSource, PostClassifier, LinkSummarizer>;

const DEFAULT_LOG_FILTER: &str =
    "gummy=info,research_pipeline=info,reddit_client=info,llm_interface=info,link_summarizer=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("gummy error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let mut app = build_app(&config)?;
    let reporter = ErrorReporter::new(cli.verbose);

    match cli.command {
        Commands::Search(args) => {
            let limit = config.search.limit;
            search(&mut app, &args, limit).await.map_err(|e| fail(&reporter, e))
        }
        Commands::Analyze(args) => analyze(&mut app, &args).await.map_err(|e| fail(&reporter, e)),
        Commands::Shell => shell(&mut app, &reporter, config.search.limit).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_app(config: &AppConfig) -> anyhow::Result<App> {
    let source = RedditSource::from_config(config).context("failed to set up the post source")?;
    let classifier =
        PostClassifier::from_config(config).context("failed to set up the classifier")?;
    let summarizer =
        LinkSummarizer::from_config(config).context("failed to set up the link summarizer")?;

    tracing::info!(
        "Starting gummy (source: {:?}, remote classifier: {}, simulated summaries: {})",
        source.mode(),
        classifier.is_remote(),
        summarizer.is_simulated()
    );

    Ok(Dashboard::new(
        SearchOrchestrator::new(source, classifier),
        summarizer,
    ))
}

fn fail(reporter: &ErrorReporter, error: CoreError) -> anyhow::Error {
    reporter.report(&error);
    anyhow::anyhow!(error.user_friendly_message())
}

async fn search(app: &mut App, args: &SearchArgs, default_limit: usize) -> Result<(), CoreError> {
    let request = args.to_request(default_limit);
    let results = app.search(&request).await?;

    match (results, args.json) {
        (None, true) => println!("[]"),
        (None, false) => println!("{}", render::NO_RESULTS),
        (Some(results), true) => println!("{}", serde_json::to_string_pretty(results)?),
        (Some(results), false) => print!("{}", render::results(results)),
    }
    Ok(())
}

async fn analyze(app: &mut App, args: &AnalyzeArgs) -> Result<(), CoreError> {
    let summary = app.analyze_link(&args.url).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", render::summary(summary));
    }
    Ok(())
}

async fn shell(app: &mut App, reporter: &ErrorReporter, default_limit: usize) -> anyhow::Result<()> {
    println!("gummy shell. Commands: search <terms> [options], link <url>, all, history, quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("gummy> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let outcome = match parsed.command {
            ShellCommand::Search(args) => search(app, &args, default_limit).await,
            ShellCommand::Link(args) => analyze(app, &args).await,
            ShellCommand::All => {
                match app.show_all() {
                    Some(results) => print!("{}", render::results(results)),
                    None => println!("No search results to show."),
                }
                Ok(())
            }
            ShellCommand::History => {
                print!("{}", render::history(app.session().recent()));
                Ok(())
            }
            ShellCommand::Quit => break,
        };

        if let Err(e) = outcome {
            reporter.report(&e);
            println!("{}", e.user_friendly_message());
        }
    }
    Ok(())
}
