use clap::{Args, Parser, Subcommand};
use research_pipeline::SearchRequest;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gummy",
    version,
    about = "Search Reddit, classify what people are saying, and summarize links"
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./gummy.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search posts, classify them and apply filters. Queries live Reddit
    /// unless GUMMY_SYNTHETIC=true selects the synthetic corpus.
    Search(SearchArgs),
    /// Summarize a web link.
    Analyze(AnalyzeArgs),
    /// Interactive session with history and "show all".
    Shell,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Search terms.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Restrict the search to one subreddit.
    #[arg(short = 'r', long)]
    pub subreddit: Option<String>,

    /// Maximum number of posts to fetch.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,

    /// Keep only posts from the last N days.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Keep only posts with a body longer than ten characters.
    #[arg(long)]
    pub text_only: bool,

    /// Keep only posts of this category ("all" disables).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Print JSON instead of cards.
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn to_request(&self, default_limit: usize) -> SearchRequest {
        let mut request = SearchRequest::new(self.query.join(" "))
            .with_limit(self.limit.map_or(default_limit, |limit| limit as usize));
        if let Some(subreddit) = &self.subreddit {
            request = request.with_community(subreddit.as_str());
        }
        if let Some(days) = self.days {
            request = request.with_max_age_days(days);
        }
        if self.text_only {
            request = request.text_only();
        }
        if let Some(category) = &self.category {
            request = request.with_category(category.as_str());
        }
        request
    }
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Link to summarize (http:// or https://).
    pub url: String,

    /// Print JSON instead of a card.
    #[arg(long)]
    pub json: bool,
}

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Search posts.
    Search(SearchArgs),
    /// Summarize a link.
    Link(AnalyzeArgs),
    /// Show the last results without filters.
    All,
    /// Show recent searches and links.
    History,
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_build_request() {
        let cli = Cli::try_parse_from([
            "gummy", "search", "async", "rust", "-r", "r/rust", "--limit", "5", "--days", "7",
            "--text-only", "--category", "tutorial",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        let request = args.to_request(10);
        assert_eq!(request.query, "async rust");
        assert_eq!(request.community.as_deref(), Some("rust"));
        assert_eq!(request.limit, 5);
        assert_eq!(request.filters.max_age_days, Some(7));
        assert!(request.filters.require_nonempty_body);
        assert_eq!(request.filters.category.as_deref(), Some("tutorial"));
    }

    #[test]
    fn test_default_limit_comes_from_config() {
        let cli = Cli::try_parse_from(["gummy", "search", "python"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.to_request(25).limit, 25);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        assert!(Cli::try_parse_from(["gummy", "search", "python", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_shell_lines() {
        let line = ShellLine::try_parse_from(["link", "https://example.com"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Link(_)));

        let line = ShellLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Quit));

        assert!(ShellLine::try_parse_from(["search"]).is_err());
    }
}
