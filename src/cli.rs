use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "rulefinder",
    about = "Fuzzy-lookup MCP server for Pathfinder 2E rule documents"
)]
pub struct Cli {
    /// Override the rule-document root directory
    #[arg(long, global = true)]
    pub data_root: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the rule index from the terminal
    Search(SearchArgs),
    /// Show the data root and index statistics
    Status(StatusArgs),
    /// Start the MCP server for AI agent integration
    Mcp,
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The search query
    pub query: String,

    /// Number of ranked candidates to consider
    #[arg(short = 'n', long, default_value = "3")]
    pub count: usize,

    /// Minimum similarity score (0-100); only stronger matches are kept
    #[arg(long, default_value = "60.0")]
    pub min_score: f32,

    /// Output ranked matches as JSON, without document bodies
    #[arg(long)]
    pub json: bool,
}

// -- Status --

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "rulefinder",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_search_defaults() {
        let cli = Cli::parse_from(["rulefinder", "search", "fireball"]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "fireball");
                assert_eq!(args.count, 3);
                assert_eq!(args.min_score, 60.0);
                assert!(!args.json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn parse_global_data_root() {
        let cli = Cli::parse_from([
            "rulefinder",
            "status",
            "--data-root",
            "/tmp/rules",
        ]);
        assert_eq!(cli.data_root, Some(PathBuf::from("/tmp/rules")));
    }
}
