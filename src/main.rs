use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod data_root;
pub mod error;
pub mod index;
pub mod matcher;
pub mod mcp;
pub mod search;
pub mod walker;

use cli::{Cli, Command};
use data_root::DataRoot;
use index::RuleIndex;
use matcher::JaroWinklerScorer;
use search::SearchOptions;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("RULEFINDER_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();

    if let Command::Completions(ref args) = cli.command {
        args.generate();
        return Ok(());
    }

    init_tracing(cli.verbose, cli.quiet);

    // The index is built once before any query is served; a missing or
    // unreadable data root is fatal at startup.
    let data_root = DataRoot::resolve(cli.data_root.as_deref())?;
    let index = RuleIndex::build(data_root.path())?;

    match cli.command {
        Command::Search(args) => cmd_search(&index, &args),
        Command::Status(args) => cmd_status(&data_root, &index, args.json),
        Command::Mcp => mcp::run_mcp(index)?,
        Command::Completions(_) => {}
    }

    Ok(())
}

fn cmd_search(index: &RuleIndex, args: &cli::SearchArgs) {
    let options = SearchOptions {
        top_n: args.count,
        min_score: args.min_score,
    };
    let scorer = JaroWinklerScorer;

    if args.json {
        let matches =
            search::rank_matches(&args.query, index, &scorer, &options);
        let results: Vec<_> = matches
            .iter()
            .map(|m| {
                serde_json::json!({
                    "key": m.key,
                    "score": m.score,
                    "file": m.path.display().to_string(),
                })
            })
            .collect();
        let payload = serde_json::json!({
            "query": args.query,
            "result_count": matches.len(),
            "results": results,
        });
        println!("{payload}");
    } else {
        println!(
            "{}",
            search::execute_search(&args.query, index, &scorer, &options)
        );
    }
}

fn cmd_status(data_root: &DataRoot, index: &RuleIndex, json: bool) {
    let mut categories = std::collections::BTreeMap::<String, usize>::new();
    for key in index.keys() {
        if let Some(path) = index.get(key) {
            *categories.entry(search::category_of(path)).or_default() += 1;
        }
    }

    if json {
        let payload = serde_json::json!({
            "data_root": data_root.path().display().to_string(),
            "documents": index.len(),
            "categories": categories,
        });
        println!("{payload}");
    } else {
        println!("Data root: {}", data_root.path().display());
        println!("Documents: {}", index.len());
        println!("Categories: {}", categories.len());
        for (name, count) in &categories {
            println!("  {name}: {count}");
        }
    }
}
