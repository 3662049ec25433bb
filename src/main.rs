use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ideapile::cli;
use ideapile::config::PileConfig;
use ideapile::pile::IdeaPile;
use ideapile::store::types::EnrichmentKind;

#[derive(Parser)]
#[command(name = "ideapile", version, about = "Local-first idea capture with AI enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture a new idea
    Add {
        content: String,
        /// Explicit tags, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Derive tags via the remote service (needs auto_tagging enabled)
        #[arg(long)]
        auto_tag: bool,
    },
    /// List ideas grouped into time buckets
    List {
        /// Plain recency listing, no buckets
        #[arg(long)]
        flat: bool,
    },
    /// Search ideas by content or tag substring
    Search { query: String },
    /// Show one idea in full
    Show { id: String },
    /// Replace an idea's content
    Edit { id: String, content: String },
    /// Toggle an idea's favorite flag
    Favorite { id: String },
    /// Connect two ideas
    Connect { a: String, b: String },
    /// Delete an idea and its enrichments
    Delete { id: String },
    /// Show pile statistics
    Stats,
    /// Expand an idea with the remote service
    Expand { id: String },
    /// Suggest 3-5 related ideas
    Suggest { id: String },
    /// Offer a different perspective on an idea
    Inspire { id: String },
    /// Combine two or more ideas into a new concept
    Combine {
        #[arg(num_args = 2.., required = true)]
        ids: Vec<String>,
    },
    /// Discover and record connections for an idea
    Connections { id: String },
    /// Probe the remote completion service
    TestConnection,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = PileConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut pile = IdeaPile::open(&config)?;

    match args.command {
        Command::Add {
            content,
            tags,
            auto_tag,
        } => cli::add(&mut pile, &content, &tags, auto_tag).await?,
        Command::List { flat } => cli::list(&pile, flat)?,
        Command::Search { query } => cli::search(&pile, &query)?,
        Command::Show { id } => cli::show(&pile, &id)?,
        Command::Edit { id, content } => cli::edit(&mut pile, &id, &content)?,
        Command::Favorite { id } => cli::favorite(&mut pile, &id)?,
        Command::Connect { a, b } => cli::connect(&mut pile, &a, &b)?,
        Command::Delete { id } => cli::delete(&mut pile, &id)?,
        Command::Stats => cli::stats(&pile)?,
        Command::Expand { id } => cli::enrich_one(&mut pile, &id, EnrichmentKind::Expand).await?,
        Command::Suggest { id } => cli::enrich_one(&mut pile, &id, EnrichmentKind::Suggest).await?,
        Command::Inspire { id } => cli::enrich_one(&mut pile, &id, EnrichmentKind::Inspire).await?,
        Command::Combine { ids } => cli::combine(&mut pile, &ids).await?,
        Command::Connections { id } => cli::connections(&mut pile, &id).await?,
        Command::TestConnection => cli::test_connection(&pile).await?,
    }

    Ok(())
}
