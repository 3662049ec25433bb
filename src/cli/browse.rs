use std::io::IsTerminal;

use anyhow::Result;
use chrono::Local;

use crate::buckets::{self, Bucket, Tier};
use crate::cli::short_id;
use crate::pile::IdeaPile;
use crate::store::types::Idea;

/// List all ideas, grouped into time buckets unless `flat` is set.
pub fn list(pile: &IdeaPile, flat: bool) -> Result<()> {
    let ideas = pile.store.list_all()?;
    if ideas.is_empty() {
        println!("No ideas yet. Capture one with `ideapile add`.");
        return Ok(());
    }

    if flat {
        for idea in &ideas {
            print_idea_line(idea);
        }
        return Ok(());
    }

    let colorize = std::io::stdout().is_terminal();
    let now = Local::now();
    for bucket in buckets::group_by_time(&ideas, now) {
        print_bucket_header(&bucket, colorize);
        for idea in &bucket.ideas {
            print_idea_line(idea);
        }
        println!();
    }
    Ok(())
}

/// Substring search over content and tags.
pub fn search(pile: &IdeaPile, query: &str) -> Result<()> {
    let hits = pile.store.search(query)?;
    if hits.is_empty() {
        println!("No ideas match {query:?}.");
        return Ok(());
    }
    for idea in &hits {
        print_idea_line(idea);
    }
    Ok(())
}

/// Show one idea in full, enrichments and connections included.
pub fn show(pile: &IdeaPile, id: &str) -> Result<()> {
    let id = crate::cli::resolve_id(pile, id)?;
    let idea = pile.store.get(&id)?;

    println!("{}", idea.content);
    println!();
    println!("  id:        {}", idea.id);
    println!("  captured:  {}", idea.timestamp.with_timezone(&Local));
    if !idea.tags.is_empty() {
        println!("  tags:      {}", idea.tags.join(", "));
    }
    if idea.is_favorite {
        println!("  favorite:  yes");
    }
    if !idea.connections.is_empty() {
        println!("  connected: {}", idea.connections.len());
        for conn in &idea.connections {
            // Dangling ids can remain after a peer was deleted; skip them
            if let Ok(peer) = pile.store.get(conn) {
                println!("    {}  {}", short_id(&peer.id), first_line(&peer.content));
            }
        }
    }

    if !idea.enrichments.is_empty() {
        println!();
        println!("Enrichments ({}):", idea.enrichments.len());
        for enrichment in &idea.enrichments {
            println!();
            println!(
                "  [{}] {}",
                enrichment.kind,
                buckets::relative_age(&enrichment.timestamp, &chrono::Utc::now())
            );
            for line in enrichment.content.lines() {
                println!("    {line}");
            }
        }
    }
    Ok(())
}

/// Display pile statistics in the terminal.
pub fn stats(pile: &IdeaPile) -> Result<()> {
    let stats = pile.stats()?;

    println!("Idea Pile Statistics");
    println!("{}", "=".repeat(40));
    println!("  Ideas:        {}", stats.total_ideas);
    println!("  Favorites:    {}", stats.favorite_ideas);
    println!("  Enrichments:  {}", stats.enrichments);
    println!("  Connections:  {}", stats.connections);
    Ok(())
}

fn print_bucket_header(bucket: &Bucket, colorize: bool) {
    let header = if bucket.subtitle.is_empty() {
        bucket.title.clone()
    } else {
        format!("{} ({})", bucket.title, bucket.subtitle)
    };
    if colorize {
        println!("{}{header}\x1b[0m", tier_color(bucket.tier));
    } else {
        println!("{header}");
    }
}

/// ANSI color per recency tier.
fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Success => "\x1b[32m",
        Tier::Warning => "\x1b[33m",
        Tier::Primary => "\x1b[34m",
        Tier::Muted => "\x1b[90m",
        Tier::Faint => "\x1b[2m",
    }
}

fn print_idea_line(idea: &Idea) {
    let star = if idea.is_favorite { "*" } else { " " };
    let tags = if idea.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", idea.tags.join(", "))
    };
    println!(
        "  {star} {}  {}{tags}",
        short_id(&idea.id),
        first_line(&idea.content)
    );
}

fn first_line(content: &str) -> &str {
    content.lines().next().unwrap_or_default()
}
