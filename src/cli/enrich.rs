use anyhow::{bail, Result};

use crate::cli::{resolve_id, short_id};
use crate::pile::IdeaPile;
use crate::store::types::EnrichmentKind;

/// Run one single-idea enrichment (expand, suggest, or inspire) and print
/// the stored result.
pub async fn enrich_one(pile: &mut IdeaPile, id: &str, kind: EnrichmentKind) -> Result<()> {
    require_service(pile)?;
    let id = resolve_id(pile, id)?;

    let enrichment = pile.enrich(&id, kind).await?;
    println!("[{}] for {}:", enrichment.kind, short_id(&id));
    println!();
    println!("{}", enrichment.content);
    Ok(())
}

/// Combine two or more ideas into a new concept.
pub async fn combine(pile: &mut IdeaPile, ids: &[String]) -> Result<()> {
    require_service(pile)?;
    let resolved: Vec<String> = ids
        .iter()
        .map(|id| resolve_id(pile, id))
        .collect::<Result<_>>()?;

    let enrichment = pile.combine(&resolved).await?;
    println!("[combine] stored under {}:", short_id(&enrichment.idea_id));
    println!();
    println!("{}", enrichment.content);
    Ok(())
}

/// Discover connections for one idea and record them.
pub async fn connections(pile: &mut IdeaPile, id: &str) -> Result<()> {
    require_service(pile)?;
    let id = resolve_id(pile, id)?;

    let found = pile.discover_connections(&id).await?;
    if found.is_empty() {
        println!("No connections found.");
        return Ok(());
    }
    println!("Connected {} to:", short_id(&id));
    for peer_id in &found {
        let peer = pile.store.get(peer_id)?;
        let preview = peer.content.lines().next().unwrap_or_default();
        println!("  {}  {}", short_id(peer_id), preview);
    }
    Ok(())
}

/// Probe the remote service and report the outcome.
pub async fn test_connection(pile: &IdeaPile) -> Result<()> {
    if !pile.enricher.is_configured() {
        println!("Service not configured: set service.api_key in config or IDEAPILE_API_KEY.");
        return Ok(());
    }
    if pile.enricher.test_connection().await {
        println!("Service reachable.");
    } else {
        println!("Service unreachable or returned an unexpected reply.");
    }
    Ok(())
}

fn require_service(pile: &IdeaPile) -> Result<()> {
    if !pile.enricher.is_configured() {
        bail!("remote service not configured: set service.api_key in config or IDEAPILE_API_KEY");
    }
    Ok(())
}
