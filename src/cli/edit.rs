use anyhow::Result;

use crate::cli::{resolve_id, short_id};
use crate::pile::IdeaPile;

/// Replace an idea's content. Tags, favorite flag, and connections stay.
pub fn edit(pile: &mut IdeaPile, id: &str, content: &str) -> Result<()> {
    let id = resolve_id(pile, id)?;
    let mut idea = pile.store.get(&id)?;
    idea.content = content.to_string();
    pile.store.update(&idea)?;
    println!("Updated {}", short_id(&id));
    Ok(())
}

/// Toggle the favorite flag.
pub fn favorite(pile: &mut IdeaPile, id: &str) -> Result<()> {
    let id = resolve_id(pile, id)?;
    let idea = pile.store.toggle_favorite(&id)?;
    if idea.is_favorite {
        println!("Favorited {}", short_id(&id));
    } else {
        println!("Unfavorited {}", short_id(&id));
    }
    Ok(())
}

/// Record a symmetric connection between two ideas.
pub fn connect(pile: &mut IdeaPile, a: &str, b: &str) -> Result<()> {
    let a = resolve_id(pile, a)?;
    let b = resolve_id(pile, b)?;
    pile.store.connect(&a, &b)?;
    println!("Connected {} and {}", short_id(&a), short_id(&b));
    Ok(())
}

/// Delete an idea and its enrichments.
pub fn delete(pile: &mut IdeaPile, id: &str) -> Result<()> {
    let id = resolve_id(pile, id)?;
    pile.store.delete(&id)?;
    println!("Deleted {}", short_id(&id));
    Ok(())
}
