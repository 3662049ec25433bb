use anyhow::Result;

use crate::cli::short_id;
use crate::pile::IdeaPile;

/// Capture a new idea from the command line.
pub async fn add(pile: &mut IdeaPile, content: &str, tags: &[String], auto_tag: bool) -> Result<()> {
    let idea = if auto_tag {
        pile.capture_auto_tagged(content, tags).await?
    } else {
        pile.capture(content, tags)?
    };

    print!("Captured {}", short_id(&idea.id));
    if !idea.tags.is_empty() {
        print!("  [{}]", idea.tags.join(", "));
    }
    println!();
    Ok(())
}
