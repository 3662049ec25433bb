//! Terminal command handlers. Presentation only: every data operation goes
//! through [`IdeaPile`](crate::pile::IdeaPile) and the core modules.

mod browse;
mod capture;
mod edit;
mod enrich;

pub use browse::{list, search, show, stats};
pub use capture::add;
pub use edit::{connect, delete, edit, favorite};
pub use enrich::{combine, connections, enrich_one, test_connection};

use anyhow::{bail, Result};

use crate::pile::IdeaPile;

/// Resolve a full id or a unique id prefix to a stored idea's id.
pub fn resolve_id(pile: &IdeaPile, given: &str) -> Result<String> {
    let ideas = pile.store.list_all()?;
    let matches: Vec<&str> = ideas
        .iter()
        .map(|i| i.id.as_str())
        .filter(|id| id.starts_with(given))
        .collect();

    match matches.len() {
        0 => bail!("no idea matches id {given}"),
        1 => Ok(matches[0].to_string()),
        n => bail!("id prefix {given} is ambiguous ({n} matches)"),
    }
}

/// First eight characters of an id, for compact listings.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
