//! Tolerant parsers for free-text service replies.
//!
//! Nothing here trusts the reply shape. Each parser takes raw text and
//! returns whatever valid structure it can extract; `connection_indices` is
//! the only one that can fail, and its caller converts that failure into a
//! degraded default.

use crate::error::{Error, Result};

/// Parse a connection reply ("1, 3, 5" or "none") into 0-based indices
/// valid for a listing of `corpus_len` entries.
///
/// Out-of-range numbers are discarded and duplicates collapse. A reply with
/// neither the "none" sentinel nor a single number is a parse error; the
/// orchestrator falls back rather than surfacing it.
pub fn connection_indices(reply: &str, corpus_len: usize) -> Result<Vec<usize>> {
    if reply.to_lowercase().contains("none") {
        return Ok(Vec::new());
    }

    let mut indices = Vec::new();
    let mut saw_number = false;
    for token in reply.split(|c: char| !c.is_ascii_digit()) {
        if token.is_empty() {
            continue;
        }
        let Ok(number) = token.parse::<usize>() else {
            // Longer than usize; numbers that size are never valid entries
            saw_number = true;
            continue;
        };
        saw_number = true;
        if number >= 1 && number <= corpus_len {
            let index = number - 1;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
    }

    if !saw_number {
        return Err(Error::Parse(format!(
            "no connection numbers in reply: {reply:?}"
        )));
    }
    Ok(indices)
}

/// Extract at most `max` tags from a reply. Splits on commas, semicolons,
/// and line breaks; strips numbering, bullets, quotes, and `#` prefixes;
/// lowercases and deduplicates.
pub fn tag_list(reply: &str, max: usize) -> Vec<String> {
    let mut tags = Vec::new();
    for raw in reply.split(|c: char| matches!(c, ',' | ';' | '\n')) {
        let tag = clean_tag_token(raw);
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
            if tags.len() == max {
                break;
            }
        }
    }
    tags
}

fn clean_tag_token(raw: &str) -> String {
    let token = raw.trim();
    let token = token.trim_start_matches(|c: char| c.is_ascii_digit());
    let token = token.trim_start_matches(|c: char| matches!(c, '.' | ')' | '-' | '*' | '\u{2022}'));
    let token = token.trim_matches(|c: char| matches!(c, '"' | '\'' | '`'));
    let token = token.trim_start_matches('#');
    token.trim().to_lowercase()
}
