//! Prompt builders, one per orchestration operation.
//!
//! Every prompt states a role, gives the idea (and tags) as context, and
//! pins the output format so the reply can be stored or parsed directly.

use crate::store::types::Idea;

pub fn expand(idea: &Idea) -> String {
    format!(
        "You are a creative assistant who helps expand ideas.\n\n\
         Original idea: \"{}\"\n\
         Related tags: {}\n\n\
         Expand this idea in a creative and useful way. Add details, \
         possibilities, practical examples, and implementation paths. \
         Be specific and constructive.\n\n\
         Reply with only the expansion of the idea, without introductions \
         or explanations of what you are doing.",
        idea.content,
        idea.tags.join(", ")
    )
}

pub fn combine(ideas: &[Idea]) -> String {
    format!(
        "You are a creative assistant who combines different ideas into \
         innovative concepts.\n\n\
         Ideas to combine:\n{}\n\n\
         Combine these ideas in a creative and innovative way. Find \
         interesting connections, synergies, and possibilities that emerge \
         when these ideas work together. Create a new perspective or \
         approach that takes the best of each idea.\n\n\
         Reply with only the creative combination, without introductions \
         or explanations.",
        numbered_listing(ideas.iter())
    )
}

pub fn suggest(idea: &Idea) -> String {
    format!(
        "You are a creative assistant who suggests related ideas.\n\n\
         Base idea: \"{}\"\n\
         Tags: {}\n\n\
         Suggest 3-5 related ideas that could complement, expand, or \
         connect with this idea. The suggestions should be practical, \
         creative, and feasible.\n\n\
         Format your reply as a simple numbered list with only the \
         suggested ideas.",
        idea.content,
        idea.tags.join(", ")
    )
}

pub fn inspire(idea: &Idea) -> String {
    format!(
        "You are a creative assistant who offers inspiring and different \
         perspectives.\n\n\
         Original idea: \"{}\"\n\
         Tags: {}\n\n\
         Offer a completely different perspective on this idea. Think \
         outside the box; consider other fields, other cultures, other \
         eras. How would someone from a completely different field \
         approach this? What unique or unexpected aspects could be \
         explored?\n\n\
         Be inspiring and innovative in your reply.",
        idea.content,
        idea.tags.join(", ")
    )
}

/// The reply to this prompt is parsed by `parse::connection_indices`; the
/// numbering here must match the order of `others`.
pub fn connections<'a>(idea: &Idea, others: impl Iterator<Item = &'a Idea>) -> String {
    format!(
        "You are an assistant who finds connections between ideas.\n\n\
         Base idea: \"{}\"\n\
         Base idea tags: {}\n\n\
         Other available ideas:\n{}\n\n\
         Analyze and identify which ideas have meaningful connections to \
         the base idea. Consider:\n\
         - Similar themes\n\
         - Related concepts\n\
         - Combination possibilities\n\
         - Complementary applications\n\n\
         Reply with only the numbers of the connected ideas, separated by \
         commas (e.g. \"1, 3, 5\"). If you find no meaningful connections, \
         reply \"none\".",
        idea.content,
        idea.tags.join(", "),
        numbered_listing(others)
    )
}

pub fn tags(text: &str) -> String {
    format!(
        "Derive up to 5 short lowercase tags for the following text. The \
         tags should capture its main themes.\n\n\
         Text:\n{text}\n\n\
         Reply with only the tags, separated by commas, without \
         explanations."
    )
}

/// Minimal round trip used by the connectivity probe.
pub fn probe() -> &'static str {
    "Reply with only: \"OK\""
}

fn numbered_listing<'a>(ideas: impl Iterator<Item = &'a Idea>) -> String {
    ideas
        .enumerate()
        .map(|(i, idea)| {
            format!("{}. \"{}\" (Tags: {})", i + 1, idea.content, idea.tags.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
