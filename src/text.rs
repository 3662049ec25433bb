//! Text hygiene for captured content and tags.
//!
//! Sanitization runs on every content write; hashtag extraction belongs to
//! the capture path and never alters the literal text.

/// Sanitize idea content before storage: CRLF becomes LF, runs of spaces and
/// tabs collapse to a single space, three or more consecutive line breaks
/// collapse to one blank line, and the result is trimmed.
pub fn sanitize_content(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    let mut pending_newlines = 0usize;
    let mut pending_space = false;

    for ch in unified.chars() {
        match ch {
            '\n' => {
                pending_newlines += 1;
                pending_space = false;
            }
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_newlines > 0 {
                    if !out.is_empty() {
                        out.push('\n');
                        if pending_newlines > 1 {
                            out.push('\n');
                        }
                    }
                    pending_newlines = 0;
                } else if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            }
        }
    }

    out
}

/// Extract inline `#hashtag` tokens from text, without the `#` prefix.
/// Tag characters are ASCII alphanumerics and underscores.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'#' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len()
                && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
            {
                end += 1;
            }
            if end > start {
                tags.push(text[start..end].to_string());
            }
            i = end;
        } else {
            i += 1;
        }
    }

    tags
}

/// Normalize a tag set for storage: lowercase, drop empties, dedup while
/// preserving first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for tag in tags {
        let t = tag.as_ref().trim().to_lowercase();
        if !t.is_empty() && !seen.contains(&t) {
            seen.push(t);
        }
    }
    seen
}
