//! Excerpt windows with match highlighting.

use crate::pattern::Matcher;

/// Build an excerpt centered on the first match in `content`, wrapping the
/// match in `**` and marking cut edges with `...`.
///
/// Returns `None` when the pattern does not match the body, letting the
/// caller fall back to a plain excerpt.
pub(crate) fn highlighted_excerpt(
    content: &str,
    matcher: &Matcher,
    context_chars: usize,
) -> Option<String> {
    let (start, end) = matcher.find(content)?;

    let window_start = step_back(content, start, context_chars);
    let window_end = step_forward(content, end, context_chars);

    let mut excerpt = String::new();
    if window_start > 0 {
        excerpt.push_str("...");
    }
    excerpt.push_str(&content[window_start..start]);
    excerpt.push_str("**");
    excerpt.push_str(&content[start..end]);
    excerpt.push_str("**");
    excerpt.push_str(&content[end..window_end]);
    if window_end < content.len() {
        excerpt.push_str("...");
    }

    // newlines read poorly in a one-line excerpt
    Some(excerpt.replace('\n', " ").trim().to_owned())
}

/// Byte offset `count` chars before `from`, on a char boundary.
fn step_back(text: &str, from: usize, count: usize) -> usize {
    text[..from]
        .char_indices()
        .rev()
        .take(count)
        .last()
        .map_or(from, |(idx, _)| idx)
}

/// Byte offset `count` chars after `from`, on a char boundary.
fn step_forward(text: &str, from: usize, count: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(count)
        .map_or(text.len(), |(idx, _)| from + idx)
}
