use std::fmt;

use log::debug;

/// A `[[target]]` or `[[target|alias]]` span found around a text offset.
///
/// `start` is the byte index of the opening `[[`, `end` the byte index of
/// the closing `]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WikiLinkSpan {
    pub start: usize,
    pub end: usize,
    pub target: String,
    pub alias: Option<String>,
}

impl fmt::Display for WikiLinkSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "[[{}|{}]]", self.target, alias),
            None => write!(f, "[[{}]]", self.target),
        }
    }
}

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// Returns the link target under `offset`, if any.
pub fn find_wiki_link_at(text: &str, offset: usize) -> Option<String> {
    let span = wiki_link_span_at(text, offset)?;
    debug!("wiki link {span} at {}..{}", span.start, span.end);
    Some(span.target)
}

/// Nearest-marker lookup: the closest `[[` at or before `offset` and the
/// closest `]]` at or after it. Pairs from unrelated links on the same line
/// can be matched; callers treat that as a miss-or-hit like any other.
pub fn wiki_link_span_at(text: &str, offset: usize) -> Option<WikiLinkSpan> {
    let offset = floor_char_boundary(text, offset.min(text.len()));

    // A marker may begin exactly at `offset`, so search through offset + 2.
    let search_end = floor_char_boundary(text, (offset + OPEN.len()).min(text.len()));
    let start = text[..search_end].rfind(OPEN)?;
    let end = text[offset..].find(CLOSE).map(|i| offset + i)?;
    if offset < start || offset > end {
        return None;
    }

    let content = text.get(start + OPEN.len()..end)?;
    if content.is_empty() {
        return None;
    }
    let (target, alias) = match content.split_once('|') {
        Some((left, right)) => (left, Some(right)),
        None => (content, None),
    };
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    let alias = alias
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string);

    Some(WikiLinkSpan {
        start,
        end,
        target: target.to_string(),
        alias,
    })
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
