use std::ops::Range;

use crate::index::{DefinitionIndex, LinkDefinition};
use crate::options::{Options, Placement};

/// A declaration found in the source, with the byte range it occupies.
///
/// `span` runs from the opening `[` through the URL, or through the closing title delimiter when
/// a title was recognized. Text outside the span is never consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDefinition {
    pub definition: LinkDefinition,
    pub span: Range<usize>,
}

/// Builds the definition index for a whole document using [`Options::default`].
pub fn scan(text: &str) -> DefinitionIndex {
    scan_with_options(text, &Options::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn scan_with_options(text: &str, opts: &Options) -> DefinitionIndex {
    let mut index = DefinitionIndex::new();
    for scanned in definitions(text, opts) {
        tracing::trace!(
            id = %scanned.definition.id,
            url = %scanned.definition.url,
            title = ?scanned.definition.title,
            span = ?scanned.span,
            "link definition"
        );
        index.insert(scanned.definition, opts.duplicates);
    }
    tracing::debug!(definitions = index.len(), "scan complete");
    index
}

/// Iterates over every declaration in `text`, in source order.
///
/// Duplicates are yielded as they appear; the duplicate policy only applies when building an
/// index.
pub fn definitions<'a>(text: &'a str, opts: &Options) -> Definitions<'a> {
    Definitions {
        text,
        pos: 0,
        placement: opts.placement,
    }
}

#[derive(Debug, Clone)]
pub struct Definitions<'a> {
    text: &'a str,
    pos: usize,
    placement: Placement,
}

impl Iterator for Definitions<'_> {
    type Item = ScannedDefinition;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let start = self.pos + self.text[self.pos..].find('[')?;
            let scanned = if placement_allows(self.text, start, self.placement) {
                parse_definition_at(self.text, start)
            } else {
                None
            };
            match scanned {
                Some(scanned) => {
                    self.pos = scanned.span.end;
                    return Some(scanned);
                }
                None => self.pos = start + 1,
            }
        }
        None
    }
}

fn is_space_or_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_whitespace(b: u8) -> bool {
    is_space_or_tab(b) || b == b'\n' || b == b'\r'
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_space_or_tab(bytes[i]) {
        i += 1;
    }
    i
}

/// Length of the line break at `i` (`\n` or `\r\n`), or 0.
fn line_break_len(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'\n') => 1,
        Some(b'\r') if bytes.get(i + 1) == Some(&b'\n') => 2,
        _ => 0,
    }
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
        i += 1;
    }
    i
}

fn placement_allows(text: &str, start: usize, placement: Placement) -> bool {
    match placement {
        Placement::Anywhere => true,
        Placement::LineStart { max_indent } => {
            // Look back over the indentation only, never the whole line.
            let bytes = text.as_bytes();
            let mut i = start;
            while i > 0 {
                match bytes[i - 1] {
                    b'\n' => return true,
                    b' ' if start - i < max_indent => i -= 1,
                    _ => return false,
                }
            }
            true
        }
    }
}

fn parse_definition_at(text: &str, start: usize) -> Option<ScannedDefinition> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&b'[') {
        return None;
    }

    // [id]:
    let mut i = start + 1;
    while i < bytes.len() && !matches!(bytes[i], b'[' | b']' | b'\n' | b'\r') {
        i += 1;
    }
    if i == start + 1 || bytes.get(i) != Some(&b']') || bytes.get(i + 1) != Some(&b':') {
        return None;
    }
    let id = &text[start + 1..i];
    i += 2;

    // The URL shares the line with the id; only a title may continue on the next line.
    let url_start = skip_spaces(bytes, i);
    if url_start == i {
        return None;
    }

    let (url, url_end) = scan_url(text, url_start)?;

    let (title, end) = match scan_title(text, url_end) {
        Some((title, end)) => (Some(title), end),
        None => (None, url_end),
    };

    Some(ScannedDefinition {
        definition: LinkDefinition {
            id: id.to_string(),
            url: url.to_string(),
            title: title.map(str::to_string),
        },
        span: start..end,
    })
}

fn scan_url(text: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(start) == Some(&b'<') {
        let mut j = start + 1;
        while j < bytes.len() && bytes[j] != b'>' && !is_whitespace(bytes[j]) {
            j += 1;
        }
        if bytes.get(j) == Some(&b'>') {
            let url = &text[start + 1..j];
            return if url.is_empty() { None } else { Some((url, j + 1)) };
        }
    }
    let mut j = start;
    while j < bytes.len() && !is_whitespace(bytes[j]) {
        j += 1;
    }
    // An unterminated `<` is dropped like a matched one; a bare `<` leaves no URL.
    let url = text[start..j].strip_prefix('<').unwrap_or(&text[start..j]);
    if url.is_empty() {
        return None;
    }
    Some((url, j))
}

/// Title on the rest of the URL line, or alone on the next indented line.
fn scan_title(text: &str, url_end: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let i = skip_spaces(bytes, url_end);
    if i > url_end && i < bytes.len() && !matches!(bytes[i], b'\n' | b'\r') {
        return delimited_title(text, i);
    }

    let nl = line_break_len(bytes, i);
    if nl == 0 {
        return None;
    }
    let next = i + nl;
    let open = skip_spaces(bytes, next);
    if open == next {
        return None;
    }
    delimited_title(text, open)
}

fn delimited_title(text: &str, open: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let close = match bytes.get(open)? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    // The closer must end the line, trailing spaces aside.
    let mut end = line_end(bytes, open + 1);
    while end > open + 1 && is_space_or_tab(bytes[end - 1]) {
        end -= 1;
    }
    if end < open + 2 || bytes[end - 1] != close {
        return None;
    }
    Some((&text[open + 1..end - 1], end))
}
