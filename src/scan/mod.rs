//! Escape-aware scanning of text runs.
//!
//! [`Scanner`] splits a text run into literal text and delimited spans. It is
//! a linear scan: a delimiter counts only when the character right before it
//! is not the escape character, and at every position the delimiters are
//! tried in the order they were registered, so longer forms must be added
//! first.

mod marker;

pub use marker::{task_marker, TaskMarker};

use std::borrow::Cow;

/// An open/close delimiter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    open: &'static str,
    close: &'static str,
    /// Character that may not appear unescaped inside the span
    forbid: Option<char>,
}

impl Delimiter {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self {
            open,
            close,
            forbid: None,
        }
    }

    /// Reject spans whose content holds an unescaped `c`.
    #[must_use]
    pub const fn forbidding(mut self, c: char) -> Self {
        self.forbid = Some(c);
        self
    }

    /// Try to match a span opening at `pos`. Returns the content and the end offset.
    fn match_at<'a>(&self, text: &'a str, pos: usize, escape: char) -> Option<(&'a str, usize)> {
        if !text[pos..].starts_with(self.open) {
            return None;
        }

        let start = pos + self.open.len();
        for (offset, c) in text[start..].char_indices() {
            let at = start + offset;
            let escaped = is_escaped(text, at, escape);

            // Content must hold at least one character.
            if at > start && !escaped && text[at..].starts_with(self.close) {
                return Some((&text[start..at], at + self.close.len()));
            }
            if !escaped && self.forbid == Some(c) {
                return None;
            }
        }

        None
    }
}

/// A piece of scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a, K> {
    /// Pass-through text with escapes resolved
    Literal(String),
    /// Content of a delimited span, tagged with the delimiter that matched
    Match { kind: K, inner: &'a str },
}

impl<K> Segment<'_, K> {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

/// Splits text into literal and delimited segments.
#[derive(Debug, Clone)]
pub struct Scanner<K> {
    escape: char,
    delimiters: Vec<(K, Delimiter)>,
}

impl<K: Copy> Scanner<K> {
    pub fn new(escape: char) -> Self {
        Self {
            escape,
            delimiters: Vec::new(),
        }
    }

    /// Register a delimiter. Earlier registrations win at the same position.
    #[must_use]
    pub fn with_delimiter(mut self, kind: K, delimiter: Delimiter) -> Self {
        self.delimiters.push((kind, delimiter));
        self
    }

    /// Scan `text` left to right into non-overlapping segments.
    ///
    /// Text without any match comes back as a single literal segment; empty
    /// text yields no segments.
    pub fn scan<'a>(&self, text: &'a str) -> Vec<Segment<'a, K>> {
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;

        while pos < text.len() {
            match self.match_at(text, pos) {
                Some((kind, inner, end)) => {
                    if pos > literal_start {
                        segments.push(self.literal(&text[literal_start..pos]));
                    }
                    segments.push(Segment::Match { kind, inner });
                    pos = end;
                    literal_start = end;
                }
                None => {
                    pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if literal_start < text.len() {
            segments.push(self.literal(&text[literal_start..]));
        }

        segments
    }

    /// Resolve escape sequences for delimiter characters (`\&` -> `&`).
    pub fn unescape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains(self.escape) {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut changed = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c == self.escape {
                if let Some(&next) = chars.peek() {
                    if self.is_escapable(next) {
                        out.push(next);
                        chars.next();
                        changed = true;
                        continue;
                    }
                }
            }
            out.push(c);
        }

        if changed {
            Cow::Owned(out)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn match_at<'a>(&self, text: &'a str, pos: usize) -> Option<(K, &'a str, usize)> {
        if is_escaped(text, pos, self.escape) {
            return None;
        }
        self.delimiters.iter().find_map(|(kind, delimiter)| {
            delimiter
                .match_at(text, pos, self.escape)
                .map(|(inner, end)| (*kind, inner, end))
        })
    }

    fn literal<'a>(&self, text: &str) -> Segment<'a, K> {
        Segment::Literal(self.unescape(text).into_owned())
    }

    fn is_escapable(&self, c: char) -> bool {
        self.delimiters
            .iter()
            .any(|(_, d)| d.open.starts_with(c) || d.close.starts_with(c))
    }
}

fn is_escaped(text: &str, pos: usize, escape: char) -> bool {
    text[..pos].ends_with(escape)
}
