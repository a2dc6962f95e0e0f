//! Ampersand math: `&inline&` and `&&display&&`.
//!
//! Math spans become [`Node::InlineMath`] and [`Node::Math`] nodes whose
//! render hints produce `<span class="math math-inline">` and
//! `<div class="math math-display">`. Display math is then hoisted out of its
//! paragraph, since a block cannot live inside a `<p>`.

use std::borrow::Cow;

use crate::ast::{Math, Node, Properties, RenderHint};
use crate::scan::{Delimiter, Scanner, Segment};
use crate::transform::Pass;
use crate::visit::{rewrite, Visit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MathKind {
    Display,
    Inline,
}

/// Extracts ampersand-delimited math from text nodes.
#[derive(Debug, Clone)]
pub struct MathExtraction {
    scanner: Scanner<MathKind>,
}

impl Default for MathExtraction {
    fn default() -> Self {
        Self::new()
    }
}

impl MathExtraction {
    pub fn new() -> Self {
        // Display first, so `&&` is never read as an empty inline span.
        let scanner = Scanner::new('\\')
            .with_delimiter(MathKind::Display, Delimiter::new("&&", "&&"))
            .with_delimiter(MathKind::Inline, Delimiter::new("&", "&").forbidding('&'));
        Self { scanner }
    }

    fn extract(&self, node: &mut Node) -> Visit {
        let Node::Text(value) = node else {
            return Visit::Continue;
        };

        if let Some(nodes) = self.split(value) {
            return Visit::Replace(nodes);
        }

        let unescaped = match self.scanner.unescape(value) {
            Cow::Owned(s) => Some(s),
            Cow::Borrowed(_) => None,
        };
        if let Some(s) = unescaped {
            *value = s;
        }
        Visit::Continue
    }

    /// Split a text run around its math spans, or `None` if it has none.
    fn split(&self, value: &str) -> Option<Vec<Node>> {
        let segments = self.scanner.scan(value);
        if !segments.iter().any(Segment::is_match) {
            return None;
        }

        let nodes = segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Node::Text(text),
                Segment::Match {
                    kind: MathKind::Display,
                    inner,
                } => Node::Math(display_math(inner.trim())),
                Segment::Match {
                    kind: MathKind::Inline,
                    inner,
                } => Node::InlineMath(inline_math(inner.trim())),
            })
            .collect();

        Some(nodes)
    }
}

impl Pass for MathExtraction {
    fn name(&self) -> &'static str {
        "math-extraction"
    }

    fn run(&self, tree: &mut Node) -> usize {
        let extracted = rewrite(tree, &mut |node| self.extract(node));
        let hoisted = rewrite(tree, &mut hoist_display_math);
        tracing::trace!(extracted, hoisted, "Math spans processed");
        extracted + hoisted
    }
}

/// Build a display math node.
pub fn display_math(value: &str) -> Math {
    math_with_hint(value, "div", "math-display")
}

/// Build an inline math node.
pub fn inline_math(value: &str) -> Math {
    math_with_hint(value, "span", "math-inline")
}

fn math_with_hint(value: &str, tag: &str, variant: &str) -> Math {
    Math {
        value: value.to_string(),
        hint: Some(RenderHint {
            tag: Some(tag.to_string()),
            properties: Properties::new().with_class("math").with_class(variant),
            children: Some(vec![Node::text(value)]),
        }),
    }
}

/// Split a paragraph around its display math children.
fn hoist_display_math(node: &mut Node) -> Visit {
    let Node::Paragraph(paragraph) = node else {
        return Visit::Continue;
    };
    if !paragraph.children.iter().any(Node::is_display_math) {
        return Visit::Continue;
    }

    let mut hoisted = Vec::new();
    let mut run = Vec::new();

    for child in std::mem::take(&mut paragraph.children) {
        if child.is_display_math() {
            if !run.is_empty() {
                hoisted.push(Node::paragraph(std::mem::take(&mut run)));
            }
            hoisted.push(child);
        } else {
            run.push(child);
        }
    }

    if !run.is_empty() {
        hoisted.push(Node::paragraph(run));
    }

    Visit::Replace(hoisted)
}
