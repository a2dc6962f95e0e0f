//! Subscript `~text~` and superscript `^text^`.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Node;
use crate::transform::Pass;
use crate::visit::{rewrite, Visit};

/// Either delimiter pair, non-nesting, up to the nearest close.
static SUB_SUPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~([^~]+)~|\^([^\^]+)\^").unwrap());

/// Turns sub/superscript spans in text nodes into `<sub>`/`<sup>` markup.
///
/// The captured text is emitted verbatim, without escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubSuperscript;

impl SubSuperscript {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for SubSuperscript {
    fn name(&self) -> &'static str {
        "sub-superscript"
    }

    fn run(&self, tree: &mut Node) -> usize {
        rewrite(tree, &mut |node| match node {
            Node::Text(value) => split(value).map_or(Visit::Continue, Visit::Replace),
            _ => Visit::Continue,
        })
    }
}

fn split(value: &str) -> Option<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut last = 0;
    let mut matched = false;

    for caps in SUB_SUPER_RE.captures_iter(value) {
        let Some(span) = caps.get(0) else { continue };
        let markup = match (caps.get(1), caps.get(2)) {
            (Some(sub), _) => format!("<sub>{}</sub>", sub.as_str()),
            (None, Some(sup)) => format!("<sup>{}</sup>", sup.as_str()),
            (None, None) => continue,
        };

        if span.start() > last {
            nodes.push(Node::text(&value[last..span.start()]));
        }
        nodes.push(Node::Html(markup));
        last = span.end();
        matched = true;
    }

    if !matched {
        return None;
    }
    if last < value.len() {
        nodes.push(Node::text(&value[last..]));
    }

    Some(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_on(text: &str) -> Vec<Node> {
        let mut tree = Node::paragraph(vec![Node::text(text)]);
        SubSuperscript::new().run(&mut tree);
        tree.children().unwrap().to_vec()
    }

    #[test]
    fn test_sub_and_superscript() {
        assert_eq!(
            run_on("H~2~O and x^2^"),
            vec![
                Node::text("H"),
                Node::html("<sub>2</sub>"),
                Node::text("O and x"),
                Node::html("<sup>2</sup>"),
            ]
        );
    }

    #[test]
    fn test_content_is_not_escaped() {
        assert_eq!(run_on("~a<b~"), vec![Node::html("<sub>a<b</sub>")]);
    }

    #[test]
    fn test_nearest_close_wins() {
        assert_eq!(
            run_on("~a~b~c~"),
            vec![
                Node::html("<sub>a</sub>"),
                Node::text("b"),
                Node::html("<sub>c</sub>"),
            ]
        );
    }

    #[test]
    fn test_unmatched_and_empty_spans_are_text() {
        assert_eq!(run_on("about ~5 minutes"), vec![Node::text("about ~5 minutes")]);
        assert_eq!(run_on("x^^y"), vec![Node::text("x^^y")]);
    }

    #[test]
    fn test_no_escape_handling() {
        assert_eq!(
            run_on("\\~x~"),
            vec![Node::text("\\"), Node::html("<sub>x</sub>")]
        );
    }

    #[test]
    fn test_mixed_delimiters_do_not_pair() {
        assert_eq!(run_on("~a^"), vec![Node::text("~a^")]);
    }
}
