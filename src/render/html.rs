//! HTML serializer for rewritten trees.
//!
//! Render hints take precedence over a node's own shape: a node with a hint is
//! emitted with the hint's tag, properties and children.

use crate::ast::{ListItem, Literal, Math, Node, Properties, RenderHint};
use crate::error::{RenderError, Result};
use crate::pipeline::Backend;
use crate::transform::tasks::checkbox_markup;

/// Configuration for HTML rendering.
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Whether to wrap the content in a complete `<html>` document.
    pub standalone: bool,
    /// Document title (for standalone mode).
    pub title: Option<String>,
    /// Document language (for standalone mode).
    pub lang: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            title: None,
            lang: "en".to_string(),
        }
    }
}

/// Serializes trees to HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlBackend {
    config: HtmlConfig,
}

impl HtmlBackend {
    pub fn new(config: HtmlConfig) -> Self {
        Self { config }
    }

    /// A backend producing complete documents.
    pub fn standalone(title: impl Into<String>) -> Self {
        Self::new(HtmlConfig {
            standalone: true,
            title: Some(title.into()),
            ..Default::default()
        })
    }
}

impl Backend for HtmlBackend {
    /// In standalone mode, move the markdown content into `<html><body>`.
    fn lower(&self, tree: Node) -> Result<Node> {
        if !self.config.standalone {
            return Ok(tree);
        }

        let content = match tree {
            Node::Root(root) => root.children,
            other => vec![other],
        };
        let title = self.config.title.as_deref().unwrap_or("Document");

        let head = Node::element(
            "head",
            Properties::new(),
            vec![
                Node::element(
                    "meta",
                    Properties::new().with_attribute("charset", "UTF-8"),
                    vec![],
                ),
                Node::element("title", Properties::new(), vec![Node::text(title)]),
            ],
        );
        let body = Node::element("body", Properties::new(), content);

        Ok(Node::element(
            "html",
            Properties::new().with_attribute("lang", self.config.lang.as_str()),
            vec![head, body],
        ))
    }

    fn serialize(&self, tree: &Node) -> Result<String> {
        let mut writer = HtmlWriter::default();
        if tree.is_element("html") {
            writer.output.push_str("<!DOCTYPE html>\n");
        }
        writer.node(tree)?;
        Ok(writer.output)
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

const BLOCK_TAGS: &[&str] = &[
    "blockquote", "body", "div", "h1", "h2", "h3", "h4", "h5", "h6", "head", "html", "li", "ol",
    "p", "pre", "ul",
];

/// Tag for a parser-owned container kind.
fn container_tag(kind: &str) -> Option<&'static str> {
    Some(match kind {
        "list" => "ul",
        "orderedList" => "ol",
        "blockquote" => "blockquote",
        "emphasis" => "em",
        "strong" => "strong",
        "delete" => "del",
        "heading1" => "h1",
        "heading2" => "h2",
        "heading3" => "h3",
        "heading4" => "h4",
        "heading5" => "h5",
        "heading6" => "h6",
        _ => return None,
    })
}

#[derive(Default)]
struct HtmlWriter {
    output: String,
}

impl HtmlWriter {
    fn node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Root(root) => self.children(&root.children)?,
            Node::Paragraph(p) => self.hinted("p", p.hint.as_ref(), &p.children)?,
            Node::ListItem(item) => self.list_item(item)?,
            Node::Text(text) => self.output.push_str(&escape_html(text)),
            Node::Html(html) => self.output.push_str(html),
            Node::Math(math) => self.math("div", math)?,
            Node::InlineMath(math) => self.math("span", math)?,
            Node::Element(e) => self.element(&e.tag, &e.properties, &e.children)?,
            Node::Container(c) => {
                let tag = match &c.hint {
                    Some(RenderHint { tag: Some(tag), .. }) => tag.as_str(),
                    _ => container_tag(&c.kind)
                        .ok_or_else(|| RenderError::Unsupported(c.kind.clone()))?,
                };
                self.hinted(tag, c.hint.as_ref(), &c.children)?;
            }
            Node::Literal(literal) => self.literal(literal),
        }
        Ok(())
    }

    fn children(&mut self, children: &[Node]) -> Result<()> {
        for child in children {
            self.node(child)?;
        }
        Ok(())
    }

    /// Emit an element, letting `hint` override tag, properties and children.
    fn hinted(&mut self, tag: &str, hint: Option<&RenderHint>, children: &[Node]) -> Result<()> {
        match hint {
            Some(hint) => self.element(
                hint.tag.as_deref().unwrap_or(tag),
                &hint.properties,
                hint.children.as_deref().unwrap_or(children),
            ),
            None => self.element(tag, &Properties::default(), children),
        }
    }

    fn list_item(&mut self, item: &ListItem) -> Result<()> {
        let empty = Properties::default();
        let (tag, properties, children) = match &item.hint {
            Some(hint) => (
                hint.tag.as_deref().unwrap_or("li"),
                &hint.properties,
                hint.children.as_deref().unwrap_or(&item.children),
            ),
            None => ("li", &empty, item.children.as_slice()),
        };

        self.open(tag, properties);
        // Base grammar task state that no pass has normalized.
        if let Some(checked) = item.checked {
            self.output.push_str(&checkbox_markup(checked));
        }
        self.children(children)?;
        self.close(tag);
        Ok(())
    }

    fn math(&mut self, tag: &str, math: &Math) -> Result<()> {
        let fallback = [Node::text(math.value.as_str())];
        self.hinted(tag, math.hint.as_ref(), &fallback)
    }

    fn literal(&mut self, literal: &Literal) {
        let value = escape_html(&literal.value);
        match literal.kind.as_str() {
            "inlineCode" => self.output.push_str(&format!("<code>{value}</code>")),
            "code" => self.output.push_str(&format!("<pre><code>{value}</code></pre>\n")),
            _ => self.output.push_str(&value),
        }
    }

    fn element(&mut self, tag: &str, properties: &Properties, children: &[Node]) -> Result<()> {
        self.open(tag, properties);
        if VOID_TAGS.contains(&tag) {
            return Ok(());
        }
        self.children(children)?;
        self.close(tag);
        Ok(())
    }

    fn open(&mut self, tag: &str, properties: &Properties) {
        self.output.push('<');
        self.output.push_str(tag);
        if !properties.class.is_empty() {
            self.output.push_str(&format!(
                r#" class="{}""#,
                escape_html(&properties.class.to_attribute())
            ));
        }
        for (name, value) in &properties.attributes {
            self.output
                .push_str(&format!(r#" {}="{}""#, name, escape_html(value)));
        }
        self.output.push('>');
    }

    fn close(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
        if BLOCK_TAGS.contains(&tag) {
            self.output.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Container, ListItem};
    use crate::transform::math::{display_math, inline_math};
    use pretty_assertions::assert_eq;

    fn render(tree: &Node) -> String {
        HtmlBackend::default().serialize(tree).unwrap()
    }

    #[test]
    fn test_render_paragraph_with_inline_math() {
        let tree = Node::root(vec![Node::paragraph(vec![
            Node::text("a < b: "),
            Node::InlineMath(inline_math("x^2")),
        ])]);
        assert_eq!(
            render(&tree),
            "<p>a &lt; b: <span class=\"math math-inline\">x^2</span></p>\n"
        );
    }

    #[test]
    fn test_render_display_math() {
        let tree = Node::root(vec![Node::Math(display_math("E=mc^2"))]);
        assert_eq!(render(&tree), "<div class=\"math math-display\">E=mc^2</div>\n");
    }

    #[test]
    fn test_render_math_without_hint() {
        let tree = Node::InlineMath(Math {
            value: "a&b".to_string(),
            hint: None,
        });
        assert_eq!(render(&tree), "<span>a&amp;b</span>");
    }

    #[test]
    fn test_raw_html_is_verbatim() {
        let tree = Node::paragraph(vec![Node::text("H"), Node::html("<sub>2</sub>"), Node::text("O")]);
        assert_eq!(render(&tree), "<p>H<sub>2</sub>O</p>\n");
    }

    #[test]
    fn test_unnormalized_task_renders_checkbox() {
        let tree = Node::ListItem(ListItem::task(true, vec![Node::text("done")]));
        assert_eq!(
            render(&tree),
            "<li><input type=\"checkbox\" disabled checked> done</li>\n"
        );
    }

    #[test]
    fn test_list_item_hint_classes() {
        let mut item = ListItem::new(vec![Node::text("x")]);
        item.hint = Some(RenderHint {
            properties: Properties::new().with_class("task-list-item"),
            ..Default::default()
        });
        assert_eq!(
            render(&Node::ListItem(item)),
            "<li class=\"task-list-item\">x</li>\n"
        );
    }

    #[test]
    fn test_void_element_and_attributes() {
        let tree = Node::element(
            "img",
            Properties::new()
                .with_attribute("src", "a.svg")
                .with_attribute("alt", "say \"hi\""),
            vec![],
        );
        assert_eq!(render(&tree), "<img alt=\"say &quot;hi&quot;\" src=\"a.svg\">");
    }

    #[test]
    fn test_containers_and_literals() {
        let tree = Node::container(
            "list",
            vec![Node::ListItem(ListItem::new(vec![
                Node::container("emphasis", vec![Node::text("em")]),
                Node::literal("inlineCode", "a<b"),
            ]))],
        );
        assert_eq!(
            render(&tree),
            "<ul><li><em>em</em><code>a&lt;b</code></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_unknown_container_is_unsupported() {
        let tree = Node::container("footnoteDefinition", vec![]);
        let err = HtmlBackend::default().serialize(&tree).unwrap_err();
        assert!(err.to_string().contains("footnoteDefinition"));
    }

    #[test]
    fn test_container_hint_supplies_tag() {
        let tree = Node::Container(Container {
            kind: "footnoteDefinition".to_string(),
            children: vec![Node::text("note")],
            hint: Some(RenderHint {
                tag: Some("aside".to_string()),
                ..Default::default()
            }),
        });
        assert_eq!(render(&tree), "<aside>note</aside>");
    }

    #[test]
    fn test_standalone_lowering() {
        let backend = HtmlBackend::standalone("Notes");
        let tree = backend
            .lower(Node::root(vec![Node::paragraph(vec![Node::text("hi")])]))
            .unwrap();
        assert_eq!(
            backend.serialize(&tree).unwrap(),
            "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\"><title>Notes</title></head>\n<body><p>hi</p>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn test_fragment_lowering_is_identity() {
        let tree = Node::root(vec![Node::text("x")]);
        assert_eq!(HtmlBackend::default().lower(tree.clone()).unwrap(), tree);
    }
}
