//! Syntax tree shared by every pass.
//!
//! The tree mixes two vocabularies: markdown nodes produced by the external
//! parser (`Paragraph`, `ListItem`, `Text`, ...) and output elements
//! (`Element`) produced once the tree has been lowered towards HTML. Passes
//! mutate it in place; the serializer consumes it once.

use std::collections::BTreeMap;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Markdown root
    Root(Parent),

    /// A paragraph of inline content
    Paragraph(Parent),

    /// A list item, possibly a task
    ListItem(ListItem),

    /// A run of plain text
    Text(String),

    /// Raw markup emitted verbatim by the serializer
    Html(String),

    /// Display math, rendered as its own block
    Math(Math),

    /// Math inline with the surrounding text
    InlineMath(Math),

    /// An output element (`html`, `body`, `img`, `div`, ...)
    Element(Element),

    /// Any other structural kind owned by the parser (list, heading, emphasis, ...)
    Container(Container),

    /// Any other value-carrying leaf owned by the parser (code, inlineCode, ...)
    Literal(Literal),
}

impl Default for Node {
    fn default() -> Self {
        Self::Root(Parent::default())
    }
}

impl Node {
    /// Create a root node.
    pub fn root(children: Vec<Node>) -> Self {
        Self::Root(Parent::new(children))
    }

    /// Create a paragraph node.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph(Parent::new(children))
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a raw markup node.
    pub fn html(value: impl Into<String>) -> Self {
        Self::Html(value.into())
    }

    /// Create an output element.
    pub fn element(tag: impl Into<String>, properties: Properties, children: Vec<Node>) -> Self {
        Self::Element(Element {
            tag: tag.into(),
            properties,
            children,
        })
    }

    /// Create a parser-owned structural node.
    pub fn container(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Container(Container {
            kind: kind.into(),
            children,
            hint: None,
        })
    }

    /// Create a parser-owned leaf.
    pub fn literal(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Literal(Literal {
            kind: kind.into(),
            value: value.into(),
        })
    }

    /// Name of the node kind, as the markdown tree vocabulary spells it.
    pub fn kind(&self) -> &str {
        match self {
            Self::Root(_) => "root",
            Self::Paragraph(_) => "paragraph",
            Self::ListItem(_) => "listItem",
            Self::Text(_) => "text",
            Self::Html(_) => "html",
            Self::Math(_) => "math",
            Self::InlineMath(_) => "inlineMath",
            Self::Element(_) => "element",
            Self::Container(c) => &c.kind,
            Self::Literal(l) => &l.kind,
        }
    }

    /// Child nodes, for kinds that have them.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Root(p) | Self::Paragraph(p) => Some(&p.children),
            Self::ListItem(item) => Some(&item.children),
            Self::Element(e) => Some(&e.children),
            Self::Container(c) => Some(&c.children),
            Self::Text(_) | Self::Html(_) | Self::Math(_) | Self::InlineMath(_) | Self::Literal(_) => {
                None
            }
        }
    }

    /// Mutable child list, for kinds that have one.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Root(p) | Self::Paragraph(p) => Some(&mut p.children),
            Self::ListItem(item) => Some(&mut item.children),
            Self::Element(e) => Some(&mut e.children),
            Self::Container(c) => Some(&mut c.children),
            Self::Text(_) | Self::Html(_) | Self::Math(_) | Self::InlineMath(_) | Self::Literal(_) => {
                None
            }
        }
    }

    /// Whether this is a display math node.
    pub fn is_display_math(&self) -> bool {
        matches!(self, Self::Math(_))
    }

    /// Whether this is an element with the given tag name.
    pub fn is_element(&self, tag: &str) -> bool {
        matches!(self, Self::Element(e) if e.tag == tag)
    }

    /// Text value of a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// A node that only carries children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parent {
    pub children: Vec<Node>,
    /// Output shape override for the serializer
    pub hint: Option<RenderHint>,
}

impl Parent {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            hint: None,
        }
    }
}

/// A list item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub children: Vec<Node>,
    /// Task state from the base grammar: checked, unchecked, or not a task
    pub checked: Option<bool>,
    pub hint: Option<RenderHint>,
}

impl ListItem {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            checked: None,
            hint: None,
        }
    }

    /// A list item carrying the base grammar's task state.
    pub fn task(checked: bool, children: Vec<Node>) -> Self {
        Self {
            children,
            checked: Some(checked),
            hint: None,
        }
    }

    /// Class list the serializer will put on this item.
    pub fn classes(&self) -> Option<&ClassList> {
        self.hint.as_ref().map(|h| &h.properties.class)
    }
}

/// A math node, display or inline.
#[derive(Debug, Clone, PartialEq)]
pub struct Math {
    /// Math source, trimmed
    pub value: String,
    pub hint: Option<RenderHint>,
}

/// An output element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub properties: Properties,
    pub children: Vec<Node>,
}

/// A structural node whose kind belongs to the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub kind: String,
    pub children: Vec<Node>,
    pub hint: Option<RenderHint>,
}

/// A leaf whose kind belongs to the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: String,
    pub value: String,
}

/// Side-channel data telling the serializer which tag, properties and
/// children to emit in place of a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderHint {
    /// Tag name override
    pub tag: Option<String>,
    pub properties: Properties,
    /// Children override
    pub children: Option<Vec<Node>>,
}

/// Presentation properties of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    pub class: ClassList,
    /// Every other attribute, keyed by name
    pub attributes: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class name.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class.push(class);
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Ordered, duplicate-free list of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class unless it is already present. Returns whether it was added.
    pub fn push(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.0.push(class);
        true
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-separated form, as used in a `class` attribute.
    pub fn to_attribute(&self) -> String {
        self.0.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for class in iter {
            list.push(class);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_deduplicates() {
        let mut classes: ClassList = ["math", "math-inline", "math"].into_iter().collect();
        assert_eq!(classes.len(), 2);
        assert!(!classes.push("math-inline"));
        assert!(classes.push("dark"));
        assert_eq!(classes.to_attribute(), "math math-inline dark");
    }

    #[test]
    fn test_children_access() {
        let mut node = Node::paragraph(vec![Node::text("a"), Node::text("b")]);
        assert_eq!(node.children().map(<[Node]>::len), Some(2));
        node.children_mut().unwrap().push(Node::html("<br>"));
        assert_eq!(node.children().map(<[Node]>::len), Some(3));
        assert!(Node::text("x").children().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Node::root(vec![]).kind(), "root");
        assert_eq!(Node::container("blockquote", vec![]).kind(), "blockquote");
        assert_eq!(Node::literal("inlineCode", "x").kind(), "inlineCode");
        assert!(Node::element("img", Properties::new(), vec![]).is_element("img"));
    }
}
