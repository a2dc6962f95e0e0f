//! White background behind diagram images.
//!
//! Transparent diagrams are unreadable on a dark theme. Images whose alt text
//! names a diagram type are wrapped in a light container; the image itself is
//! moved into the wrapper untouched.

use crate::ast::{Node, Properties};
use crate::config::DiagramOptions;
use crate::error::ConfigError;
use crate::transform::Pass;
use crate::visit::{rewrite, Visit};

/// Inline style of the wrapper container.
pub const BACKGROUND_STYLE: &str =
    "background:#fff;padding:8px;display:inline-block;border-radius:6px;";

const PASS_NAME: &str = "diagram-background";

/// Wraps allow-listed images in a light background container.
#[derive(Debug, Clone)]
pub struct DiagramBackground {
    aliases: Vec<String>,
}

impl DiagramBackground {
    /// Build the pass. The alias list is mandatory and may not be empty.
    pub fn new(options: &DiagramOptions) -> Result<Self, ConfigError> {
        let Some(aliases) = &options.aliases else {
            return Err(ConfigError::MissingOption {
                pass: PASS_NAME,
                option: "aliases",
            });
        };
        if aliases.is_empty() {
            return Err(ConfigError::InvalidOption {
                pass: PASS_NAME,
                option: "aliases",
                reason: "must list at least one diagram alias".into(),
            });
        }

        let mut unique: Vec<String> = Vec::with_capacity(aliases.len());
        for alias in aliases {
            if !unique.contains(alias) {
                unique.push(alias.clone());
            }
        }

        Ok(Self { aliases: unique })
    }

    /// Aliases in configuration order, without duplicates.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn is_diagram(&self, node: &Node) -> bool {
        match node {
            Node::Element(e) if e.tag == "img" => e
                .properties
                .get("alt")
                .is_some_and(|alt| self.aliases.iter().any(|a| a == alt)),
            _ => false,
        }
    }
}

impl Pass for DiagramBackground {
    fn name(&self) -> &'static str {
        PASS_NAME
    }

    fn run(&self, tree: &mut Node) -> usize {
        rewrite(tree, &mut |node| {
            if !self.is_diagram(node) {
                return Visit::Continue;
            }
            let image = std::mem::take(node);
            tracing::trace!(alt = ?image_alt(&image), "Wrapping diagram image");
            Visit::Replace(vec![wrap(image)])
        })
    }
}

fn wrap(image: Node) -> Node {
    Node::element(
        "div",
        Properties::new().with_attribute("style", BACKGROUND_STYLE),
        vec![image],
    )
}

fn image_alt(node: &Node) -> Option<&str> {
    match node {
        Node::Element(e) => e.properties.get("alt"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(aliases: &[&str]) -> DiagramOptions {
        DiagramOptions {
            aliases: Some(aliases.iter().map(|a| a.to_string()).collect()),
        }
    }

    fn img(alt: Option<&str>) -> Node {
        let mut properties = Properties::new().with_attribute("src", "diagram.svg");
        if let Some(alt) = alt {
            properties = properties.with_attribute("alt", alt);
        }
        Node::element("img", properties, vec![])
    }

    fn body(children: Vec<Node>) -> Node {
        Node::element("body", Properties::new(), children)
    }

    #[test]
    fn test_wraps_allow_listed_image() {
        let pass = DiagramBackground::new(&options(&["flow", "seq"])).unwrap();
        let mut tree = body(vec![img(Some("flow")), img(Some("other"))]);
        assert_eq!(pass.run(&mut tree), 1);

        assert_eq!(
            tree,
            body(vec![
                Node::element(
                    "div",
                    Properties::new().with_attribute("style", BACKGROUND_STYLE),
                    vec![img(Some("flow"))],
                ),
                img(Some("other")),
            ])
        );
    }

    #[test]
    fn test_match_is_exact() {
        let pass = DiagramBackground::new(&options(&["mermaid"])).unwrap();
        let mut tree = body(vec![
            img(Some("Mermaid")),
            img(Some("mermaid diagram")),
            img(Some("merm")),
            img(None),
        ]);
        let before = tree.clone();
        assert_eq!(pass.run(&mut tree), 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_only_images_are_wrapped() {
        let pass = DiagramBackground::new(&options(&["flow"])).unwrap();
        let mut tree = body(vec![Node::element(
            "a",
            Properties::new().with_attribute("alt", "flow"),
            vec![],
        )]);
        assert_eq!(pass.run(&mut tree), 0);
    }

    #[test]
    fn test_nested_image_is_wrapped_in_place() {
        let pass = DiagramBackground::new(&options(&["seq"])).unwrap();
        let mut tree = body(vec![Node::element(
            "p",
            Properties::new(),
            vec![Node::text("see "), img(Some("seq")), Node::text(" above")],
        )]);
        pass.run(&mut tree);

        let paragraph = &tree.children().unwrap()[0];
        let children = paragraph.children().unwrap();
        assert_eq!(children.len(), 3);
        assert!(children[1].is_element("div"));
        assert_eq!(children[1].children().unwrap(), &[img(Some("seq"))]);
    }

    #[test]
    fn test_root_image_has_no_parent() {
        let pass = DiagramBackground::new(&options(&["flow"])).unwrap();
        let mut tree = img(Some("flow"));
        assert_eq!(pass.run(&mut tree), 0);
        assert_eq!(tree, img(Some("flow")));
    }

    #[test]
    fn test_missing_aliases_rejected() {
        let err = DiagramBackground::new(&DiagramOptions { aliases: None }).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingOption {
                pass: "diagram-background",
                option: "aliases"
            }
        );
    }

    #[test]
    fn test_empty_aliases_rejected() {
        let err = DiagramBackground::new(&options(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { option: "aliases", .. }));
    }

    #[test]
    fn test_aliases_deduplicated_in_order() {
        let pass = DiagramBackground::new(&options(&["seq", "flow", "seq"])).unwrap();
        assert_eq!(pass.aliases(), &["seq".to_string(), "flow".to_string()]);
    }
}
