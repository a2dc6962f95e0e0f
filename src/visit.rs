//! Depth-first traversal over the tree.
//!
//! [`walk_mut`] visits every node in place. [`rewrite`] lets the visitor
//! substitute zero or more nodes for the one being visited; traversal then
//! resumes right after the inserted span, so replacements are never revisited.

use crate::ast::Node;

/// What to do with a visited node.
#[derive(Debug, Clone, PartialEq)]
pub enum Visit {
    /// Keep the node and descend into its children.
    Continue,
    /// Splice these nodes in place of the visited one.
    Replace(Vec<Node>),
}

/// Visit every node pre-order, including `node` itself.
pub fn walk_mut<F>(node: &mut Node, f: &mut F)
where
    F: FnMut(&mut Node),
{
    f(node);
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            walk_mut(child, f);
        }
    }
}

/// Visit every descendant of `node` pre-order, allowing replacement.
///
/// `node` itself is never offered to the visitor since it has no parent to
/// splice into. Returns the number of nodes replaced.
pub fn rewrite<F>(node: &mut Node, f: &mut F) -> usize
where
    F: FnMut(&mut Node) -> Visit,
{
    match node.children_mut() {
        Some(children) => rewrite_children(children, f),
        None => 0,
    }
}

fn rewrite_children<F>(children: &mut Vec<Node>, f: &mut F) -> usize
where
    F: FnMut(&mut Node) -> Visit,
{
    let mut replaced = 0;
    let mut index = 0;

    while index < children.len() {
        match f(&mut children[index]) {
            Visit::Continue => {
                replaced += rewrite(&mut children[index], f);
                index += 1;
            }
            Visit::Replace(nodes) => {
                let inserted = nodes.len();
                children.splice(index..=index, nodes);
                index += inserted;
                replaced += 1;
            }
        }
    }

    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_resumes_after_inserted_span() {
        let mut tree = Node::root(vec![Node::text("a"), Node::text("b")]);
        let mut visited = Vec::new();

        let replaced = rewrite(&mut tree, &mut |node| {
            let value = node.as_text().unwrap_or_default().to_string();
            visited.push(value.clone());
            if value == "a" {
                // Would loop forever if the inserted nodes were revisited.
                Visit::Replace(vec![Node::text("a"), Node::text("a")])
            } else {
                Visit::Continue
            }
        });

        assert_eq!(replaced, 1);
        assert_eq!(visited, vec!["a", "b"]);
        assert_eq!(
            tree,
            Node::root(vec![Node::text("a"), Node::text("a"), Node::text("b")])
        );
    }

    #[test]
    fn test_empty_replacement_removes_node() {
        let mut tree = Node::root(vec![Node::text("x"), Node::html("<hr>"), Node::text("y")]);
        rewrite(&mut tree, &mut |node| match node {
            Node::Html(_) => Visit::Replace(Vec::new()),
            _ => Visit::Continue,
        });
        assert_eq!(tree, Node::root(vec![Node::text("x"), Node::text("y")]));
    }

    #[test]
    fn test_rewrite_descends_into_kept_nodes() {
        let mut tree = Node::root(vec![Node::paragraph(vec![Node::container(
            "emphasis",
            vec![Node::text("deep")],
        )])]);
        rewrite(&mut tree, &mut |node| match node {
            Node::Text(_) => Visit::Replace(vec![Node::text("found")]),
            _ => Visit::Continue,
        });
        assert_eq!(
            tree,
            Node::root(vec![Node::paragraph(vec![Node::container(
                "emphasis",
                vec![Node::text("found")],
            )])])
        );
    }

    #[test]
    fn test_walk_mut_includes_root() {
        let mut tree = Node::root(vec![Node::paragraph(vec![Node::text("t")])]);
        let mut kinds = Vec::new();
        walk_mut(&mut tree, &mut |node| kinds.push(node.kind().to_string()));
        assert_eq!(kinds, vec!["root", "paragraph", "text"]);
    }
}
