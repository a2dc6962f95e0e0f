//! # markdown-preview-passes
//!
//! Syntax-tree extension passes for a themed markdown preview.
//!
//! The crate does not parse markdown. It takes a tree from an external parser,
//! rewrites the notations the base grammar does not know about, and hands the
//! tree to a serializer.
//!
//! ## Passes
//!
//! Content passes, on the markdown tree:
//!
//! - **Math**: inline `&a^2 + b^2&` and display `&&\int_0^1 x\,dx&&`. A literal
//!   ampersand is written `\&`. Display math is hoisted out of its paragraph.
//! - **Sub/superscript**: `H~2~O`, `x^2^`.
//! - **Task markers**: GFM tasks (`- [ ]`, `- [x]`) and the custom markers
//!   `- [!]` (important), `- [?]` (question), `- [>]` (ongoing) all become a
//!   class-tagged item with an inlined checkbox.
//!
//! Structural passes, once the tree has been lowered to output elements:
//!
//! - **Diagram background**: images whose alt text is an allow-listed diagram
//!   name are wrapped in a light container.
//! - **Theme class**: the theme name is added to the classes of `<html>` and
//!   `<body>`.
//!
//! ## Quick Start
//!
//! ```rust
//! use markdown_preview_passes::{ast::Node, process, PipelineConfig};
//!
//! let mut tree = Node::root(vec![Node::paragraph(vec![Node::text(
//!     "Energy: &E = mc^2& in H~2~O",
//! )])]);
//!
//! process(&mut tree, &PipelineConfig::default()).unwrap();
//!
//! let paragraph = &tree.children().unwrap()[0];
//! assert_eq!(paragraph.children().unwrap().len(), 5);
//! ```
//!
//! ## Configuration
//!
//! ```text
//! theme = "dark"
//!
//! [diagrams]
//! aliases = ["mermaid", "plantuml"]
//! ```
//!
//! The diagram pass only runs when `[diagrams]` is present.

pub mod ast;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod transform;
pub mod visit;

// Convenience re-exports
pub use ast::Node;
pub use config::{DiagramOptions, PipelineConfig, ThemeOptions};
pub use error::{ConfigError, Error, RenderError, Result};
pub use pipeline::{Backend, Frontend, Pipeline, PipelineBuilder};
pub use render::{HtmlBackend, HtmlConfig};
pub use transform::Pass;

/// Run every configured pass over `tree`, with no lowering in between.
///
/// This is a convenience function for trees that already mix markdown nodes
/// and output elements. Use [`Pipeline::render`] to go through a parser and a
/// serializer.
pub fn process(tree: &mut Node, config: &PipelineConfig) -> Result<()> {
    let pipeline = Pipeline::new(config)?;
    pipeline.apply(tree);
    Ok(())
}
