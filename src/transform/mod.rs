//! Tree-rewriting passes.
//!
//! Content passes run on the markdown tree straight from the parser:
//! [`MathExtraction`], [`SubSuperscript`] and [`TaskMarkers`]. Structural
//! passes run once the tree has been lowered to output elements:
//! [`DiagramBackground`] and [`ThemeClass`].

pub mod diagram;
pub mod math;
pub mod sub_super;
pub mod tasks;
pub mod theme;

pub use diagram::DiagramBackground;
pub use math::MathExtraction;
pub use sub_super::SubSuperscript;
pub use tasks::TaskMarkers;
pub use theme::ThemeClass;

use crate::ast::Node;

/// A self-contained tree rewrite.
///
/// A pass holds only read-only configuration, validated when it is built, so
/// running it cannot fail.
pub trait Pass: Send + Sync {
    /// Short name used in logs and configuration errors.
    fn name(&self) -> &'static str;

    /// Rewrite `tree` in place. Returns the number of nodes rewritten.
    fn run(&self, tree: &mut Node) -> usize;
}
