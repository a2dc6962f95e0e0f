//! Ordered composition of passes around an external parser and serializer.
//!
//! A run goes: [`Frontend::parse`] → content passes → [`Backend::lower`] →
//! structural passes → [`Backend::serialize`]. Every pass finishes over the
//! whole tree before the next one starts.

use crate::ast::Node;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::transform::{
    DiagramBackground, MathExtraction, Pass, SubSuperscript, TaskMarkers, ThemeClass,
};

/// Produces a markdown tree from source text.
pub trait Frontend {
    fn parse(&self, source: &str) -> Result<Node>;
}

/// Turns the rewritten tree into output.
pub trait Backend {
    /// Convert the markdown tree to the output element vocabulary.
    fn lower(&self, tree: Node) -> Result<Node> {
        Ok(tree)
    }

    fn serialize(&self, tree: &Node) -> Result<String>;
}

/// A configured sequence of passes.
pub struct Pipeline {
    content: Vec<Box<dyn Pass>>,
    structural: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    /// Build the standard pipeline.
    ///
    /// All pass options are validated here, so a configuration error never
    /// leaves a tree half rewritten.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let mut builder = PipelineBuilder::new()
            .with_content_pass(MathExtraction::new())
            .with_content_pass(SubSuperscript::new())
            .with_content_pass(TaskMarkers::new());

        if let Some(diagrams) = &config.diagrams {
            builder = builder.with_structural_pass(DiagramBackground::new(diagrams)?);
        }
        builder = builder.with_structural_pass(ThemeClass::new(&config.theme_options())?);

        Ok(builder.build())
    }

    /// Start an empty pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Names of all passes, in run order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.content
            .iter()
            .chain(&self.structural)
            .map(|pass| pass.name())
            .collect()
    }

    /// Run the passes that work on the markdown tree.
    pub fn apply_content(&self, tree: &mut Node) {
        run_passes(&self.content, tree);
    }

    /// Run the passes that work on the lowered output tree.
    pub fn apply_structural(&self, tree: &mut Node) {
        run_passes(&self.structural, tree);
    }

    /// Run every pass on a tree that needs no lowering in between.
    pub fn apply(&self, tree: &mut Node) {
        self.apply_content(tree);
        self.apply_structural(tree);
    }

    /// Parse, rewrite and serialize one document.
    pub fn render<F, B>(&self, source: &str, frontend: &F, backend: &B) -> Result<String>
    where
        F: Frontend + ?Sized,
        B: Backend + ?Sized,
    {
        let mut tree = frontend.parse(source)?;
        self.apply_content(&mut tree);

        let mut tree = backend.lower(tree)?;
        self.apply_structural(&mut tree);

        backend.serialize(&tree)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("passes", &self.pass_names())
            .finish()
    }
}

fn run_passes(passes: &[Box<dyn Pass>], tree: &mut Node) {
    for pass in passes {
        let rewritten = pass.run(tree);
        tracing::debug!(pass = pass.name(), rewritten, "Pass completed");
    }
}

/// Assembles a [`Pipeline`] pass by pass.
#[derive(Default)]
pub struct PipelineBuilder {
    content: Vec<Box<dyn Pass>>,
    structural: Vec<Box<dyn Pass>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass that runs on the markdown tree.
    #[must_use]
    pub fn with_content_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.content.push(Box::new(pass));
        self
    }

    /// Append a pass that runs after lowering.
    #[must_use]
    pub fn with_structural_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.structural.push(Box::new(pass));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            content: self.content,
            structural: self.structural,
        }
    }
}
