//! Theme class on `<html>` and `<body>`, so stylesheets can select colors
//! per theme.

use crate::ast::Node;
use crate::config::ThemeOptions;
use crate::error::ConfigError;
use crate::transform::Pass;
use crate::visit::walk_mut;

const PASS_NAME: &str = "theme-class";

/// Adds the theme name to the class list of the document root and body.
#[derive(Debug, Clone)]
pub struct ThemeClass {
    theme: String,
}

impl ThemeClass {
    /// Build the pass. The theme must be a single class token.
    pub fn new(options: &ThemeOptions) -> Result<Self, ConfigError> {
        let Some(theme) = &options.theme else {
            return Err(ConfigError::MissingOption {
                pass: PASS_NAME,
                option: "theme",
            });
        };
        if theme.is_empty() || theme.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidOption {
                pass: PASS_NAME,
                option: "theme",
                reason: format!("'{theme}' is not a class name"),
            });
        }

        Ok(Self {
            theme: theme.clone(),
        })
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }
}

impl Pass for ThemeClass {
    fn name(&self) -> &'static str {
        PASS_NAME
    }

    fn run(&self, tree: &mut Node) -> usize {
        let mut stamped = 0;
        walk_mut(tree, &mut |node| {
            if let Node::Element(e) = node {
                if (e.tag == "html" || e.tag == "body") && e.properties.class.push(self.theme.as_str()) {
                    stamped += 1;
                }
            }
        });
        stamped
    }
}
