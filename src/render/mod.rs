//! Rendering layer for turning rewritten trees into HTML.

pub mod html;

pub use html::{escape_html, HtmlBackend, HtmlConfig};
