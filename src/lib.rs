//! # marksift
//!
//! Extract the readable content of an HTML page as clean Markdown.
//!
//! ## Features
//!
//! - Finds the primary content region (`main`, `article`, common content ids
//!   and classes) and falls back to the body
//! - Drops navigation menus, hidden elements and page chrome
//! - Keeps headings, paragraphs, quotes, code blocks, lists and tables, with
//!   inline emphasis, code and links
//! - Counts what it kept
//!
//! ## Quick Start
//!
//! ```
//! let html = r#"
//!     <nav><ul><li><a href="/">Home</a></li></ul></nav>
//!     <article>
//!       <h2>Title</h2>
//!       <p>Some <strong>important</strong> text.</p>
//!       <ul><li>A</li><li>B</li></ul>
//!     </article>"#;
//!
//! let result = marksift::extract_html(html);
//! assert_eq!(result.markdown, "## Title\n\nSome **important** text.\n\n- A\n- B");
//! assert_eq!(result.stats.headings, 1);
//! ```
//!
//! ## Other Trees
//!
//! The engine in [`extract`] is generic over [`ContentTree`]. Implement it
//! for any document representation (a browser snapshot, a test fixture) and
//! call [`extract::extract`] directly. [`dom::HtmlDocument`] is the
//! implementation used for static HTML.

pub mod dom;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod options;
pub mod tree;
pub mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dom::HtmlDocument;
pub use error::{Error, Result};
pub use extract::{Block, BlockKind, Engine, ExtractionResult, Stats};
pub use options::Options;
pub use tree::{ContentTree, NodeKind};

/// Extract Markdown from an HTML string with default settings.
pub fn extract_html(html: &str) -> ExtractionResult {
    extract::extract(&HtmlDocument::parse(html))
}

/// Extract Markdown from an HTML string.
///
/// Fails only when `options` are invalid.
pub fn extract_html_with(html: &str, options: &Options) -> Result<ExtractionResult> {
    let engine = Engine::new(options)?;
    let doc = HtmlDocument::parse_with(html, options.use_stylesheets);
    Ok(engine.extract(&doc))
}

/// Extract Markdown from raw HTML bytes, detecting their encoding.
pub fn extract_html_bytes(bytes: &[u8], options: &Options) -> Result<ExtractionResult> {
    extract_html_with(&util::decode_html(bytes), options)
}
