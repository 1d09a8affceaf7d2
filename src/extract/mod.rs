//! The extraction engine.
//!
//! Extraction runs in four steps over any [`ContentTree`]:
//!
//! - [`ContentRootLocator`] picks the subtree holding the primary content
//! - [`Extractor`] walks it once, asking the [`Classifier`] which nodes are
//!   semantic blocks and skipping hidden subtrees
//! - [`render_block`] turns each block node into Markdown, using
//!   [`render_inline`] for inline spans
//! - the blocks are joined with blank lines and counted into [`Stats`]
//!
//! Nothing here can fail: a node that does not render to anything is
//! dropped.

mod block;
mod classify;
mod inline;
mod locate;
mod role_map;
mod text;
mod walker;

pub use block::{
    render_block, render_blockquote, render_code_block, render_heading, render_list, render_table,
};
pub use classify::{Classifier, DEFAULT_NAV_KEYWORDS, is_in_chrome, is_navigational};
pub use inline::{render_inline, render_inline_excluding};
pub use locate::{ContentRootLocator, DEFAULT_ROOT_SELECTORS, locate_content_root};
pub use role_map::{BlockKind, InlineTag, SemanticTag, is_block_level};
pub use text::{normalize, normalized_text, visible_text};
pub use walker::Extractor;

use crate::error::Result;
use crate::options::Options;
use crate::tree::ContentTree;

/// Per-kind block counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stats {
    pub headings: usize,
    pub paragraphs: usize,
    pub code_blocks: usize,
    pub lists: usize,
    pub tables: usize,
    pub quotes: usize,
}

impl Stats {
    pub fn record(&mut self, kind: BlockKind) {
        let counter = match kind {
            BlockKind::Heading => &mut self.headings,
            BlockKind::Paragraph => &mut self.paragraphs,
            BlockKind::Code => &mut self.code_blocks,
            BlockKind::List => &mut self.lists,
            BlockKind::Table => &mut self.tables,
            BlockKind::Quote => &mut self.quotes,
        };
        *counter += 1;
    }

    pub fn total(&self) -> usize {
        self.headings + self.paragraphs + self.code_blocks + self.lists + self.tables + self.quotes
    }
}

/// One emitted Markdown block and the node it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<N> {
    pub node: N,
    pub kind: BlockKind,
    pub markdown: String,
}

/// The Markdown document and its counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractionResult {
    pub markdown: String,
    pub stats: Stats,
}

/// A reusable extraction setup: parsed root hooks plus classifier.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    locator: ContentRootLocator,
    classifier: Classifier,
    min_text_len: usize,
}

impl Engine {
    pub fn new(options: &Options) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            locator: options.locator()?,
            classifier: options.classifier(),
            min_text_len: options.min_text_len,
        })
    }

    /// Locate the content root of `tree` and extract it.
    pub fn extract<T: ContentTree>(&self, tree: &T) -> ExtractionResult {
        let root = self.locator.locate(tree);
        self.extract_from(tree, root)
    }

    /// Extract the subtree at `root`, bypassing the locator.
    pub fn extract_from<T: ContentTree>(&self, tree: &T, root: T::Node) -> ExtractionResult {
        self.extractor(tree).run(root)
    }

    /// The blocks of `tree`'s content root, before joining.
    pub fn blocks<T: ContentTree>(&self, tree: &T) -> Vec<Block<T::Node>> {
        let root = self.locator.locate(tree);
        self.extractor(tree).blocks(root)
    }

    fn extractor<'a, T: ContentTree>(&'a self, tree: &'a T) -> Extractor<'a, T> {
        Extractor::new(tree, &self.classifier).with_min_text_len(self.min_text_len)
    }
}

/// Extract `tree` with default settings.
pub fn extract<T: ContentTree>(tree: &T) -> ExtractionResult {
    Engine::default().extract(tree)
}

/// Extract `tree` with custom settings.
pub fn extract_with<T: ContentTree>(tree: &T, options: &Options) -> Result<ExtractionResult> {
    Ok(Engine::new(options)?.extract(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    #[test]
    fn test_stats_record() {
        let mut stats = Stats::default();
        stats.record(BlockKind::Code);
        stats.record(BlockKind::Code);
        stats.record(BlockKind::Table);
        assert_eq!(stats.code_blocks, 2);
        assert_eq!(stats.tables, 1);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_extract_uses_content_root() {
        let doc = HtmlDocument::parse(
            "<header><p>Site name</p></header><article><h1>Story</h1><p>Body</p></article>",
        );
        let result = extract(&doc);
        assert_eq!(result.markdown, "# Story\n\nBody");
    }

    #[test]
    fn test_engine_with_options() {
        let doc = HtmlDocument::parse(
            r#"<div id="story"><p>Kept</p><div class="promo"><ul><li>ad</li></ul></div></div>"#,
        );
        let options = Options::new().with_root_selector("#story").with_nav_keyword("promo");
        let result = extract_with(&doc, &options).unwrap();
        assert_eq!(result.markdown, "Kept");
        assert_eq!(result.stats.paragraphs, 1);
        assert_eq!(result.stats.lists, 0);
    }

    #[test]
    fn test_engine_rejects_bad_options() {
        let options = Options::new().with_root_selectors(["::nope("]);
        assert!(Engine::new(&options).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_serializes_camel_case() {
        let doc = HtmlDocument::parse("<pre><code>x</code></pre>");
        let json = serde_json::to_value(extract(&doc)).unwrap();
        assert_eq!(json["stats"]["codeBlocks"], 1);
        assert_eq!(json["markdown"], "```\nx\n```");
    }
}
