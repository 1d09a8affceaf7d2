//! Single-pass traversal that turns a content root into Markdown blocks.

use std::collections::HashSet;

use crate::tree::ContentTree;

use super::block::render_block;
use super::classify::Classifier;
use super::role_map::{BlockKind, SemanticTag};
use super::text::normalized_text;
use super::{Block, ExtractionResult, Stats};

/// One extraction run over one tree.
///
/// The visited set lives here, so every run starts fresh and no node is
/// rendered twice within a run.
pub struct Extractor<'a, T: ContentTree> {
    tree: &'a T,
    classifier: &'a Classifier,
    min_text_len: usize,
    visited: HashSet<T::Node>,
}

impl<'a, T: ContentTree> Extractor<'a, T> {
    pub fn new(tree: &'a T, classifier: &'a Classifier) -> Self {
        Self {
            tree,
            classifier,
            min_text_len: 0,
            visited: HashSet::new(),
        }
    }

    /// Drop blocks whose normalized text is shorter than `len` characters.
    pub fn with_min_text_len(mut self, len: usize) -> Self {
        self.min_text_len = len;
        self
    }

    /// Extract `root` into joined Markdown plus counters.
    pub fn run(self, root: T::Node) -> ExtractionResult {
        let blocks = self.blocks(root);
        let mut stats = Stats::default();
        for block in &blocks {
            stats.record(block.kind);
        }
        let markdown = blocks
            .iter()
            .map(|block| block.markdown.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        ExtractionResult { markdown, stats }
    }

    /// The emitted blocks in document order.
    pub fn blocks(mut self, root: T::Node) -> Vec<Block<T::Node>> {
        let tree = self.tree;
        let mut blocks = Vec::new();

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !self.visited.insert(node) {
                continue;
            }
            if !tree.is_visible(node) {
                log::trace!("skipping hidden subtree {node:?}");
                continue;
            }

            if let Some(tag) = self.classifier.semantic_tag(tree, node) {
                if let Some(kind) = tag.block_kind()
                    && let Some(block) = self.emit(node, tag, kind)
                {
                    blocks.push(block);
                }
                continue;
            }

            let mark = stack.len();
            stack.extend(tree.element_children(node));
            stack[mark..].reverse();
        }

        log::debug!("extracted {} blocks", blocks.len());
        blocks
    }

    fn emit(&self, node: T::Node, tag: SemanticTag, kind: BlockKind) -> Option<Block<T::Node>> {
        let markdown = render_block(self.tree, node, tag);
        let markdown = markdown.trim_end();
        if markdown.trim().is_empty() {
            log::debug!("dropping empty {kind:?} block {node:?}");
            return None;
        }
        if self.min_text_len > 0
            && normalized_text(self.tree, node).chars().count() < self.min_text_len
        {
            log::debug!("dropping short {kind:?} block {node:?}");
            return None;
        }
        log::trace!("{kind:?} block {node:?}: {} bytes", markdown.len());
        Some(Block {
            node,
            kind,
            markdown: markdown.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    fn run(html: &str) -> ExtractionResult {
        let doc = HtmlDocument::parse(html);
        let classifier = Classifier::default();
        let body = doc.body().unwrap();
        Extractor::new(&doc, &classifier).run(body)
    }

    #[test]
    fn test_blocks_joined_in_document_order() {
        let result =
            run("<h1>T</h1><div><p>one</p><section><p>two</p></section></div><p>three</p>");
        assert_eq!(result.markdown, "# T\n\none\n\ntwo\n\nthree");
        assert_eq!(result.stats.headings, 1);
        assert_eq!(result.stats.paragraphs, 3);
    }

    #[test]
    fn test_semantic_nodes_are_not_descended() {
        let result = run("<blockquote><p>quoted</p></blockquote>");
        assert_eq!(result.markdown, "> quoted");
        assert_eq!(result.stats.paragraphs, 0);
        assert_eq!(result.stats.quotes, 1);
    }

    #[test]
    fn test_empty_blocks_dropped_and_uncounted() {
        let result = run("<p> </p><h2></h2><ul><li></li></ul><p>x</p>");
        assert_eq!(result.markdown, "x");
        assert_eq!(result.stats, Stats { paragraphs: 1, ..Stats::default() });
    }

    #[test]
    fn test_hidden_subtrees_skipped() {
        let result =
            run(r#"<div style="display:none"><p>gone</p></div><p hidden>gone</p><p>kept</p>"#);
        assert_eq!(result.markdown, "kept");
    }

    #[test]
    fn test_navigational_list_descended_not_emitted() {
        let result =
            run(r#"<ul class="menu"><li><a href="/">Home</a></li></ul><ul><li>real</li></ul>"#);
        assert_eq!(result.markdown, "- real");
        assert_eq!(result.stats.lists, 1);
    }

    #[test]
    fn test_min_text_len() {
        let doc = HtmlDocument::parse("<p>ok</p><p>long enough</p>");
        let classifier = Classifier::default();
        let blocks = Extractor::new(&doc, &classifier)
            .with_min_text_len(5)
            .blocks(doc.body().unwrap());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].markdown, "long enough");
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_each_node_visited_once() {
        let doc = HtmlDocument::parse("<p>a</p><p>b</p>");
        let classifier = Classifier::default();
        let body = doc.body().unwrap();
        let blocks = Extractor::new(&doc, &classifier).blocks(body);
        let nodes: HashSet<_> = blocks.iter().map(|b| b.node).collect();
        assert_eq!(nodes.len(), blocks.len());
    }
}
