//! Property tests for the traversal invariants over generated pages.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use marksift::tree::ContentTree;
use marksift::{Engine, HtmlDocument, Options};

const CONTAINERS: &[&str] = &[
    "div", "section", "p", "h2", "h3", "ul", "ol", "li", "blockquote", "pre", "code", "table",
    "tr", "td", "span", "b", "em", "a", "nav",
];

fn arb_html() -> impl Strategy<Value = String> {
    let leaf = "[a-z]{1,6}( [a-z]{1,6})?";
    leaf.prop_recursive(4, 48, 5, |inner| {
        (
            prop::sample::select(CONTAINERS),
            prop::bool::weighted(0.15),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(tag, hidden, children)| {
                let attr = if hidden { " hidden" } else { "" };
                format!("<{tag}{attr}>{}</{tag}>", children.concat())
            })
    })
}

proptest! {
    #[test]
    fn prop_blocks_are_unique_disjoint_and_ordered(body in prop::collection::vec(arb_html(), 1..6)) {
        let doc = HtmlDocument::parse(&body.concat());
        let blocks = Engine::new(&Options::default()).unwrap().blocks(&doc);

        let order: HashMap<_, _> = doc
            .dom()
            .preorder()
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();

        let nodes: HashSet<_> = blocks.iter().map(|b| b.node).collect();
        prop_assert_eq!(nodes.len(), blocks.len());

        for block in &blocks {
            prop_assert!(!block.markdown.trim().is_empty());
            prop_assert!(doc.ancestors(block.node).skip(1).all(|a| !nodes.contains(&a)));
        }

        let positions: Vec<usize> = blocks.iter().map(|b| order[&b.node]).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_stats_match_block_count(body in prop::collection::vec(arb_html(), 1..6)) {
        let html = body.concat();
        let result = marksift::extract_html(&html);
        let blocks = Engine::default().blocks(&HtmlDocument::parse(&html));
        prop_assert_eq!(result.stats.total(), blocks.len());
        if blocks.is_empty() {
            prop_assert_eq!(result.markdown, "");
        }
    }
}
