//! Content-root location.

use selectors::context::SelectorCaches;
use selectors::parser::Selector;

use crate::dom::{ElementRef, SiftSelectors, matches_any, parse_selector_list};
use crate::error::Result;
use crate::tree::ContentTree;

/// Content hooks in priority order.
pub const DEFAULT_ROOT_SELECTORS: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    "#content",
    ".content",
    "#main",
    ".main",
    ".post-content",
    ".entry-content",
];

/// Finds the subtree holding a page's primary content.
///
/// Each hook is a selector list. The earliest hook with any match wins, and
/// within a hook the first match in document order.
#[derive(Debug, Clone)]
pub struct ContentRootLocator {
    hooks: Vec<Vec<Selector<SiftSelectors>>>,
}

impl ContentRootLocator {
    /// Parse `hooks`; fails on the first selector that does not parse.
    pub fn new<S: AsRef<str>>(hooks: &[S]) -> Result<Self> {
        let hooks = hooks
            .iter()
            .map(|hook| parse_selector_list(hook.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { hooks })
    }

    /// The content root of `tree`: best hook match, else the body, else the
    /// document node.
    pub fn locate<T: ContentTree>(&self, tree: &T) -> T::Node {
        if let Some((hook, node)) = self.best_match(tree) {
            log::debug!("content root matched hook {hook}: {node:?}");
            return node;
        }
        match tree.body() {
            Some(body) => {
                log::debug!("no content hook matched, using body");
                body
            }
            None => tree.document(),
        }
    }

    /// One pre-order pass keeping the match with the lowest hook index.
    fn best_match<T: ContentTree>(&self, tree: &T) -> Option<(usize, T::Node)> {
        let mut caches = SelectorCaches::default();
        let mut best: Option<(usize, T::Node)> = None;

        let mut stack = vec![tree.document()];
        while let Some(node) = stack.pop() {
            if tree.is_element(node) {
                let limit = best.map_or(self.hooks.len(), |(hook, _)| hook);
                let elem = ElementRef::new(tree, node);
                if let Some(hook) = self.hooks[..limit]
                    .iter()
                    .position(|hook| matches_any(&elem, hook, &mut caches))
                {
                    best = Some((hook, node));
                    if hook == 0 {
                        break;
                    }
                }
            }
            let mark = stack.len();
            stack.extend(tree.element_children(node));
            stack[mark..].reverse();
        }

        best
    }
}

impl Default for ContentRootLocator {
    fn default() -> Self {
        let hooks = DEFAULT_ROOT_SELECTORS
            .iter()
            .filter_map(|hook| parse_selector_list(hook).ok())
            .collect();
        Self { hooks }
    }
}

/// Locate the content root with the default hooks.
pub fn locate_content_root<T: ContentTree>(tree: &T) -> T::Node {
    ContentRootLocator::default().locate(tree)
}
