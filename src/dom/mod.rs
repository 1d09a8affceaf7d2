//! Static HTML documents.
//!
//! [`HtmlDocument`] is the page accessor used when there is no live browser:
//! html5ever parses the markup into an arena, and a small CSS cascade decides
//! which elements a browser would not render. The result implements
//! [`ContentTree`], so the extraction engine can run over it directly.
//!
//! ```
//! use marksift::dom::HtmlDocument;
//! use marksift::tree::ContentTree;
//!
//! let doc = HtmlDocument::parse("<body><p>Shown</p><p hidden>Gone</p></body>");
//! let body = doc.body().unwrap();
//! let visible: Vec<_> = doc
//!     .element_children(body)
//!     .filter(|&p| doc.is_visible(p))
//!     .collect();
//! assert_eq!(visible.len(), 1);
//! ```

mod arena;
mod css;
mod element_ref;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute};
pub use css::{ComputedVisibility, Origin, Stylesheet, compute_visibility, parse_inline_style};
pub use element_ref::{ElementRef, SiftSelectors, matches_any, parse_selector_list};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use selectors::context::SelectorCaches;

use crate::tree::{ContentTree, NodeKind};
use tree_sink::ArenaSink;

/// Parse markup into a bare arena, without any styling.
pub(crate) fn parse_arena(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// A parsed HTML page with precomputed visibility.
pub struct HtmlDocument {
    dom: ArenaDom,
    body: Option<ArenaNodeId>,
    visible: Vec<bool>,
}

impl HtmlDocument {
    /// Parse a page, honouring its `<style>` elements.
    pub fn parse(html: &str) -> Self {
        Self::parse_with(html, true)
    }

    /// Parse a page. With `use_stylesheets` off only the built-in rules,
    /// the `hidden` attribute and inline `style` attributes decide visibility.
    pub fn parse_with(html: &str, use_stylesheets: bool) -> Self {
        let dom = parse_arena(html);
        let body = find_body(&dom);
        let visible = vec![true; dom.len()];
        let mut doc = Self { dom, body, visible };

        let mut sheets = vec![(Stylesheet::user_agent(), Origin::UserAgent)];
        if use_stylesheets {
            sheets.extend(
                doc.style_sources()
                    .iter()
                    .map(|css| Stylesheet::parse(css))
                    .filter(|sheet| !sheet.is_empty())
                    .map(|sheet| (sheet, Origin::Author)),
            );
            log::trace!("{} author stylesheets affect visibility", sheets.len() - 1);
        }
        doc.visible = doc.cascade(&sheets);
        doc
    }

    /// The underlying arena.
    pub fn dom(&self) -> &ArenaDom {
        &self.dom
    }

    /// Text of every `<style>` element, in document order.
    pub fn style_sources(&self) -> Vec<String> {
        self.dom
            .preorder()
            .into_iter()
            .filter(|&id| self.dom.element_name(id) == Some("style"))
            .map(|id| {
                self.dom
                    .children(id)
                    .filter_map(|c| self.dom.text(c))
                    .collect::<String>()
            })
            .filter(|css| !css.trim().is_empty())
            .collect()
    }

    /// Compute per-node visibility in one pre-order pass.
    fn cascade(&self, sheets: &[(Stylesheet, Origin)]) -> Vec<bool> {
        let mut visible = vec![true; self.dom.len()];
        let mut caches = SelectorCaches::default();
        let root = [self.dom.document(), self.body.unwrap_or(ArenaNodeId::NONE)];

        // (node, ancestor display:none, inherited visibility:hidden)
        let mut stack = vec![(self.dom.document(), false, false)];
        while let Some((id, parent_gone, parent_hidden)) = stack.pop() {
            let (gone, hidden) = if self.dom.is_element(id) {
                let inline = self
                    .dom
                    .get_attr(id, "style")
                    .map(parse_inline_style)
                    .unwrap_or_default();
                let computed =
                    compute_visibility(&ElementRef::new(self, id), sheets, &inline, &mut caches);
                (
                    parent_gone || computed.display_none,
                    computed.hidden.unwrap_or(parent_hidden),
                )
            } else {
                (parent_gone, parent_hidden)
            };

            visible[id.index()] = root.contains(&id) || !(gone || hidden);

            let mark = stack.len();
            stack.extend(self.dom.children(id).map(|c| (c, gone, hidden)));
            stack[mark..].reverse();
        }

        let hidden_count = visible.iter().filter(|v| !**v).count();
        log::debug!("{hidden_count} of {} nodes are not rendered", visible.len());
        visible
    }
}

fn find_body(dom: &ArenaDom) -> Option<ArenaNodeId> {
    let html = dom
        .children(dom.document())
        .find(|&c| dom.element_name(c) == Some("html"))?;
    dom.children(html)
        .find(|&c| dom.element_name(c) == Some("body"))
}

impl ContentTree for HtmlDocument {
    type Node = ArenaNodeId;

    fn document(&self) -> ArenaNodeId {
        self.dom.document()
    }

    fn body(&self) -> Option<ArenaNodeId> {
        self.body
    }

    fn kind(&self, node: ArenaNodeId) -> NodeKind<'_> {
        match self.dom.get(node).map(|n| &n.data) {
            Some(ArenaNodeData::Element { name, .. }) => NodeKind::Element(name.local.as_ref()),
            Some(ArenaNodeData::Text(text)) => NodeKind::Text(text),
            _ => NodeKind::Other,
        }
    }

    fn parent(&self, node: ArenaNodeId) -> Option<ArenaNodeId> {
        self.dom.get(node).and_then(|n| n.parent.get())
    }

    fn children(&self, node: ArenaNodeId) -> impl Iterator<Item = ArenaNodeId> + '_ {
        self.dom.children(node)
    }

    fn attr(&self, node: ArenaNodeId, name: &str) -> Option<&str> {
        self.dom.get_attr(node, name)
    }

    fn is_visible(&self, node: ArenaNodeId) -> bool {
        self.visible.get(node.index()).copied().unwrap_or(false)
    }

    fn prev_sibling(&self, node: ArenaNodeId) -> Option<ArenaNodeId> {
        self.dom.get(node).and_then(|n| n.prev_sibling.get())
    }

    fn next_sibling(&self, node: ArenaNodeId) -> Option<ArenaNodeId> {
        self.dom.get(node).and_then(|n| n.next_sibling.get())
    }
}
