//! Inline content to Markdown spans.

use crate::markdown::code_span;
use crate::tree::{ContentTree, NodeKind};

use super::role_map::InlineTag;
use super::text::{normalize, visible_text};

/// Render the inline content of `node` as one Markdown string.
///
/// ```
/// use marksift::dom::HtmlDocument;
/// use marksift::extract::render_inline;
///
/// let doc = HtmlDocument::parse("<p>Use <b>bold</b> and <a href='/x'>links</a></p>");
/// let p = doc.dom().find_by_tag("p").unwrap();
/// assert_eq!(render_inline(&doc, p), "Use **bold** and [links](/x)");
/// ```
pub fn render_inline<T: ContentTree>(tree: &T, node: T::Node) -> String {
    render_inline_excluding(tree, node, |_| false)
}

/// [`render_inline`], leaving out every descendant for which `exclude` holds.
pub fn render_inline_excluding<T, F>(tree: &T, node: T::Node, exclude: F) -> String
where
    T: ContentTree,
    F: Fn(T::Node) -> bool,
{
    let mut writer = InlineWriter {
        tree,
        exclude: &exclude,
        out: String::new(),
        spans: Vec::new(),
        steps: Vec::new(),
    };
    writer.run(node);
    writer.out.trim().to_string()
}

enum Step<N> {
    Visit(N),
    Close,
}

/// A marker pair or link whose content is still being written.
struct OpenSpan {
    kind: SpanKind,
    out: String,
}

enum SpanKind {
    Marker(&'static str),
    Link(String),
}

struct InlineWriter<'a, T: ContentTree> {
    tree: &'a T,
    exclude: &'a dyn Fn(T::Node) -> bool,
    out: String,
    spans: Vec<OpenSpan>,
    steps: Vec<Step<T::Node>>,
}

impl<'a, T: ContentTree> InlineWriter<'a, T> {
    fn run(&mut self, node: T::Node) {
        self.push_children(node);
        while let Some(step) = self.steps.pop() {
            match step {
                Step::Visit(node) => self.node(node),
                Step::Close => self.close(),
            }
        }
    }

    fn push_children(&mut self, node: T::Node) {
        let tree = self.tree;
        let mark = self.steps.len();
        self.steps.extend(tree.children(node).map(Step::Visit));
        self.steps[mark..].reverse();
    }

    /// Output of the innermost open span, or the top level.
    fn out(&mut self) -> &mut String {
        match self.spans.last_mut() {
            Some(span) => &mut span.out,
            None => &mut self.out,
        }
    }

    fn node(&mut self, node: T::Node) {
        let tree = self.tree;
        let name = match tree.kind(node) {
            NodeKind::Text(text) => return self.push_text(text),
            NodeKind::Other => return,
            NodeKind::Element(name) => name,
        };
        if !tree.is_visible(node) || (self.exclude)(node) {
            return;
        }

        match InlineTag::from_tag_name(name) {
            InlineTag::Strong => self.open(node, SpanKind::Marker("**")),
            InlineTag::Emphasis => self.open(node, SpanKind::Marker("*")),
            InlineTag::Code => {
                let text = collapse_whitespace(&visible_text(tree, node));
                let core = normalize(&text);
                self.push_around(&text, |_| code_span(&core), core.is_empty());
            }
            InlineTag::Link => {
                let href = tree
                    .attr(node, "href")
                    .map(str::trim)
                    .filter(|href| !href.is_empty())
                    .unwrap_or("#");
                self.open(node, SpanKind::Link(href.to_string()));
            }
            InlineTag::Break => self.push_break(),
            InlineTag::Other => self.push_children(node),
        }
    }

    /// Start a span; its children are written into it until the matching close.
    fn open(&mut self, node: T::Node, kind: SpanKind) {
        self.spans.push(OpenSpan {
            kind,
            out: String::new(),
        });
        self.steps.push(Step::Close);
        self.push_children(node);
    }

    fn close(&mut self) {
        let Some(OpenSpan { kind, out: inner }) = self.spans.pop() else {
            return;
        };
        let empty = inner.trim().is_empty();
        match kind {
            SpanKind::Marker(marker) => {
                self.push_around(&inner, |core| format!("{marker}{core}{marker}"), empty)
            }
            SpanKind::Link(href) => {
                self.push_around(&inner, |core| format!("[{core}]({href})"), empty)
            }
        }
    }

    /// Emit `render(core)` with `inner`'s leading and trailing whitespace
    /// kept outside it. An empty span emits only the whitespace.
    fn push_around(&mut self, inner: &str, render: impl FnOnce(&str) -> String, empty: bool) {
        let core = inner.trim();
        let lead = &inner[..inner.len() - inner.trim_start().len()];
        let trail = &inner[inner.trim_end().len()..];

        if empty {
            if !inner.is_empty() {
                self.push_text(" ");
            }
            return;
        }
        if !lead.is_empty() {
            self.push_text(" ");
        }
        let rendered = render(core);
        self.out().push_str(&rendered);
        if !trail.is_empty() {
            self.push_text(" ");
        }
    }

    /// Append a text run, collapsing whitespace against what is already out.
    fn push_text(&mut self, text: &str) {
        let collapsed = collapse_whitespace(text);
        let out = self.out();
        let after_space = out.ends_with([' ', '\n']);
        match collapsed.strip_prefix(' ') {
            Some(rest) if after_space => out.push_str(rest),
            _ => out.push_str(&collapsed),
        }
    }

    fn push_break(&mut self) {
        let out = self.out();
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
}

/// Replace each whitespace run with a single space, keeping boundary spaces.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
