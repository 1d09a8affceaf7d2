//! Whitespace normalization and visible-text collection.

use crate::tree::{ContentTree, NodeKind};

/// Collapse every whitespace run to one space and trim both ends.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Concatenated text of all rendered descendants, verbatim.
pub fn visible_text<T: ContentTree>(tree: &T, node: T::Node) -> String {
    let mut out = String::new();
    collect_text(tree, node, &mut out);
    out
}

/// [`visible_text`], normalized.
pub fn normalized_text<T: ContentTree>(tree: &T, node: T::Node) -> String {
    normalize(&visible_text(tree, node))
}

fn collect_text<T: ContentTree>(tree: &T, node: T::Node, out: &mut String) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match tree.kind(node) {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) if !tree.is_visible(node) => {}
            NodeKind::Element(_) | NodeKind::Other => {
                let mark = stack.len();
                stack.extend(tree.children(node));
                stack[mark..].reverse();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello \n\t  world  "), "Hello world");
        assert_eq!(normalize("\u{a0}non\u{a0}breaking\u{a0}"), "non breaking");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_visible_text_skips_hidden_children() {
        let doc = HtmlDocument::parse(
            r#"<p id="p">Read <span style="display:none">secret</span>this<script>x</script></p>"#,
        );
        let p = doc.dom().find_by_tag("p").unwrap();
        assert_eq!(visible_text(&doc, p), "Read this");
    }

    #[test]
    fn test_normalized_text_across_elements() {
        let doc = HtmlDocument::parse("<h1>  Big\n  <em>news</em>  today </h1>");
        let h1 = doc.dom().find_by_tag("h1").unwrap();
        assert_eq!(normalized_text(&doc, h1), "Big news today");
    }

    #[test]
    fn test_visible_text_of_deep_nesting() {
        let depth = 20_000;
        let html = format!("<h1>{}deep{}</h1>", "<span>".repeat(depth), "</span>".repeat(depth));
        let doc = HtmlDocument::parse(&html);
        let h1 = doc.dom().find_by_tag("h1").unwrap();
        assert_eq!(visible_text(&doc, h1), "deep");
    }
}
