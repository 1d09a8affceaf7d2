//! Semantic vs. navigational classification.

use crate::tree::ContentTree;

use super::role_map::SemanticTag;

/// Attribute substrings that mark navigation and page chrome.
pub const DEFAULT_NAV_KEYWORDS: &[&str] = &[
    "nav",
    "navigation",
    "menu",
    "sidebar",
    "header",
    "footer",
    "breadcrumb",
    "pagination",
    "social",
    "widget",
    "aside",
];

/// Structural landmarks that never hold primary content.
const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

const MARKER_ATTRS: &[&str] = &["class", "id", "role"];

/// Whether `node` sits inside navigation or page chrome.
///
/// Walks from `node` up to, but not including, the body. Any landmark
/// element or any `class`/`id`/`role` containing a keyword (case-insensitive)
/// marks the node. Keywords must already be lower-case.
pub fn is_navigational<T, S>(tree: &T, node: T::Node, keywords: &[S]) -> bool
where
    T: ContentTree,
    S: AsRef<str>,
{
    let body = tree.body();
    tree.ancestors(node)
        .take_while(|&n| Some(n) != body)
        .filter(|&n| tree.is_element(n))
        .any(|n| is_landmark(tree, n) || has_keyword(tree, n, keywords))
}

/// Whether `node` has a `nav`/`header`/`footer`/`aside` ancestor (or is one),
/// stopping at the body.
pub fn is_in_chrome<T: ContentTree>(tree: &T, node: T::Node) -> bool {
    let body = tree.body();
    tree.ancestors(node)
        .take_while(|&n| Some(n) != body)
        .any(|n| is_landmark(tree, n))
}

fn is_landmark<T: ContentTree>(tree: &T, node: T::Node) -> bool {
    tree.tag_name(node).is_some_and(|tag| CHROME_TAGS.contains(&tag))
}

fn has_keyword<T: ContentTree, S: AsRef<str>>(tree: &T, node: T::Node, keywords: &[S]) -> bool {
    MARKER_ATTRS.iter().filter_map(|attr| tree.attr(node, attr)).any(|value| {
        let value = value.to_ascii_lowercase();
        keywords.iter().any(|k| value.contains(k.as_ref()))
    })
}

/// Decides which nodes become Markdown blocks.
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<String>,
    suppress_chrome: bool,
}

impl Classifier {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_ascii_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            suppress_chrome: false,
        }
    }

    pub fn with_suppress_chrome(mut self, suppress: bool) -> Self {
        self.suppress_chrome = suppress;
        self
    }

    /// The block tag of `node` if it should be emitted as a block.
    ///
    /// Lists are dropped when navigational. With chrome suppression on,
    /// every block inside a landmark is dropped too.
    pub fn semantic_tag<T: ContentTree>(&self, tree: &T, node: T::Node) -> Option<SemanticTag> {
        let tag = tree
            .tag_name(node)
            .and_then(SemanticTag::from_tag_name)
            .filter(|tag| tag.is_block())?;

        if tag.is_list() && self.is_navigational(tree, node) {
            log::debug!("skipping navigational list {node:?}");
            return None;
        }
        if self.suppress_chrome && is_in_chrome(tree, node) {
            log::debug!("skipping {tag:?} inside page chrome");
            return None;
        }
        Some(tag)
    }

    pub fn is_semantic<T: ContentTree>(&self, tree: &T, node: T::Node) -> bool {
        self.semantic_tag(tree, node).is_some()
    }

    pub fn is_navigational<T: ContentTree>(&self, tree: &T, node: T::Node) -> bool {
        is_navigational(tree, node, self.keywords.as_slice())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_NAV_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    fn first(doc: &HtmlDocument, tag: &str) -> crate::dom::ArenaNodeId {
        doc.dom().find_by_tag(tag).expect("tag present")
    }

    #[test]
    fn test_sidebar_widget_list_is_navigational() {
        let doc = HtmlDocument::parse(r#"<div class="sidebar-widget"><ul><li>x</li></ul></div>"#);
        let classifier = Classifier::default();
        let ul = first(&doc, "ul");
        assert!(classifier.is_navigational(&doc, ul));
        assert!(!classifier.is_semantic(&doc, ul));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_on_id_and_role() {
        let doc = HtmlDocument::parse(r#"<div id="MainMenu"><ol><li>x</li></ol></div>"#);
        assert!(Classifier::default().is_navigational(&doc, first(&doc, "ol")));

        let doc = HtmlDocument::parse(r#"<div role="Navigation"><ul><li>x</li></ul></div>"#);
        assert!(Classifier::default().is_navigational(&doc, first(&doc, "ul")));
    }

    #[test]
    fn test_landmark_ancestor() {
        let doc = HtmlDocument::parse("<footer><div><ul><li>x</li></ul></div></footer>");
        assert!(Classifier::default().is_navigational(&doc, first(&doc, "ul")));
    }

    #[test]
    fn test_walk_stops_at_body() {
        let doc = HtmlDocument::parse(r#"<body class="has-sidebar"><ul><li>x</li></ul></body>"#);
        let ul = first(&doc, "ul");
        assert!(!Classifier::default().is_navigational(&doc, ul));
        assert!(Classifier::default().is_semantic(&doc, ul));
    }

    #[test]
    fn test_only_lists_are_filtered_by_default() {
        let doc = HtmlDocument::parse(r#"<nav><p>About</p><ul><li>x</li></ul></nav>"#);
        let classifier = Classifier::default();
        assert!(classifier.is_semantic(&doc, first(&doc, "p")));
        assert!(!classifier.is_semantic(&doc, first(&doc, "ul")));

        let strict = Classifier::default().with_suppress_chrome(true);
        assert!(!strict.is_semantic(&doc, first(&doc, "p")));
    }

    #[test]
    fn test_non_block_tags_are_not_semantic() {
        let doc = HtmlDocument::parse("<ul><li>x</li></ul><div>y</div>");
        let classifier = Classifier::default();
        assert!(!classifier.is_semantic(&doc, first(&doc, "li")));
        assert!(!classifier.is_semantic(&doc, first(&doc, "div")));
    }

    #[test]
    fn test_custom_keywords() {
        let doc = HtmlDocument::parse(r#"<div class="Promo-box"><ul><li>x</li></ul></div>"#);
        let ul = first(&doc, "ul");
        assert!(!Classifier::default().is_navigational(&doc, ul));
        assert!(Classifier::new(&["promo"]).is_navigational(&doc, ul));
    }
}
