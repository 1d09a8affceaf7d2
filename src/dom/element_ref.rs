//! `selectors::Element` over any [`ContentTree`].
//!
//! This is what lets content-root hooks and stylesheet rules be written as
//! ordinary CSS selectors.

use std::fmt;

use cssparser::{Parser, ParserInput, ToCss};
use html5ever::{LocalName, Namespace, ns};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, QuirksMode, SelectorCaches};
use selectors::matching::{
    ElementSelectorFlags, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags,
};
use selectors::parser::{ParseRelative, Selector, SelectorList, SelectorParseErrorKind};
use selectors::{OpaqueElement, SelectorImpl};

use crate::error::{Error, Result};
use crate::tree::{ContentTree, NodeKind};

/// Selector implementation marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiftSelectors;

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

impl precomputed_hash::PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        self.0
            .bytes()
            .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
    }
}

impl AsRef<str> for IdentStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLocalName(pub LocalName);

impl precomputed_hash::PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<&str> for CssLocalName {
    fn from(s: &str) -> Self {
        Self(LocalName::from(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssNamespace(pub Namespace);

impl precomputed_hash::PrecomputedHash for CssNamespace {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl ToCss for CssNamespace {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<&str> for CssNamespace {
    fn from(s: &str) -> Self {
        Self(Namespace::from(s))
    }
}

/// Pseudo-elements never match a static tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = SiftSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

/// Non tree-structural pseudo-classes. Only `:link` can match without a
/// live user agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {
    Link,
    Visited,
    Hover,
    Active,
    Focus,
}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = SiftSelectors;

    fn is_active_or_hover(&self) -> bool {
        matches!(self, Self::Hover | Self::Active)
    }

    fn is_user_action_state(&self) -> bool {
        matches!(self, Self::Hover | Self::Active | Self::Focus)
    }
}

impl ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(match self {
            Self::Link => ":link",
            Self::Visited => ":visited",
            Self::Hover => ":hover",
            Self::Active => ":active",
            Self::Focus => ":focus",
        })
    }
}

impl SelectorImpl for SiftSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = CssLocalName;
    type NamespaceUrl = CssNamespace;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = CssLocalName;
    type BorrowedNamespaceUrl = CssNamespace;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

impl<'i> selectors::parser::Parser<'i> for SiftSelectors {
    type Impl = SiftSelectors;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_non_ts_pseudo_class(
        &self,
        location: cssparser::SourceLocation,
        name: cssparser::CowRcStr<'i>,
    ) -> std::result::Result<NonTSPseudoClass, cssparser::ParseError<'i, Self::Error>> {
        match name.as_ref() {
            "link" | "any-link" => Ok(NonTSPseudoClass::Link),
            "visited" => Ok(NonTSPseudoClass::Visited),
            "hover" => Ok(NonTSPseudoClass::Hover),
            "active" => Ok(NonTSPseudoClass::Active),
            "focus" => Ok(NonTSPseudoClass::Focus),
            _ => Err(location.new_custom_error(
                SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name),
            )),
        }
    }
}

/// Parse a comma-separated selector list.
pub fn parse_selector_list(source: &str) -> Result<Vec<Selector<SiftSelectors>>> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    SelectorList::parse(&SiftSelectors, &mut parser, ParseRelative::No)
        .map(|list| list.slice().to_vec())
        .map_err(|_| Error::InvalidSelector(source.to_string()))
}

/// A matching context over reusable caches.
pub fn matching_context(caches: &mut SelectorCaches) -> MatchingContext<'_, SiftSelectors> {
    MatchingContext::new(
        MatchingMode::Normal,
        None,
        caches,
        QuirksMode::NoQuirks,
        NeedsSelectorFlags::No,
        MatchingForInvalidation::No,
    )
}

/// Whether `elem` matches any selector in `hooks`.
pub fn matches_any<T: ContentTree>(
    elem: &ElementRef<'_, T>,
    hooks: &[Selector<SiftSelectors>],
    caches: &mut SelectorCaches,
) -> bool {
    let mut context = matching_context(caches);
    hooks
        .iter()
        .any(|s| selectors::matching::matches_selector(s, 0, None, elem, &mut context))
}

/// An element of a [`ContentTree`] seen through the `selectors` crate.
pub struct ElementRef<'a, T: ContentTree> {
    pub tree: &'a T,
    pub node: T::Node,
}

impl<T: ContentTree> Clone for ElementRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ContentTree> Copy for ElementRef<'_, T> {}

impl<'a, T: ContentTree> ElementRef<'a, T> {
    pub fn new(tree: &'a T, node: T::Node) -> Self {
        Self { tree, node }
    }

    fn with(&self, node: T::Node) -> Self {
        Self::new(self.tree, node)
    }

    fn tag(&self) -> Option<&str> {
        self.tree.tag_name(self.node)
    }

    fn element_sibling(&self, step: impl Fn(T::Node) -> Option<T::Node>) -> Option<Self> {
        let mut current = step(self.node);
        while let Some(node) = current {
            if self.tree.is_element(node) {
                return Some(self.with(node));
            }
            current = step(node);
        }
        None
    }
}

impl<T: ContentTree> fmt::Debug for ElementRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("node", &self.node)
            .field("tag", &self.tag())
            .finish()
    }
}

impl<T: ContentTree> selectors::Element for ElementRef<'_, T> {
    type Impl = SiftSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self)
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.tree.parent(self.node)?;
        self.tree.is_element(parent).then(|| self.with(parent))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.element_sibling(|n| self.tree.prev_sibling(n))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.element_sibling(|n| self.tree.next_sibling(n))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.tree
            .element_children(self.node)
            .next()
            .map(|child| self.with(child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.tag().is_some_and(|tag| tag == name.0.as_ref())
    }

    fn has_namespace(&self, namespace: &CssNamespace) -> bool {
        // every node of a content tree is treated as an HTML element
        namespace.0 == ns!(html)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    fn attr_matches(
        &self,
        _ns: &NamespaceConstraint<&CssNamespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        self.tree
            .attr(self.node, local_name.0.as_ref())
            .is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match pc {
            NonTSPseudoClass::Link => self.is_link(),
            _ => false,
        }
    }

    fn match_pseudo_element(
        &self,
        _pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        false
    }

    fn is_link(&self) -> bool {
        self.tag() == Some("a") && self.tree.attr(self.node, "href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.tree
            .attr(self.node, "id")
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.tree.attr(self.node, "class").is_some_and(|classes| {
            classes
                .split_whitespace()
                .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
        })
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.tree.children(self.node).all(|child| match self.tree.kind(child) {
            NodeKind::Element(_) => false,
            NodeKind::Text(t) => t.is_empty(),
            NodeKind::Other => true,
        })
    }

    fn is_root(&self) -> bool {
        self.tree.parent(self.node) == Some(self.tree.document())
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}
