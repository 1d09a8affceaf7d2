//! Just enough CSS to decide what a browser would not render.
//!
//! Only `display` and `visibility` are parsed; every other declaration is
//! skipped. Rules cascade by importance, origin, inline-ness, specificity and
//! source order, as in a browser.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};
use selectors::context::SelectorCaches;
use selectors::parser::Selector;

use super::element_ref::{ElementRef, SiftSelectors, matches_any};
use crate::tree::ContentTree;

/// Stylesheet applied before any author CSS.
const USER_AGENT_CSS: &str = "
    head, script, style, template, noscript, title, meta, link, base { display: none; }
    [hidden] { display: none; }
";

/// Where a stylesheet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    UserAgent = 0,
    Author = 1,
}

/// Parsed value of a property we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    DisplayNone,
    DisplayShown,
    Hidden,
    Visible,
    /// `inherit`/`unset` on `visibility`.
    InheritVisibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Display,
    Visibility,
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub property: Property,
    pub value: PropertyValue,
    pub important: bool,
}

/// CSS specificity as (ids, classes, elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Specificity {
    pub ids: u16,
    pub classes: u16,
    pub elements: u16,
}

impl Specificity {
    pub fn from_selector(selector: &Selector<SiftSelectors>) -> Self {
        // packed as (ids << 20) | (classes << 10) | elements
        let spec = selector.specificity();
        Self {
            ids: ((spec >> 20) & 0x3FF) as u16,
            classes: ((spec >> 10) & 0x3FF) as u16,
            elements: (spec & 0x3FF) as u16,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CssRule {
    pub selectors: Vec<Selector<SiftSelectors>>,
    pub declarations: Vec<Declaration>,
    pub specificity: Specificity,
}

#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    /// Parse a stylesheet. Invalid rules are dropped, never reported.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = Vec::new();

        let mut rule_parser = TopLevelRuleParser { rules: &mut rules };
        for result in StyleSheetParser::new(&mut parser, &mut rule_parser) {
            if let Err((err, source)) = result {
                log::trace!("skipping css rule {source:?}: {:?}", err.kind);
            }
        }

        Self { rules }
    }

    pub fn user_agent() -> Self {
        Self::parse(USER_AGENT_CSS)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse the declarations of a `style="..."` attribute.
pub fn parse_inline_style(style: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut declarations = Vec::new();
    let mut decl_parser = DeclarationListParser {
        declarations: &mut declarations,
    };
    for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
        let _ = result;
    }
    declarations
}

struct TopLevelRuleParser<'a> {
    rules: &'a mut Vec<CssRule>,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // @media and friends are ignored wholesale
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = Vec<Selector<SiftSelectors>>;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let location = input.current_source_location();
        selectors::parser::SelectorList::parse(
            &SiftSelectors,
            input,
            selectors::parser::ParseRelative::No,
        )
        .map(|list| list.slice().to_vec())
        .map_err(|_| location.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut declarations = Vec::new();
        let mut decl_parser = DeclarationListParser {
            declarations: &mut declarations,
        };
        for result in RuleBodyParser::new(input, &mut decl_parser) {
            let _ = result;
        }

        if declarations.is_empty() {
            return Ok(());
        }

        // one rule per selector so each keeps its own specificity
        for selector in prelude {
            self.rules.push(CssRule {
                specificity: Specificity::from_selector(&selector),
                selectors: vec![selector],
                declarations: declarations.clone(),
            });
        }
        Ok(())
    }
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();
}

impl<'i> DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let parsed = parse_property(&name, input);
        let important = input.try_parse(cssparser::parse_important).is_ok();
        // leftovers such as `display: flex !ie-hack` are discarded
        while input.next().is_ok() {}

        if let Some((property, value)) = parsed {
            self.declarations.push(Declaration {
                property,
                value,
                important,
            });
        }
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

fn parse_property(name: &str, input: &mut Parser<'_, '_>) -> Option<(Property, PropertyValue)> {
    let keyword = input.try_parse(|i| i.expect_ident_cloned()).ok()?;
    let keyword = keyword.to_ascii_lowercase();

    if name.eq_ignore_ascii_case("display") {
        let value = match keyword.as_str() {
            "none" => PropertyValue::DisplayNone,
            _ => PropertyValue::DisplayShown,
        };
        Some((Property::Display, value))
    } else if name.eq_ignore_ascii_case("visibility") {
        let value = match keyword.as_str() {
            "hidden" | "collapse" => PropertyValue::Hidden,
            "inherit" | "unset" => PropertyValue::InheritVisibility,
            _ => PropertyValue::Visible,
        };
        Some((Property::Visibility, value))
    } else {
        None
    }
}

/// The outcome of the cascade for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputedVisibility {
    pub display_none: bool,
    /// `visibility` resolved against the parent; `None` means inherited.
    pub hidden: Option<bool>,
}

struct MatchedDeclaration<'a> {
    declaration: &'a Declaration,
    origin: Origin,
    inline: bool,
    specificity: Specificity,
    order: usize,
}

/// Cascade `display`/`visibility` for one element.
pub fn compute_visibility<T: ContentTree>(
    elem: &ElementRef<'_, T>,
    stylesheets: &[(Stylesheet, Origin)],
    inline: &[Declaration],
    caches: &mut SelectorCaches,
) -> ComputedVisibility {
    let mut matched: Vec<MatchedDeclaration<'_>> = Vec::new();
    let mut order = 0;

    for (sheet, origin) in stylesheets {
        for rule in &sheet.rules {
            if !matches_any(elem, &rule.selectors, caches) {
                continue;
            }
            for declaration in &rule.declarations {
                matched.push(MatchedDeclaration {
                    declaration,
                    origin: *origin,
                    inline: false,
                    specificity: rule.specificity,
                    order,
                });
                order += 1;
            }
        }
    }

    for declaration in inline {
        matched.push(MatchedDeclaration {
            declaration,
            origin: Origin::Author,
            inline: true,
            specificity: Specificity::default(),
            order,
        });
        order += 1;
    }

    // ascending precedence: the last declaration applied wins
    matched.sort_by(|a, b| {
        a.declaration
            .important
            .cmp(&b.declaration.important)
            .then(a.origin.cmp(&b.origin))
            .then(a.inline.cmp(&b.inline))
            .then(a.specificity.cmp(&b.specificity))
            .then(a.order.cmp(&b.order))
    });

    let mut computed = ComputedVisibility::default();
    for m in &matched {
        match (m.declaration.property, m.declaration.value) {
            (Property::Display, PropertyValue::DisplayNone) => computed.display_none = true,
            (Property::Display, _) => computed.display_none = false,
            (Property::Visibility, PropertyValue::Hidden) => computed.hidden = Some(true),
            (Property::Visibility, PropertyValue::InheritVisibility) => computed.hidden = None,
            (Property::Visibility, _) => computed.hidden = Some(false),
        }
    }
    computed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_and_visibility() {
        let sheet = Stylesheet::parse(
            ".ad { display: none; color: red } .ghost { visibility: hidden !important }",
        );

        assert_eq!(sheet.rules.len(), 2);
        let ad = &sheet.rules[0].declarations;
        assert_eq!(ad.len(), 1);
        assert_eq!(ad[0].property, Property::Display);
        assert_eq!(ad[0].value, PropertyValue::DisplayNone);

        let ghost = &sheet.rules[1].declarations[0];
        assert_eq!(ghost.value, PropertyValue::Hidden);
        assert!(ghost.important);
    }

    #[test]
    fn test_rules_without_relevant_properties_are_dropped() {
        let sheet = Stylesheet::parse("p { color: blue; margin: 0 }");
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_selector_lists_split_by_specificity() {
        let sheet = Stylesheet::parse("#top, .menu, li { display: none }");

        let specs: Vec<_> = sheet.rules.iter().map(|r| r.specificity).collect();
        assert_eq!(specs[0].ids, 1);
        assert_eq!(specs[1].classes, 1);
        assert_eq!(specs[2].elements, 1);
        assert!(specs[0] > specs[1] && specs[1] > specs[2]);
    }

    #[test]
    fn test_at_rules_and_garbage_are_ignored() {
        let sheet = Stylesheet::parse(
            "@media print { nav { display: none } } p:nth-of-type( { x } .x { display: none }",
        );
        assert!(!sheet.is_empty());
        assert!(sheet.rules.iter().all(|r| r.declarations[0].property == Property::Display));
    }

    #[test]
    fn test_inline_style() {
        let decls = parse_inline_style("color: red; DISPLAY: None; visibility: inherit");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, PropertyValue::DisplayNone);
        assert_eq!(decls[1].value, PropertyValue::InheritVisibility);
    }

    #[test]
    fn test_user_agent_sheet_parses() {
        let ua = Stylesheet::user_agent();
        assert_eq!(ua.rules.len(), 10);
    }
}
