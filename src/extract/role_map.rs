//! Maps HTML tag names to the closed tag sets the renderers dispatch on.

/// Tags with block-level meaning for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticTag {
    /// Heading with level 1..=6.
    Heading(u8),
    Paragraph,
    Blockquote,
    CodeBlock,
    UnorderedList,
    OrderedList,
    Table,
    ListItem,
    TableRow,
    TableCell,
}

impl SemanticTag {
    pub fn from_tag_name(name: &str) -> Option<Self> {
        let tag = match name {
            "h1" => SemanticTag::Heading(1),
            "h2" => SemanticTag::Heading(2),
            "h3" => SemanticTag::Heading(3),
            "h4" => SemanticTag::Heading(4),
            "h5" => SemanticTag::Heading(5),
            "h6" => SemanticTag::Heading(6),
            "p" => SemanticTag::Paragraph,
            "blockquote" => SemanticTag::Blockquote,
            "pre" => SemanticTag::CodeBlock,
            "ul" => SemanticTag::UnorderedList,
            "ol" => SemanticTag::OrderedList,
            "table" => SemanticTag::Table,
            "li" => SemanticTag::ListItem,
            "tr" => SemanticTag::TableRow,
            "td" | "th" => SemanticTag::TableCell,
            _ => return None,
        };
        Some(tag)
    }

    /// Whether a node with this tag stands on its own as one Markdown block.
    pub fn is_block(self) -> bool {
        self.block_kind().is_some()
    }

    pub fn is_list(self) -> bool {
        matches!(self, SemanticTag::UnorderedList | SemanticTag::OrderedList)
    }

    /// The stats bucket a block of this tag is counted in.
    pub fn block_kind(self) -> Option<BlockKind> {
        match self {
            SemanticTag::Heading(_) => Some(BlockKind::Heading),
            SemanticTag::Paragraph => Some(BlockKind::Paragraph),
            SemanticTag::Blockquote => Some(BlockKind::Quote),
            SemanticTag::CodeBlock => Some(BlockKind::Code),
            SemanticTag::UnorderedList | SemanticTag::OrderedList => Some(BlockKind::List),
            SemanticTag::Table => Some(BlockKind::Table),
            SemanticTag::ListItem | SemanticTag::TableRow | SemanticTag::TableCell => None,
        }
    }
}

/// Kinds of emitted blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BlockKind {
    Heading,
    Paragraph,
    Quote,
    Code,
    List,
    Table,
}

/// Inline formatting tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineTag {
    Strong,
    Emphasis,
    Code,
    Link,
    Break,
    /// Anything else: rendered as its content.
    Other,
}

impl InlineTag {
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            "strong" | "b" => InlineTag::Strong,
            "em" | "i" => InlineTag::Emphasis,
            "code" | "kbd" | "samp" | "tt" => InlineTag::Code,
            "a" => InlineTag::Link,
            "br" => InlineTag::Break,
            _ => InlineTag::Other,
        }
    }
}

/// Elements that start a new line of text when flattened.
pub fn is_block_level(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "details"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "footer"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "tr"
            | "ul"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_tags() {
        assert_eq!(SemanticTag::from_tag_name("h3"), Some(SemanticTag::Heading(3)));
        assert_eq!(SemanticTag::from_tag_name("pre"), Some(SemanticTag::CodeBlock));
        assert_eq!(SemanticTag::from_tag_name("th"), Some(SemanticTag::TableCell));
        assert_eq!(SemanticTag::from_tag_name("div"), None);
        assert_eq!(SemanticTag::from_tag_name("h7"), None);
    }

    #[test]
    fn test_only_standalone_tags_are_blocks() {
        assert!(SemanticTag::Table.is_block());
        assert!(SemanticTag::OrderedList.is_block());
        assert!(!SemanticTag::ListItem.is_block());
        assert!(!SemanticTag::TableRow.is_block());
        assert!(!SemanticTag::TableCell.is_block());
    }

    #[test]
    fn test_inline_tags() {
        assert_eq!(InlineTag::from_tag_name("b"), InlineTag::Strong);
        assert_eq!(InlineTag::from_tag_name("i"), InlineTag::Emphasis);
        assert_eq!(InlineTag::from_tag_name("kbd"), InlineTag::Code);
        assert_eq!(InlineTag::from_tag_name("span"), InlineTag::Other);
    }
}
