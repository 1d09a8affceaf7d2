//! Semantic block nodes to Markdown blocks.
//!
//! Every renderer is total: content that does not make a meaningful block
//! renders as the empty string, which the walker drops.

use crate::markdown::{calculate_fence_length, escape_table_cell};
use crate::tree::{ContentTree, NodeKind};

use super::inline::{render_inline, render_inline_excluding};
use super::role_map::{SemanticTag, is_block_level};
use super::text::{normalize, normalized_text, visible_text};

/// Render one semantic node as a Markdown block.
pub fn render_block<T: ContentTree>(tree: &T, node: T::Node, tag: SemanticTag) -> String {
    match tag {
        SemanticTag::Heading(level) => render_heading(tree, node, level),
        SemanticTag::Paragraph => render_inline(tree, node),
        SemanticTag::Blockquote => render_blockquote(tree, node),
        SemanticTag::CodeBlock => render_code_block(tree, node),
        SemanticTag::UnorderedList => render_list(tree, node, false),
        SemanticTag::OrderedList => render_list(tree, node, true),
        SemanticTag::Table => render_table(tree, node),
        SemanticTag::ListItem | SemanticTag::TableRow | SemanticTag::TableCell => String::new(),
    }
}

pub fn render_heading<T: ContentTree>(tree: &T, node: T::Node, level: u8) -> String {
    let text = normalized_text(tree, node);
    if text.is_empty() {
        return String::new();
    }
    let level = level.clamp(1, 6) as usize;
    format!("{} {text}", "#".repeat(level))
}

/// `> `-prefixed lines, split at block-level children and `<br>`.
pub fn render_blockquote<T: ContentTree>(tree: &T, node: T::Node) -> String {
    let mut lines = QuoteLines::default();
    lines.collect(tree, node);
    lines.flush();
    lines
        .done
        .iter()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Default)]
struct QuoteLines {
    current: String,
    done: Vec<String>,
}

enum QuoteStep<N> {
    Visit(N),
    Flush,
}

impl QuoteLines {
    fn collect<T: ContentTree>(&mut self, tree: &T, node: T::Node) {
        let mut steps: Vec<QuoteStep<T::Node>> = Vec::new();
        push_quote_children(tree, node, &mut steps);
        while let Some(step) = steps.pop() {
            let child = match step {
                QuoteStep::Flush => {
                    self.flush();
                    continue;
                }
                QuoteStep::Visit(child) => child,
            };
            match tree.kind(child) {
                NodeKind::Text(text) => self.current.push_str(text),
                NodeKind::Other => {}
                NodeKind::Element(_) if !tree.is_visible(child) => {}
                NodeKind::Element("br") => self.flush(),
                NodeKind::Element(name) if is_block_level(name) => {
                    self.flush();
                    steps.push(QuoteStep::Flush);
                    push_quote_children(tree, child, &mut steps);
                }
                NodeKind::Element(_) => push_quote_children(tree, child, &mut steps),
            }
        }
    }

    fn flush(&mut self) {
        let line = normalize(&self.current);
        if !line.is_empty() {
            self.done.push(line);
        }
        self.current.clear();
    }
}

fn push_quote_children<T: ContentTree>(
    tree: &T,
    node: T::Node,
    steps: &mut Vec<QuoteStep<T::Node>>,
) {
    let mark = steps.len();
    steps.extend(tree.children(node).map(QuoteStep::Visit));
    steps[mark..].reverse();
}

/// A fenced block holding the verbatim text of the code element.
pub fn render_code_block<T: ContentTree>(tree: &T, node: T::Node) -> String {
    let code = tree
        .find_descendant(node, |n| tree.has_tag(n, "code"))
        .unwrap_or(node);
    let text = visible_text(tree, code);
    if text.trim().is_empty() {
        return String::new();
    }

    let lang = code_language(tree, code)
        .or_else(|| code_language(tree, node))
        .unwrap_or("");
    let fence = "`".repeat(calculate_fence_length(&text, '`'));
    let newline = if text.ends_with('\n') { "" } else { "\n" };
    format!("{fence}{lang}\n{text}{newline}{fence}")
}

/// Language from a `language-xxx` or `lang-xxx` class.
fn code_language<T: ContentTree>(tree: &T, node: T::Node) -> Option<&str> {
    tree.attr(node, "class")?
        .split_whitespace()
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .filter(|lang| !lang.is_empty())
}

enum ListStep<N> {
    Item {
        item: N,
        marker: String,
        indent: usize,
    },
    /// Drops the item's marker line when it turned out to have no content.
    End { mark: usize, bare: bool },
}

/// Bulleted or numbered items, with nested lists indented under their item.
///
/// Ordered items keep their position among the list's `li` children, so an
/// item dropped for being empty leaves a gap in the numbering.
pub fn render_list<T: ContentTree>(tree: &T, node: T::Node, ordered: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut steps = Vec::new();
    push_items(tree, node, ordered, 0, &mut steps);

    while let Some(step) = steps.pop() {
        let (item, marker, indent) = match step {
            ListStep::Item {
                item,
                marker,
                indent,
            } => (item, marker, indent),
            ListStep::End { mark, bare } => {
                if bare && lines.len() == mark + 1 {
                    lines.truncate(mark);
                }
                continue;
            }
        };

        let content = render_inline_excluding(tree, item, |n| is_list_tag(tree, n));
        let mark = lines.len();
        let inner = indent + marker.len();

        let mut content_lines = content.lines();
        let first = content_lines.next().unwrap_or("");
        let pad = " ".repeat(indent);
        lines.push(format!("{pad}{marker}{first}").trim_end().to_string());
        for line in content_lines {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{line}", " ".repeat(inner)));
            }
        }

        steps.push(ListStep::End {
            mark,
            bare: content.is_empty(),
        });
        for list in nested_lists(tree, item).into_iter().rev() {
            push_items(tree, list, tree.has_tag(list, "ol"), inner, &mut steps);
        }
    }

    lines.join("\n")
}

/// Queue the visible `li` children of `list` so the first pops first.
fn push_items<T: ContentTree>(
    tree: &T,
    list: T::Node,
    ordered: bool,
    indent: usize,
    steps: &mut Vec<ListStep<T::Node>>,
) {
    let mark = steps.len();
    let items = tree
        .element_children(list)
        .filter(|&child| tree.has_tag(child, "li"))
        .enumerate()
        .filter(|&(_, item)| tree.is_visible(item));
    for (index, item) in items {
        let marker = if ordered {
            format!("{}. ", index + 1)
        } else {
            "- ".to_string()
        };
        steps.push(ListStep::Item {
            item,
            marker,
            indent,
        });
    }
    steps[mark..].reverse();
}

fn is_list_tag<T: ContentTree>(tree: &T, node: T::Node) -> bool {
    matches!(tree.tag_name(node), Some("ul" | "ol"))
}

/// Visible lists inside `item` that are not inside another such list.
fn nested_lists<T: ContentTree>(tree: &T, item: T::Node) -> Vec<T::Node> {
    let mut found = Vec::new();
    let mut stack: Vec<T::Node> = tree.element_children(item).collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if !tree.is_visible(node) {
            continue;
        }
        if is_list_tag(tree, node) {
            found.push(node);
            continue;
        }
        let mark = stack.len();
        stack.extend(tree.element_children(node));
        stack[mark..].reverse();
    }
    found
}

/// A pipe table. A separator follows the first row when it has a `th`.
pub fn render_table<T: ContentTree>(tree: &T, node: T::Node) -> String {
    let mut lines = Vec::new();

    for row in table_rows(tree, node) {
        let cells: Vec<T::Node> = tree
            .element_children(row)
            .filter(|&c| matches!(tree.tag_name(c), Some("td" | "th")) && tree.is_visible(c))
            .collect();
        if cells.is_empty() {
            continue;
        }

        let texts: Vec<String> = cells
            .iter()
            .map(|&c| escape_table_cell(&normalized_text(tree, c)))
            .collect();
        lines.push(format!("| {} |", texts.join(" | ")));

        if lines.len() == 1 && cells.iter().any(|&c| tree.has_tag(c, "th")) {
            lines.push(format!("| {} |", vec!["---"; cells.len()].join(" | ")));
        }
    }

    lines.join("\n")
}

/// `tr` elements belonging to `table`, skipping nested tables.
fn table_rows<T: ContentTree>(tree: &T, table: T::Node) -> Vec<T::Node> {
    let mut rows = Vec::new();
    let mut stack: Vec<T::Node> = tree.element_children(table).collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if !tree.is_visible(node) {
            continue;
        }
        match tree.tag_name(node) {
            Some("table") => continue,
            Some("tr") => {
                rows.push(node);
                continue;
            }
            _ => {}
        }
        let mark = stack.len();
        stack.extend(tree.element_children(node));
        stack[mark..].reverse();
    }
    rows
}
