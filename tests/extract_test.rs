//! End-to-end extraction tests over HTML fixtures.

use marksift::{
    ExtractionResult, Options, Stats, extract_html, extract_html_bytes, extract_html_with,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> String {
    format!("{}/{}", FIXTURES_DIR, name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

fn extract_fixture(name: &str) -> ExtractionResult {
    extract_html(&read_fixture(name))
}

// ============================================================================
// Full Documents
// ============================================================================

#[test]
fn test_article_fixture() {
    let result = extract_fixture("article.html");
    let expected = "\
## Field notes

The river was **high** this week, and the *herons* were back. See the [map](https://example.org/map).

> Rivers know this:
> there is no hurry.

### Sightings

1. Grey heron
2. Kingfisher
   - male
   - female

| Bird | Count |
| --- | --- |
| Heron | 3 |
| Kingfisher \\| blue | 1 |";
    assert_eq!(result.markdown, expected);
    assert_eq!(
        result.stats,
        Stats {
            headings: 2,
            paragraphs: 1,
            code_blocks: 0,
            lists: 1,
            tables: 1,
            quotes: 1,
        }
    );
}

#[test]
fn test_article_chrome_outside_main_is_ignored() {
    let result = extract_fixture("article.html");
    assert!(!result.markdown.contains("Example Site"));
    assert!(!result.markdown.contains("Home"));
    assert!(!result.markdown.contains("cookies"));
    assert!(!result.markdown.contains("Related post"));
    assert!(!result.markdown.contains("Printed from"));
}

#[test]
fn test_code_fixture() {
    let result = extract_fixture("code.html");
    let expected = "\
# Install

Run `make install`, then check the output:

```shell
$ make install
  cc -O2   main.c
  done
```

```
plain   text
\ttabbed
```

````
```
fenced inside
```
````";
    assert_eq!(result.markdown, expected);
    assert_eq!(result.stats.code_blocks, 3);
    assert_eq!(result.stats.paragraphs, 1);
}

#[test]
fn test_chrome_fixture_defaults() {
    let result = extract_fixture("chrome.html");
    assert_eq!(result.markdown, "Sponsored paragraph\n\nBody text.\n\n- Point");
    assert_eq!(result.stats.lists, 1);
}

#[test]
fn test_chrome_fixture_suppressed() {
    let options = Options::new().with_suppress_chrome(true);
    let result = extract_html_with(&read_fixture("chrome.html"), &options).unwrap();
    assert_eq!(result.markdown, "Body text.\n\n- Point");
}

#[test]
fn test_stylesheets_can_be_ignored() {
    let options = Options::new().with_stylesheets(false);
    let result = extract_html_with(&read_fixture("article.html"), &options).unwrap();
    assert!(result.markdown.contains("Printed from example.org"));
    // The banner is outside <main>, so it stays out either way.
    assert!(!result.markdown.contains("cookies"));
}

#[test]
fn test_windows_1252_bytes() {
    let bytes = std::fs::read(fixture_path("latin1.html")).unwrap();
    let result = extract_html_bytes(&bytes, &Options::default()).unwrap();
    assert_eq!(result.markdown, "Café crème");
}

// ============================================================================
// Block Shapes
// ============================================================================

#[test]
fn test_heading() {
    assert_eq!(extract_html("<h2>Title</h2>").markdown, "## Title");
}

#[test]
fn test_lists() {
    assert_eq!(extract_html("<ul><li>A</li><li>B</li></ul>").markdown, "- A\n- B");
    assert_eq!(extract_html("<ol><li>A</li><li>B</li></ol>").markdown, "1. A\n2. B");
}

#[test]
fn test_table_with_header() {
    let html = "<table><tr><th>H1</th><th>H2</th></tr><tr><td>a</td><td>b</td></tr></table>";
    assert_eq!(extract_html(html).markdown, "| H1 | H2 |\n| --- | --- |\n| a | b |");
}

#[test]
fn test_sidebar_widget_list_excluded() {
    let html = r#"<p>Text</p><div class="sidebar-widget"><ul><li>Link</li></ul></div>"#;
    let result = extract_html(html);
    assert_eq!(result.markdown, "Text");
    assert_eq!(result.stats.lists, 0);
}

#[test]
fn test_table_cell_pipe_escaped() {
    let result = extract_html("<table><tr><td>a | b</td></tr></table>");
    assert_eq!(result.markdown, "| a \\| b |");
}

#[test]
fn test_code_whitespace_preserved() {
    let code = "fn f() {\n\tlet  x =   1;\n\n    x\n}";
    let result = extract_html(&format!("<pre><code>{code}</code></pre>"));
    assert_eq!(result.markdown, format!("```\n{code}\n```"));
}

#[test]
fn test_empty_document() {
    let result = extract_html("");
    assert_eq!(result.markdown, "");
    assert_eq!(result.stats, Stats::default());
}

#[test]
fn test_extraction_is_repeatable() {
    let html = read_fixture("article.html");
    assert_eq!(extract_html(&html), extract_html(&html));
}

#[test]
fn test_invalid_options_error() {
    let options = Options::new().with_root_selectors(["main", "div > > p"]);
    let err = extract_html_with("<p>x</p>", &options).unwrap_err();
    assert!(err.to_string().contains("div > > p"));
}

#[test]
fn test_deeply_nested_inline_markup() {
    let depth = 20_000;
    let (open, close) = ("<span>".repeat(depth), "</span>".repeat(depth));

    let result = extract_html(&format!("<p>{open}x{close}</p>"));
    assert_eq!(result.markdown, "x");
    assert_eq!(result.stats.paragraphs, 1);

    let result = extract_html(&format!("<blockquote>{open}said{close}</blockquote>"));
    assert_eq!(result.markdown, "> said");
    assert_eq!(result.stats.quotes, 1);
}

#[test]
fn test_ordered_list_keeps_item_positions() {
    let result = extract_html("<ol><li>A</li><li></li><li>C</li></ol>");
    assert_eq!(result.markdown, "1. A\n3. C");
}
