//! WASM bindings for in-browser extraction.
//!
//! Exposes extraction to JavaScript via wasm-bindgen, for callers such as a
//! browser extension that already hold the page's HTML.

use wasm_bindgen::prelude::*;

use crate::Options;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Extract Markdown from an HTML string.
///
/// Returns `{ "markdown": string, "stats": { headings, paragraphs, codeBlocks,
/// lists, tables, quotes } }` as a JSON string.
#[wasm_bindgen]
pub fn extract(html: &str) -> Result<String, JsValue> {
    let result = crate::extract_html(html);
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`extract`], with options given as a JSON object string.
#[wasm_bindgen(js_name = extractWithOptions)]
pub fn extract_with_options(html: &str, options_json: &str) -> Result<String, JsValue> {
    let options = Options::from_json(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let result =
        crate::extract_html_with(html, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}
