//! Extraction settings.

use crate::error::{Error, Result};
use crate::extract::{Classifier, ContentRootLocator, DEFAULT_NAV_KEYWORDS, DEFAULT_ROOT_SELECTORS};

/// Settings for one extraction.
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes:
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use marksift::Options;
///
/// let options = Options::from_json(r#"{ "minTextLen": 20 }"#).unwrap();
/// assert_eq!(options.min_text_len, 20);
/// assert!(options.use_stylesheets);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Options {
    /// CSS selectors tried in order to find the content root.
    pub root_selectors: Vec<String>,
    /// Substrings of `class`/`id`/`role` that mark navigation.
    pub nav_keywords: Vec<String>,
    /// Drop every block inside `nav`/`header`/`footer`/`aside`, not just lists.
    pub suppress_chrome: bool,
    /// Drop blocks with fewer characters of normalized text. `0` disables.
    pub min_text_len: usize,
    /// Apply the page's `<style>` sheets when deciding visibility.
    pub use_stylesheets: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root_selectors: DEFAULT_ROOT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            nav_keywords: DEFAULT_NAV_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            suppress_chrome: false,
            min_text_len: 0,
            use_stylesheets: true,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content-root selectors.
    pub fn with_root_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Try `selector` before the existing root selectors.
    pub fn with_root_selector(mut self, selector: impl Into<String>) -> Self {
        self.root_selectors.insert(0, selector.into());
        self
    }

    pub fn with_nav_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.nav_keywords.push(keyword.into());
        self
    }

    pub fn with_suppress_chrome(mut self, suppress: bool) -> Self {
        self.suppress_chrome = suppress;
        self
    }

    pub fn with_min_text_len(mut self, len: usize) -> Self {
        self.min_text_len = len;
        self
    }

    pub fn with_stylesheets(mut self, enabled: bool) -> Self {
        self.use_stylesheets = enabled;
        self
    }

    /// Load options from JSON, filling missing keys with defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject settings that would silently misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.nav_keywords.iter().any(|k| k.trim().is_empty()) {
            // An empty keyword is a substring of every attribute.
            return Err(Error::Config("navigation keywords must not be empty".into()));
        }
        if self.root_selectors.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Config("root selectors must not be empty".into()));
        }
        Ok(())
    }

    /// Build the content-root locator for these options.
    pub fn locator(&self) -> Result<ContentRootLocator> {
        ContentRootLocator::new(self.root_selectors.as_slice())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.nav_keywords.as_slice()).with_suppress_chrome(self.suppress_chrome)
    }
}
