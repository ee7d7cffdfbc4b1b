//! Discovery of the hosting page's `<base href>`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// Anything able to answer "what does the first `<base>` element point at?".
pub trait BaseElementSource {
  /// The `href` attribute of the first `<base>` element, if that element has one.
  fn base_href(&self) -> Option<String>;
}

/// HTML text standing in for a live document.
///
/// Markup inside `<!-- -->` comments is skipped. Attribute values are returned exactly as
/// written: character references such as `&amp;` are not decoded.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
  text: String,
}

fn comment_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("invalid comment regex"))
}

fn base_tag_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"(?is)<base(?:\s([^>]*))?/?>").expect("invalid base tag regex")
  })
}

fn href_attribute_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r#"(?is)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
      .expect("invalid href attribute regex")
  })
}

impl HtmlDocument {
  /// Wrap HTML text.
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into() }
  }

  /// Read an HTML file from disk.
  pub fn from_path(path: &Path) -> Result<Self> {
    let text =
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Self::new(text))
  }
}

impl BaseElementSource for HtmlDocument {
  fn base_href(&self) -> Option<String> {
    let markup = comment_pattern().replace_all(&self.text, "");
    let attributes = base_tag_pattern().captures(&markup)?.get(1)?.as_str();
    let caps = href_attribute_pattern().captures(attributes)?;
    caps
      .get(1)
      .or_else(|| caps.get(2))
      .or_else(|| caps.get(3))
      .map(|value| value.as_str().to_string())
  }
}

/// The page-level base URL, fixed for the lifetime of whoever computed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseUri(String);

impl BaseUri {
  /// Compute the base URI from a document: the first `<base>` element's `href`, or an empty
  /// string when there is no such element or its `href` is missing or empty.
  pub fn from_document<S: BaseElementSource + ?Sized>(document: &S) -> Self {
    let href = document
      .base_href()
      .filter(|href| !href.is_empty())
      .unwrap_or_default();
    debug!(base_uri = %href, "resolved document base URI");
    Self(href)
  }

  /// Borrow the base URI text.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns `true` when the page declares no usable base.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl AsRef<str> for BaseUri {
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

impl fmt::Display for BaseUri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
