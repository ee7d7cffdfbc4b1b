use regex::Regex;

fn scheme_pattern() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?i)^[a-z][a-z0-9+.-]*:").expect("invalid scheme regex"))
}

/// Determine whether an asset reference is an absolute URL, unaffected by the page base URI.
///
/// Any reference that starts with a scheme (`https:`, `data:`, `blob:`, `mailto:`, ...) counts.
/// Root-relative and protocol-relative paths still take their origin or scheme from the base.
pub fn is_base_independent(reference: &str) -> bool {
  scheme_pattern().is_match(reference)
}

#[cfg(test)]
mod tests {
  use super::is_base_independent;

  #[test]
  fn absolute_urls_are_base_independent() {
    assert!(is_base_independent("https://www.gstatic.com/flutter-canvaskit"));
    assert!(is_base_independent("HTTP://example.com"));
    assert!(is_base_independent("chrome-extension://abc/page.html"));
  }

  #[test]
  fn schemes_without_authority_are_base_independent() {
    assert!(is_base_independent("data:application/wasm;base64,AGFzbQ=="));
    assert!(is_base_independent("blob:https://example.com/1234"));
    assert!(is_base_independent("mailto:team@example.com"));
    assert!(is_base_independent("about:blank"));
  }

  #[test]
  fn paths_depend_on_the_base() {
    assert!(!is_base_independent("/canvaskit"));
    assert!(!is_base_independent("//cdn.example.com/canvaskit"));
    assert!(!is_base_independent("canvaskit/canvaskit.js"));
    assert!(!is_base_independent("./main.dart.js"));
    assert!(!is_base_independent("1up:file"));
    assert!(!is_base_independent(""));
  }
}
