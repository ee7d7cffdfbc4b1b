use super::slashes::{strip_left_slashes, strip_right_slashes};

/// A single, possibly missing, component of a path.
///
/// `None` and the empty string are both treated as absent and are skipped by
/// [`join_path_segments`].
pub trait PathSegment {
  /// Borrow the segment text, or `None` when the segment is absent.
  fn as_segment(&self) -> Option<&str>;
}

impl PathSegment for str {
  fn as_segment(&self) -> Option<&str> {
    Some(self)
  }
}

impl PathSegment for String {
  fn as_segment(&self) -> Option<&str> {
    Some(self.as_str())
  }
}

impl<T: PathSegment> PathSegment for Option<T> {
  fn as_segment(&self) -> Option<&str> {
    self.as_ref().and_then(|segment| segment.as_segment())
  }
}

impl<T: PathSegment + ?Sized> PathSegment for &T {
  fn as_segment(&self) -> Option<&str> {
    (**self).as_segment()
  }
}

/// Join path segments with a single `/`.
///
/// Absent segments are removed before anything else, so "the first segment" always refers to
/// the first segment that is actually present. That segment only loses its trailing slashes,
/// which keeps absolute paths (`/app`) and URL schemes intact; every later segment is trimmed
/// on both sides. Segments that end up empty after trimming are dropped.
pub fn join_path_segments<I>(segments: I) -> String
where
  I: IntoIterator,
  I::Item: PathSegment,
{
  let segments: Vec<I::Item> = segments.into_iter().collect();

  segments
    .iter()
    .filter_map(|segment| segment.as_segment())
    .filter(|segment| !segment.is_empty())
    .enumerate()
    .map(|(index, segment)| {
      if index == 0 {
        strip_right_slashes(segment)
      } else {
        strip_left_slashes(strip_right_slashes(segment))
      }
    })
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>()
    .join("/")
}

/// Variadic form of [`join_path_segments`].
///
/// Arguments may mix segment types (`&str`, `String`, `Option<&str>`, ...):
///
/// ```
/// use canvaskit_locator::join_path;
///
/// let revision: Option<&str> = None;
/// assert_eq!(join_path!("", "x", revision, String::from("/y/")), "x/y");
/// assert_eq!(join_path!(), "");
/// ```
#[macro_export]
macro_rules! join_path {
  () => {
    ::std::string::String::new()
  };
  ($($segment:expr),+ $(,)?) => {
    $crate::asset_paths::join_path_segments([
      $(&$segment as &dyn $crate::asset_paths::PathSegment),+
    ])
  };
}

#[cfg(test)]
mod tests {
  use super::join_path_segments;

  #[test]
  fn empty_input_yields_empty_path() {
    assert_eq!(join_path_segments(Vec::<&str>::new()), "");
    assert_eq!(join_path!(), "");
  }

  #[test]
  fn joins_plain_segments() {
    assert_eq!(join_path_segments(["a", "b", "c"]), "a/b/c");
  }

  #[test]
  fn preserves_leading_slash_of_first_segment_only() {
    assert_eq!(join_path_segments(["/a/", "/b/", "/c/"]), "/a/b/c");
  }

  #[test]
  fn drops_absent_segments_before_indexing() {
    assert_eq!(
      join_path_segments([Some(""), Some("x"), None, Some("y")]),
      "x/y"
    );
    assert_eq!(join_path_segments([None, Some("/x/"), Some("/y")]), "/x/y");
  }

  #[test]
  fn first_segment_is_chosen_before_slash_trimming() {
    // "///" is present, so it claims position 0 and then trims away entirely.
    assert_eq!(join_path_segments(["///", "/x/"]), "x");
  }

  #[test]
  fn joins_urls_without_touching_the_scheme() {
    assert_eq!(
      join_path_segments(["https://host.example", "path", "to/file"]),
      "https://host.example/path/to/file"
    );
    assert_eq!(
      join_path_segments(["https://host.example/", "/path/"]),
      "https://host.example/path"
    );
  }

  #[test]
  fn drops_segments_made_only_of_slashes() {
    assert_eq!(join_path_segments(["a", "///", "b"]), "a/b");
    assert_eq!(join_path_segments(["/", "/"]), "");
  }

  #[test]
  fn never_produces_trailing_or_doubled_separators() {
    let joined = join_path_segments(["/root//", "//mid//", "leaf/"]);
    assert_eq!(joined, "/root/mid/leaf");
    assert!(!joined.ends_with('/'));
  }

  #[test]
  fn accepts_owned_segments() {
    let revision = String::from("abc123/");
    assert_eq!(
      join_path_segments(vec![String::from("base"), revision]),
      "base/abc123"
    );
  }

  #[test]
  fn macro_accepts_mixed_segment_types() {
    let missing: Option<&str> = None;
    let owned = String::from("/y/");
    assert_eq!(join_path!("", "x", missing, owned), "x/y");
    assert_eq!(join_path!("/a/", Some("b"),), "/a/b");
  }
}
