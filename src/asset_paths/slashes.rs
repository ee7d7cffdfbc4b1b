/// Return the suffix of `value` that starts at the first character which is not `/`.
///
/// Inputs made only of slashes (and the empty string) produce an empty result.
pub fn strip_left_slashes(value: &str) -> &str {
  value.trim_start_matches('/')
}

/// Return the prefix of `value` that ends before its trailing run of `/` characters.
pub fn strip_right_slashes(value: &str) -> &str {
  value.trim_end_matches('/')
}
