//! Minimal HTML escaping for values interpolated into fragments.

/// Escape `&`, `<`, `>`, `"` and `'` for safe interpolation into HTML text
/// and attribute values.
pub fn escape_html(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for ch in value.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      other => out.push(other),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_markup() {
    assert_eq!(
      escape_html(r#"<script>alert("x&y")</script>"#),
      "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
    );
  }

  #[test]
  fn plain_text_passes_through() {
    assert_eq!(escape_html("plain text"), "plain text");
  }
}
