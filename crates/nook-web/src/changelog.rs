//! Changelog panel rendering.

use nook_core::changelog::ChangelogEntry;

use crate::escape::escape_html;

/// Render loaded changelog entries as panels, or a placeholder when empty.
pub fn changelog_content(entries: &[ChangelogEntry]) -> String {
  if entries.is_empty() {
    return r#"<div class="panel"><p class="muted">No changelog entries yet.</p></div>"#.to_owned();
  }

  let mut out = String::from(r#"<h2 class="mb-md">changelog</h2>"#);
  for entry in entries {
    out.push_str(r#"<section class="panel mb-md">"#);

    if entry.version.is_empty() {
      out.push_str("<h3>Unversioned</h3>");
    } else {
      out.push_str(&format!("<h3>v{}</h3>", escape_html(&entry.version)));
    }

    if !entry.date.is_empty() {
      out.push_str(&format!(
        r#"<p class="muted">{}</p>"#,
        escape_html(&entry.date)
      ));
    }

    if !entry.changes.is_empty() {
      out.push_str(r#"<ul class="mt-sm">"#);
      for change in &entry.changes {
        out.push_str(&format!("<li>{}</li>", escape_html(change)));
      }
      out.push_str("</ul>");
    }

    out.push_str("</section>");
  }
  out
}

/// Panel shown when the changelog file cannot be read.
pub fn changelog_unavailable() -> String {
  r#"<div class="panel"><p class="muted">Changelog unavailable.</p></div>"#.to_owned()
}
