//! Base page layout and login page.

use axum::response::Html;

use crate::escape::escape_html;

/// Per-app values threaded into every rendered page.
pub struct Shell<'a> {
  pub app_name:         &'a str,
  pub app_version:      &'a str,
  pub app_release_date: &'a str,
}

impl Shell<'_> {
  /// Wrap `content` (already-safe HTML) in the shared page chrome.
  pub fn page(&self, title: &str, username: Option<&str>, content: &str) -> Html<String> {
    let logout = if username.is_some() {
      r#"<form action="/logout" method="POST" class="logout-form">
                <button type="submit" title="Log out">&#x23FB;</button>
            </form>"#
    } else {
      ""
    };

    let footer = if self.app_version.is_empty() {
      String::new()
    } else {
      format!(
        r#"<footer class="muted"><a href="/changelog">v{}</a> &middot; {}</footer>"#,
        escape_html(self.app_version),
        escape_html(self.app_release_date),
      )
    };

    Html(format!(
      r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/custom.css">
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
</head>
<body>
    <div class="app">
        <header class="top-bar row space-between">
            <h1>{app_name}</h1>
            {logout}
        </header>
        <main class="content">
            {content}
        </main>
        {footer}
    </div>
</body>
</html>"#,
      title = escape_html(title),
      app_name = escape_html(self.app_name),
    ))
  }
}

/// The standalone login page. `error` is the decoded `?error=` query value.
pub fn login_page(app_name: &str, error: Option<&str>) -> Html<String> {
  let error_panel = match error {
    Some(message) if !message.is_empty() => format!(
      r#"<div class="panel mb-md"><p>{}</p></div>"#,
      escape_html(message)
    ),
    _ => String::new(),
  };

  Html(format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Login - {app_name}</title>
    <link rel="stylesheet" href="/custom.css">
</head>
<body>
    <div class="app">
        <header class="top-bar">
            <h1>{app_name}</h1>
        </header>
        <main class="content">
            <h2 class="mb-sm">Sign in</h2>
            <p class="muted mb-md">Use your account to continue.</p>
            {error_panel}
            <div class="panel">
                <form action="/login" method="POST">
                    <label for="username">Username</label>
                    <input id="username" name="username" type="text" required>
                    <div class="mt-md">
                        <label for="password">Password</label>
                        <input id="password" name="password" type="password" required>
                    </div>
                    <div class="mt-md">
                        <button type="submit" class="btn btn-pop">Sign in</button>
                    </div>
                </form>
            </div>
        </main>
    </div>
</body>
</html>"#,
    app_name = escape_html(app_name),
  ))
}
