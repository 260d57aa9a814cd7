//! Server-rendered pages. Deliberately plain: every page is a small HTML
//! document built from a shared layout, with interpolated values escaped.

use axum::response::Html;

use crate::types::Link;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Openly</title>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

pub fn index() -> Html<String> {
    layout(
        "Home",
        r#"<h1>Openly</h1>
<p>A small, self-hosted link shortener.</p>
<p><a href="/loginadmin">Admin login</a></p>"#,
    )
}

pub fn login() -> Html<String> {
    layout(
        "Login",
        r#"<h1>Admin login</h1>
<form method="post" action="/loginadmin">
<label for="password">Password</label>
<input type="password" id="password" name="password" autofocus required>
<button type="submit">Log in</button>
</form>"#,
    )
}

pub fn admin(links: &[Link]) -> Html<String> {
    let rows = if links.is_empty() {
        r#"<tr><td colspan="4">No links yet.</td></tr>"#.to_string()
    } else {
        links
            .iter()
            .map(|link| {
                let short_id = escape(&link.short_id);
                let long_url = escape(&link.long_url);
                format!(
                    r#"<tr><td><a href="/{short_id}">{short_id}</a></td><td>{long_url}</td><td>{created}</td><td><a href="/delete/{id}">Delete</a></td></tr>"#,
                    created = link.created_at.format("%Y-%m-%d %H:%M"),
                    id = link.id,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    layout(
        "Admin",
        &format!(
            r#"<h1>Links</h1>
<p><a href="/new">New link</a> | <a href="/logout">Log out</a></p>
<table>
<thead><tr><th>Short ID</th><th>Target</th><th>Created</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#
        ),
    )
}

pub fn new_link() -> Html<String> {
    layout(
        "New link",
        r#"<h1>New link</h1>
<form id="shorten" method="post" action="/shorten">
<label for="long_url">URL</label>
<input type="url" id="long_url" name="long_url" required>
<button type="submit">Shorten</button>
</form>
<p id="result"></p>
<p><a href="/admin">Back to links</a></p>
<script>
document.getElementById("shorten").addEventListener("submit", async (event) => {
  event.preventDefault();
  const response = await fetch("/shorten", {
    method: "POST",
    body: new URLSearchParams(new FormData(event.target)),
  });
  const body = await response.json();
  const result = document.getElementById("result");
  if (body.short_id) {
    const url = `${window.location.origin}/${body.short_id}`;
    result.innerHTML = "";
    const a = document.createElement("a");
    a.href = url;
    a.textContent = url;
    result.appendChild(a);
  } else {
    result.textContent = body.error || "Something went wrong";
  }
});
</script>"#,
    )
}

pub fn not_found() -> Html<String> {
    layout(
        "Not found",
        r#"<h1>404</h1>
<p>The page you are looking for does not exist.</p>
<p><a href="/">Home</a></p>"#,
    )
}

pub fn internal_error() -> Html<String> {
    layout(
        "Error",
        r#"<h1>500</h1>
<p>Something went wrong.</p>
<p><a href="/">Home</a></p>"#,
    )
}
