//! Server-side HTML rendering.
//!
//! Pages are assembled as plain strings; every value that originates from a
//! request or an upstream response goes through [`escape`].

pub mod home;
pub mod materials;
pub mod shipping;

use std::fmt::Write;
use url::form_urlencoded;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #111; }
nav { display: flex; gap: 1rem; padding: 1rem 1.25rem; border-bottom: 1px solid #ddd; }
nav a { color: inherit; text-decoration: none; font-weight: 600; }
main { padding: 1rem 1.25rem; }
.buttons { display: grid; grid-template-columns: repeat(auto-fill, minmax(11rem, 1fr)); gap: .5rem; margin-bottom: 1rem; }
.button { display: inline-block; padding: .4rem .8rem; border: 1px solid #333; border-radius: .375rem; color: inherit; text-decoration: none; text-align: center; }
.button.active { background: #111; color: #fff; }
.cards { display: flex; flex-wrap: wrap; }
.card { border: 1px solid #ddd; border-radius: .5rem; margin: .75rem; padding: 1.25rem; min-width: 18rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #eee; padding: .5rem; text-align: left; vertical-align: top; }
th a { color: inherit; text-decoration: none; }
td.active { background: #bbf7d0; }
.empty { height: 6rem; text-align: center; }
.then-by { font-size: .75rem; margin-left: .25rem; }
progress { width: 100%; }
"#;

const DEBOUNCE_SCRIPT: &str = r#"
document.querySelectorAll('input[data-debounce]').forEach(function (input) {
  var timer;
  input.addEventListener('input', function () {
    clearTimeout(timer);
    timer = setTimeout(function () { input.form.requestSubmit(); }, Number(input.dataset.debounce));
  });
});
"#;

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds `path?k=v&...`, skipping empty values.
pub fn link(path: &str, params: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if !value.is_empty() {
            query.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("{}?{}", path, query.finish())
    } else {
        path.to_string()
    }
}

pub fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Wraps `body` in the shared layout.
pub fn page(title: &str, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<nav>
<a href="/">Prun Tools</a>
<a href="/materials">Materials</a>
<a href="/stocks">Stocks</a>
<a href="/exchange/all">Exchange</a>
<a href="/shipping">Shipping</a>
</nav>
<main>
{body}
</main>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        body = body,
        script = DEBOUNCE_SCRIPT,
    );
    html
}

/// Error page body: `Something went wrong: 503 Service Unavailable`.
pub fn error_page(status: u16, reason: &str) -> String {
    page(
        "Prun Tools",
        &format!(
            "<div><p>Something went wrong: {} {}</p></div>",
            status,
            escape(reason)
        ),
    )
}
