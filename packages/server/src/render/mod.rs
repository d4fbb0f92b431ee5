//! Server-side HTML. Every function here is a pure mapping from data to
//! markup; all interpolated text goes through [`escape`].

mod feed;
mod image_lab;

use std::fmt::Write;

pub use feed::feed_page;
pub use image_lab::image_lab_page;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Hidden anti-forgery field, or nothing when protection is off.
fn csrf_field(token: Option<&str>) -> String {
    token
        .map(|t| format!(r#"<input type="hidden" name="csrf_token" value="{}" />"#, escape(t)))
        .unwrap_or_default()
}

const STYLE: &str = r#"
:root { --card-bg: #fff; --card-border: #e5e7eb; --muted: #6b7280; --ink: #111827; --bg: #f6f7f9; }
html, body { margin: 0; background: var(--bg); color: var(--ink); font-family: system-ui, Arial, sans-serif; }
.wrap { max-width: 840px; margin: 24px auto; padding: 0 16px; }
h1, h2 { margin: 0 0 12px; }
p { color: var(--muted); }
nav { margin-bottom: 16px; font-size: 14px; }
form.stack { display: grid; gap: 12px; margin-top: 12px; }
input, textarea, select { padding: 10px; font-size: 16px; width: 100%; box-sizing: border-box; border: 1px solid var(--card-border); border-radius: 6px; background: #fff; }
button { padding: 10px 14px; font-size: 16px; background: #111; color: #fff; border: 0; border-radius: 6px; cursor: pointer; }
button.secondary { background: #fff; color: #b91c1c; border: 1px solid #fecaca; font-size: 12px; padding: 4px 8px; }
.card { display: grid; grid-template-columns: 6px 1fr; gap: 12px; border: 1px solid var(--card-border); border-radius: 10px; background: var(--card-bg); padding: 12px; }
.bar { background: #e5e7eb; border-radius: 4px; }
.topline { font-weight: 600; display: flex; gap: 8px; align-items: center; }
.topline form { margin-left: auto; }
.meta { color: var(--muted); font-weight: 400; font-size: 12px; }
.muted { font-size: 12px; color: var(--muted); margin-bottom: 4px; }
.error { color: #b91c1c; }
pre { white-space: pre-wrap; margin: 0; }
.grid { display: grid; gap: 12px; }
img.thread-image { max-width: 100%; height: auto; display: block; margin-top: 8px; border-radius: 6px; }
.pastezone { border: 1px dashed #c7cdd4; border-radius: 8px; padding: 16px; color: var(--muted); background: #fbfcfe; }
.pastezone.focus { outline: 2px solid #4f46e5; outline-offset: 2px; }
.captures { display: grid; gap: 8px; margin-top: 8px; }
.two-col { display: grid; gap: 8px; }
@media (min-width: 720px) { .two-col { grid-template-columns: 1fr 1fr; } }
"#;

/// Wrap `body` in the shared document shell.
fn layout(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + STYLE.len() + 512);
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <style>{STYLE}</style>
  </head>
  <body>
    <div class="wrap">
{body}
    </div>
  </body>
</html>
"#,
        title = escape(title),
    );
    html
}
