use std::fmt::Write;

use common::limits::{
    CAPTURE_JPEG_QUALITY, CAPTURE_MAX_DIMENSION, NAME_MAX_CHARS, PROMPT_MAX_CHARS,
    RESULT_MAX_CHARS,
};

use super::{csrf_field, escape, layout};
use crate::models::submission::{ImageAttachment, SubmissionRecord};

/// The feed page: submission form followed by the newest submissions.
pub fn feed_page(
    submissions: &[SubmissionRecord],
    workshop: Option<&str>,
    csrf_token: Option<&str>,
) -> String {
    let workshop_value = escape(workshop.unwrap_or_default());
    let csrf = csrf_field(csrf_token);

    let mut body = String::new();
    let _ = write!(
        body,
        r#"      <nav><a href="/">Feed</a> · <a href="/image-lab">Image lab</a></nav>
      <h1>Workshop Submissions</h1>
      <p>Submit your name, prompt, and result. Paste screenshots in the box or link an image; add <code>?w=TEAM</code> to the address to keep a group together.</p>

      <form class="stack" method="post" action="/submit">
        <input type="hidden" name="workshop" value="{workshop_value}" />
        {csrf}
        <input required maxlength="{NAME_MAX_CHARS}" name="name" placeholder="Name" />
        <textarea required maxlength="{PROMPT_MAX_CHARS}" name="prompt" placeholder="Prompt" rows="4"></textarea>
        <textarea required maxlength="{RESULT_MAX_CHARS}" name="result" placeholder="Result (paste model output)" rows="6"></textarea>

        <div class="two-col">
          <div>
            <div class="muted">Paste Screenshots</div>
            <div id="pastezone" class="pastezone" tabindex="0" data-max-dimension="{CAPTURE_MAX_DIMENSION}" data-quality="{CAPTURE_JPEG_QUALITY}">
              Click and press Ctrl+V/Cmd+V to paste an image, or drop image files here.
            </div>
            <div id="captures" class="captures"></div>
          </div>
          <div>
            <div class="muted">Image URL (optional)</div>
            <input name="image_url" placeholder="https://example.com/image.png" />
          </div>
        </div>

        <button type="submit">Submit</button>
      </form>
"#
    );

    let heading_suffix = workshop
        .filter(|w| !w.is_empty())
        .map(|w| format!(" ({})", escape(w)))
        .unwrap_or_default();
    let _ = write!(
        body,
        r#"
      <h2 style="margin-top:32px">Recent Submissions{heading_suffix}</h2>
      <div class="grid" style="margin-top:8px">
"#
    );

    if submissions.is_empty() {
        body.push_str("        <div>No submissions yet.</div>\n");
    }
    for submission in submissions {
        render_card(&mut body, submission, &workshop_value, &csrf);
    }

    body.push_str("      </div>\n      <script src=\"/static/capture.js\" defer></script>\n");

    layout("Workshop Submissions", &body)
}

fn render_card(out: &mut String, s: &SubmissionRecord, workshop_value: &str, csrf: &str) {
    let tag = s
        .workshop
        .as_deref()
        .map(|w| format!(" • {}", escape(w)))
        .unwrap_or_default();

    let _ = write!(
        out,
        r#"        <div class="card" id="submission-{id}">
          <div class="bar"></div>
          <div>
            <div class="topline">
              <span>{name}</span>
              <span class="meta">• {time}{tag}</span>
              <form method="post" action="/delete">
                <input type="hidden" name="id" value="{id}" />
                <input type="hidden" name="workshop" value="{workshop_value}" />
                {csrf}
                <button class="secondary" type="submit">Delete</button>
              </form>
            </div>

            <div style="margin-top:10px">
              <div class="muted">Prompt</div>
              <pre>{prompt}</pre>
            </div>

            <div style="margin-top:10px">
              <div class="muted">Result</div>
              <pre>{result}</pre>
            </div>
"#,
        id = s.id,
        name = escape(&s.name),
        time = s.display_time(),
        prompt = escape(&s.prompt),
        result = escape(&s.result),
    );

    for image in &s.images {
        render_image(out, image);
    }

    out.push_str("          </div>\n        </div>\n");
}

fn render_image(out: &mut String, image: &ImageAttachment) {
    let Some(src) = image.src() else {
        return;
    };
    let (label, alt) = if image.is_inline() {
        ("Screenshot", "pasted screenshot")
    } else {
        ("Image", "linked image")
    };
    let _ = write!(
        out,
        r#"            <div class="muted" style="margin-top:10px">{label}</div>
            <img src="{src}" alt="{alt}" class="thread-image" draggable="false" />
"#,
        src = escape(src),
    );
}
