use std::fmt::Write;

use common::limits::{GENERATION_MAX_COUNT, GENERATION_MIN_COUNT};

use super::{csrf_field, escape, layout};
use crate::gateway::GenerationOutcome;
use crate::models::image_lab::LabFormEcho;

const PROMPTS_SCRIPT: &str = r#"
      <script>
        document.getElementById('lab-form').addEventListener('submit', () => {
          const lines = document.getElementById('prompts').value
            .split('\n').map((l) => l.trim()).filter((l) => l.length > 0);
          document.getElementById('prompts_json').value = JSON.stringify(lines);
        });
      </script>
"#;

/// The image lab: generation form plus the outcomes of the last run.
pub fn image_lab_page(
    outcomes: &[GenerationOutcome],
    echo: &LabFormEcho,
    csrf_token: Option<&str>,
) -> String {
    let csrf = csrf_field(csrf_token);
    let prompts = escape(&echo.prompts.join("\n"));

    let mut options = String::new();
    for n in GENERATION_MIN_COUNT..=GENERATION_MAX_COUNT {
        let selected = if n == echo.count { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{n}"{selected}>{n}</option>"#);
    }

    let mut body = String::new();
    let _ = write!(
        body,
        r#"      <nav><a href="/">Feed</a> · <a href="/image-lab">Image lab</a></nav>
      <h1>Image Lab</h1>
      <p>One prompt per line. Each prompt is sent as many times as the count says; an optional reference image goes along with every request.</p>

      <form id="lab-form" class="stack" method="post" action="/image-lab/generate" enctype="multipart/form-data">
        {csrf}
        <input type="password" name="api_key" placeholder="API key (optional)" autocomplete="off" />
        <div class="two-col">
          <div>
            <div class="muted">Images per prompt</div>
            <select name="count">{options}</select>
          </div>
          <div>
            <div class="muted">Reference image (optional)</div>
            <input type="file" name="reference_image" accept="image/*" />
          </div>
        </div>
        <textarea id="prompts" name="prompts" rows="6" placeholder="A watercolor fox&#10;A neon city at night">{prompts}</textarea>
        <input type="hidden" id="prompts_json" name="prompts_json" />
        <button type="submit">Generate</button>
      </form>
"#
    );

    if !outcomes.is_empty() {
        body.push_str(
            "\n      <h2 style=\"margin-top:32px\">Results</h2>\n      <div class=\"grid\" style=\"margin-top:8px\">\n",
        );
        for outcome in outcomes {
            render_outcome(&mut body, outcome);
        }
        body.push_str("      </div>\n");
    }

    body.push_str(PROMPTS_SCRIPT);
    layout("Image Lab", &body)
}

fn render_outcome(out: &mut String, outcome: &GenerationOutcome) {
    let inner = match outcome {
        GenerationOutcome::Success { data_url, .. } => format!(
            r#"<img src="{}" alt="generated image" class="thread-image" />"#,
            escape(data_url)
        ),
        GenerationOutcome::Failure { error, .. } => {
            format!(r#"<div class="error">{}</div>"#, escape(error))
        }
    };
    let _ = write!(
        out,
        r#"        <div class="card">
          <div class="bar"></div>
          <div>
            <div class="muted">Prompt</div>
            <pre>{prompt}</pre>
            {inner}
          </div>
        </div>
"#,
        prompt = escape(outcome.prompt()),
    );
}
